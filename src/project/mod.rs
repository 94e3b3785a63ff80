//! Project boundary: loading signature files from disk.
//!
//! This is the only module that touches the filesystem. Each file is an
//! independent fragment; loading N files parses them in parallel (each parse
//! is a pure function over its own text) and merges the results in path
//! order, so later files override earlier ones per the merge engine's
//! semantics. The first parse error aborts the whole load.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::debug;

use crate::merge;
use crate::model::Codebase;
use crate::parser::{ParseError, parse_signature};

/// Read and parse a single signature file.
pub fn read_signature_file(path: &Path) -> Result<Codebase, ParseError> {
    let file = path.display().to_string();
    debug!(%file, "reading signature file");
    let text = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        file: file.clone(),
        source,
    })?;
    parse_signature(&file, &text)
}

/// Load a codebase from one or more fragment files, merged in path order
/// ("most specific last" wins).
pub fn load_codebase(paths: &[PathBuf]) -> Result<Codebase, ParseError> {
    let fragments: Vec<Codebase> = paths
        .par_iter()
        .map(|path| read_signature_file(path))
        .collect::<Result<_, _>>()?;
    Ok(merge::merge(&fragments))
}

/// Load the removed-API companion file for the comparator.
pub fn load_removed_api(path: &Path) -> Result<Codebase, ParseError> {
    read_signature_file(path)
}
