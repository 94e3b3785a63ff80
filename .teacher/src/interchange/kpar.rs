//! KPAR (Kernel Package Archive) format support.
//!
//! KPAR is a ZIP-based archive format for packaging SysML v2/KerML models
//! with metadata. It contains:
//!
//! - One or more XMI files containing the model
//! - A manifest file describing the package contents
//! - Optional additional resources (documentation, diagrams, etc.)
//!
//! ## KPAR Structure
//!
//! ```text
//! package.kpar (ZIP archive)
//! ├── META-INF/
//! │   └── manifest.xml       # Package manifest
//! ├── model/
//! │   ├── main.xmi           # Primary model file
//! │   └── library.xmi        # Referenced library
//! └── resources/
//!     └── readme.md          # Optional documentation
//! ```

use super::model::Model;
use super::{FormatCapability, InterchangeError, ModelFormat, Xmi};

/// Standard paths within a KPAR archive.
pub mod paths {
    /// Manifest file location.
    pub const MANIFEST: &str = "META-INF/manifest.xml";
    /// Model directory.
    pub const MODEL_DIR: &str = "model/";
}

/// KPAR format handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Kpar;

impl ModelFormat for Kpar {
    fn name(&self) -> &'static str {
        "KPAR"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["kpar"]
    }

    fn mime_type(&self) -> &'static str {
        "application/kpar"
    }

    fn capabilities(&self) -> FormatCapability {
        FormatCapability::FULL
    }

    fn read(&self, input: &[u8]) -> Result<Model, InterchangeError> {
        #[cfg(feature = "interchange")]
        {
            KparReader::new().read(input)
        }
        #[cfg(not(feature = "interchange"))]
        {
            let _ = input;
            Err(InterchangeError::Unsupported(
                "KPAR reading requires the 'interchange' feature".to_string(),
            ))
        }
    }

    fn write(&self, model: &Model) -> Result<Vec<u8>, InterchangeError> {
        #[cfg(feature = "interchange")]
        {
            KparWriter::new().write(model)
        }
        #[cfg(not(feature = "interchange"))]
        {
            let _ = model;
            Err(InterchangeError::Unsupported(
                "KPAR writing requires the 'interchange' feature".to_string(),
            ))
        }
    }

    fn validate(&self, input: &[u8]) -> Result<(), InterchangeError> {
        // Quick check for ZIP magic number
        if input.len() < 4 {
            return Err(InterchangeError::archive("File too small"));
        }

        // ZIP files start with PK\x03\x04
        if &input[0..4] != b"PK\x03\x04" {
            return Err(InterchangeError::archive("Not a valid ZIP archive"));
        }

        Ok(())
    }
}

// ============================================================================
// KPAR READER (requires interchange feature)
// ============================================================================

#[cfg(feature = "interchange")]
mod reader {
    use super::*;
    use std::io::{Cursor, Read};
    use zip::ZipArchive;

    /// KPAR archive reader.
    pub struct KparReader {
        /// The XMI format handler.
        xmi: Xmi,
    }

    impl KparReader {
        pub fn new() -> Self {
            Self { xmi: Xmi }
        }

        pub fn read(&self, input: &[u8]) -> Result<Model, InterchangeError> {
            let cursor = Cursor::new(input);
            let mut archive = ZipArchive::new(cursor)
                .map_err(|e| InterchangeError::archive(format!("Failed to open archive: {e}")))?;

            let mut combined_model = Model::new();

            // Find and parse all XMI files in the model/ directory
            let xmi_files: Vec<String> = (0..archive.len())
                .filter_map(|i| {
                    let file = archive.by_index(i).ok()?;
                    let name = file.name().to_string();
                    if name.starts_with(paths::MODEL_DIR) && name.ends_with(".xmi") {
                        Some(name)
                    } else {
                        None
                    }
                })
                .collect();

            // Parse each XMI file
            for xmi_path in xmi_files {
                let mut file = archive.by_name(&xmi_path).map_err(|e| {
                    InterchangeError::archive(format!("Failed to read {xmi_path}: {e}"))
                })?;

                let mut xmi_content = Vec::new();
                file.read_to_end(&mut xmi_content).map_err(|e| {
                    InterchangeError::archive(format!("Failed to read {xmi_path}: {e}"))
                })?;

                // Parse XMI and merge into combined model
                let model = self.xmi.read(&xmi_content)?;
                merge_models(&mut combined_model, model);
            }

            Ok(combined_model)
        }
    }

    /// Merge source model into target model.
    fn merge_models(target: &mut Model, source: Model) {
        // Add all elements from source
        for (id, element) in source.elements {
            if !target.elements.contains_key(&id) {
                target.elements.insert(id, element);
            }
        }

        // Add all relationships from source
        for rel in source.relationships {
            target.relationships.push(rel);
        }

        // Merge roots (avoid duplicates)
        for root in source.roots {
            if !target.roots.contains(&root) {
                target.roots.push(root);
            }
        }
    }
}

#[cfg(feature = "interchange")]
use reader::KparReader;

// ============================================================================
// KPAR WRITER (requires interchange feature)
// ============================================================================

#[cfg(feature = "interchange")]
mod writer {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    /// KPAR archive writer.
    pub struct KparWriter {
        /// The XMI format handler.
        xmi: Xmi,
    }

    impl KparWriter {
        pub fn new() -> Self {
            Self { xmi: Xmi }
        }

        pub fn write(&self, model: &Model) -> Result<Vec<u8>, InterchangeError> {
            let mut buffer = Cursor::new(Vec::new());
            let mut zip = ZipWriter::new(&mut buffer);

            let options =
                SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

            // Write manifest
            let manifest = generate_manifest(model);
            zip.start_file(paths::MANIFEST, options).map_err(|e| {
                InterchangeError::archive(format!("Failed to create manifest: {e}"))
            })?;
            zip.write_all(manifest.as_bytes())
                .map_err(|e| InterchangeError::archive(format!("Failed to write manifest: {e}")))?;

            // Write model as XMI
            let xmi_content = self.xmi.write(model)?;
            zip.start_file(format!("{}main.xmi", paths::MODEL_DIR), options)
                .map_err(|e| {
                    InterchangeError::archive(format!("Failed to create XMI file: {e}"))
                })?;
            zip.write_all(&xmi_content)
                .map_err(|e| InterchangeError::archive(format!("Failed to write XMI: {e}")))?;

            // Finish the archive
            zip.finish().map_err(|e| {
                InterchangeError::archive(format!("Failed to finalize archive: {e}"))
            })?;

            Ok(buffer.into_inner())
        }
    }

    /// Generate a simple manifest XML for the model.
    fn generate_manifest(model: &Model) -> String {
        let name = model.metadata.name.as_deref().unwrap_or("unnamed");
        let version = model.metadata.version.as_deref().unwrap_or("1.0.0");

        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest xmlns="http://www.omg.org/spec/SysML/20230201/kpar">
  <package name="{name}" version="{version}">
    <model-files>
      <file>model/main.xmi</file>
    </model-files>
  </package>
</manifest>
"#
        )
    }
}

#[cfg(feature = "interchange")]
use writer::KparWriter;

// Stub implementations when feature is disabled
#[cfg(not(feature = "interchange"))]
struct KparReader;

#[cfg(not(feature = "interchange"))]
impl KparReader {
    fn new() -> Self {
        Self
    }

    fn read(&self, _input: &[u8]) -> Result<Model, InterchangeError> {
        Err(InterchangeError::Unsupported(
            "KPAR reading requires the 'interchange' feature".to_string(),
        ))
    }
}

#[cfg(not(feature = "interchange"))]
struct KparWriter;

#[cfg(not(feature = "interchange"))]
impl KparWriter {
    fn new() -> Self {
        Self
    }

    fn write(&self, _model: &Model) -> Result<Vec<u8>, InterchangeError> {
        Err(InterchangeError::Unsupported(
            "KPAR writing requires the 'interchange' feature".to_string(),
        ))
    }
}

/// Manifest information for a KPAR archive.
#[derive(Debug, Clone)]
pub struct KparManifest {
    /// Package name.
    pub name: String,
    /// Package version.
    pub version: Option<String>,
    /// Package description.
    pub description: Option<String>,
    /// List of model files.
    pub model_files: Vec<String>,
    /// Dependencies on other packages.
    pub dependencies: Vec<KparDependency>,
}

/// A dependency reference in a KPAR manifest.
#[derive(Debug, Clone)]
pub struct KparDependency {
    /// Dependency name.
    pub name: String,
    /// Required version (semver).
    pub version: Option<String>,
    /// URI to fetch the dependency.
    pub uri: Option<String>,
}

impl KparManifest {
    /// Create a new manifest with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            description: None,
            model_files: Vec::new(),
            dependencies: Vec::new(),
        }
    }
}
