//! Merge and subtract of partial codebases.
//!
//! Large API surfaces are authored as fragments; the merge engine unions
//! them with last-fragment-wins override semantics per declaration, and the
//! subtract engine removes one surface from another by name + erased
//! signature. Both build fresh codebases and never mutate an input.

use tracing::debug;

use crate::format::{FileFormat, OverloadOrder};
use crate::model::{ClassItem, Codebase, MemberItem, Package};
use crate::order;

/// Union N fragments, "most specific last": a declaration appearing in
/// several fragments takes its attributes from the last one, but keeps the
/// list position the first one gave it. Genuinely new members are inserted
/// at their ordering-engine position so fragment arrival order cannot change
/// the rendered output.
pub fn merge(fragments: &[Codebase]) -> Codebase {
    debug!(count = fragments.len(), "merging signature fragments");
    let Some((first, rest)) = fragments.split_first() else {
        return Codebase::new(FileFormat::default());
    };
    let mut result = first.clone();
    for fragment in rest {
        merge_into(&mut result, fragment);
    }
    result
}

fn merge_into(result: &mut Codebase, fragment: &Codebase) {
    let format = result.format;
    for (name, package) in &fragment.packages {
        let Some(existing) = result.packages.get_mut(name) else {
            result.packages.insert(name.clone(), package.clone());
            continue;
        };
        if !package.annotations.is_empty() {
            existing.annotations = package.annotations.clone();
        }
        for (class_name, class) in &package.classes {
            match existing.classes.get_mut(class_name) {
                Some(slot) => merge_class(slot, class, format),
                None => {
                    existing.classes.insert(class_name.clone(), class.clone());
                }
            }
        }
    }
}

fn merge_class(existing: &mut ClassItem, incoming: &ClassItem, format: FileFormat) {
    // The later fragment's declaration wins wholesale for the header.
    existing.kind = incoming.kind;
    existing.modifiers = incoming.modifiers;
    existing.annotations = incoming.annotations.clone();
    existing.type_params = incoming.type_params.clone();
    existing.super_class = incoming.super_class.clone();
    existing.interfaces = incoming.interfaces.clone();

    for member in &incoming.members {
        merge_member(&mut existing.members, member, format);
    }
    for nested in &incoming.nested {
        match existing.nested.iter_mut().find(|c| c.name == nested.name) {
            Some(slot) => merge_class(slot, nested, format),
            None => existing.nested.push(nested.clone()),
        }
    }
}

fn merge_member(members: &mut Vec<MemberItem>, incoming: &MemberItem, format: FileFormat) {
    if let Some(slot) = members
        .iter_mut()
        .find(|m| m.identity() == incoming.identity())
    {
        // Override in place: the earlier fragment's position is kept.
        *slot = incoming.clone();
        return;
    }
    // Insertion always uses signature overload order, even when the format
    // renders in source order: under source order two overloads compare
    // equal, and appending would let fragment arrival order leak into the
    // merged declaration list.
    let insertion_format = format.with_overload_order(OverloadOrder::Signature);
    let index = members
        .iter()
        .position(|m| {
            order::compare_members(m, incoming, insertion_format) == std::cmp::Ordering::Greater
        })
        .unwrap_or(members.len());
    members.insert(index, incoming.clone());
}

/// Remove the subtrahend's surface from `base`.
///
/// Matching is by qualified name + erased parameter signature, never full
/// attribute equality: a member is removed even when its modifiers differ
/// between the two sides. A subtrahend class that declares no members (and
/// no nested classes) removes the whole class; one that lists members
/// removes exactly those. Packages left without classes are dropped.
pub fn subtract(base: &Codebase, removal: &Codebase) -> Codebase {
    debug!("subtracting signature surface");
    let mut result = base.clone();
    for (name, removal_pkg) in &removal.packages {
        let Some(package) = result.packages.get_mut(name) else {
            continue;
        };
        subtract_package(package, removal_pkg);
    }
    result.packages.retain(|_, p| !p.classes.is_empty());
    result
}

fn subtract_package(package: &mut Package, removal: &Package) {
    let mut dropped: Vec<smol_str::SmolStr> = Vec::new();
    for (name, class) in package.classes.iter_mut() {
        if let Some(removal_class) = removal.classes.get(name) {
            if subtract_class(class, removal_class) {
                dropped.push(name.clone());
            }
        }
    }
    for name in dropped {
        package.classes.shift_remove(&name);
    }
}

/// Returns `true` when the whole class should be removed.
fn subtract_class(class: &mut ClassItem, removal: &ClassItem) -> bool {
    if removal.members.is_empty() && removal.nested.is_empty() {
        return true;
    }
    class.members.retain(|member| {
        !removal
            .members
            .iter()
            .any(|r| r.identity() == member.identity())
    });
    class.nested.retain_mut(|nested| {
        match removal.nested.iter().find(|r| r.name == nested.name) {
            Some(removal_nested) => !subtract_class(nested, removal_nested),
            None => true,
        }
    });
    false
}
