//! Effective API surface computation.
//!
//! A class's published surface includes inherited members only when the
//! defining ancestor is itself excluded from the API (package-private or
//! otherwise hidden): the ancestor cannot be referenced from a signature
//! file, so its visible members are copied ("inlined") into each visible
//! descendant and the `extends` reference is re-pointed past it. Ancestors
//! that are part of the API are never inlined; rendering relies on the
//! `extends`/`implements` reference instead.

use rustc_hash::FxHashMap;

use super::{ClassItem, Codebase, MemberItem, Package};

/// Copy visible members of hidden ancestors into visible descendants and
/// re-point `extends` at the nearest non-hidden ancestor.
///
/// Builds a new codebase; the input is untouched. Classes that are
/// themselves hidden are left as-is (callers typically follow with
/// [`prune_hidden`]).
pub fn inline_hidden_supers(codebase: &Codebase) -> Codebase {
    let hidden = collect_hidden(codebase);

    let mut result = codebase.clone();
    for pkg in result.packages.values_mut() {
        for class in pkg.classes.values_mut() {
            inline_class(class, &hidden);
        }
    }
    result
}

/// Drop hidden classes and packages left with no classes at all.
pub fn prune_hidden(codebase: &Codebase) -> Codebase {
    let mut result = Codebase::new(codebase.format);
    for (pkg_name, pkg) in &codebase.packages {
        let mut pruned = Package::new(pkg.name.clone());
        pruned.annotations = pkg.annotations.clone();
        for (key, class) in &pkg.classes {
            if let Some(kept) = prune_class(class) {
                pruned.classes.insert(key.clone(), kept);
            }
        }
        if !pruned.classes.is_empty() {
            result.packages.insert(pkg_name.clone(), pruned);
        }
    }
    result
}

fn prune_class(class: &ClassItem) -> Option<ClassItem> {
    if !class.modifiers.visibility.is_visible() {
        return None;
    }
    let mut kept = class.clone();
    kept.nested = class.nested.iter().filter_map(prune_class).collect();
    Some(kept)
}

/// Hidden classes by qualified name, cloned out so inlining can look them up
/// while mutating the result tree.
fn collect_hidden(codebase: &Codebase) -> FxHashMap<String, ClassItem> {
    let mut hidden = FxHashMap::default();
    for (pkg_name, pkg) in &codebase.packages {
        for class in pkg.all_classes() {
            if !class.modifiers.visibility.is_visible() {
                hidden.insert(class.qualified_name(pkg_name), class.clone());
            }
        }
    }
    hidden
}

fn inline_class(class: &mut ClassItem, hidden: &FxHashMap<String, ClassItem>) {
    for nested in &mut class.nested {
        inline_class(nested, hidden);
    }
    if !class.modifiers.visibility.is_visible() {
        return;
    }

    let mut identities: Vec<_> = class
        .members
        .iter()
        .map(|m| owned_identity(m))
        .collect();

    // Walk the extends chain through hidden ancestors, inlining as we go.
    let mut current = class.super_class.clone();
    while let Some(super_ref) = current {
        let Some(ancestor) = hidden.get(super_ref.name.as_str()) else {
            // Visible in this codebase, or external: stop and keep the edge.
            class.super_class = Some(super_ref);
            return;
        };
        for member in &ancestor.members {
            // Constructors are not inherited; overridden signatures stay put.
            if member.kind() == super::MemberKind::Constructor {
                continue;
            }
            if !member.modifiers().visibility.is_visible() {
                continue;
            }
            let id = owned_identity(member);
            if identities.contains(&id) {
                continue;
            }
            identities.push(id);
            class.members.push(member.clone());
        }
        for interface in &ancestor.interfaces {
            if !class.interfaces.iter().any(|i| i.name == interface.name) {
                class.interfaces.push(interface.clone());
            }
        }
        current = ancestor.super_class.clone();
    }
    class.super_class = None;
}

fn owned_identity(member: &MemberItem) -> (super::MemberKind, String, String) {
    let (kind, name, params) = member.identity();
    (kind, name.to_string(), params)
}
