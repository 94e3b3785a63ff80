//! Ordering engine.
//!
//! One canonical total order over packages, classes, and members, shared by
//! the renderer and the comparator so that emitted text and diff traversal
//! stay deterministic and stable release-over-release.
//!
//! Overload ordering comes in two modes (see
//! [`OverloadOrder`](crate::format::OverloadOrder)): `Source` keeps the
//! declaration order; `Signature` orders by arity, then pairwise parameter
//! type names. In both modes the final tiebreak is the original declaration
//! position (all sorts here are stable), which keeps the comparison total
//! even for generic signatures whose type names collide.

use std::cmp::Ordering;

use crate::format::{FileFormat, OverloadOrder};
use crate::model::{ClassItem, Codebase, MemberItem, Package, Parameter, TypeReference};

/// Packages order lexicographically by dotted name.
pub fn compare_packages(a: &Package, b: &Package) -> Ordering {
    a.name.cmp(&b.name)
}

/// Classes order lexicographically by package-relative name. Because `.`
/// sorts before every identifier character, nested classes land directly
/// after their enclosing class.
pub fn compare_classes(a: &ClassItem, b: &ClassItem) -> Ordering {
    a.name.cmp(&b.name)
}

/// Members order by kind group, then name, then the overload key.
pub fn compare_members(a: &MemberItem, b: &MemberItem, format: FileFormat) -> Ordering {
    a.kind()
        .cmp(&b.kind())
        .then_with(|| a.name().cmp(b.name()))
        .then_with(|| match format.overload_order {
            OverloadOrder::Source => Ordering::Equal,
            OverloadOrder::Signature => compare_overloads(a.parameters(), b.parameters()),
        })
}

/// Primary key: parameter count; tie-break: pairwise erased type names in
/// declaration position. Equal results fall back to declaration order via
/// stable sorting.
fn compare_overloads(a: &[Parameter], b: &[Parameter]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| {
        for (pa, pb) in a.iter().zip(b) {
            let ord = pa.erased_signature().cmp(&pb.erased_signature());
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    })
}

/// Packages of a codebase in canonical order.
pub fn sorted_packages(codebase: &Codebase) -> Vec<&Package> {
    let mut packages: Vec<_> = codebase.packages.values().collect();
    packages.sort_by(|a, b| compare_packages(a, b));
    packages
}

/// All classes of a package (nested included, flattened) in canonical order.
pub fn sorted_classes(package: &Package) -> Vec<&ClassItem> {
    let mut classes: Vec<_> = package.all_classes().collect();
    classes.sort_by(|a, b| compare_classes(a, b));
    classes
}

/// Members of a class in canonical order for the given format.
pub fn sorted_members(members: &[MemberItem], format: FileFormat) -> Vec<&MemberItem> {
    let mut sorted: Vec<_> = members.iter().collect();
    sorted.sort_by(|a, b| compare_members(a, b, format));
    sorted
}

/// The interface list to emit for a class: first-occurrence order with
/// duplicates dropped by default, fully lexicographic when the format asks
/// for a sorted extends list.
pub fn interface_list(class: &ClassItem, format: FileFormat) -> Vec<&TypeReference> {
    let mut list: Vec<&TypeReference> = Vec::new();
    for interface in &class.interfaces {
        if !list.iter().any(|i| i.name == interface.name) {
            list.push(interface);
        }
    }
    if format.sort_whole_extends_list {
        list.sort_by(|a, b| a.name.cmp(&b.name));
    }
    list
}
