//! Compatibility comparator.
//!
//! Walks an old ("released") and a new ("current") codebase in lock-step,
//! aligned by the ordering engine, and classifies every difference into an
//! [`Issue`]. The walk never fails on structurally valid input: problems
//! become issues, not errors, and the full diff always completes. Issue order
//! follows the traversal, so output is deterministic.

mod rules;

pub use rules::{Rule, Severity};

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tracing::debug;

use crate::model::{
    ClassItem, ClassKind, Codebase, MemberItem, MemberKind, Modifiers, Package, Parameter,
    TypeReference, Visibility,
};
use crate::order;

/// One classified difference between the released and current API surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub rule: Rule,
    pub severity: Severity,
    /// Fully qualified location (`pkg.Class.member(params)`).
    pub location: String,
    pub message: String,
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.severity.as_str(),
            self.location,
            self.rule.as_str(),
            self.message
        )
    }
}

/// Policy knobs for the comparator.
#[derive(Debug, Clone, Default)]
pub struct CompatConfig {
    /// Annotation type names whose presence/attributes are diffed strictly.
    /// Empty by default: annotation changes are compatible unless listed.
    pub relevant_annotations: FxHashSet<SmolStr>,
    /// Companion codebase of intentionally tracked removals; elements found
    /// here are not flagged as raw removals.
    pub removed: Option<Codebase>,
}

/// Diff two codebases and return the classified issues in traversal order.
pub fn check_compatibility(old: &Codebase, new: &Codebase, config: &CompatConfig) -> Vec<Issue> {
    debug!("checking API compatibility");
    let mut checker = Checker {
        config,
        issues: Vec::new(),
    };
    checker.check_codebases(old, new);
    checker.issues
}

/// True when any issue is error-severity; callers map this to exit codes.
pub fn has_errors(issues: &[Issue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

struct Checker<'a> {
    config: &'a CompatConfig,
    issues: Vec<Issue>,
}

impl Checker<'_> {
    fn push(&mut self, rule: Rule, location: impl Into<String>, message: impl Into<String>) {
        self.issues.push(Issue {
            rule,
            severity: rule.severity(),
            location: location.into(),
            message: message.into(),
        });
    }

    // =========================================================================
    // Codebase and package walk
    // =========================================================================

    fn check_codebases(&mut self, old: &Codebase, new: &Codebase) {
        let old_packages = order::sorted_packages(old);
        let new_packages = order::sorted_packages(new);

        merge_join(
            &old_packages,
            &new_packages,
            |p| p.name.clone(),
            |side| match side {
                Joined::OldOnly(pkg) => self.removed_package(pkg),
                Joined::NewOnly(_) => {} // pure addition
                Joined::Both(old_pkg, new_pkg) => self.check_packages(old, new, old_pkg, new_pkg),
            },
        );
    }

    fn removed_package(&mut self, package: &Package) {
        let classes: Vec<&ClassItem> = visible_classes(package);
        if classes.is_empty() {
            return;
        }
        // A tracked removal is checked against the removed-API companion
        // instead of flagged raw.
        if let Some(removed) = &self.config.removed {
            if removed.packages.contains_key(&package.name) {
                for class in classes {
                    let location = class.qualified_name(&package.name);
                    if removed.find_class(&location).is_none() {
                        self.push(
                            Rule::RemovedClass,
                            location.clone(),
                            format!("removed class {location}"),
                        );
                    }
                }
                return;
            }
        }
        self.push(
            Rule::RemovedPackage,
            package.name.to_string(),
            format!("removed package {}", package.name),
        );
    }

    fn check_packages(
        &mut self,
        old_codebase: &Codebase,
        new_codebase: &Codebase,
        old: &Package,
        new: &Package,
    ) {
        let old_classes = visible_classes(old);
        let new_classes = visible_classes(new);

        merge_join(
            &old_classes,
            &new_classes,
            |c| c.name.clone(),
            |side| match side {
                Joined::OldOnly(class) => {
                    let location = class.qualified_name(&old.name);
                    if !self.is_tracked_removal(&location) {
                        self.push(
                            Rule::RemovedClass,
                            location.clone(),
                            format!("removed class {location}"),
                        );
                    }
                }
                Joined::NewOnly(_) => {} // pure addition
                Joined::Both(old_class, new_class) => {
                    self.check_classes(old_codebase, new_codebase, old_class, new_class, &old.name);
                }
            },
        );
    }

    fn is_tracked_removal(&self, qualified: &str) -> bool {
        self.config
            .removed
            .as_ref()
            .is_some_and(|removed| removed.find_class(qualified).is_some())
    }

    // =========================================================================
    // Class diff
    // =========================================================================

    fn check_classes(
        &mut self,
        old_codebase: &Codebase,
        new_codebase: &Codebase,
        old: &ClassItem,
        new: &ClassItem,
        package: &str,
    ) {
        let location = old.qualified_name(package);

        if old.kind != new.kind {
            self.push(
                Rule::ChangedClassKind,
                location.clone(),
                format!(
                    "changed {} to {}",
                    old.kind.keyword(),
                    new.kind.keyword()
                ),
            );
        }
        self.check_visibility(&old.modifiers, &new.modifiers, &location);
        if old.modifiers.is_static != new.modifiers.is_static {
            self.push(
                Rule::ChangedStatic,
                location.clone(),
                format!(
                    "changed `static` qualifier on class {}",
                    old.simple_name()
                ),
            );
        }
        if !old.modifiers.is_abstract && new.modifiers.is_abstract {
            self.push(
                Rule::AddedAbstract,
                location.clone(),
                format!("class {} made abstract", old.simple_name()),
            );
        }
        let locked = |m: &Modifiers| m.is_final || m.is_sealed;
        if !locked(&old.modifiers) && locked(&new.modifiers) && old.is_extensible() {
            self.push(
                Rule::AddedFinal,
                location.clone(),
                format!("class {} can no longer be subclassed", old.simple_name()),
            );
        }
        if old.modifiers.is_deprecated != new.modifiers.is_deprecated {
            self.push(
                Rule::ChangedDeprecated,
                location.clone(),
                format!(
                    "class {} {} deprecated",
                    old.simple_name(),
                    if new.modifiers.is_deprecated {
                        "is now"
                    } else {
                        "is no longer"
                    }
                ),
            );
        }

        let old_super = old.super_class.as_ref().map(|s| s.name.as_str());
        let new_super = new.super_class.as_ref().map(|s| s.name.as_str());
        if old_super != new_super {
            self.push(
                Rule::ChangedSuperclass,
                location.clone(),
                format!(
                    "superclass changed from {} to {}",
                    old_super.unwrap_or("<none>"),
                    new_super.unwrap_or("<none>")
                ),
            );
        }

        for interface in &old.interfaces {
            if !new.interfaces.iter().any(|i| i.name == interface.name) {
                self.push(
                    Rule::ChangedInterfaces,
                    location.clone(),
                    format!("no longer implements {}", interface.name),
                );
            }
        }

        if old.type_params.len() != new.type_params.len() {
            self.push(
                Rule::ChangedType,
                location.clone(),
                format!(
                    "changed number of type parameters from {} to {}",
                    old.type_params.len(),
                    new.type_params.len()
                ),
            );
        }

        self.check_annotations(&old.annotations, &new.annotations, &location);
        self.check_members(old_codebase, new_codebase, old, new, &location);
    }

    // =========================================================================
    // Member diff
    // =========================================================================

    fn check_members(
        &mut self,
        old_codebase: &Codebase,
        new_codebase: &Codebase,
        old_class: &ClassItem,
        new_class: &ClassItem,
        class_location: &str,
    ) {
        let old_members = visible_members(old_class);
        let new_members = visible_members(new_class);

        merge_join(
            &old_members,
            &new_members,
            |m| {
                let (kind, name, params) = m.identity();
                (kind, name.to_string(), params)
            },
            |side| match side {
                Joined::OldOnly(member) => {
                    let location = member_location(class_location, member);
                    if !self.is_tracked_member_removal(class_location, member) {
                        let rule = match member.kind() {
                            MemberKind::Constructor | MemberKind::Method => Rule::RemovedMethod,
                            _ => Rule::RemovedField,
                        };
                        self.push(rule, location.clone(), format!("removed {location}"));
                    }
                }
                Joined::NewOnly(member) => {
                    self.check_added_member(new_class, member, class_location);
                }
                Joined::Both(old_member, new_member) => {
                    self.check_member_pair(
                        old_codebase,
                        new_codebase,
                        old_class,
                        new_class,
                        old_member,
                        new_member,
                        class_location,
                    );
                }
            },
        );
    }

    fn is_tracked_member_removal(&self, class_location: &str, member: &MemberItem) -> bool {
        let Some(removed) = &self.config.removed else {
            return false;
        };
        removed
            .find_class(class_location)
            .is_some_and(|class| class.members.iter().any(|m| m.identity() == member.identity()))
    }

    /// Additions are compatible except when they force work on existing
    /// subclasses or implementors.
    fn check_added_member(&mut self, class: &ClassItem, member: &MemberItem, class_location: &str) {
        let MemberItem::Method(method) = member else {
            return;
        };
        let breaking = if class.kind == ClassKind::Interface {
            !method.modifiers.is_default && !method.modifiers.is_static
        } else {
            method.modifiers.is_abstract && class.is_extensible()
        };
        if breaking {
            let location = member_location(class_location, member);
            self.push(
                Rule::AddedAbstractMethod,
                location.clone(),
                format!("added abstract method {location}"),
            );
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn check_member_pair(
        &mut self,
        old_codebase: &Codebase,
        new_codebase: &Codebase,
        old_class: &ClassItem,
        new_class: &ClassItem,
        old: &MemberItem,
        new: &MemberItem,
        class_location: &str,
    ) {
        let location = member_location(class_location, old);
        let old_mods = old.modifiers();
        let new_mods = new.modifiers();

        self.check_visibility(old_mods, new_mods, &location);
        if old_mods.is_static != new_mods.is_static {
            self.push(
                Rule::ChangedStatic,
                location.clone(),
                "changed `static` qualifier".to_string(),
            );
        }
        if !old_mods.is_abstract && new_mods.is_abstract {
            self.push(
                Rule::AddedAbstract,
                location.clone(),
                "made abstract".to_string(),
            );
        }
        // Effective finality folds in the enclosing class: a member of a
        // final class was never overridable.
        let old_final = old_mods.is_final || !old_class.is_extensible();
        let new_final = new_mods.is_final || !new_class.is_extensible();
        if !old_final && new_final && old.kind() == MemberKind::Method {
            self.push(
                Rule::AddedFinal,
                location.clone(),
                "made final, can no longer be overridden".to_string(),
            );
        }
        if old_mods.is_deprecated != new_mods.is_deprecated {
            self.push(
                Rule::ChangedDeprecated,
                location.clone(),
                format!(
                    "{} deprecated",
                    if new_mods.is_deprecated {
                        "is now"
                    } else {
                        "is no longer"
                    }
                ),
            );
        }

        self.check_throws(old_codebase, new_codebase, old, new, &location);

        match (old, new) {
            (MemberItem::Method(old_m), MemberItem::Method(new_m)) => {
                if !types_equal_modulo_nulls(&old_m.return_type, &new_m.return_type) {
                    self.push(
                        Rule::ChangedType,
                        location.clone(),
                        format!(
                            "return type changed from {} to {}",
                            old_m.return_type.erased_signature(),
                            new_m.return_type.erased_signature()
                        ),
                    );
                }
                self.check_null_conversion(
                    old_m.return_type.nullability,
                    new_m.return_type.nullability,
                    crate::model::Nullability::NonNull,
                    crate::model::Nullability::Nullable,
                    &location,
                    "return type became nullable",
                );
                self.check_parameters(&old_m.parameters, &new_m.parameters, &location);
                self.check_annotations(&old_m.annotations, &new_m.annotations, &location);
            }
            (MemberItem::Constructor(old_c), MemberItem::Constructor(new_c)) => {
                self.check_parameters(&old_c.parameters, &new_c.parameters, &location);
                self.check_annotations(&old_c.annotations, &new_c.annotations, &location);
            }
            (MemberItem::Field(old_f), MemberItem::Field(new_f)) => {
                if !types_equal_modulo_nulls(&old_f.ty, &new_f.ty) {
                    self.push(
                        Rule::ChangedType,
                        location.clone(),
                        format!(
                            "type changed from {} to {}",
                            old_f.ty.erased_signature(),
                            new_f.ty.erased_signature()
                        ),
                    );
                }
                if old_f.value != new_f.value {
                    // Callers may have inlined the constant at compile time.
                    self.push(
                        Rule::ChangedValue,
                        location.clone(),
                        format!(
                            "constant value changed from {} to {}",
                            old_f.value.as_deref().unwrap_or("<none>"),
                            new_f.value.as_deref().unwrap_or("<none>")
                        ),
                    );
                }
                self.check_annotations(&old_f.annotations, &new_f.annotations, &location);
            }
            (MemberItem::Property(old_p), MemberItem::Property(new_p)) => {
                if !types_equal_modulo_nulls(&old_p.ty, &new_p.ty) {
                    self.push(
                        Rule::ChangedType,
                        location.clone(),
                        format!(
                            "type changed from {} to {}",
                            old_p.ty.erased_signature(),
                            new_p.ty.erased_signature()
                        ),
                    );
                }
            }
            _ => {}
        }
    }

    fn check_parameters(&mut self, old: &[Parameter], new: &[Parameter], location: &str) {
        for (index, (old_p, new_p)) in old.iter().zip(new).enumerate() {
            if let (Some(old_name), Some(new_name)) = (&old_p.name, &new_p.name) {
                if old_name != new_name {
                    // Kotlin callers can pass arguments by name.
                    self.push(
                        Rule::ParameterNameChange,
                        location.to_string(),
                        format!(
                            "parameter {} renamed from {old_name} to {new_name}",
                            index + 1
                        ),
                    );
                }
            }
            if old_p.default_value.is_some() && new_p.default_value.is_none() {
                self.push(
                    Rule::ChangedDefaultValue,
                    location.to_string(),
                    format!("parameter {} no longer has a default value", index + 1),
                );
            }
            self.check_null_conversion(
                old_p.ty.nullability,
                new_p.ty.nullability,
                crate::model::Nullability::Nullable,
                crate::model::Nullability::NonNull,
                location,
                &format!("parameter {} became non-null", index + 1),
            );
        }
    }

    /// Flags exactly the `from → to` transition; anything involving
    /// platform/unspecified nullability is compatible.
    fn check_null_conversion(
        &mut self,
        old: crate::model::Nullability,
        new: crate::model::Nullability,
        from: crate::model::Nullability,
        to: crate::model::Nullability,
        location: &str,
        message: &str,
    ) {
        if old == from && new == to {
            self.push(
                Rule::InvalidNullConversion,
                location.to_string(),
                message.to_string(),
            );
        }
    }

    fn check_throws(
        &mut self,
        old_codebase: &Codebase,
        new_codebase: &Codebase,
        old: &MemberItem,
        new: &MemberItem,
        location: &str,
    ) {
        for thrown in old.throws() {
            let still_thrown = new.throws().iter().any(|t| t.name == thrown.name);
            if !still_thrown && !is_unchecked(old_codebase, &thrown.name) {
                self.push(
                    Rule::ChangedThrows,
                    location.to_string(),
                    format!("no longer throws {}", thrown.name),
                );
            }
        }
        for thrown in new.throws() {
            let was_thrown = old.throws().iter().any(|t| t.name == thrown.name);
            if !was_thrown && !is_unchecked(new_codebase, &thrown.name) {
                self.push(
                    Rule::ChangedThrows,
                    location.to_string(),
                    format!("added thrown exception {}", thrown.name),
                );
            }
        }
    }

    // =========================================================================
    // Shared checks
    // =========================================================================

    fn check_visibility(&mut self, old: &Modifiers, new: &Modifiers, location: &str) {
        if new.visibility < old.visibility {
            self.push(
                Rule::ChangedVisibility,
                location.to_string(),
                format!(
                    "visibility narrowed from {} to {}",
                    old.visibility.keyword().unwrap_or("package-private"),
                    new.visibility.keyword().unwrap_or("package-private"),
                ),
            );
        }
    }

    /// Only annotations the configuration marks compatibility-relevant are
    /// diffed; everything else may come and go freely.
    fn check_annotations(
        &mut self,
        old: &[crate::model::AnnotationItem],
        new: &[crate::model::AnnotationItem],
        location: &str,
    ) {
        for name in &self.config.relevant_annotations {
            let old_a = old.iter().find(|a| &a.name == name);
            let new_a = new.iter().find(|a| &a.name == name);
            if old_a != new_a {
                self.push(
                    Rule::ChangedAnnotation,
                    location.to_string(),
                    format!("changed @{name} annotation"),
                );
            }
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Visible classes of a package, nested included, in canonical order.
fn visible_classes(package: &Package) -> Vec<&ClassItem> {
    order::sorted_classes(package)
        .into_iter()
        .filter(|c| c.modifiers.visibility.is_visible())
        .collect()
}

/// Visible members in identity order so both sides align for the merge-join.
fn visible_members(class: &ClassItem) -> Vec<&MemberItem> {
    let mut members: Vec<&MemberItem> = class
        .members
        .iter()
        .filter(|m| {
            m.modifiers().visibility.is_visible()
                || (class.kind == ClassKind::Interface
                    && m.modifiers().visibility == Visibility::PackagePrivate)
        })
        .collect();
    members.sort_by_key(|m| {
        let (kind, name, params) = m.identity();
        (kind, name.to_string(), params)
    });
    members
}

fn member_location(class_location: &str, member: &MemberItem) -> String {
    match member.kind() {
        MemberKind::Constructor | MemberKind::Method => {
            let params: Vec<String> = member
                .parameters()
                .iter()
                .map(Parameter::erased_signature)
                .collect();
            format!("{class_location}.{}({})", member.name(), params.join(","))
        }
        _ => format!("{class_location}.{}", member.name()),
    }
}

/// Structural type equality for compatibility purposes: nullability and
/// type-use annotations are diffed by their own rules, not as type changes.
fn types_equal_modulo_nulls(a: &TypeReference, b: &TypeReference) -> bool {
    use crate::model::TypeArgument;
    if a.name != b.name || a.array_dims != b.array_dims || a.arguments.len() != b.arguments.len() {
        return false;
    }
    a.arguments.iter().zip(&b.arguments).all(|(x, y)| match (x, y) {
        (TypeArgument::Type(ta), TypeArgument::Type(tb)) => types_equal_modulo_nulls(ta, tb),
        (TypeArgument::Wildcard(None), TypeArgument::Wildcard(None)) => true,
        (TypeArgument::Wildcard(Some(ba)), TypeArgument::Wildcard(Some(bb))) => {
            ba.variance == bb.variance && types_equal_modulo_nulls(&ba.bound, &bb.bound)
        }
        _ => false,
    })
}

/// Whether the thrown type resolves to an unchecked exception within the
/// given codebase. Unresolvable types are conservatively treated as checked.
fn is_unchecked(codebase: &Codebase, name: &str) -> bool {
    const UNCHECKED_ROOTS: [&str; 2] = ["java.lang.RuntimeException", "java.lang.Error"];
    let mut current = name.to_string();
    for _ in 0..64 {
        if UNCHECKED_ROOTS.contains(&current.as_str()) {
            return true;
        }
        match codebase.find_class(&current).and_then(|c| c.super_class.as_ref()) {
            Some(super_ref) => current = super_ref.name.to_string(),
            None => return false,
        }
    }
    false
}

// =============================================================================
// Merge-join driver
// =============================================================================

enum Joined<'a, T> {
    OldOnly(&'a T),
    NewOnly(&'a T),
    Both(&'a T, &'a T),
}

/// Walk two key-sorted slices in lock-step, invoking the visitor with the
/// alignment of each element.
fn merge_join<'a, T, K: Ord>(
    old: &[&'a T],
    new: &[&'a T],
    key: impl Fn(&T) -> K,
    mut visit: impl FnMut(Joined<'a, T>),
) {
    let mut i = 0;
    let mut j = 0;
    while i < old.len() && j < new.len() {
        match key(old[i]).cmp(&key(new[j])) {
            std::cmp::Ordering::Less => {
                visit(Joined::OldOnly(old[i]));
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                visit(Joined::NewOnly(new[j]));
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                visit(Joined::Both(old[i], new[j]));
                i += 1;
                j += 1;
            }
        }
    }
    while i < old.len() {
        visit(Joined::OldOnly(old[i]));
        i += 1;
    }
    while j < new.len() {
        visit(Joined::NewOnly(new[j]));
        j += 1;
    }
}
