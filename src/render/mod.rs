//! Canonical text rendering.
//!
//! Renders a [`Codebase`] to signature text under a [`FileFormat`],
//! deterministically: packages and classes in ordering-engine order, members
//! grouped by kind, every modifier at a fixed position. Formatting the result
//! of parsing previously formatted text reproduces it byte for byte.
//!
//! Hidden (non-public, non-protected) classes are omitted, as are packages
//! left with no visible classes.

use tracing::debug;

use crate::format::{FileFormat, NullabilityStyle};
use crate::model::{
    AnnotationItem, ClassItem, ClassKind, Codebase, DefaultValue, MemberItem, Modifiers,
    Package, Parameter, TypeArgument, TypeParameter, TypeReference, Variance, Visibility,
};
use crate::order;

/// Render a codebase to signature text.
///
/// # Panics
///
/// Panics when handed a [`FileFormat`] whose flag combination no dialect
/// defines; the parser can never produce one, so this is a programming error
/// in the caller.
pub fn render_signature(codebase: &Codebase, format: FileFormat) -> String {
    if let Err(reason) = format.validate() {
        panic!("unsupported signature format combination: {reason}");
    }
    debug!(%format, "rendering signature text");

    let mut out = String::new();
    if let Some(header) = format.header() {
        out.push_str(&header);
        out.push('\n');
    }

    let blocks: Vec<String> = order::sorted_packages(codebase)
        .into_iter()
        .filter_map(|pkg| render_package(pkg, format))
        .collect();
    out.push_str(&blocks.join("\n"));
    out
}

fn render_package(package: &Package, format: FileFormat) -> Option<String> {
    let classes: Vec<&ClassItem> = order::sorted_classes(package)
        .into_iter()
        .filter(|c| c.modifiers.visibility.is_visible())
        .collect();
    if classes.is_empty() {
        return None;
    }

    let mut block = String::from("package ");
    for annotation in &package.annotations {
        block.push_str(&render_annotation(annotation));
        block.push(' ');
    }
    block.push_str(&package.name);
    block.push_str(" {\n");
    for class in classes {
        block.push('\n');
        render_class(&mut block, class, format);
    }
    block.push_str("\n}\n");
    Some(block)
}

fn render_class(out: &mut String, class: &ClassItem, format: FileFormat) {
    out.push_str("  ");
    for annotation in &class.annotations {
        out.push_str(&render_annotation(annotation));
        out.push(' ');
    }
    out.push_str(&class_modifiers(class));
    out.push_str(class.kind.keyword());
    out.push(' ');
    out.push_str(&class.name);
    out.push_str(&render_type_params(&class.type_params, format));

    if let Some(super_class) = &class.super_class {
        if !super_class.is_java_lang_object() {
            out.push_str(" extends ");
            out.push_str(&render_type(super_class, format));
        }
    }
    let interfaces = order::interface_list(class, format);
    if !interfaces.is_empty() {
        // Interfaces hang off `extends` for interface kinds, `implements`
        // otherwise, matching the source language's surface.
        out.push_str(if class.kind == ClassKind::Interface {
            " extends "
        } else {
            " implements "
        });
        let separator = if format.major >= 3 { ", " } else { " " };
        let rendered: Vec<String> = interfaces
            .iter()
            .map(|i| render_type(i, format))
            .collect();
        out.push_str(&rendered.join(separator));
    }
    out.push_str(" {\n");

    for member in order::sorted_members(&class.members, format) {
        if !member_is_rendered(member, class) {
            continue;
        }
        render_member(out, member, class, format);
    }
    out.push_str("  }\n");
}

fn member_is_rendered(member: &MemberItem, class: &ClassItem) -> bool {
    let visibility = member.modifiers().visibility;
    visibility.is_visible()
        || (class.kind == ClassKind::Interface && visibility == Visibility::PackagePrivate)
}

fn render_member(out: &mut String, member: &MemberItem, class: &ClassItem, format: FileFormat) {
    out.push_str("    ");
    out.push_str(member.kind().keyword());
    out.push(' ');

    match member {
        MemberItem::Constructor(ctor) => {
            push_annotations(out, &ctor.annotations);
            out.push_str(&member_modifiers(&ctor.modifiers, class));
            push_member_type_params(out, &ctor.type_params, format);
            out.push_str(&ctor.name);
            render_params(out, &ctor.parameters, format);
            render_throws(out, &ctor.throws, format);
            out.push_str(";\n");
        }
        MemberItem::Method(method) => {
            push_annotations(out, &method.annotations);
            out.push_str(&member_modifiers(&method.modifiers, class));
            push_member_type_params(out, &method.type_params, format);
            if format.kotlin_name_type_order {
                out.push_str(&method.name);
                render_params(out, &method.parameters, format);
                out.push_str(": ");
                out.push_str(&render_type(&method.return_type, format));
                render_throws(out, &method.throws, format);
            } else {
                out.push_str(&render_type(&method.return_type, format));
                out.push(' ');
                out.push_str(&method.name);
                render_params(out, &method.parameters, format);
                render_throws(out, &method.throws, format);
            }
            out.push_str(";\n");
        }
        MemberItem::Field(field) => {
            push_annotations(out, &field.annotations);
            out.push_str(&member_modifiers(&field.modifiers, class));
            if format.kotlin_name_type_order {
                out.push_str(&field.name);
                out.push_str(": ");
                out.push_str(&render_type(&field.ty, format));
            } else {
                out.push_str(&render_type(&field.ty, format));
                out.push(' ');
                out.push_str(&field.name);
            }
            if let Some(value) = &field.value {
                out.push_str(" = ");
                out.push_str(value);
            }
            out.push(';');
            if let Some(value) = &field.value {
                if let Some(hex) = hex_comment(&field.ty, value) {
                    out.push_str(" // ");
                    out.push_str(&hex);
                }
            }
            out.push('\n');
        }
        MemberItem::Property(property) => {
            push_annotations(out, &property.annotations);
            out.push_str(&member_modifiers(&property.modifiers, class));
            if format.kotlin_name_type_order {
                out.push_str(&property.name);
                out.push_str(": ");
                out.push_str(&render_type(&property.ty, format));
            } else {
                out.push_str(&render_type(&property.ty, format));
                out.push(' ');
                out.push_str(&property.name);
            }
            out.push_str(";\n");
        }
        MemberItem::EnumConstant(constant) => {
            push_annotations(out, &constant.annotations);
            out.push_str(&member_modifiers(&constant.modifiers, class));
            if format.kotlin_name_type_order {
                out.push_str(&constant.name);
                out.push_str(": ");
                out.push_str(&render_type(&constant.ty, format));
            } else {
                out.push_str(&render_type(&constant.ty, format));
                out.push(' ');
                out.push_str(&constant.name);
            }
            out.push_str(";\n");
        }
    }
}

// =============================================================================
// Modifiers
// =============================================================================

/// Class modifier sequence with redundancy elision: interfaces drop
/// `abstract`, implicitly final kinds drop `final`.
fn class_modifiers(class: &ClassItem) -> String {
    let m = &class.modifiers;
    let mut parts: Vec<&str> = Vec::new();
    if let Some(kw) = m.visibility.keyword() {
        parts.push(kw);
    }
    if m.is_static {
        parts.push("static");
    }
    if m.is_abstract && class.kind != ClassKind::Interface {
        parts.push("abstract");
    }
    if m.is_final && !class.kind.is_implicitly_final() {
        parts.push("final");
    }
    if m.is_sealed {
        parts.push("sealed");
    }
    if m.is_deprecated {
        parts.push("deprecated");
    }
    join_with_trailing_space(&parts)
}

/// Member modifier sequence. Interface members promote default visibility to
/// `public` and drop the implicit `abstract`; members of final classes drop
/// the redundant `final`.
fn member_modifiers(modifiers: &Modifiers, class: &ClassItem) -> String {
    let in_interface = class.kind == ClassKind::Interface;
    let mut parts: Vec<&str> = Vec::new();

    let visibility = if in_interface && modifiers.visibility == Visibility::PackagePrivate {
        Visibility::Public
    } else {
        modifiers.visibility
    };
    if let Some(kw) = visibility.keyword() {
        parts.push(kw);
    }
    if modifiers.is_static {
        parts.push("static");
    }
    if modifiers.is_abstract && !in_interface {
        parts.push("abstract");
    }
    if modifiers.is_final && !class.modifiers.is_final {
        parts.push("final");
    }
    if modifiers.is_default {
        parts.push("default");
    }
    if modifiers.is_sealed {
        parts.push("sealed");
    }
    if modifiers.is_transient {
        parts.push("transient");
    }
    if modifiers.is_volatile {
        parts.push("volatile");
    }
    if modifiers.is_deprecated {
        parts.push("deprecated");
    }
    join_with_trailing_space(&parts)
}

fn join_with_trailing_space(parts: &[&str]) -> String {
    let mut s = parts.join(" ");
    if !s.is_empty() {
        s.push(' ');
    }
    s
}

// =============================================================================
// Types and annotations
// =============================================================================

fn render_type(ty: &TypeReference, format: FileFormat) -> String {
    let mut s = String::new();
    if format.include_type_use_annotations {
        for annotation in &ty.annotations {
            s.push_str(&render_annotation(annotation));
            s.push(' ');
        }
    }
    s.push_str(&ty.name);
    if !ty.arguments.is_empty() {
        s.push('<');
        let args: Vec<String> = ty
            .arguments
            .iter()
            .map(|a| render_type_argument(a, format))
            .collect();
        s.push_str(&args.join(", "));
        s.push('>');
    }
    for _ in 0..ty.array_dims {
        s.push_str("[]");
    }
    if format.nullability == NullabilityStyle::Suffix {
        s.push_str(ty.nullability.suffix());
    }
    s
}

fn render_type_argument(arg: &TypeArgument, format: FileFormat) -> String {
    match arg {
        TypeArgument::Type(ty) => render_type(ty, format),
        TypeArgument::Wildcard(None) => "?".to_string(),
        TypeArgument::Wildcard(Some(bound)) => {
            let keyword = match bound.variance {
                Variance::Extends => "extends",
                Variance::Super => "super",
            };
            format!("? {keyword} {}", render_type(&bound.bound, format))
        }
    }
}

/// `<T, U extends A & B>`; empty when there are no parameters. A sole
/// `java.lang.Object` bound is implicit and omitted.
fn render_type_params(params: &[TypeParameter], format: FileFormat) -> String {
    if params.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = params
        .iter()
        .map(|p| {
            let trivial = p.bounds.len() == 1 && p.bounds[0].is_java_lang_object();
            if p.bounds.is_empty() || trivial {
                p.name.to_string()
            } else {
                let bounds: Vec<String> =
                    p.bounds.iter().map(|b| render_type(b, format)).collect();
                format!("{} extends {}", p.name, bounds.join(" & "))
            }
        })
        .collect();
    format!("<{}>", rendered.join(", "))
}

/// Type parameters in member-prefix position (`<T> T get(int)`).
fn push_member_type_params(out: &mut String, params: &[TypeParameter], format: FileFormat) {
    let rendered = render_type_params(params, format);
    if !rendered.is_empty() {
        out.push_str(&rendered);
        out.push(' ');
    }
}

fn render_annotation(annotation: &AnnotationItem) -> String {
    let mut s = format!("@{}", annotation.name);
    if annotation.attributes.is_empty() {
        return s;
    }
    s.push('(');
    if annotation.attributes.len() == 1 && annotation.attributes[0].0 == "value" {
        s.push_str(&annotation.attributes[0].1);
    } else {
        let attrs: Vec<String> = annotation
            .attributes
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        s.push_str(&attrs.join(", "));
    }
    s.push(')');
    s
}

fn push_annotations(out: &mut String, annotations: &[AnnotationItem]) {
    for annotation in annotations {
        out.push_str(&render_annotation(annotation));
        out.push(' ');
    }
}

// =============================================================================
// Parameters
// =============================================================================

fn render_params(out: &mut String, params: &[Parameter], format: FileFormat) {
    out.push('(');
    let rendered: Vec<String> = params.iter().map(|p| render_param(p, format)).collect();
    out.push_str(&rendered.join(", "));
    out.push(')');
}

fn render_param(param: &Parameter, format: FileFormat) -> String {
    let mut s = String::new();
    // The `optional` marker stands in for the literal under the concise
    // dialect, and for any default whose text did not survive a previous
    // concise round trip.
    let concise = match &param.default_value {
        Some(DefaultValue::Unstated) => true,
        Some(DefaultValue::Literal(_)) => format.concise_default_values,
        None => false,
    };
    if concise {
        s.push_str("optional ");
    }

    let mut ty = render_type(&param.ty, format);
    if param.is_vararg {
        ty.push_str("...");
    }

    if format.kotlin_name_type_order {
        s.push_str(param.name.as_deref().unwrap_or("_"));
        s.push_str(": ");
        s.push_str(&ty);
    } else {
        s.push_str(&ty);
        if let Some(name) = &param.name {
            s.push(' ');
            s.push_str(name);
        }
    }

    if !concise {
        if let Some(DefaultValue::Literal(literal)) = &param.default_value {
            s.push_str(" = ");
            s.push_str(literal);
        }
    }
    s
}

fn render_throws(out: &mut String, throws: &[TypeReference], format: FileFormat) {
    if throws.is_empty() {
        return;
    }
    out.push_str(" throws ");
    let rendered: Vec<String> = throws.iter().map(|t| render_type(t, format)).collect();
    out.push_str(&rendered.join(", "));
}

// =============================================================================
// Constant hex comments
// =============================================================================

/// Trailing hex comment for integral constants (`= 16; // 0x10`).
///
/// Int-width types print the 32-bit two's complement pattern, longs the
/// 64-bit one, chars the code point. Values the renderer cannot read as
/// literals get no comment.
fn hex_comment(ty: &TypeReference, value: &str) -> Option<String> {
    if !ty.wants_hex_comment() {
        return None;
    }
    let text = value.trim();
    if ty.name == "char" {
        let c = parse_char_literal(text)?;
        return Some(format!("0x{:x}", c as u32));
    }
    let number = parse_integer_literal(text)?;
    let hex = if ty.name == "long" {
        format!("0x{:x}", number as u64)
    } else {
        format!("0x{:x}", number as i32 as u32)
    };
    Some(hex)
}

fn parse_integer_literal(text: &str) -> Option<i64> {
    let text = text.trim_end_matches(['L', 'l']);
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let magnitude = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16).ok()?
    } else {
        digits.parse::<i64>().ok()?
    };
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_char_literal(text: &str) -> Option<char> {
    let inner = text.strip_prefix('\'')?.strip_suffix('\'')?;
    let mut chars = inner.chars();
    let first = chars.next()?;
    if first != '\\' {
        return chars.next().is_none().then_some(first);
    }
    let escaped = chars.next()?;
    let c = match escaped {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        '\'' => '\'',
        '\\' => '\\',
        'u' => {
            let code: String = chars.by_ref().take(4).collect();
            return char::from_u32(u32::from_str_radix(&code, 16).ok()?);
        }
        _ => return None,
    };
    chars.next().is_none().then_some(c)
}
