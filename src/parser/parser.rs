//! Recursive descent parser for signature text.
//!
//! Builds the [`Codebase`] model directly from tokens; there is no
//! intermediate syntax tree because the grammar is line-oriented and
//! unambiguous. Any grammar violation aborts the parse with a located
//! [`ParseError`].

use smol_str::SmolStr;
use text_size::TextSize;
use tracing::debug;

use super::error::ParseError;
use super::lexer::{SigToken, Token, tokenize};
use crate::base::LineIndex;
use crate::format::{FileFormat, NullabilityStyle};
use crate::model::{
    AnnotationItem, ClassItem, ClassKind, Codebase, Constructor, DefaultValue, EnumConstant,
    Field, MemberItem, Method, Modifiers, Nullability, Package, Parameter, Property,
    TypeArgument, TypeParameter, TypeReference, Variance, Visibility, WildcardBound,
};

/// Parse one signature fragment, detecting the format from the header line.
///
/// A missing header implies the legacy v1 dialect.
pub fn parse_signature(file: &str, text: &str) -> Result<Codebase, ParseError> {
    let format = detect_format(file, text, None)?;
    parse_fragment(file, text, format)
}

/// Parse one signature fragment under a caller-chosen format.
///
/// A header in the text still decides the dialect when it names a different
/// major version; when the majors agree, the caller's feature flags win
/// (headers only encode `major.minor`, not flags).
pub fn parse_signature_with_format(
    file: &str,
    text: &str,
    format: FileFormat,
) -> Result<Codebase, ParseError> {
    let format = detect_format(file, text, Some(format))?;
    parse_fragment(file, text, format)
}

fn detect_format(
    file: &str,
    text: &str,
    fallback: Option<FileFormat>,
) -> Result<FileFormat, ParseError> {
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        return match FileFormat::parse_header(line) {
            Some(Ok(detected)) => Ok(match fallback {
                Some(fb) if fb.major == detected.major => fb,
                _ => detected,
            }),
            Some(Err(unsupported)) => Err(ParseError::UnknownFormat {
                file: file.to_string(),
                line: idx as u32 + 1,
                version: unsupported.version,
            }),
            None => Ok(fallback.unwrap_or_else(FileFormat::v1)),
        };
    }
    Ok(fallback.unwrap_or_else(FileFormat::v1))
}

fn parse_fragment(file: &str, text: &str, format: FileFormat) -> Result<Codebase, ParseError> {
    debug!(file, %format, "parsing signature fragment");
    let tokens = tokenize(text);
    let mut parser = Parser {
        file,
        text,
        tokens,
        pos: 0,
        line_index: LineIndex::new(text),
        format,
    };
    parser.parse_codebase()
}

/// The parser state.
struct Parser<'a> {
    file: &'a str,
    text: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
    line_index: LineIndex,
    format: FileFormat,
}

impl<'a> Parser<'a> {
    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> Option<SigToken> {
        self.current().map(|t| t.kind)
    }

    fn at(&self, kind: SigToken) -> bool {
        self.current_kind() == Some(kind)
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn at_ident_like(&self) -> bool {
        self.current_kind().is_some_and(SigToken::is_ident_like)
    }

    /// Kind of the nth non-trivia token ahead (0 = current).
    fn nth(&self, n: usize) -> Option<SigToken> {
        self.tokens[self.pos..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
            .map(|t| t.kind)
    }

    fn current_offset(&self) -> TextSize {
        self.current()
            .map(|t| t.offset)
            .unwrap_or_else(|| TextSize::of(self.text))
    }

    fn current_line(&self) -> u32 {
        self.line_index.line(self.current_offset())
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    /// Advance exactly one token, trivia included.
    fn bump_raw(&mut self) {
        self.pos += 1;
    }

    /// Advance past the current non-trivia token, then past trailing trivia.
    fn bump(&mut self) -> Token<'a> {
        let token = self.tokens[self.pos];
        self.pos += 1;
        self.skip_trivia();
        token
    }

    fn skip_trivia(&mut self) {
        while self
            .current_kind()
            .is_some_and(SigToken::is_trivia)
        {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SigToken) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SigToken, what: &str) -> Result<Token<'a>, ParseError> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.error(format!("expected {what}, found {}", self.found())))
        }
    }

    fn found(&self) -> String {
        match self.current() {
            Some(t) => format!("`{}`", t.text),
            None => "end of file".to_string(),
        }
    }

    // =========================================================================
    // Error construction
    // =========================================================================

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            file: self.file.to_string(),
            line: self.current_line(),
            message: message.into(),
        }
    }

    fn conflict(&self, name: &str, line: u32) -> ParseError {
        ParseError::ConflictingDuplicate {
            file: self.file.to_string(),
            line,
            name: name.to_string(),
        }
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// One identifier segment; keywords are accepted as names.
    fn ident(&mut self, what: &str) -> Result<&'a str, ParseError> {
        if self.at_ident_like() {
            Ok(self.bump().text)
        } else {
            Err(self.error(format!("expected {what}, found {}", self.found())))
        }
    }

    /// Dotted qualified name (`java.lang.String`, `Outer.Inner`).
    fn qualified_name(&mut self, what: &str) -> Result<SmolStr, ParseError> {
        let mut name = String::from(self.ident(what)?);
        while self.at(SigToken::Dot) && self.nth(1).is_some_and(SigToken::is_ident_like) {
            self.bump();
            name.push('.');
            name.push_str(self.ident(what)?);
        }
        Ok(SmolStr::new(name))
    }

    // =========================================================================
    // Top level
    // =========================================================================

    fn parse_codebase(&mut self) -> Result<Codebase, ParseError> {
        let mut codebase = Codebase::new(self.format);
        self.skip_trivia();
        while !self.at_eof() {
            self.expect(SigToken::PackageKw, "`package`")?;
            self.parse_package(&mut codebase)?;
        }
        Ok(codebase)
    }

    fn parse_package(&mut self, codebase: &mut Codebase) -> Result<(), ParseError> {
        let annotations = self.parse_annotations()?;
        let name = self.qualified_name("package name")?;
        self.expect(SigToken::LBrace, "`{`")?;

        let package = codebase
            .packages
            .entry(name.clone())
            .or_insert_with(|| Package::new(name));
        if package.annotations.is_empty() {
            package.annotations = annotations;
        }

        while !self.at(SigToken::RBrace) {
            if self.at_eof() {
                return Err(self.error("unexpected end of file inside package block"));
            }
            self.parse_class(package)?;
        }
        self.expect(SigToken::RBrace, "`}`")?;
        Ok(())
    }

    // =========================================================================
    // Classes
    // =========================================================================

    fn parse_class(&mut self, package: &mut Package) -> Result<(), ParseError> {
        let line = self.current_line();
        let annotations = self.parse_annotations()?;
        let modifiers = self.parse_modifiers()?;

        let kind = match self.current_kind() {
            Some(SigToken::ClassKw) => ClassKind::Class,
            Some(SigToken::InterfaceKw) => ClassKind::Interface,
            Some(SigToken::EnumKw) => ClassKind::Enum,
            Some(SigToken::AnnotationKw) => ClassKind::Annotation,
            Some(SigToken::RecordKw) => ClassKind::Record,
            _ => {
                return Err(self.error(format!(
                    "expected a class kind keyword, found {}",
                    self.found()
                )));
            }
        };
        self.bump();

        let name = self.qualified_name("class name")?;
        let mut class = ClassItem::new(name, kind);
        class.annotations = annotations;
        class.modifiers = modifiers;

        if self.at(SigToken::Lt) {
            class.type_params = self.parse_type_params()?;
        }
        if self.eat(SigToken::ExtendsKw) {
            if kind == ClassKind::Interface {
                class.interfaces = self.parse_type_list()?;
            } else {
                class.super_class = Some(self.parse_type()?);
            }
        }
        if self.eat(SigToken::ImplementsKw) {
            class.interfaces.extend(self.parse_type_list()?);
        }

        self.expect(SigToken::LBrace, "`{`")?;
        while !self.at(SigToken::RBrace) {
            if self.at_eof() {
                return Err(self.error("unexpected end of file inside class block"));
            }
            self.parse_member(&mut class)?;
        }
        self.expect(SigToken::RBrace, "`}`")?;

        self.attach_class(package, class, line)
    }

    /// Place a parsed class: nested under its enclosing class when that was
    /// declared earlier in this fragment, top-level otherwise (open world).
    /// A redeclaration must agree on the header; its members are merged.
    fn attach_class(
        &self,
        package: &mut Package,
        class: ClassItem,
        line: u32,
    ) -> Result<(), ParseError> {
        if let Some((outer, _)) = class.name.rsplit_once('.') {
            if let Some(owner) = find_class_mut(package, outer) {
                if let Some(existing) = owner.nested.iter_mut().find(|c| c.name == class.name) {
                    return self.merge_duplicate_class(existing, class, line);
                }
                owner.nested.push(class);
                return Ok(());
            }
        }
        if let Some(existing) = package.classes.get_mut(class.name.as_str()) {
            return self.merge_duplicate_class(existing, class, line);
        }
        package.classes.insert(class.name.clone(), class);
        Ok(())
    }

    fn merge_duplicate_class(
        &self,
        existing: &mut ClassItem,
        incoming: ClassItem,
        line: u32,
    ) -> Result<(), ParseError> {
        let headers_agree = existing.kind == incoming.kind
            && existing.modifiers == incoming.modifiers
            && existing.annotations == incoming.annotations
            && existing.type_params == incoming.type_params
            && existing.super_class == incoming.super_class
            && existing.interfaces == incoming.interfaces;
        if !headers_agree {
            return Err(self.conflict(&incoming.name, line));
        }
        for member in incoming.members {
            self.add_member(existing, member, line)?;
        }
        for nested in incoming.nested {
            if let Some(slot) = existing.nested.iter_mut().find(|c| c.name == nested.name) {
                self.merge_duplicate_class(slot, nested, line)?;
            } else {
                existing.nested.push(nested);
            }
        }
        Ok(())
    }

    // =========================================================================
    // Members
    // =========================================================================

    fn parse_member(&mut self, class: &mut ClassItem) -> Result<(), ParseError> {
        let line = self.current_line();
        let keyword = self.current_kind();
        let member = match keyword {
            Some(SigToken::CtorKw) => {
                self.bump();
                self.parse_ctor()?
            }
            Some(SigToken::MethodKw) => {
                self.bump();
                self.parse_method()?
            }
            Some(SigToken::FieldKw) => {
                self.bump();
                self.parse_field()?
            }
            Some(SigToken::PropertyKw) => {
                self.bump();
                self.parse_property()?
            }
            Some(SigToken::EnumConstantKw) => {
                self.bump();
                self.parse_enum_constant()?
            }
            _ => {
                return Err(self.error(format!(
                    "expected a member keyword (`ctor`, `method`, `field`, `property`, \
                     `enum_constant`), found {}",
                    self.found()
                )));
            }
        };
        self.add_member(class, member, line)
    }

    fn add_member(
        &self,
        class: &mut ClassItem,
        member: MemberItem,
        line: u32,
    ) -> Result<(), ParseError> {
        if let Some(existing) = class
            .members
            .iter()
            .find(|m| m.identity() == member.identity())
        {
            if *existing == member {
                // Identical redeclaration: legal, collapsed silently.
                return Ok(());
            }
            return Err(self.conflict(member.name(), line));
        }
        class.members.push(member);
        Ok(())
    }

    fn parse_ctor(&mut self) -> Result<MemberItem, ParseError> {
        let annotations = self.parse_annotations()?;
        let modifiers = self.parse_modifiers()?;
        let type_params = if self.at(SigToken::Lt) {
            self.parse_type_params()?
        } else {
            Vec::new()
        };
        let name = self.qualified_name("constructor name")?;
        let parameters = self.parse_params()?;
        let throws = self.parse_throws()?;
        self.expect(SigToken::Semicolon, "`;`")?;
        Ok(MemberItem::Constructor(Constructor {
            name,
            modifiers,
            annotations,
            type_params,
            parameters,
            throws,
        }))
    }

    fn parse_method(&mut self) -> Result<MemberItem, ParseError> {
        let annotations = self.parse_annotations()?;
        let modifiers = self.parse_modifiers()?;
        let type_params = if self.at(SigToken::Lt) {
            self.parse_type_params()?
        } else {
            Vec::new()
        };

        let (name, return_type, parameters, throws);
        if self.format.kotlin_name_type_order {
            name = SmolStr::new(self.ident("method name")?);
            parameters = self.parse_params()?;
            self.expect(SigToken::Colon, "`:`")?;
            return_type = self.parse_type()?;
            throws = self.parse_throws()?;
        } else {
            return_type = self.parse_type()?;
            name = SmolStr::new(self.ident("method name")?);
            parameters = self.parse_params()?;
            throws = self.parse_throws()?;
        }
        self.expect(SigToken::Semicolon, "`;`")?;
        Ok(MemberItem::Method(Method {
            name,
            modifiers,
            annotations,
            type_params,
            return_type,
            parameters,
            throws,
        }))
    }

    fn parse_field(&mut self) -> Result<MemberItem, ParseError> {
        let annotations = self.parse_annotations()?;
        let modifiers = self.parse_modifiers()?;

        let (name, ty);
        if self.format.kotlin_name_type_order {
            name = SmolStr::new(self.ident("field name")?);
            self.expect(SigToken::Colon, "`:`")?;
            ty = self.parse_type()?;
        } else {
            ty = self.parse_type()?;
            name = SmolStr::new(self.ident("field name")?);
        }
        let value = if self.eat(SigToken::Eq) {
            Some(self.slice_value(ValueStop::Semicolon)?)
        } else {
            None
        };
        self.expect(SigToken::Semicolon, "`;`")?;
        Ok(MemberItem::Field(Field {
            name,
            modifiers,
            annotations,
            ty,
            value,
        }))
    }

    fn parse_property(&mut self) -> Result<MemberItem, ParseError> {
        let annotations = self.parse_annotations()?;
        let modifiers = self.parse_modifiers()?;
        let (name, ty);
        if self.format.kotlin_name_type_order {
            name = SmolStr::new(self.ident("property name")?);
            self.expect(SigToken::Colon, "`:`")?;
            ty = self.parse_type()?;
        } else {
            ty = self.parse_type()?;
            name = SmolStr::new(self.ident("property name")?);
        }
        self.expect(SigToken::Semicolon, "`;`")?;
        Ok(MemberItem::Property(Property {
            name,
            modifiers,
            annotations,
            ty,
        }))
    }

    fn parse_enum_constant(&mut self) -> Result<MemberItem, ParseError> {
        let annotations = self.parse_annotations()?;
        let modifiers = self.parse_modifiers()?;
        let (name, ty);
        if self.format.kotlin_name_type_order {
            name = SmolStr::new(self.ident("enum constant name")?);
            self.expect(SigToken::Colon, "`:`")?;
            ty = self.parse_type()?;
        } else {
            ty = self.parse_type()?;
            name = SmolStr::new(self.ident("enum constant name")?);
        }
        self.expect(SigToken::Semicolon, "`;`")?;
        Ok(MemberItem::EnumConstant(EnumConstant {
            name,
            modifiers,
            annotations,
            ty,
        }))
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    fn parse_params(&mut self) -> Result<Vec<Parameter>, ParseError> {
        self.expect(SigToken::LParen, "`(`")?;
        let mut params = Vec::new();
        if self.eat(SigToken::RParen) {
            return Ok(params);
        }
        loop {
            params.push(self.parse_param()?);
            if self.eat(SigToken::Comma) {
                continue;
            }
            self.expect(SigToken::RParen, "`)` or `,`")?;
            break;
        }
        Ok(params)
    }

    fn parse_param(&mut self) -> Result<Parameter, ParseError> {
        let annotations = self.parse_annotations()?;
        // `optional` is a concise-default marker only when something follows
        // it; a lone `optional` is a type named optional.
        let concise = self.at(SigToken::OptionalKw)
            && self
                .nth(1)
                .is_some_and(|k| k.is_ident_like() || k == SigToken::At);
        if concise {
            self.bump();
        }

        let mut param;
        if self.format.kotlin_name_type_order {
            let name_text = self.ident("parameter name")?;
            let name = (name_text != "_").then(|| SmolStr::new(name_text));
            self.expect(SigToken::Colon, "`:`")?;
            let ty = self.parse_type()?;
            param = Parameter::of(ty);
            param.name = name;
            param.is_vararg = self.eat(SigToken::Ellipsis);
        } else {
            let ty = self.parse_type()?;
            param = Parameter::of(ty);
            // `int... args`: the ellipsis binds to the type, before the name
            param.is_vararg = self.eat(SigToken::Ellipsis);
            if self.at_ident_like() {
                param.name = Some(SmolStr::new(self.bump().text));
            }
        }
        param.ty.annotations.splice(0..0, annotations);
        if self.eat(SigToken::Eq) {
            let literal = self.slice_value(ValueStop::ParamEnd)?;
            param.default_value = Some(DefaultValue::Literal(literal));
        } else if concise {
            param.default_value = Some(DefaultValue::Unstated);
        }
        Ok(param)
    }

    // =========================================================================
    // Modifiers and annotations
    // =========================================================================

    fn parse_modifiers(&mut self) -> Result<Modifiers, ParseError> {
        let mut modifiers = Modifiers::default();
        loop {
            // Keywords are contextual: one directly followed by `(` or `:` is
            // a member name (`method public default(): int;`), not a modifier.
            if matches!(self.nth(1), Some(SigToken::LParen | SigToken::Colon)) {
                break;
            }
            match self.current_kind() {
                Some(SigToken::PublicKw) => modifiers.visibility = Visibility::Public,
                Some(SigToken::ProtectedKw) => modifiers.visibility = Visibility::Protected,
                Some(SigToken::InternalKw) => modifiers.visibility = Visibility::Internal,
                Some(SigToken::PrivateKw) => modifiers.visibility = Visibility::Private,
                Some(SigToken::StaticKw) => modifiers.is_static = true,
                Some(SigToken::AbstractKw) => modifiers.is_abstract = true,
                Some(SigToken::FinalKw) => modifiers.is_final = true,
                Some(SigToken::DefaultKw) => modifiers.is_default = true,
                Some(SigToken::SealedKw) => modifiers.is_sealed = true,
                Some(SigToken::TransientKw) => modifiers.is_transient = true,
                Some(SigToken::VolatileKw) => modifiers.is_volatile = true,
                Some(SigToken::DeprecatedKw) => modifiers.is_deprecated = true,
                _ => break,
            }
            self.bump();
        }
        if let Some(pair) = modifiers.conflict() {
            return Err(self.error(format!("conflicting modifiers: {pair}")));
        }
        Ok(modifiers)
    }

    fn parse_annotations(&mut self) -> Result<Vec<AnnotationItem>, ParseError> {
        let mut annotations = Vec::new();
        while self.at(SigToken::At) {
            self.bump();
            let name = self.qualified_name("annotation name")?;
            let mut annotation = AnnotationItem::new(name);
            if self.eat(SigToken::LParen) {
                if !self.eat(SigToken::RParen) {
                    loop {
                        let attr_name = if self.at_ident_like()
                            && self.nth(1) == Some(SigToken::Eq)
                        {
                            let n = SmolStr::new(self.ident("attribute name")?);
                            self.bump(); // `=`
                            n
                        } else {
                            SmolStr::new("value")
                        };
                        let value = self.slice_value(ValueStop::ParamEnd)?;
                        annotation.attributes.push((attr_name, value));
                        if self.eat(SigToken::Comma) {
                            continue;
                        }
                        self.expect(SigToken::RParen, "`)` or `,`")?;
                        break;
                    }
                }
            }
            annotations.push(annotation);
        }
        Ok(annotations)
    }

    // =========================================================================
    // Types
    // =========================================================================

    fn parse_type_list(&mut self) -> Result<Vec<TypeReference>, ParseError> {
        // Accepts both comma- and space-separated lists; the renderer picks
        // the separator from the format.
        let mut types = vec![self.parse_type()?];
        loop {
            if self.eat(SigToken::Comma) {
                types.push(self.parse_type()?);
            } else if self.at_ident_like() || self.at(SigToken::At) {
                types.push(self.parse_type()?);
            } else {
                break;
            }
        }
        Ok(types)
    }

    fn parse_throws(&mut self) -> Result<Vec<TypeReference>, ParseError> {
        if !self.eat(SigToken::ThrowsKw) {
            return Ok(Vec::new());
        }
        self.parse_type_list()
    }

    fn parse_type_params(&mut self) -> Result<Vec<TypeParameter>, ParseError> {
        self.expect(SigToken::Lt, "`<`")?;
        let mut params = Vec::new();
        loop {
            let mut param = TypeParameter::named(self.ident("type parameter name")?);
            if self.eat(SigToken::ExtendsKw) {
                param.bounds.push(self.parse_type()?);
                while self.eat(SigToken::Amp) {
                    param.bounds.push(self.parse_type()?);
                }
            }
            params.push(param);
            if self.eat(SigToken::Comma) {
                continue;
            }
            self.expect(SigToken::Gt, "`>` or `,`")?;
            break;
        }
        Ok(params)
    }

    fn parse_type(&mut self) -> Result<TypeReference, ParseError> {
        let annotations = self.parse_annotations()?;
        let name = self.qualified_name("type name")?;
        let mut ty = TypeReference::named(name);
        ty.annotations = annotations;

        if self.at(SigToken::Lt) {
            self.bump();
            loop {
                ty.arguments.push(self.parse_type_argument()?);
                if self.eat(SigToken::Comma) {
                    continue;
                }
                self.expect(SigToken::Gt, "`>` or `,`")?;
                break;
            }
        }
        while self.at(SigToken::LBracket) {
            self.bump();
            self.expect(SigToken::RBracket, "`]`")?;
            ty.array_dims += 1;
        }
        ty.nullability = self.parse_nullability();
        Ok(ty)
    }

    fn parse_type_argument(&mut self) -> Result<TypeArgument, ParseError> {
        if self.at(SigToken::Question) {
            self.bump();
            let bound = if self.eat(SigToken::ExtendsKw) {
                Some(WildcardBound {
                    variance: Variance::Extends,
                    bound: self.parse_type()?,
                })
            } else if self.eat(SigToken::SuperKw) {
                Some(WildcardBound {
                    variance: Variance::Super,
                    bound: self.parse_type()?,
                })
            } else {
                None
            };
            Ok(TypeArgument::Wildcard(bound))
        } else {
            Ok(TypeArgument::Type(self.parse_type()?))
        }
    }

    fn parse_nullability(&mut self) -> Nullability {
        match self.format.nullability {
            NullabilityStyle::Omitted => Nullability::Unspecified,
            NullabilityStyle::Suffix => {
                if self.eat(SigToken::Question) {
                    Nullability::Nullable
                } else if self.eat(SigToken::Bang) {
                    Nullability::Platform
                } else {
                    Nullability::NonNull
                }
            }
        }
    }

    // =========================================================================
    // Verbatim value slices
    // =========================================================================

    /// Capture a value expression verbatim from the source, stopping at the
    /// given delimiter at bracket depth zero. The delimiter is not consumed.
    fn slice_value(&mut self, stop: ValueStop) -> Result<SmolStr, ParseError> {
        self.skip_trivia();
        let start = self.current_offset();
        let mut end = start;
        let mut depth: u32 = 0;
        loop {
            let Some(token) = self.current().copied() else {
                return Err(self.error("unexpected end of file in value expression"));
            };
            match token.kind {
                SigToken::LParen | SigToken::LBracket | SigToken::LBrace => depth += 1,
                SigToken::RParen if depth == 0 => {
                    if stop == ValueStop::ParamEnd {
                        break;
                    }
                    return Err(self.error("unexpected `)` in value expression"));
                }
                SigToken::Comma if depth == 0 && stop == ValueStop::ParamEnd => break,
                SigToken::Semicolon if depth == 0 => {
                    if stop == ValueStop::Semicolon {
                        break;
                    }
                    return Err(self.error("unexpected `;` in value expression"));
                }
                SigToken::RBracket | SigToken::RBrace if depth == 0 => {
                    return Err(self.error(format!(
                        "unexpected `{}` in value expression",
                        token.text
                    )));
                }
                SigToken::RParen | SigToken::RBracket | SigToken::RBrace => depth -= 1,
                _ => {}
            }
            if !token.kind.is_trivia() {
                end = token.end();
            }
            self.bump_raw();
        }
        if end == start {
            return Err(self.error("expected a value expression"));
        }
        let slice = &self.text[usize::from(start)..usize::from(end)];
        Ok(SmolStr::new(slice.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueStop {
    /// Field values: stop at `;`.
    Semicolon,
    /// Parameter defaults and annotation attributes: stop at `,` or `)`.
    ParamEnd,
}

fn find_class_mut<'a>(package: &'a mut Package, relative: &str) -> Option<&'a mut ClassItem> {
    for class in package.classes.values_mut() {
        if let Some(found) = find_in_class_mut(class, relative) {
            return Some(found);
        }
    }
    None
}

fn find_in_class_mut<'a>(class: &'a mut ClassItem, relative: &str) -> Option<&'a mut ClassItem> {
    if class.name.as_str() == relative {
        return Some(class);
    }
    let is_prefix = relative.starts_with(class.name.as_str())
        && relative.as_bytes().get(class.name.len()) == Some(&b'.');
    if !is_prefix {
        return None;
    }
    for nested in &mut class.nested {
        if let Some(found) = find_in_class_mut(nested, relative) {
            return Some(found);
        }
    }
    None
}
