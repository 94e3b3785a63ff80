//! Logos-based lexer for the signature grammar.
//!
//! All keywords are contextual: the parser accepts any keyword token where an
//! identifier is expected, so `method public int optional();` lexes the name
//! `optional` as a keyword and the parser treats it as a name.

use logos::Logos;
use text_size::TextSize;

/// A token with its kind, text, and byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SigToken,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    /// Byte offset one past the end of the token.
    pub fn end(&self) -> TextSize {
        self.offset + TextSize::of(self.text)
    }
}

/// Lexer wrapping the logos-generated tokenizer.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, SigToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: SigToken::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.inner.span().start as u32);
        let kind = match result {
            Ok(t) => t,
            Err(()) => SigToken::Error,
        };
        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Signature-grammar token set.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    // One permissive run covers decimal, hex, float, and suffixed literals;
    // constant values are sliced verbatim from the source, so the lexer only
    // needs to not swallow delimiters.
    #[regex(r"[0-9][0-9a-zA-Z_.]*")]
    Number,

    #[regex(r#""([^"\\]|\\.)*""#)]
    Str,

    #[regex(r"'([^'\\]|\\.)*'")]
    CharLit,

    // =========================================================================
    // PUNCTUATION (longest match wins)
    // =========================================================================
    #[token("...")]
    Ellipsis,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("=")]
    Eq,
    #[token("?")]
    Question,
    #[token("!")]
    Bang,
    #[token("@")]
    At,
    #[token("&")]
    Amp,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("|")]
    Pipe,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("package")]
    PackageKw,
    #[token("class")]
    ClassKw,
    #[token("interface")]
    InterfaceKw,
    #[token("enum")]
    EnumKw,
    #[token("annotation")]
    AnnotationKw,
    #[token("record")]
    RecordKw,

    #[token("ctor")]
    CtorKw,
    #[token("method")]
    MethodKw,
    #[token("field")]
    FieldKw,
    #[token("property")]
    PropertyKw,
    #[token("enum_constant")]
    EnumConstantKw,

    #[token("extends")]
    ExtendsKw,
    #[token("implements")]
    ImplementsKw,
    #[token("throws")]
    ThrowsKw,
    #[token("super")]
    SuperKw,

    #[token("public")]
    PublicKw,
    #[token("protected")]
    ProtectedKw,
    #[token("internal")]
    InternalKw,
    #[token("private")]
    PrivateKw,
    #[token("static")]
    StaticKw,
    #[token("abstract")]
    AbstractKw,
    #[token("final")]
    FinalKw,
    #[token("default")]
    DefaultKw,
    #[token("sealed")]
    SealedKw,
    #[token("deprecated")]
    DeprecatedKw,
    #[token("transient")]
    TransientKw,
    #[token("volatile")]
    VolatileKw,
    #[token("optional")]
    OptionalKw,

    /// Anything the grammar does not know; only legal inside verbatim
    /// value slices.
    #[regex(r".", priority = 0)]
    Error,
}

impl SigToken {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::LineComment | Self::BlockComment
        )
    }

    /// Keywords double as identifiers wherever a name is expected.
    pub fn is_ident_like(self) -> bool {
        !matches!(
            self,
            Self::Whitespace
                | Self::LineComment
                | Self::BlockComment
                | Self::Number
                | Self::Str
                | Self::CharLit
                | Self::Ellipsis
                | Self::LBrace
                | Self::RBrace
                | Self::LParen
                | Self::RParen
                | Self::LBracket
                | Self::RBracket
                | Self::Lt
                | Self::Gt
                | Self::Comma
                | Self::Semicolon
                | Self::Dot
                | Self::Colon
                | Self::Eq
                | Self::Question
                | Self::Bang
                | Self::At
                | Self::Amp
                | Self::Minus
                | Self::Plus
                | Self::Star
                | Self::Slash
                | Self::Pipe
                | Self::Error
        )
    }
}
