use std::ops::Range;

use arcstr::Substr;

use crate::TokenKind;

/// A single lexeme of a STAR text. The text is a substring handle into the
/// shared source, so cloning a token never copies the underlying bytes and
/// the handle's byte range doubles as the token's span in the source.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: Substr,
    line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: Substr, line: u32) -> Self {
        Self { kind, text, line }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The token's text with structural prefixes already stripped: the block
    /// name for `DATASTART`, the frame name for `SAVESTART`, the name without
    /// `$` for `FRAMECODE`, the raw lexeme otherwise.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// 1-based line the token starts on.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Byte span of the token's text in the source.
    pub fn span(&self) -> Range<usize> {
        self.text.range()
    }

    pub fn into_text(self) -> Substr {
        self.text
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{:?}@{}\"{}\"",
            self.kind,
            self.line,
            self.text.escape_debug(),
        ))
    }
}
