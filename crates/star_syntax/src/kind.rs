use serde::Serialize;

/// The closed set of lexemes a STAR token stream is built from. Kind names
/// match the grammar's vocabulary: structural keywords, content words, and
/// the paired value delimiters.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum TokenKind {
    EOF = 0, // The end of the input text, returned for every read past it.
    // Trivia
    NL,      // A single line ending: \n, \r\n, or a lone \r.
    SPACE,   // A run of spaces and/or tabs.
    COMMENT, // `#` to end of line; text excludes the `#` and the line ending.
    // Structure
    DATASTART, // `data_NAME`; text is NAME.
    SAVESTART, // `save_NAME`; text is NAME.
    SAVEEND,   // A bare `save_` terminator.
    LOOPSTART, // `loop_`
    STOP,      // `stop_`
    // Content
    TAGNAME,    // `_tag.name`; text keeps the leading underscore.
    CHARACTERS, // A bareword value, or a raw chunk inside a delimited value.
    FRAMECODE,  // `$name` cross-reference; text is the name without `$`.
    // Paired value delimiters
    SINGLESTART,  // Opening `'`
    SINGLEEND,    // Closing `'`
    DOUBLESTART,  // Opening `"`
    DOUBLEEND,    // Closing `"`
    TSINGLESTART, // Opening `'''`
    TSINGLEEND,   // Closing `'''`
    TDOUBLESTART, // Opening `"""`
    TDOUBLEEND,   // Closing `"""`
    SEMISTART,    // `;` at column zero opening a heredoc value.
    SEMIEND,      // `;` at column zero closing a heredoc value.
}

impl TokenKind {
    /// Whitespace tokens the parsers skip without dispatching.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::NL | TokenKind::SPACE)
    }

    /// True for tokens that open a delimited value.
    pub fn is_delimiter_open(self) -> bool {
        matches!(
            self,
            TokenKind::SINGLESTART
                | TokenKind::DOUBLESTART
                | TokenKind::TSINGLESTART
                | TokenKind::TDOUBLESTART
                | TokenKind::SEMISTART
        )
    }

    /// True for tokens that carry an undelimited value by themselves.
    pub fn is_bare_value(self) -> bool {
        matches!(self, TokenKind::CHARACTERS | TokenKind::FRAMECODE)
    }

    /// The end token that closes a value opened by this kind.
    pub fn matching_close(self) -> Option<TokenKind> {
        match self {
            TokenKind::SINGLESTART => Some(TokenKind::SINGLEEND),
            TokenKind::DOUBLESTART => Some(TokenKind::DOUBLEEND),
            TokenKind::TSINGLESTART => Some(TokenKind::TSINGLEEND),
            TokenKind::TDOUBLESTART => Some(TokenKind::TDOUBLEEND),
            TokenKind::SEMISTART => Some(TokenKind::SEMIEND),
            _ => None,
        }
    }
}
