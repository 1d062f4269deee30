use serde::{Serialize, Serializer};

use crate::TokenKind;

/// The form a value was written in. Carried on every data event so consumers
/// can tell a bareword `?` from a quoted `'?'`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// A bareword or framecode; no delimiter characters in the source.
    #[default]
    None,
    Single,
    Double,
    TripleSingle,
    TripleDouble,
    Semicolon,
}

impl Delimiter {
    /// The delimiter opened by the given token kind, if any.
    pub fn from_open(kind: TokenKind) -> Option<Delimiter> {
        match kind {
            TokenKind::SINGLESTART => Some(Delimiter::Single),
            TokenKind::DOUBLESTART => Some(Delimiter::Double),
            TokenKind::TSINGLESTART => Some(Delimiter::TripleSingle),
            TokenKind::TDOUBLESTART => Some(Delimiter::TripleDouble),
            TokenKind::SEMISTART => Some(Delimiter::Semicolon),
            _ => None,
        }
    }

    /// The canonical marker as it appears in the source, empty for barewords
    /// and framecodes.
    pub fn symbol(self) -> &'static str {
        match self {
            Delimiter::None => "",
            Delimiter::Single => "'",
            Delimiter::Double => "\"",
            Delimiter::TripleSingle => "'''",
            Delimiter::TripleDouble => "\"\"\"",
            Delimiter::Semicolon => ";",
        }
    }

    /// Single-line quoted forms reject embedded newlines and skip the
    /// reserved-word scan.
    pub fn is_single_line(self) -> bool {
        matches!(self, Delimiter::Single | Delimiter::Double)
    }
}

/// Serializes as the canonical marker, so a recorded data event carries the
/// same delimiter field the callback contract describes.
impl Serialize for Delimiter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}
