use std::ops::Range;

use star_syntax::{SourceText, Token, TokenKind};

use crate::error::LexResult;
use crate::source::TokenSource;

/// Lexing mode. The lexer is modal: opening a delimited value changes how
/// the raw text is chunked into tokens until the matching close is seen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LexMode {
    Normal,
    /// Inside a single-line quoted value; the payload is the quote byte.
    Quoted(u8),
    /// Inside a triple-quoted value.
    Triple(u8),
    /// Inside a semicolon heredoc.
    Semi,
}

/// A lexer for STAR texts, shared by both dialects.
///
/// In normal mode the input is split into line endings, whitespace runs,
/// comments, and whitespace-delimited words, with words classified into the
/// structural keywords, tag names, framecodes, and barewords. Opening a
/// quoted, triple-quoted, or heredoc value switches the lexer into a value
/// mode that emits raw `CHARACTERS` chunks and `NL` tokens until the
/// matching end delimiter.
pub struct StarLexer {
    source: SourceText,
    /// Current byte offset into the source.
    position: usize,
    line: u32,
    at_line_start: bool,
    mode: LexMode,
}

impl StarLexer {
    pub fn new(source: impl Into<SourceText>) -> Self {
        Self {
            source: source.into(),
            position: 0,
            line: 1,
            at_line_start: true,
            mode: LexMode::Normal,
        }
    }

    pub fn source(&self) -> &SourceText {
        &self.source
    }

    #[inline]
    fn bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }

    #[inline]
    fn current(&self) -> u8 {
        self.bytes()[self.position]
    }

    #[inline]
    fn peek(&self, n: usize) -> Option<u8> {
        self.bytes().get(self.position + n).copied()
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.position >= self.source.len()
    }

    fn token(&self, kind: TokenKind, range: Range<usize>, line: u32) -> Token {
        Token::new(kind, self.source.substr(range), line)
    }

    fn eof_token(&self) -> Token {
        let end = self.source.len();
        Token::new(TokenKind::EOF, self.source.substr(end..end), self.line)
    }

    /// Step over one line ending (`\r\n`, `\n`, or a lone `\r`) and update
    /// the line bookkeeping.
    fn skip_line_ending(&mut self) {
        if self.current() == b'\r' {
            self.position += 1;
            if !self.is_eof() && self.current() == b'\n' {
                self.position += 1;
            }
        } else {
            self.position += 1;
        }
        self.line += 1;
        self.at_line_start = true;
    }

    fn consume_line_ending(&mut self) -> Token {
        let start = self.position;
        let line = self.line;
        self.skip_line_ending();
        self.token(TokenKind::NL, start..self.position, line)
    }

    fn next_normal_token(&mut self) -> Token {
        if self.is_eof() {
            return self.eof_token();
        }

        let start = self.position;
        let line = self.line;
        match self.current() {
            b'\n' | b'\r' => self.consume_line_ending(),
            b' ' | b'\t' | b'\x0C' => {
                while !self.is_eof() && matches!(self.current(), b' ' | b'\t' | b'\x0C') {
                    self.position += 1;
                }
                self.at_line_start = false;
                self.token(TokenKind::SPACE, start..self.position, line)
            }
            b'#' => self.consume_comment(line),
            b';' if self.at_line_start => self.consume_heredoc_open(start, line),
            b'\'' => self.consume_quote_open(b'\'', start, line),
            b'"' => self.consume_quote_open(b'"', start, line),
            _ => self.consume_word(start, line),
        }
    }

    /// `#` to the end of the line. The token text excludes the `#` and the
    /// line terminator, which is lexed as its own `NL`.
    fn consume_comment(&mut self, line: u32) -> Token {
        let text_start = self.position + 1;
        let end = match memchr::memchr2(b'\n', b'\r', &self.bytes()[text_start..]) {
            Some(index) => text_start + index,
            None => self.source.len(),
        };
        self.position = end;
        self.at_line_start = false;
        self.token(TokenKind::COMMENT, text_start..end, line)
    }

    /// A `;` at column zero opens a heredoc. A line terminator directly after
    /// the `;` separates the delimiter from the content and is consumed with
    /// it; text on the opening line becomes the value's first chunk instead.
    fn consume_heredoc_open(&mut self, start: usize, line: u32) -> Token {
        self.position += 1;
        if !self.is_eof() && matches!(self.current(), b'\n' | b'\r') {
            self.skip_line_ending();
        } else {
            self.at_line_start = false;
        }
        self.mode = LexMode::Semi;
        self.token(TokenKind::SEMISTART, start..self.position, line)
    }

    fn consume_quote_open(&mut self, quote: u8, start: usize, line: u32) -> Token {
        let triple = self.peek(1) == Some(quote) && self.peek(2) == Some(quote);
        self.at_line_start = false;
        let kind = if triple {
            self.position += 3;
            self.mode = LexMode::Triple(quote);
            match quote {
                b'\'' => TokenKind::TSINGLESTART,
                _ => TokenKind::TDOUBLESTART,
            }
        } else {
            self.position += 1;
            self.mode = LexMode::Quoted(quote);
            match quote {
                b'\'' => TokenKind::SINGLESTART,
                _ => TokenKind::DOUBLESTART,
            }
        };
        self.token(kind, start..self.position, line)
    }

    /// A maximal run of non-whitespace, classified into the structural
    /// keywords and content kinds.
    fn consume_word(&mut self, start: usize, line: u32) -> Token {
        while !self.is_eof() && !self.current().is_ascii_whitespace() {
            self.position += 1;
        }
        self.at_line_start = false;
        let (kind, prefix_len) = classify_word(&self.source[start..self.position]);
        self.token(kind, start + prefix_len..self.position, line)
    }

    fn next_quoted_token(&mut self, quote: u8) -> Token {
        if self.is_eof() {
            return self.eof_token();
        }

        let start = self.position;
        let line = self.line;
        match self.current() {
            b'\n' | b'\r' => self.consume_line_ending(),
            c if c == quote && self.closes_quote(1) => {
                self.position += 1;
                self.at_line_start = false;
                self.mode = LexMode::Normal;
                let kind = match quote {
                    b'\'' => TokenKind::SINGLEEND,
                    _ => TokenKind::DOUBLEEND,
                };
                self.token(kind, start..self.position, line)
            }
            _ => {
                // Chunk up to the line ending or a closing-quote candidate.
                while !self.is_eof() {
                    match self.current() {
                        b'\n' | b'\r' => break,
                        c if c == quote && self.closes_quote(1) => break,
                        _ => self.position += 1,
                    }
                }
                self.at_line_start = false;
                self.token(TokenKind::CHARACTERS, start..self.position, line)
            }
        }
    }

    /// A closing quote must abut whitespace or EOF on the right; a quote
    /// character inside the value is ordinary text.
    fn closes_quote(&self, offset: usize) -> bool {
        match self.peek(offset) {
            None => true,
            Some(next) => next.is_ascii_whitespace(),
        }
    }

    fn next_triple_token(&mut self, quote: u8) -> Token {
        if self.is_eof() {
            return self.eof_token();
        }

        let start = self.position;
        let line = self.line;
        if matches!(self.current(), b'\n' | b'\r') {
            return self.consume_line_ending();
        }
        if self.at_triple(quote) {
            self.position += 3;
            self.at_line_start = false;
            self.mode = LexMode::Normal;
            let kind = match quote {
                b'\'' => TokenKind::TSINGLEEND,
                _ => TokenKind::TDOUBLEEND,
            };
            return self.token(kind, start..self.position, line);
        }

        while !self.is_eof() {
            match self.current() {
                b'\n' | b'\r' => break,
                c if c == quote && self.at_triple(quote) => break,
                _ => self.position += 1,
            }
        }
        self.at_line_start = false;
        self.token(TokenKind::CHARACTERS, start..self.position, line)
    }

    fn at_triple(&self, quote: u8) -> bool {
        self.peek(0) == Some(quote) && self.peek(1) == Some(quote) && self.peek(2) == Some(quote)
    }

    fn next_semi_token(&mut self) -> Token {
        if self.is_eof() {
            return self.eof_token();
        }

        let start = self.position;
        let line = self.line;
        if self.at_line_start && self.current() == b';' {
            self.position += 1;
            self.at_line_start = false;
            self.mode = LexMode::Normal;
            return self.token(TokenKind::SEMIEND, start..self.position, line);
        }
        if matches!(self.current(), b'\n' | b'\r') {
            return self.consume_line_ending();
        }

        // The rest of the line is one verbatim chunk.
        let end = match memchr::memchr2(b'\n', b'\r', &self.bytes()[self.position..]) {
            Some(index) => self.position + index,
            None => self.source.len(),
        };
        self.position = end;
        self.at_line_start = false;
        self.token(TokenKind::CHARACTERS, start..end, line)
    }
}

impl TokenSource for StarLexer {
    fn next_token(&mut self) -> LexResult<Token> {
        Ok(match self.mode {
            LexMode::Normal => self.next_normal_token(),
            LexMode::Quoted(quote) => self.next_quoted_token(quote),
            LexMode::Triple(quote) => self.next_triple_token(quote),
            LexMode::Semi => self.next_semi_token(),
        })
    }
}

/// Classify a whitespace-delimited word. Returns the kind and the length of
/// the structural prefix to strip from the token text. Keywords are matched
/// ASCII case-insensitively; a `data_`/`save_` with an empty name, a lone
/// `_`, and a lone `$` are all ordinary barewords.
fn classify_word(word: &str) -> (TokenKind, usize) {
    if word.len() > 5 && has_prefix_ignore_case(word, "data_") {
        return (TokenKind::DATASTART, 5);
    }
    if has_prefix_ignore_case(word, "save_") {
        return if word.len() > 5 {
            (TokenKind::SAVESTART, 5)
        } else {
            (TokenKind::SAVEEND, 0)
        };
    }
    if word.eq_ignore_ascii_case("loop_") {
        return (TokenKind::LOOPSTART, 0);
    }
    if word.eq_ignore_ascii_case("stop_") {
        return (TokenKind::STOP, 0);
    }
    if word.len() > 1 && word.starts_with('_') {
        return (TokenKind::TAGNAME, 0);
    }
    if word.len() > 1 && word.starts_with('$') {
        return (TokenKind::FRAMECODE, 1);
    }
    (TokenKind::CHARACTERS, 0)
}

fn has_prefix_ignore_case(word: &str, prefix: &str) -> bool {
    word.len() >= prefix.len()
        && word.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

#[cfg(test)]
mod test {
    use test_case::test_case;

    use super::*;

    fn lex(input: &str) -> Vec<(TokenKind, String, u32)> {
        let mut lexer = StarLexer::new(input);
        let mut tokens = vec![];
        loop {
            let token = lexer.next_token().unwrap();
            if token.kind() == TokenKind::EOF {
                break;
            }
            tokens.push((token.kind(), token.text().to_owned(), token.line()));
        }
        tokens
    }

    /// Like `lex`, but dropping NL/SPACE to keep expectations short.
    fn lex_solid(input: &str) -> Vec<(TokenKind, String)> {
        lex(input)
            .into_iter()
            .filter(|(kind, ..)| !kind.is_trivia())
            .map(|(kind, text, _)| (kind, text))
            .collect()
    }

    #[test_case("data_entry", TokenKind::DATASTART, "entry" ; "data block start")]
    #[test_case("DATA_ENTRY", TokenKind::DATASTART, "ENTRY" ; "keywords are case blind")]
    #[test_case("save_chem_shift", TokenKind::SAVESTART, "chem_shift" ; "saveframe start")]
    #[test_case("save_", TokenKind::SAVEEND, "save_" ; "saveframe end")]
    #[test_case("loop_", TokenKind::LOOPSTART, "loop_" ; "loop start")]
    #[test_case("stop_", TokenKind::STOP, "stop_" ; "loop stop")]
    #[test_case("_Atom.id", TokenKind::TAGNAME, "_Atom.id" ; "tag keeps underscore")]
    #[test_case("$frame_ref", TokenKind::FRAMECODE, "frame_ref" ; "framecode drops sigil")]
    #[test_case("12.5", TokenKind::CHARACTERS, "12.5" ; "bareword number")]
    #[test_case("data_", TokenKind::CHARACTERS, "data_" ; "empty block name is a bareword")]
    #[test_case("stop_sign", TokenKind::CHARACTERS, "stop_sign" ; "stop needs exact match")]
    #[test_case("loop_x", TokenKind::CHARACTERS, "loop_x" ; "loop needs exact match")]
    #[test_case("_", TokenKind::CHARACTERS, "_" ; "lone underscore")]
    #[test_case("$", TokenKind::CHARACTERS, "$" ; "lone sigil")]
    fn word_classification(input: &str, kind: TokenKind, text: &str) {
        assert_eq!(lex_solid(input), vec![(kind, text.to_owned())]);
    }

    #[test]
    fn whitespace_and_lines() {
        assert_eq!(
            lex("a\n  b"),
            vec![
                (TokenKind::CHARACTERS, "a".to_owned(), 1),
                (TokenKind::NL, "\n".to_owned(), 1),
                (TokenKind::SPACE, "  ".to_owned(), 2),
                (TokenKind::CHARACTERS, "b".to_owned(), 2),
            ]
        );
    }

    #[test]
    fn crlf_counts_as_one_line_ending() {
        assert_eq!(
            lex("a\r\nb"),
            vec![
                (TokenKind::CHARACTERS, "a".to_owned(), 1),
                (TokenKind::NL, "\r\n".to_owned(), 1),
                (TokenKind::CHARACTERS, "b".to_owned(), 2),
            ]
        );
    }

    #[test]
    fn comment_excludes_hash_and_terminator() {
        assert_eq!(
            lex("# a comment\ndata_x"),
            vec![
                (TokenKind::COMMENT, " a comment".to_owned(), 1),
                (TokenKind::NL, "\n".to_owned(), 1),
                (TokenKind::DATASTART, "x".to_owned(), 2),
            ]
        );
    }

    #[test]
    fn quoted_value_with_interior_quote() {
        assert_eq!(
            lex_solid("'it's here'"),
            vec![
                (TokenKind::SINGLESTART, "'".to_owned()),
                (TokenKind::CHARACTERS, "it's here".to_owned()),
                (TokenKind::SINGLEEND, "'".to_owned()),
            ]
        );
    }

    #[test]
    fn quoted_value_emits_nl_for_embedded_newline() {
        assert_eq!(
            lex_solid("\"ab\ncd\""),
            vec![
                (TokenKind::DOUBLESTART, "\"".to_owned()),
                (TokenKind::CHARACTERS, "ab".to_owned()),
                (TokenKind::CHARACTERS, "cd".to_owned()),
                (TokenKind::DOUBLEEND, "\"".to_owned()),
            ]
        );
    }

    #[test]
    fn triple_quote_spans_lines() {
        assert_eq!(
            lex_solid("'''one\ntwo'''"),
            vec![
                (TokenKind::TSINGLESTART, "'''".to_owned()),
                (TokenKind::CHARACTERS, "one".to_owned()),
                (TokenKind::CHARACTERS, "two".to_owned()),
                (TokenKind::TSINGLEEND, "'''".to_owned()),
            ]
        );
    }

    #[test]
    fn heredoc_lines_and_close() {
        assert_eq!(
            lex("_t\n;\nhello\nworld\n;\n"),
            vec![
                (TokenKind::TAGNAME, "_t".to_owned(), 1),
                (TokenKind::NL, "\n".to_owned(), 1),
                (TokenKind::SEMISTART, ";\n".to_owned(), 2),
                (TokenKind::CHARACTERS, "hello".to_owned(), 3),
                (TokenKind::NL, "\n".to_owned(), 3),
                (TokenKind::CHARACTERS, "world".to_owned(), 4),
                (TokenKind::NL, "\n".to_owned(), 4),
                (TokenKind::SEMIEND, ";".to_owned(), 5),
                (TokenKind::NL, "\n".to_owned(), 5),
            ]
        );
    }

    #[test]
    fn heredoc_content_on_opening_line() {
        assert_eq!(
            lex_solid("_t\n;first\nsecond\n;\n"),
            vec![
                (TokenKind::TAGNAME, "_t".to_owned()),
                (TokenKind::SEMISTART, ";".to_owned()),
                (TokenKind::CHARACTERS, "first".to_owned()),
                (TokenKind::CHARACTERS, "second".to_owned()),
                (TokenKind::SEMIEND, ";".to_owned()),
            ]
        );
    }

    #[test]
    fn semicolon_mid_line_is_a_bareword() {
        assert_eq!(
            lex_solid("_t a;b"),
            vec![
                (TokenKind::TAGNAME, "_t".to_owned()),
                (TokenKind::CHARACTERS, "a;b".to_owned()),
            ]
        );
    }

    #[test]
    fn eof_is_sticky() {
        let mut lexer = StarLexer::new("x");
        assert_eq!(lexer.next_token().unwrap().kind(), TokenKind::CHARACTERS);
        assert_eq!(lexer.next_token().unwrap().kind(), TokenKind::EOF);
        assert_eq!(lexer.next_token().unwrap().kind(), TokenKind::EOF);
    }
}
