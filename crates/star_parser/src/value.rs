use star_syntax::{find_reserved_word, Delimiter, Token, TokenKind};
use tracing::trace;

use crate::handler::ErrorHandler;
use crate::source::{TokenCursor, TokenSource};

/// Assemble a delimited value, consuming tokens from just after the opening
/// delimiter up to and including the matching close.
///
/// Returns the accumulated text and a stop flag; the flag is set when a sink
/// requested an abort or the input failed, and the caller unwinds without
/// emitting the value.
pub(crate) fn read_delimited_value<S: TokenSource>(
    cursor: &mut TokenCursor<S>,
    errors: &mut dyn ErrorHandler,
    open: &Token,
) -> (String, bool) {
    let Some(delimiter) = Delimiter::from_open(open.kind()) else {
        unreachable!("read_delimited_value called on {:?}", open.kind());
    };
    let close = open
        .kind()
        .matching_close()
        .unwrap_or_else(|| unreachable!("open delimiter without a close"));
    trace!(?delimiter, line = open.line(), "read_delimited_value");

    let mut value = String::new();
    loop {
        let token = match cursor.next_token() {
            Ok(token) => token,
            Err(fail) => {
                errors.fatal_error(fail.line, &format!("Lexer error: {fail}"));
                return (value, true);
            }
        };

        match token.kind() {
            TokenKind::EOF => {
                errors.fatal_error(token.line(), "EOF in delimited value");
                return (value, true);
            }
            TokenKind::NL if delimiter.is_single_line() => {
                if errors.error(
                    token.line(),
                    &format!("newline in quoted value: {value}"),
                ) {
                    return (value, true);
                }
                value.push('\n');
            }
            kind if kind == close => {
                if delimiter == Delimiter::Semicolon {
                    // The newline abutting the closing `;` belongs to the
                    // delimiter, not the value.
                    strip_one_trailing_newline(&mut value);
                }
                return (value, false);
            }
            _ => {
                if !delimiter.is_single_line() {
                    if let Some(keyword) = find_reserved_word(token.text().trim()) {
                        if errors.warning(token.line(), &format!("keyword in value: {keyword}")) {
                            return (value, true);
                        }
                    }
                }
                value.push_str(token.text());
            }
        }
    }
}

fn strip_one_trailing_newline(value: &mut String) {
    if value.ends_with('\n') {
        value.pop();
        if value.ends_with('\r') {
            value.pop();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::events::{Event, EventCollector};
    use crate::lexer::StarLexer;

    /// Lex `input`, expect the first token to open a value, and read it.
    fn read(input: &str, collector: &mut EventCollector) -> (String, bool) {
        let mut cursor = TokenCursor::new(StarLexer::new(input));
        let open = cursor.next_token().unwrap();
        assert!(open.kind().is_delimiter_open(), "got {open:?}");
        read_delimited_value(&mut cursor, collector, &open)
    }

    #[test]
    fn single_quoted() {
        let mut collector = EventCollector::new();
        let (value, stop) = read("'hello world' x", &mut collector);
        assert_eq!(value, "hello world");
        assert!(!stop);
        assert!(collector.events().is_empty());
    }

    #[test]
    fn newline_in_quoted_value_recovers_with_literal_newline() {
        let mut collector = EventCollector::new();
        let (value, stop) = read("'ab\ncd' x", &mut collector);
        assert_eq!(value, "ab\ncd");
        assert!(!stop);
        assert_eq!(
            collector.events(),
            vec![Event::Error {
                line: 1,
                message: "newline in quoted value: ab".to_owned()
            }]
        );
    }

    #[test]
    fn newline_in_quoted_value_aborts_when_sink_stops() {
        let mut collector = EventCollector::new();
        collector.stop_on_error = true;
        let (_, stop) = read("'ab\ncd' x", &mut collector);
        assert!(stop);
    }

    #[test]
    fn triple_quoted_preserves_newlines_without_errors() {
        let mut collector = EventCollector::new();
        let (value, stop) = read("'''one\ntwo\nthree''' x", &mut collector);
        assert_eq!(value, "one\ntwo\nthree");
        assert!(!stop);
        assert!(collector.events().is_empty());
    }

    #[test]
    fn heredoc_strips_exactly_one_trailing_newline() {
        let mut collector = EventCollector::new();
        let (value, stop) = read(";\nhello\nworld\n\n;\n", &mut collector);
        assert_eq!(value, "hello\nworld\n");
        assert!(!stop);
    }

    #[test]
    fn keyword_in_heredoc_warns_and_recovers() {
        let mut collector = EventCollector::new();
        let (value, stop) = read(";\nloop_ bar\n;\n", &mut collector);
        assert_eq!(value, "loop_ bar");
        assert!(!stop);
        assert_eq!(
            collector.events(),
            vec![Event::Warning {
                line: 2,
                message: "keyword in value: loop_".to_owned()
            }]
        );
    }

    #[test]
    fn keyword_in_single_quotes_is_not_scanned() {
        let mut collector = EventCollector::new();
        let (value, stop) = read("'loop_foo' x", &mut collector);
        assert_eq!(value, "loop_foo");
        assert!(!stop);
        assert!(collector.events().is_empty());
    }

    #[test]
    fn eof_inside_value_is_fatal() {
        let mut collector = EventCollector::new();
        let (_, stop) = read("'never closed", &mut collector);
        assert!(stop);
        assert_eq!(
            collector.events(),
            vec![Event::FatalError {
                line: 1,
                message: "EOF in delimited value".to_owned()
            }]
        );
    }
}
