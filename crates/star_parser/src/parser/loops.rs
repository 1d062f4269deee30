use star_syntax::{Delimiter, TokenKind};
use tracing::{debug, trace};

use crate::handler::DataItem;
use crate::parser::{Parser, LOOP_WITH_NO_TAGS, UNNAMED_FRAME};
use crate::source::TokenSource;
use crate::value::read_delimited_value;

/// True when the value count does not fill the last row. An empty tag list
/// never counts as off; its own error is reported separately.
fn count_off(tags: &[(String, u32)], numvals: usize) -> bool {
    !tags.is_empty() && numvals % tags.len() != 0
}

impl<S: TokenSource> Parser<'_, S> {
    /// Parse one loop: the tag header, the flat value sequence, and the
    /// close. An explicit `stop_` closes the loop in place; any structural
    /// token closes it implicitly and is pushed back for the caller, which
    /// is how the DDL dialect ends loops at all. Each value is emitted
    /// against the header tag at `numvals mod |tags|`, in declaration order.
    pub(crate) fn parse_loop(&mut self) -> bool {
        if self.verbose {
            debug!("parse_loop");
        }

        let mut reading_values = false;
        let mut tags: Vec<(String, u32)> = vec![];
        let mut numvals: usize = 0;

        loop {
            let Some(token) = self.next_token() else {
                return true;
            };
            if self.verbose {
                trace!(?token, "parse_loop token");
            }

            match token.kind() {
                kind if kind.is_trivia() => {}
                TokenKind::COMMENT => {
                    if self.content.comment(token.line(), token.text()) {
                        return true;
                    }
                }
                TokenKind::STOP => {
                    if !reading_values
                        && tags.is_empty()
                        && self.errors.error(token.line(), "Loop with no tags")
                    {
                        return true;
                    }
                    if numvals < 1 && self.errors.error(token.line(), "Loop with no values") {
                        return true;
                    }
                    if count_off(&tags, numvals)
                        && self.errors.error(token.line(), "Loop count error")
                    {
                        return true;
                    }
                    self.content.end_loop(token.line());
                    return false;
                }
                TokenKind::DATASTART
                | TokenKind::SAVESTART
                | TokenKind::SAVEEND
                | TokenKind::LOOPSTART => {
                    let starter = match token.kind() {
                        TokenKind::DATASTART => format!("data_{}", token.text()),
                        TokenKind::SAVESTART => format!("save_{}", token.text()),
                        _ => token.text().to_owned(),
                    };
                    if !reading_values {
                        if tags.is_empty() && self.errors.error(token.line(), "Loop with no tags")
                        {
                            return true;
                        }
                        if self
                            .errors
                            .error(token.line(), &format!("found {starter}, expected value"))
                        {
                            return true;
                        }
                    } else if count_off(&tags, numvals)
                        && self.errors.error(token.line(), "Loop count error")
                    {
                        return true;
                    }
                    self.content.end_loop(token.line());
                    self.cursor.unread(token);
                    return false;
                }
                TokenKind::TAGNAME => {
                    if reading_values {
                        // A tag after values ends the loop; the tag belongs
                        // to the enclosing construct.
                        if count_off(&tags, numvals)
                            && self.errors.error(token.line(), "Loop count error")
                        {
                            return true;
                        }
                        self.content.end_loop(token.line());
                        self.cursor.unread(token);
                        return false;
                    }
                    tags.push((token.text().to_owned(), token.line()));
                }
                kind if kind.is_bare_value() => {
                    reading_values = true;
                    if tags.is_empty() {
                        if self.errors.error(token.line(), "Loop with no tags") {
                            return true;
                        }
                        tags.push((LOOP_WITH_NO_TAGS.to_owned(), token.line()));
                    }
                    let column = numvals % tags.len();
                    numvals += 1;
                    let (tag, tag_line) = &tags[column];
                    let item = DataItem {
                        tag,
                        tag_line: *tag_line,
                        value: token.text(),
                        value_line: token.line(),
                        delimiter: Delimiter::None,
                        in_loop: true,
                    };
                    if self.content.data(item) {
                        return true;
                    }
                }
                kind if kind.is_delimiter_open() => {
                    reading_values = true;
                    if tags.is_empty() {
                        if self.errors.error(token.line(), "Loop with no tags") {
                            return true;
                        }
                        tags.push((LOOP_WITH_NO_TAGS.to_owned(), token.line()));
                    }
                    let column = numvals % tags.len();
                    numvals += 1;
                    let (value, stop) =
                        read_delimited_value(&mut self.cursor, &mut *self.errors, &token);
                    if stop {
                        return true;
                    }
                    let (tag, tag_line) = &tags[column];
                    let item = DataItem {
                        tag,
                        tag_line: *tag_line,
                        value: &value,
                        value_line: token.line(),
                        delimiter: Delimiter::from_open(token.kind()).unwrap_or_default(),
                        in_loop: true,
                    };
                    if self.content.data(item) {
                        return true;
                    }
                }
                TokenKind::EOF => return self.loop_eof(&tags, numvals, token.line()),
                _ => {
                    if self.errors.error(
                        token.line(),
                        &format!(
                            "invalid token in loop: {:?} : {}",
                            token.kind(),
                            token.text()
                        ),
                    ) {
                        return true;
                    }
                }
            }
        }
    }

    fn loop_eof(&mut self, tags: &[(String, u32)], numvals: usize, line: u32) -> bool {
        // When stop_ is mandatory, EOF inside a loop is fatal and no
        // end-loop event is fabricated.
        if self.dialect.requires_loop_stop() {
            if tags.is_empty() {
                self.errors.fatal_error(line, "EOF in loop (no tags)");
                return true;
            }
            if numvals < 1 {
                self.errors.fatal_error(line, "EOF in loop (no values)");
                return true;
            }
            if count_off(tags, numvals) {
                self.errors.error(line, "Loop count error");
            }
            self.errors
                .fatal_error(line, "EOF in loop (no closing stop_)");
            return true;
        }

        // Otherwise the loop closes implicitly, and then whatever encloses
        // it, unless that is an unterminated save-frame.
        if tags.is_empty() && self.errors.error(line, "Loop with no tags") {
            return true;
        }
        if numvals < 1 && self.errors.error(line, "Loop with no values") {
            return true;
        }
        if count_off(tags, numvals) && self.errors.error(line, "Loop count error") {
            return true;
        }
        self.content.end_loop(line);
        if self.save_name != UNNAMED_FRAME {
            self.errors
                .fatal_error(line, "Premature EOF (no closing save_)");
            return true;
        }
        self.content.end_data(line, &self.data_name);
        true
    }
}
