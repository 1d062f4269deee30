use star_syntax::{Delimiter, Dialect, TokenKind};
use tracing::{debug, trace};

use crate::handler::DataItem;
use crate::parser::{Parser, FILE_BLOCK_NAME, UNNAMED_FRAME};
use crate::source::TokenSource;
use crate::value::read_delimited_value;

/// The construct whose tag/value items are being parsed. DDL data blocks and
/// save-frames share the same item machinery; the scope selects the exit
/// tokens and the EOF behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Scope {
    DataBlock,
    SaveFrame,
}

impl Scope {
    fn describe(self) -> &'static str {
        match self {
            Scope::DataBlock => "data block",
            Scope::SaveFrame => "saveframe",
        }
    }
}

impl<S: TokenSource> Parser<'_, S> {
    /// Parse tag/value items, comments, and nested constructs until the
    /// scope's exit token. A strict tag-then-value alternation is enforced
    /// through the pending-tag flag.
    pub(crate) fn parse_items(&mut self, scope: Scope) -> bool {
        if self.verbose {
            debug!(?scope, "parse_items");
        }

        let mut need_value = false;
        let mut last_tag: Option<(String, u32)> = None;

        loop {
            let Some(token) = self.next_token() else {
                return true;
            };
            if self.verbose {
                trace!(?token, "parse_items token");
            }

            match token.kind() {
                kind if kind.is_trivia() => {}
                TokenKind::COMMENT => {
                    if self.content.comment(token.line(), token.text()) {
                        return true;
                    }
                }
                // Another data block terminates this one; the starter is
                // handed back for the file level to re-dispatch.
                TokenKind::DATASTART if scope == Scope::DataBlock => {
                    if need_value
                        && self.errors.error(
                            token.line(),
                            &format!("found data_{}, expected value", token.text()),
                        )
                    {
                        return true;
                    }
                    self.content.end_data(token.line(), &self.data_name);
                    self.data_name = FILE_BLOCK_NAME.to_owned();
                    self.cursor.unread(token);
                    return false;
                }
                TokenKind::SAVESTART if scope == Scope::DataBlock => {
                    if need_value
                        && self.errors.error(
                            token.line(),
                            &format!("found save_{}, expected value", token.text()),
                        )
                    {
                        return true;
                    }
                    if self.content.start_saveframe(token.line(), token.text()) {
                        return true;
                    }
                    self.save_name = token.text().to_owned();
                    if self.parse_items(Scope::SaveFrame) {
                        return true;
                    }
                }
                TokenKind::SAVEEND if scope == Scope::SaveFrame => {
                    if need_value
                        && self
                            .errors
                            .error(token.line(), "found save_, expected value")
                    {
                        return true;
                    }
                    if self.content.end_saveframe(token.line(), &self.save_name) {
                        return true;
                    }
                    self.save_name = UNNAMED_FRAME.to_owned();
                    return false;
                }
                TokenKind::LOOPSTART => {
                    if need_value
                        && self
                            .errors
                            .error(token.line(), "found loop_, expected value")
                    {
                        return true;
                    }
                    if self.content.start_loop(token.line()) {
                        return true;
                    }
                    if self.parse_loop() {
                        return true;
                    }
                }
                TokenKind::TAGNAME => {
                    if need_value
                        && self.errors.error(
                            token.line(),
                            &format!("found tag: {}, expected value", token.text()),
                        )
                    {
                        return true;
                    }
                    last_tag = Some((token.text().to_owned(), token.line()));
                    need_value = true;
                }
                kind if kind.is_bare_value() => {
                    if !need_value
                        && self.errors.error(
                            token.line(),
                            &format!("value not expected here: {}", token.text()),
                        )
                    {
                        return true;
                    }
                    if let Some((tag, tag_line)) = &last_tag {
                        let item = DataItem {
                            tag,
                            tag_line: *tag_line,
                            value: token.text(),
                            value_line: token.line(),
                            delimiter: Delimiter::None,
                            in_loop: false,
                        };
                        if self.content.data(item) {
                            return true;
                        }
                    }
                    need_value = false;
                }
                kind if kind.is_delimiter_open() => {
                    if !need_value
                        && self
                            .errors
                            .error(token.line(), "value not expected here (found delimiter)")
                    {
                        return true;
                    }
                    let (value, stop) =
                        read_delimited_value(&mut self.cursor, &mut *self.errors, &token);
                    if stop {
                        return true;
                    }
                    if let Some((tag, tag_line)) = &last_tag {
                        let item = DataItem {
                            tag,
                            tag_line: *tag_line,
                            value: &value,
                            value_line: token.line(),
                            delimiter: Delimiter::from_open(token.kind()).unwrap_or_default(),
                            in_loop: false,
                        };
                        if self.content.data(item) {
                            return true;
                        }
                    }
                    need_value = false;
                }
                TokenKind::EOF => return self.items_eof(scope, need_value, token.line()),
                _ => {
                    if self.errors.error(
                        token.line(),
                        &format!(
                            "invalid token in {}: {:?} : {}",
                            scope.describe(),
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

    fn items_eof(&mut self, scope: Scope, need_value: bool, line: u32) -> bool {
        match scope {
            Scope::DataBlock => {
                if need_value {
                    self.errors
                        .fatal_error(line, "premature EOF, expected value");
                    return true;
                }
                self.content.end_data(line, &self.data_name);
                true
            }
            Scope::SaveFrame => {
                let message = match (self.dialect, need_value) {
                    (Dialect::Ddl, true) => "premature EOF, expected value".to_owned(),
                    (Dialect::Ddl, false) => "premature EOF (no closing save_)".to_owned(),
                    (Dialect::NmrStar, true) => {
                        format!("EOF in saveframe: {} (expected value)", self.save_name)
                    }
                    (Dialect::NmrStar, false) => {
                        format!("EOF in saveframe: {} (no closing save_)", self.save_name)
                    }
                };
                self.errors.fatal_error(line, &message);
                true
            }
        }
    }

    /// The NMR-STAR data block: save-frames and comments only.
    pub(crate) fn parse_frame_block(&mut self) -> bool {
        if self.verbose {
            debug!("parse_frame_block");
        }

        loop {
            let Some(token) = self.next_token() else {
                return true;
            };
            match token.kind() {
                kind if kind.is_trivia() => {}
                TokenKind::COMMENT => {
                    if self.content.comment(token.line(), token.text()) {
                        return true;
                    }
                }
                TokenKind::SAVESTART => {
                    if self.content.start_saveframe(token.line(), token.text()) {
                        return true;
                    }
                    self.save_name = token.text().to_owned();
                    if self.parse_items(Scope::SaveFrame) {
                        return true;
                    }
                }
                TokenKind::EOF => {
                    self.content.end_data(token.line(), &self.data_name);
                    return true;
                }
                _ => {
                    if self.errors.error(
                        token.line(),
                        &format!(
                            "invalid token in data block: {:?} : {}",
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
}
