use star_syntax::{Dialect, Token, TokenKind};
use tracing::debug;

use crate::handler::{ContentHandler, ErrorHandler};
use crate::lexer::StarLexer;
use crate::source::{TokenCursor, TokenSource};

mod items;
mod loops;

pub(crate) use items::Scope;

/// Block name reported while no data block is open, including by the final
/// `end_data` of an input with no blocks at all.
pub const FILE_BLOCK_NAME: &str = "__FILE__";

/// Save-frame name held while no save-frame is open.
pub const UNNAMED_FRAME: &str = "__UNNAMED__";

/// Tag synthesised under recovery for a loop that supplies values before
/// declaring any tags.
pub const LOOP_WITH_NO_TAGS: &str = "LOOP_WITH_NO_TAGS";

/// The parse state shared by every level of the grammar: the token cursor,
/// the two sinks, the dialect, and the names of the enclosing block and
/// save-frame. One parser instance parses one stream.
pub(crate) struct Parser<'a, S> {
    cursor: TokenCursor<S>,
    content: &'a mut dyn ContentHandler,
    errors: &'a mut dyn ErrorHandler,
    dialect: Dialect,
    data_name: String,
    save_name: String,
    verbose: bool,
}

impl<'a, S: TokenSource> Parser<'a, S> {
    pub(crate) fn new(
        dialect: Dialect,
        source: S,
        content: &'a mut dyn ContentHandler,
        errors: &'a mut dyn ErrorHandler,
        verbose: bool,
    ) -> Self {
        Self {
            cursor: TokenCursor::new(source),
            content,
            errors,
            dialect,
            data_name: FILE_BLOCK_NAME.to_owned(),
            save_name: UNNAMED_FRAME.to_owned(),
            verbose,
        }
    }

    /// Read the next token, converting a source failure into a fatal report.
    /// `None` means the failure has been reported and the caller unwinds.
    fn next_token(&mut self) -> Option<Token> {
        match self.cursor.next_token() {
            Ok(token) => Some(token),
            Err(fail) => {
                self.errors
                    .fatal_error(fail.line, &format!("Lexer error: {fail}"));
                None
            }
        }
    }

    /// Top (file) level parse. Returns when the stream is exhausted or a
    /// stop signal reaches this level.
    pub(crate) fn parse_file(&mut self) {
        if self.verbose {
            debug!(dialect = ?self.dialect, "parse_file");
        }

        loop {
            let Some(token) = self.next_token() else { return };
            match token.kind() {
                kind if kind.is_trivia() => {}
                TokenKind::COMMENT => {
                    if self.content.comment(token.line(), token.text()) {
                        return;
                    }
                }
                TokenKind::DATASTART => {
                    if self.content.start_data(token.line(), token.text()) {
                        return;
                    }
                    self.data_name = token.text().to_owned();
                    if self.parse_block() {
                        return;
                    }
                }
                TokenKind::EOF => {
                    self.content.end_data(token.line(), &self.data_name);
                    return;
                }
                _ => {
                    if self.errors.error(
                        token.line(),
                        &format!(
                            "invalid token at file level: {:?} : {}",
                            token.kind(),
                            token.text()
                        ),
                    ) {
                        return;
                    }
                }
            }
        }
    }

    /// Parse one data block. Returns the stop flag; a `false` return means
    /// the block ended implicitly and its terminator was pushed back.
    fn parse_block(&mut self) -> bool {
        if self.dialect.allows_bare_block_items() {
            self.parse_items(Scope::DataBlock)
        } else {
            self.parse_frame_block()
        }
    }
}

/// Run the parser over an existing token source. This is the primary entry
/// point; it constructs the parser, runs the file level, and returns when
/// the stream is exhausted or a stop signal propagates to the root.
pub fn parse<S: TokenSource>(
    dialect: Dialect,
    source: S,
    content: &mut dyn ContentHandler,
    errors: &mut dyn ErrorHandler,
    verbose: bool,
) {
    Parser::new(dialect, source, content, errors, verbose).parse_file();
}

/// Parse STAR text through the bundled lexer.
pub fn parse_str(
    dialect: Dialect,
    text: &str,
    content: &mut dyn ContentHandler,
    errors: &mut dyn ErrorHandler,
) {
    parse(dialect, StarLexer::new(text), content, errors, false);
}

/// Parse text as generic STAR DDL.
pub fn parse_ddl(text: &str, content: &mut dyn ContentHandler, errors: &mut dyn ErrorHandler) {
    parse_str(Dialect::Ddl, text, content, errors);
}

/// Parse text as NMR-STAR.
pub fn parse_nmrstar(text: &str, content: &mut dyn ContentHandler, errors: &mut dyn ErrorHandler) {
    parse_str(Dialect::NmrStar, text, content, errors);
}
