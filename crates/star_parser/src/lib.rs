//! An event-driven parser family for the STAR data language.
//!
//! The parser reads a token stream and pushes structural events (data
//! blocks, save-frames, loops, data items, comments) to a caller-supplied
//! [`ContentHandler`], with grammar violations routed through an
//! [`ErrorHandler`] that decides whether parsing continues. Two dialects are
//! supported: generic DDL (multiple data blocks, free data items, optional
//! loop terminators) and NMR-STAR (one data block of save-frames, mandatory
//! `stop_`). No document tree is built; state lives only for the duration of
//! the parse.
//!
//! Most callers hand text to [`parse_ddl`] or [`parse_nmrstar`]; the lower
//! entry points accept any [`TokenSource`].

mod error;
mod events;
mod handler;
mod lexer;
mod parser;
mod source;
mod value;

pub use error::{LexError, LexResult};
pub use events::{Event, EventCollector};
pub use handler::{ContentHandler, DataItem, ErrorHandler};
pub use lexer::StarLexer;
pub use parser::{
    parse, parse_ddl, parse_nmrstar, parse_str, FILE_BLOCK_NAME, LOOP_WITH_NO_TAGS, UNNAMED_FRAME,
};
pub use source::{TokenCursor, TokenSource};

pub use star_syntax::{Delimiter, Dialect, SourceText, Token, TokenKind};
