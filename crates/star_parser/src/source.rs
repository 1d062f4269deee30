use star_syntax::Token;

use crate::error::LexResult;

/// Where tokens come from. The bundled [`StarLexer`](crate::StarLexer)
/// implements this; anything else that can produce the STAR token set works
/// as well.
pub trait TokenSource {
    /// Produce the next token. End of input is an ordinary token of kind
    /// [`TokenKind::EOF`](star_syntax::TokenKind::EOF), returned for every
    /// call once the input is exhausted.
    fn next_token(&mut self) -> LexResult<Token>;
}

/// A one-slot pushback buffer over a [`TokenSource`].
///
/// Several tokens (`data_…`, `save_…`, `save_`, `loop_`, tag names) both
/// terminate the construct being parsed and open the next one. The inner
/// parser emits the implicit end event, hands the token back with
/// [`unread`](TokenCursor::unread), and returns; its caller then observes the
/// very same token on the next read.
pub struct TokenCursor<S> {
    source: S,
    pushed_back: Option<Token>,
}

impl<S: TokenSource> TokenCursor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            pushed_back: None,
        }
    }

    pub fn next_token(&mut self) -> LexResult<Token> {
        if let Some(token) = self.pushed_back.take() {
            return Ok(token);
        }
        self.source.next_token()
    }

    /// Hand `token` back so the next [`next_token`](TokenCursor::next_token)
    /// returns it again. The slot holds one token; every unread is consumed
    /// by the caller before another can happen.
    pub fn unread(&mut self, token: Token) {
        debug_assert!(
            self.pushed_back.is_none(),
            "token pushback slot already occupied"
        );
        self.pushed_back = Some(token);
    }
}
