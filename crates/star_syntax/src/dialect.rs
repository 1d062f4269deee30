/// Which member of the STAR family is being parsed. The two dialects share
/// one grammar core; the descriptor toggles the few places they differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Generic STAR: multiple data blocks per file, data items and loops in
    /// and out of save-frames, loop terminators optional.
    Ddl,
    /// NMR-STAR: one data block whose content is exclusively save-frames,
    /// and every loop is closed by an explicit `stop_`.
    NmrStar,
}

impl Dialect {
    /// May data items and loops appear directly in a data block, outside any
    /// save-frame?
    pub fn allows_bare_block_items(self) -> bool {
        matches!(self, Dialect::Ddl)
    }

    /// Is `stop_` required to close every loop? When it is, reaching EOF
    /// inside a loop is fatal rather than an implicit close.
    pub fn requires_loop_stop(self) -> bool {
        matches!(self, Dialect::NmrStar)
    }
}
