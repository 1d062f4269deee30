use star_syntax::Delimiter;

/// One tag/value pair delivered to [`ContentHandler::data`]. Loop cells are
/// matched with their header tag before delivery, so consumers see the same
/// shape in and out of loops.
#[derive(Clone, Copy, Debug)]
pub struct DataItem<'a> {
    pub tag: &'a str,
    pub tag_line: u32,
    pub value: &'a str,
    pub value_line: u32,
    /// How the value was written. [`Delimiter::None`] for barewords and
    /// framecodes.
    pub delimiter: Delimiter,
    pub in_loop: bool,
}

impl DataItem<'_> {
    /// The delimiter's canonical marker as it appears in the source: `'`,
    /// `"`, `'''`, `"""`, `;`, or empty for barewords and framecodes.
    pub fn delim_symbol(&self) -> &'static str {
        self.delimiter.symbol()
    }
}

/// Receives the structural events of a parse, in source order.
///
/// Every callback that returns `bool` participates in the stop protocol:
/// returning `true` asks the parser to unwind cleanly without emitting
/// anything further. `end_data` and `end_loop` returns are not consulted.
pub trait ContentHandler {
    fn start_data(&mut self, line: u32, name: &str) -> bool;
    fn end_data(&mut self, line: u32, name: &str);
    fn start_saveframe(&mut self, line: u32, name: &str) -> bool;
    fn end_saveframe(&mut self, line: u32, name: &str) -> bool;
    fn start_loop(&mut self, line: u32) -> bool;
    fn end_loop(&mut self, line: u32);
    fn comment(&mut self, line: u32, text: &str) -> bool;
    fn data(&mut self, item: DataItem<'_>) -> bool;
}

/// Receives grammar violations and decides whether parsing continues.
pub trait ErrorHandler {
    /// A suspicious construct the parse can proceed past. `true` aborts.
    fn warning(&mut self, line: u32, message: &str) -> bool;
    /// A grammar violation with a documented recovery. `true` aborts.
    fn error(&mut self, line: u32, message: &str) -> bool;
    /// An unrecoverable condition. The parse always aborts after this.
    fn fatal_error(&mut self, line: u32, message: &str);
}
