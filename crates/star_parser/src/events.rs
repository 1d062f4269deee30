use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use star_syntax::Delimiter;

use crate::handler::{ContentHandler, DataItem, ErrorHandler};

/// A recorded parse event, one variant per handler callback. The order of a
/// recorded list is the order the parser emitted the callbacks in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    StartData {
        line: u32,
        name: String,
    },
    EndData {
        line: u32,
        name: String,
    },
    StartSaveframe {
        line: u32,
        name: String,
    },
    EndSaveframe {
        line: u32,
        name: String,
    },
    StartLoop {
        line: u32,
    },
    EndLoop {
        line: u32,
    },
    Comment {
        line: u32,
        text: String,
    },
    Data {
        tag: String,
        tag_line: u32,
        value: String,
        value_line: u32,
        delimiter: Delimiter,
        in_loop: bool,
    },
    Warning {
        line: u32,
        message: String,
    },
    Error {
        line: u32,
        message: String,
    },
    FatalError {
        line: u32,
        message: String,
    },
}

impl Event {
    pub fn is_diagnostic(&self) -> bool {
        matches!(
            self,
            Event::Warning { .. } | Event::Error { .. } | Event::FatalError { .. }
        )
    }
}

/// Records every callback in order, implementing both handler traits.
///
/// The parser takes the content and error sinks as two separate borrows, so
/// a single collector cannot be passed twice; [`link`](EventCollector::link)
/// produces a second handle recording into the same list. Pass the original
/// as the content sink and the link as the error sink and the log stays in
/// emission order across both.
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Rc<RefCell<Vec<Event>>>,
    /// Ask the parser to stop on the next reported error.
    pub stop_on_error: bool,
    /// Ask the parser to stop on the next reported warning.
    pub stop_on_warning: bool,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Another handle recording into the same event list.
    pub fn link(&self) -> EventCollector {
        EventCollector {
            events: Rc::clone(&self.events),
            stop_on_error: self.stop_on_error,
            stop_on_warning: self.stop_on_warning,
        }
    }

    fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    /// A snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Only the events recorded through the [`ErrorHandler`] side.
    pub fn diagnostics(&self) -> Vec<Event> {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.is_diagnostic())
            .cloned()
            .collect()
    }
}

impl ContentHandler for EventCollector {
    fn start_data(&mut self, line: u32, name: &str) -> bool {
        self.push(Event::StartData {
            line,
            name: name.to_owned(),
        });
        false
    }

    fn end_data(&mut self, line: u32, name: &str) {
        self.push(Event::EndData {
            line,
            name: name.to_owned(),
        });
    }

    fn start_saveframe(&mut self, line: u32, name: &str) -> bool {
        self.push(Event::StartSaveframe {
            line,
            name: name.to_owned(),
        });
        false
    }

    fn end_saveframe(&mut self, line: u32, name: &str) -> bool {
        self.push(Event::EndSaveframe {
            line,
            name: name.to_owned(),
        });
        false
    }

    fn start_loop(&mut self, line: u32) -> bool {
        self.push(Event::StartLoop { line });
        false
    }

    fn end_loop(&mut self, line: u32) {
        self.push(Event::EndLoop { line });
    }

    fn comment(&mut self, line: u32, text: &str) -> bool {
        self.push(Event::Comment {
            line,
            text: text.to_owned(),
        });
        false
    }

    fn data(&mut self, item: DataItem<'_>) -> bool {
        self.push(Event::Data {
            tag: item.tag.to_owned(),
            tag_line: item.tag_line,
            value: item.value.to_owned(),
            value_line: item.value_line,
            delimiter: item.delimiter,
            in_loop: item.in_loop,
        });
        false
    }
}

impl ErrorHandler for EventCollector {
    fn warning(&mut self, line: u32, message: &str) -> bool {
        self.push(Event::Warning {
            line,
            message: message.to_owned(),
        });
        self.stop_on_warning
    }

    fn error(&mut self, line: u32, message: &str) -> bool {
        self.push(Event::Error {
            line,
            message: message.to_owned(),
        });
        self.stop_on_error
    }

    fn fatal_error(&mut self, line: u32, message: &str) {
        self.push(Event::FatalError {
            line,
            message: message.to_owned(),
        });
    }
}
