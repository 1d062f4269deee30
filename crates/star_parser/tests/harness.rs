use star_parser::{parse_str, Delimiter, Dialect, Event, EventCollector};

/// Parse `input` and return the full event log, content and error events in
/// emission order.
#[allow(unused)]
pub fn collect(dialect: Dialect, input: &str) -> Vec<Event> {
    let mut content = EventCollector::new();
    let mut errors = content.link();
    parse_str(dialect, input, &mut content, &mut errors);
    content.events()
}

#[allow(unused)]
pub fn ddl(input: &str) -> Vec<Event> {
    collect(Dialect::Ddl, input)
}

#[allow(unused)]
pub fn nmrstar(input: &str) -> Vec<Event> {
    collect(Dialect::NmrStar, input)
}

// Shorthand constructors keeping expected-event lists readable.

#[allow(unused)]
pub fn start_data(line: u32, name: &str) -> Event {
    Event::StartData {
        line,
        name: name.to_owned(),
    }
}

#[allow(unused)]
pub fn end_data(line: u32, name: &str) -> Event {
    Event::EndData {
        line,
        name: name.to_owned(),
    }
}

#[allow(unused)]
pub fn start_save(line: u32, name: &str) -> Event {
    Event::StartSaveframe {
        line,
        name: name.to_owned(),
    }
}

#[allow(unused)]
pub fn end_save(line: u32, name: &str) -> Event {
    Event::EndSaveframe {
        line,
        name: name.to_owned(),
    }
}

#[allow(unused)]
pub fn start_loop(line: u32) -> Event {
    Event::StartLoop { line }
}

#[allow(unused)]
pub fn end_loop(line: u32) -> Event {
    Event::EndLoop { line }
}

#[allow(unused)]
pub fn comment(line: u32, text: &str) -> Event {
    Event::Comment {
        line,
        text: text.to_owned(),
    }
}

#[allow(unused)]
pub fn data(
    tag: &str,
    tag_line: u32,
    value: &str,
    value_line: u32,
    delimiter: Delimiter,
    in_loop: bool,
) -> Event {
    Event::Data {
        tag: tag.to_owned(),
        tag_line,
        value: value.to_owned(),
        value_line,
        delimiter,
        in_loop,
    }
}

/// A bareword data item.
#[allow(unused)]
pub fn bare(tag: &str, tag_line: u32, value: &str, value_line: u32, in_loop: bool) -> Event {
    data(tag, tag_line, value, value_line, Delimiter::None, in_loop)
}

#[allow(unused)]
pub fn warning(line: u32, message: &str) -> Event {
    Event::Warning {
        line,
        message: message.to_owned(),
    }
}

#[allow(unused)]
pub fn error(line: u32, message: &str) -> Event {
    Event::Error {
        line,
        message: message.to_owned(),
    }
}

#[allow(unused)]
pub fn fatal(line: u32, message: &str) -> Event {
    Event::FatalError {
        line,
        message: message.to_owned(),
    }
}
