/// Reserved words that may not open a word inside a non-quoted delimited
/// value without drawing a warning.
pub const RESERVED_WORDS: [&str; 5] = ["data_", "save_", "loop_", "stop_", "global_"];

/// Scan `text` for a reserved word opening any whitespace-separated word.
/// Returns the first match; the caller reports one warning per token. The
/// comparison is ASCII case-insensitive, matching keyword lexing.
pub fn find_reserved_word(text: &str) -> Option<&'static str> {
    for word in text.split_ascii_whitespace() {
        for keyword in RESERVED_WORDS {
            if starts_with_ignore_case(word, keyword) {
                return Some(keyword);
            }
        }
    }
    None
}

fn starts_with_ignore_case(word: &str, prefix: &str) -> bool {
    word.len() >= prefix.len()
        && word.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}
