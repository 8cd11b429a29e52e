//! Typed-answer checking for the picture mode.

/// Compare a typed answer against the expected word: whitespace is trimmed
/// and collapsed, case is ignored.
pub fn check_typed_answer(expected: &str, typed: &str) -> bool {
    normalize(typed).to_lowercase() == normalize(expected).to_lowercase()
}

fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
