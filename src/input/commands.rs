//! Input commands read from the terminal
//!
//! One command per line: a quality label (`144`, `720p`, ...) selects a
//! mode, `click` is a pointer gesture on the document, `quit` exits.

/// Events sent from the input listener to the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Selector changed to the given raw label (validated downstream)
    Select(String),
    /// Pointer click anywhere on the document
    Click,
    /// Leave the event loop
    Quit,
}

impl InputEvent {
    /// Parse one input line; blank lines yield nothing
    pub fn parse(line: &str) -> Option<Self> {
        let word = line.trim();
        if word.is_empty() {
            return None;
        }

        let event = if word.eq_ignore_ascii_case("click") {
            InputEvent::Click
        } else if word.eq_ignore_ascii_case("quit") || word.eq_ignore_ascii_case("exit") {
            InputEvent::Quit
        } else {
            InputEvent::Select(word.to_string())
        };
        Some(event)
    }
}
