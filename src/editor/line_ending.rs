// src/editor/line_ending.rs
//! The buffer only ever holds `'\n'`; files opened with `"\r\n"` get it back
//! on save.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    /// Any `"\r\n"` in `text` makes it a CRLF document.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            LineEnding::Crlf
        } else {
            LineEnding::Lf
        }
    }

    /// Strips `'\r'` from every `"\r\n"`.
    pub fn normalize(text: &str) -> String {
        text.replace("\r\n", "\n")
    }

    /// Converts `'\n'`-separated text to this line ending.
    pub fn apply(self, text: &str) -> String {
        match self {
            LineEnding::Lf => text.to_string(),
            LineEnding::Crlf => text.replace('\n', "\r\n"),
        }
    }
}
