/// Styling class of a terminal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Plain,
    Success,
    Warning,
    Error,
    /// Echo of what the operator typed; rendered without the system prompt.
    UserCommand,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalLine {
    pub text: String,
    pub style: LineStyle,
}

impl TerminalLine {
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        TerminalLine {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Plain)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Success)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Warning)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Error)
    }
}
