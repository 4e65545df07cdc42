use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextSize;

pub type ParseResult<T> = Result<T, ParseError>;

/// The single error a parse reports before it stops.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input does not match the grammar.
    #[error("syntax error at offset {offset:?}: {message}")]
    Syntax { offset: TextSize, message: String },
    /// The parser reached a state its own dispatch should have ruled out.
    #[error("internal parser error at offset {offset:?}: {message}")]
    Internal { offset: TextSize, message: String },
}

impl ParseError {
    pub fn syntax(offset: TextSize, message: impl Into<String>) -> Self {
        Self::Syntax { offset, message: message.into() }
    }

    pub fn internal(offset: TextSize, message: impl Into<String>) -> Self {
        Self::Internal { offset, message: message.into() }
    }

    pub fn offset(&self) -> TextSize {
        match self {
            Self::Syntax { offset, .. } | Self::Internal { offset, .. } => *offset,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Syntax { message, .. } | Self::Internal { message, .. } => message,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }

    /// Renders the error as an annotated source snippet.
    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let message = Level::Error.title(self.message()).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(Level::Error.span(self.span(text)).label("here"))
                .fold(true),
        );
        renderer.render(message)
    }

    /// Byte span under the error offset: one character, or empty at the end
    /// of the text.
    fn span(&self, text: &str) -> std::ops::Range<usize> {
        let start = usize::from(self.offset()).min(text.len());
        let width = text.get(start..).and_then(|rest| rest.chars().next()).map_or(0, char::len_utf8);
        start..start + width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let error = ParseError::syntax(TextSize::new(3), "expected expression");
        assert_eq!(error.offset(), TextSize::new(3));
        assert_eq!(error.message(), "expected expression");
        assert!(!error.is_internal());
        assert_eq!(error.to_string(), "syntax error at offset 3: expected expression");

        let internal = ParseError::internal(TextSize::new(0), "no operator for token");
        assert!(internal.is_internal());
    }

    #[test]
    fn render_points_at_offset() {
        let text = "x = (1,\n";
        let error = ParseError::syntax(TextSize::new(8), "expected ')'");
        let rendered = error.render(&Renderer::plain(), "main.py", text).to_string();

        assert!(rendered.contains("expected ')'"), "{rendered}");
        assert!(rendered.contains("main.py"), "{rendered}");
        assert!(rendered.contains("here"), "{rendered}");
    }

    #[test]
    fn span_is_clamped_to_text() {
        let error = ParseError::syntax(TextSize::new(40), "expected newline");
        assert_eq!(error.span("abc"), 3..3);
        let error = ParseError::syntax(TextSize::new(1), "expected newline");
        assert_eq!(error.span("aé"), 1..3);
    }
}
