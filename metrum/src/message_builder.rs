//! Annotated source text for diagnostics
//!
//! The message builder turns a source string and its diagnostics into one
//! string with each message inserted at its position:
//!
//! ```text
//! s^🕳👈❮𝐍𝐮𝐦𝐛𝐞𝐫 𝐢𝐬 𝐫𝐞𝐪𝐮𝐢𝐫𝐞𝐝❯
//! ```
//!
//! A zero-width diagnostic marks an insertion point and is placed before the
//! character at that offset (the "reading" marker). Any other diagnostic is
//! placed right after the text it spans (the "trailing" marker).

use crate::diagnostics::Diagnostic;

/// Turns diagnostics into display text
pub trait DiagnosticRenderer {
    fn render(&self, source: &str, diagnostics: &[Diagnostic]) -> String;
}

/// Renders diagnostics inline, inside the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineRenderer {
    pub reading_open: String,
    pub reading_close: String,
    pub trailing_open: String,
    pub trailing_close: String,
    /// Map ASCII letters and digits of messages to their bold forms
    pub bold: bool,
}

impl Default for InlineRenderer {
    fn default() -> Self {
        Self {
            reading_open: "🕳👈❮".to_string(),
            reading_close: "❯".to_string(),
            trailing_open: "👈❮".to_string(),
            trailing_close: "❯".to_string(),
            bold: true,
        }
    }
}

impl InlineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// ASCII-only markers: `^<<message>>` before, `<<message>>` after
    pub fn plain() -> Self {
        Self {
            reading_open: "^<<".to_string(),
            reading_close: ">>".to_string(),
            trailing_open: "<<".to_string(),
            trailing_close: ">>".to_string(),
            bold: false,
        }
    }

    fn marker(&self, open: &str, message: &str, close: &str) -> String {
        let text = if self.bold {
            bold(message)
        } else {
            message.to_string()
        };
        format!("{}{}{}", open, text, close)
    }
}

/// Inserted text around one source character
#[derive(Debug, Default, Clone)]
struct Cell {
    reading: Vec<String>,
    trailing: Vec<String>,
}

impl DiagnosticRenderer for InlineRenderer {
    fn render(&self, source: &str, diagnostics: &[Diagnostic]) -> String {
        let chars: Vec<char> = source.chars().collect();
        // One extra cell for diagnostics at the end of the source
        let mut cells = vec![Cell::default(); chars.len() + 1];

        for diagnostic in diagnostics {
            let span = diagnostic.span;
            if span.is_empty() {
                let index = span.start.min(chars.len());
                cells[index].reading.push(self.marker(
                    &self.reading_open,
                    &diagnostic.message,
                    &self.reading_close,
                ));
            } else {
                let index = span.end.saturating_sub(1).min(chars.len());
                cells[index].trailing.push(self.marker(
                    &self.trailing_open,
                    &diagnostic.message,
                    &self.trailing_close,
                ));
            }
        }

        let mut output = String::new();
        for (index, cell) in cells.iter().enumerate() {
            for marker in &cell.reading {
                output.push_str(marker);
            }
            if let Some(c) = chars.get(index) {
                output.push(*c);
            }
            for marker in &cell.trailing {
                output.push_str(marker);
            }
        }
        output
    }
}

/// Render with the default inline markers
pub fn render(source: &str, diagnostics: &[Diagnostic]) -> String {
    InlineRenderer::default().render(source, diagnostics)
}

/// Mathematical bold forms of ASCII letters and digits. Other characters are
/// kept as they are.
pub fn bold(text: &str) -> String {
    text.chars().map(bold_char).collect()
}

fn bold_char(c: char) -> char {
    let mapped = match c {
        'A'..='Z' => 0x1D400 + (c as u32 - 'A' as u32),
        'a'..='z' => 0x1D41A + (c as u32 - 'a' as u32),
        '0'..='9' => 0x1D7CE + (c as u32 - '0' as u32),
        _ => return c,
    };
    char::from_u32(mapped).unwrap_or(c)
}
