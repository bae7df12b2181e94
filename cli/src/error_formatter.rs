use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use metrum::{Diagnostic, DiagnosticData, DiagnosticRenderer, MetrumError};
use std::io::IsTerminal;

const SOURCE_ID: &str = "<units>";

/// Renders diagnostics as ariadne reports, one per diagnostic
pub struct AriadneRenderer {
    color: bool,
}

impl Default for AriadneRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AriadneRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn render_one(&self, source: &str, diagnostic: &Diagnostic) -> Option<String> {
        let start = diagnostic.span.start;
        let end = diagnostic.span.end.max(start + 1);

        let mut report = Report::build(ReportKind::Error, SOURCE_ID, start)
            .with_config(Config::default().with_color(self.color))
            .with_code(diagnostic.id.as_str())
            .with_message(&diagnostic.message)
            .with_label(
                Label::new((SOURCE_ID, start..end))
                    .with_message(label_text(diagnostic))
                    .with_color(Color::Red),
            );

        if let DiagnosticData::CircularReference { path, .. } = &diagnostic.data {
            report = report.with_note(format!("Expansion path: {}", path.join(" → ")));
        }

        // Trailing space so markers at the end of the source have a column
        let padded = format!("{} ", source);
        let mut output = Vec::new();
        report
            .finish()
            .write((SOURCE_ID, Source::from(padded.as_str())), &mut output)
            .ok()?;
        Some(String::from_utf8_lossy(&output).to_string())
    }
}

impl DiagnosticRenderer for AriadneRenderer {
    fn render(&self, source: &str, diagnostics: &[Diagnostic]) -> String {
        diagnostics
            .iter()
            .map(|diagnostic| {
                self.render_one(source, diagnostic)
                    // Fallback to simple format
                    .unwrap_or_else(|| format!("{}\n", diagnostic))
            })
            .collect()
    }
}

fn label_text(diagnostic: &Diagnostic) -> String {
    match &diagnostic.data {
        DiagnosticData::UnexpectedToken { token } => format!("found '{}'", token),
        DiagnosticData::CircularReference { unit, .. } => {
            format!("'{}' is defined in terms of itself", unit)
        }
        DiagnosticData::InternalError { detail } => detail.clone(),
        DiagnosticData::None => String::new(),
    }
}

/// Format a MetrumError for the terminal
pub fn format_error(error: &MetrumError) -> String {
    match error {
        MetrumError::Units(details) => {
            let renderer = AriadneRenderer::new(std::io::stderr().is_terminal());
            format!(
                "Invalid units: {}\n{}",
                details.source,
                renderer.render(&details.source, &details.diagnostics)
            )
        }
        MetrumError::ResourceLimitExceeded {
            limit_name,
            limit_value,
            actual_value,
            suggestion,
        } => {
            format!(
                "Resource limit exceeded: {}\n  Limit: {}\n  Actual: {}\n  {}",
                limit_name, limit_value, actual_value, suggestion
            )
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrum::{Engine, UnitSystem};

    #[test]
    fn test_renders_code_and_message() {
        let engine = Engine::new().with_unit_system(UnitSystem::empty());
        let error = engine
            .render_with(&AriadneRenderer::new(false), "s^")
            .unwrap_err();
        let message = &error.formatted().unwrap().message;
        assert!(message.contains("Number_is_required"));
        assert!(message.contains("Number is required"));
    }

    #[test]
    fn test_cycle_note_lists_path() {
        let mut system = UnitSystem::empty();
        system.alias("a", "b");
        system.alias("b", "a");
        let engine = Engine::new().with_unit_system(system);
        let error = engine
            .render_with(&AriadneRenderer::new(false), "a")
            .unwrap_err();
        assert!(error.formatted().unwrap().message.contains("a → b → a"));
    }
}
