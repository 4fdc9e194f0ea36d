//! Chat report formatting for roll results

use crate::roll::RollSpec;

/// Report template with `$details$` and `$result$` substitution.
///
/// Formatted lines are prefixed with `* ` unless the template already starts
/// with `*`, matching how chat distinguishes system reports from player text.
#[derive(Debug, Clone)]
pub struct ReportFormat {
    template: String,
}

impl Default for ReportFormat {
    fn default() -> Self {
        Self::new("$details$ = $result$")
    }
}

impl ReportFormat {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn format(&self, details: &str, result: &str) -> String {
        let text = self
            .template
            .replace("$result$", result)
            .replace("$details$", details);
        if text.starts_with('*') {
            format!("*{}", text)
        } else {
            format!("* {}", text)
        }
    }
}

/// Render rolled values the way the report shows them: the total when the
/// spec asks for one, otherwise the comma-separated listing
pub fn result_text(spec: &RollSpec, values: &[i64]) -> String {
    if spec.report_total {
        values.iter().sum::<i64>().to_string()
    } else {
        values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// The failure line reported when a roll attempt does not complete
pub fn failure_text(spec: &RollSpec) -> String {
    format!("- Internet dice roll attempt {} failed.", spec.description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_substitutes_both_fields() {
        let f = ReportFormat::new("$details$ = $result$");
        assert_eq!(f.format("attack", "4,5"), "* attack = 4,5");
    }

    #[test]
    fn test_format_star_template_gets_bare_prefix() {
        let f = ReportFormat::new("*** $details$ = $result$");
        assert_eq!(f.format("attack", "9"), "**** attack = 9");
    }

    #[test]
    fn test_result_text_listing_vs_total() {
        let mut spec = RollSpec::new("attack", 2, 6);
        assert_eq!(result_text(&spec, &[4, 5]), "4,5");
        spec.report_total = true;
        assert_eq!(result_text(&spec, &[4, 5]), "9");
    }

    #[test]
    fn test_failure_text() {
        let spec = RollSpec::new("attack", 2, 6);
        assert_eq!(
            failure_text(&spec),
            "- Internet dice roll attempt attack failed."
        );
    }
}
