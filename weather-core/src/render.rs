use std::fmt;

use crate::model::{FieldValue, WeatherResult};

/// Shown in place of a missing location, temperature or humidity.
pub const PLACEHOLDER: &str = "N/A";

/// One labelled line of a rendered weather block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub label: &'static str,
    pub value: String,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

fn present(value: Option<&FieldValue>) -> Option<String> {
    value.filter(|v| !v.is_blank()).map(ToString::to_string)
}

/// Turn a result into its display block. Location, temperature and humidity
/// are always present; condition and description only when the server sent
/// them.
pub fn render(result: &WeatherResult) -> Vec<Line> {
    let always = [
        ("Location", result.location.as_ref()),
        ("Temperature", result.temperature.as_ref()),
        ("Humidity", result.humidity.as_ref()),
    ];
    let optional = [
        ("Condition", result.condition.as_ref()),
        ("Description", result.description.as_ref()),
    ];

    let mut lines: Vec<Line> = always
        .into_iter()
        .map(|(label, value)| Line {
            label,
            value: present(value).unwrap_or_else(|| PLACEHOLDER.to_string()),
        })
        .collect();

    lines.extend(
        optional
            .into_iter()
            .filter_map(|(label, value)| present(value).map(|value| Line { label, value })),
    );

    lines
}

/// Text form of [`render`], one `Label: value` per line.
pub fn render_text(result: &WeatherResult) -> String {
    render(result).iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> WeatherResult {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn paris_example() {
        let result = parse(r#"{"location":"Paris","temperature":"22C","humidity":"60%"}"#);
        assert_eq!(
            render_text(&result),
            "Location: Paris\nTemperature: 22C\nHumidity: 60%"
        );
    }

    #[test]
    fn missing_fields_use_placeholder() {
        let lines = render(&parse(r#"{"temperature":"19°C"}"#));
        let labels: Vec<_> = lines.iter().map(|l| l.label).collect();

        assert_eq!(labels, ["Location", "Temperature", "Humidity"]);
        assert_eq!(lines[0].value, PLACEHOLDER);
        assert_eq!(lines[1].value, "19°C");
        assert_eq!(lines[2].value, PLACEHOLDER);
    }

    #[test]
    fn empty_text_counts_as_missing() {
        let lines = render(&parse(r#"{"location":"","condition":""}"#));
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].value, PLACEHOLDER);
    }

    #[test]
    fn whitespace_is_shown_and_false_is_missing() {
        let lines = render(&parse(r#"{"location":"  ","humidity":false,"condition":false}"#));
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].value, "  ");
        assert_eq!(lines[2].value, PLACEHOLDER);
    }

    #[test]
    fn condition_and_description_when_present() {
        let result = parse(
            r#"{"description":"Average Global Weather (Placeholder)","temperature":"19°C",
                "humidity":"60%","condition":"light rain"}"#,
        );
        let text = render_text(&result);

        assert!(text.starts_with("Location: N/A\n"));
        assert!(text.contains("Condition: light rain"));
        assert!(text.ends_with("Description: Average Global Weather (Placeholder)"));
    }
}
