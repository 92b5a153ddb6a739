//! Year/month dates used by experience ranges
//!
//! The platform stores `{"year": "2024", "month": "03"}` objects; the showcase
//! stores `"2024-03"`, or `"2024"` when the month is unknown.

use serde_json::{Value, json};

/// One end of an experience range.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearMonth {
    pub year: String,
    pub month: String,
}

impl YearMonth {
    /// Parse a showcase date string by splitting on `-`.
    ///
    /// Anything after the second `-` is ignored. An empty string parses to an
    /// empty year and month.
    pub fn parse(date: &str) -> Self {
        let mut parts = date.split('-');
        Self {
            year: parts.next().unwrap_or_default().to_string(),
            month: parts.next().unwrap_or_default().to_string(),
        }
    }

    /// Read a platform `{year, month}` object. Numbers are accepted as well as strings.
    pub fn from_platform(value: &Value) -> Self {
        Self {
            year: scalar_text(value.get("year")),
            month: scalar_text(value.get("month")),
        }
    }

    /// Render as a showcase date, zero-padding the month.
    pub fn render(&self) -> String {
        if self.month.is_empty() {
            self.year.clone()
        } else {
            format!("{}-{:0>2}", self.year, self.month)
        }
    }

    /// Platform representation.
    pub fn to_platform(&self) -> Value {
        json!({ "year": self.year, "month": self.month })
    }
}

fn scalar_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Render the start and end of a platform `range` object.
pub fn render_range(range: Option<&Value>) -> (String, String) {
    let start = range
        .and_then(|r| r.get("start"))
        .map(YearMonth::from_platform)
        .unwrap_or_default();
    let end = range
        .and_then(|r| r.get("end"))
        .map(YearMonth::from_platform)
        .unwrap_or_default();
    (start.render(), end.render())
}

/// Build a platform `range` object from showcase date strings.
pub fn parse_range(start_date: &str, end_date: &str) -> Value {
    json!({
        "start": YearMonth::parse(start_date).to_platform(),
        "end": YearMonth::parse(end_date).to_platform(),
    })
}
