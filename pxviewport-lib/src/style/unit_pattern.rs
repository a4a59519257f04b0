use crate::error::{Error, Result};
use regex::{Captures, Regex};
use std::borrow::Cow;

/// Finds `<number><unit>` tokens in a declaration value.
///
/// Quoted strings and `url(...)` are matched as whole alternatives first so
/// that anything inside them is never captured as a length.
#[derive(Debug, Clone)]
pub struct UnitPattern {
    unit: String,
    regex: Regex,
}

impl UnitPattern {
    pub fn new(unit: &str) -> Result<Self> {
        let source = format!(
            r#""[^"]+"|'[^']+'|url\([^)]+\)|(\d*\.?\d+){}"#,
            regex::escape(unit)
        );
        let regex = Regex::new(&source).map_err(|e| Error::invalid_pattern("unitToConvert", unit, e))?;
        Ok(UnitPattern {
            unit: unit.to_string(),
            regex,
        })
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Cheap pre-check before running the regex.
    pub fn mentions_unit(&self, value: &str) -> bool {
        value.contains(&self.unit)
    }

    /// Replace every captured magnitude with `replace(magnitude)`. Returning
    /// `None` keeps the original token.
    pub fn replace_all<'v, F>(&self, value: &'v str, mut replace: F) -> Cow<'v, str>
    where
        F: FnMut(f64) -> Option<String>,
    {
        self.regex.replace_all(value, |caps: &Captures| {
            let whole = &caps[0];
            caps.get(1)
                .and_then(|number| number.as_str().parse::<f64>().ok())
                .and_then(&mut replace)
                .unwrap_or_else(|| whole.to_string())
        })
    }
}
