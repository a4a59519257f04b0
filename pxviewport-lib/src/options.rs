//! Conversion settings: defaults, partial overrides and validation.

use crate::error::{Error, Result};
use crate::style::filters::{FilePatterns, SelectorPattern};
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Beyond this many decimals the rounding step overflows `f64`.
pub const MAX_UNIT_PRECISION: u32 = 15;

/// Fully resolved, validated settings for one transform.
#[derive(Debug, Clone)]
pub struct Options {
    /// Source unit to detect.
    pub unit_to_convert: String,
    /// Base width for portrait conversion.
    pub viewport_width: f64,
    /// Decimal places retained.
    pub unit_precision: u32,
    /// Output unit for non-font properties.
    pub viewport_unit: String,
    /// Output unit for properties whose name contains `font`.
    pub font_viewport_unit: String,
    pub selector_black_list: Vec<SelectorPattern>,
    pub prop_list: Vec<String>,
    /// Values at or below this are left alone.
    pub min_pixel_value: f64,
    /// Convert rules inside existing media queries too.
    pub media_query: bool,
    /// Rewrite in place instead of appending a converted copy.
    pub replace: bool,
    /// Generate an `@media (orientation: landscape)` block.
    pub landscape: bool,
    pub landscape_unit: String,
    pub landscape_width: f64,
    pub exclude: Option<FilePatterns>,
    pub include: Option<FilePatterns>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            unit_to_convert: "px".to_string(),
            viewport_width: 320.0,
            unit_precision: 5,
            viewport_unit: "vw".to_string(),
            font_viewport_unit: "vw".to_string(),
            selector_black_list: Vec::new(),
            prop_list: vec!["*".to_string()],
            min_pixel_value: 1.0,
            media_query: false,
            replace: true,
            landscape: false,
            landscape_unit: "vw".to_string(),
            landscape_width: 568.0,
            exclude: None,
            include: None,
        }
    }
}

/// `include` / `exclude` as written in a config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PatternOption {
    One(String),
    Many(Vec<String>),
    /// Anything else; rejected by [`Options::resolve`].
    Invalid(IgnoredAny),
}

impl From<&str> for PatternOption {
    fn from(pattern: &str) -> Self {
        PatternOption::One(pattern.to_string())
    }
}

impl From<Vec<String>> for PatternOption {
    fn from(patterns: Vec<String>) -> Self {
        PatternOption::Many(patterns)
    }
}

/// User-supplied settings; every field is optional and falls back to
/// [`Options::default`]. Field names follow the camelCase config keys.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialOptions {
    pub unit_to_convert: Option<String>,
    pub viewport_width: Option<f64>,
    pub unit_precision: Option<u32>,
    pub viewport_unit: Option<String>,
    pub font_viewport_unit: Option<String>,
    pub selector_black_list: Option<Vec<String>>,
    pub prop_list: Option<Vec<String>>,
    pub min_pixel_value: Option<f64>,
    pub media_query: Option<bool>,
    pub replace: Option<bool>,
    pub landscape: Option<bool>,
    pub landscape_unit: Option<String>,
    pub landscape_width: Option<f64>,
    pub exclude: Option<PatternOption>,
    pub include: Option<PatternOption>,
}

impl PartialOptions {
    /// Load from a `.json` file, or TOML for any other extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(&text).map_err(|e| Error::config(path, e))
        } else {
            toml::from_str(&text).map_err(|e| Error::config(path, e))
        }
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: PartialOptions) -> PartialOptions {
        PartialOptions {
            unit_to_convert: other.unit_to_convert.or(self.unit_to_convert),
            viewport_width: other.viewport_width.or(self.viewport_width),
            unit_precision: other.unit_precision.or(self.unit_precision),
            viewport_unit: other.viewport_unit.or(self.viewport_unit),
            font_viewport_unit: other.font_viewport_unit.or(self.font_viewport_unit),
            selector_black_list: other.selector_black_list.or(self.selector_black_list),
            prop_list: other.prop_list.or(self.prop_list),
            min_pixel_value: other.min_pixel_value.or(self.min_pixel_value),
            media_query: other.media_query.or(self.media_query),
            replace: other.replace.or(self.replace),
            landscape: other.landscape.or(self.landscape),
            landscape_unit: other.landscape_unit.or(self.landscape_unit),
            landscape_width: other.landscape_width.or(self.landscape_width),
            exclude: other.exclude.or(self.exclude),
            include: other.include.or(self.include),
        }
    }
}

impl Options {
    /// Merge `partial` over the defaults and validate the result.
    pub fn resolve(partial: PartialOptions) -> Result<Self> {
        let defaults = Options::default();

        let selector_black_list = partial
            .selector_black_list
            .unwrap_or_default()
            .iter()
            .map(|entry| SelectorPattern::parse(entry))
            .collect::<Result<Vec<_>>>()?;

        let options = Options {
            unit_to_convert: partial.unit_to_convert.unwrap_or(defaults.unit_to_convert),
            viewport_width: partial.viewport_width.unwrap_or(defaults.viewport_width),
            unit_precision: partial.unit_precision.unwrap_or(defaults.unit_precision),
            viewport_unit: partial.viewport_unit.unwrap_or(defaults.viewport_unit),
            font_viewport_unit: partial.font_viewport_unit.unwrap_or(defaults.font_viewport_unit),
            selector_black_list,
            prop_list: partial.prop_list.unwrap_or(defaults.prop_list),
            min_pixel_value: partial.min_pixel_value.unwrap_or(defaults.min_pixel_value),
            media_query: partial.media_query.unwrap_or(defaults.media_query),
            replace: partial.replace.unwrap_or(defaults.replace),
            landscape: partial.landscape.unwrap_or(defaults.landscape),
            landscape_unit: partial.landscape_unit.unwrap_or(defaults.landscape_unit),
            landscape_width: partial.landscape_width.unwrap_or(defaults.landscape_width),
            exclude: compile_patterns("exclude", partial.exclude)?,
            include: compile_patterns("include", partial.include)?,
        };
        options.validate()?;
        Ok(options)
    }

    /// Checks that hold regardless of how the options were built.
    pub fn validate(&self) -> Result<()> {
        check_width("viewportWidth", self.viewport_width)?;
        check_width("landscapeWidth", self.landscape_width)?;
        if self.unit_precision > MAX_UNIT_PRECISION {
            return Err(Error::InvalidPrecision {
                value: self.unit_precision,
                max: MAX_UNIT_PRECISION,
            });
        }
        Ok(())
    }
}

fn compile_patterns(option: &'static str, value: Option<PatternOption>) -> Result<Option<FilePatterns>> {
    match value {
        None => Ok(None),
        Some(PatternOption::One(pattern)) => FilePatterns::new(option, [pattern]).map(Some),
        Some(PatternOption::Many(patterns)) => FilePatterns::new(option, patterns).map(Some),
        Some(PatternOption::Invalid(_)) => Err(Error::InvalidPatternOption { option }),
    }
}

fn check_width(option: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidWidth { option, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_table() {
        let options = Options::resolve(PartialOptions::default()).unwrap();
        assert_eq!(options.unit_to_convert, "px");
        assert_eq!(options.viewport_width, 320.0);
        assert_eq!(options.unit_precision, 5);
        assert_eq!(options.viewport_unit, "vw");
        assert_eq!(options.font_viewport_unit, "vw");
        assert!(options.selector_black_list.is_empty());
        assert_eq!(options.prop_list, vec!["*"]);
        assert_eq!(options.min_pixel_value, 1.0);
        assert!(!options.media_query);
        assert!(options.replace);
        assert!(!options.landscape);
        assert_eq!(options.landscape_unit, "vw");
        assert_eq!(options.landscape_width, 568.0);
        assert!(options.include.is_none() && options.exclude.is_none());
    }

    #[test]
    fn accepts_single_pattern_or_list() {
        let partial: PartialOptions =
            serde_json::from_str(r#"{"include": "/src/", "exclude": ["node_modules", "vendor"]}"#).unwrap();
        let options = Options::resolve(partial).unwrap();
        assert!(options.include.unwrap().is_match(Path::new("/app/src/a.css")));
        assert!(options.exclude.unwrap().is_match(Path::new("/app/vendor/a.css")));
    }

    #[test]
    fn rejects_other_pattern_shapes() {
        for raw in [r#"{"exclude": 5}"#, r#"{"exclude": true}"#, r#"{"include": [1, 2]}"#, r#"{"include": {"a": 1}}"#] {
            let partial: PartialOptions = serde_json::from_str(raw).unwrap();
            let err = Options::resolve(partial).unwrap_err();
            assert!(matches!(err, Error::InvalidPatternOption { .. }), "{}: {}", raw, err);
        }
    }

    #[test]
    fn rejects_unusable_widths() {
        let partial = PartialOptions {
            viewport_width: Some(0.0),
            ..PartialOptions::default()
        };
        assert!(matches!(
            Options::resolve(partial),
            Err(Error::InvalidWidth { option: "viewportWidth", .. })
        ));
    }

    #[test]
    fn rejects_precision_beyond_f64() {
        let partial = PartialOptions {
            unit_precision: Some(400),
            ..PartialOptions::default()
        };
        assert!(matches!(
            Options::resolve(partial),
            Err(Error::InvalidPrecision { value: 400, max: MAX_UNIT_PRECISION })
        ));

        let at_limit = PartialOptions {
            unit_precision: Some(MAX_UNIT_PRECISION),
            ..PartialOptions::default()
        };
        assert!(Options::resolve(at_limit).is_ok());
    }

    #[test]
    fn merge_prefers_later_layer() {
        let file = PartialOptions {
            viewport_width: Some(750.0),
            landscape: Some(true),
            ..PartialOptions::default()
        };
        let flags = PartialOptions {
            viewport_width: Some(375.0),
            ..PartialOptions::default()
        };
        let merged = file.merge(flags);
        assert_eq!(merged.viewport_width, Some(375.0));
        assert_eq!(merged.landscape, Some(true));
    }

    #[test]
    fn loads_toml_config() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "viewportWidth = 750\nselectorBlackList = [\".ignore\", \"/^html$/\"]\nexclude = \"node_modules\""
        )
        .unwrap();

        let options = Options::resolve(PartialOptions::from_file(file.path()).unwrap()).unwrap();
        assert_eq!(options.viewport_width, 750.0);
        assert_eq!(options.selector_black_list.len(), 2);
        assert!(options.exclude.is_some());
    }

    #[test]
    fn unknown_keys_are_config_errors() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"viewportWdth": 750}}"#).unwrap();
        let err = PartialOptions::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
