//! Rule-level filters: where the rule came from and what it selects.

use crate::error::{Error, Result};
use regex::Regex;
use std::path::Path;

/// One or more regular expressions tested against a source file path.
#[derive(Debug, Clone)]
pub struct FilePatterns {
    patterns: Vec<Regex>,
}

impl FilePatterns {
    /// Compile `patterns`; `option` names the setting in error messages.
    pub fn new<I, S>(option: &'static str, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(pattern).map_err(|e| Error::invalid_pattern(option, pattern, e))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(FilePatterns { patterns })
    }

    pub fn is_match(&self, file: &Path) -> bool {
        let file = file.to_string_lossy();
        self.patterns.iter().any(|pattern| pattern.is_match(&file))
    }
}

/// Whether a rule from `file` passes the include/exclude settings.
///
/// Rules without a file (built in code, or parsed without a path) always pass.
pub fn file_allowed(include: Option<&FilePatterns>, exclude: Option<&FilePatterns>, file: Option<&Path>) -> bool {
    let Some(file) = file else {
        return true;
    };
    if let Some(include) = include {
        if !include.is_match(file) {
            return false;
        }
    }
    if let Some(exclude) = exclude {
        if exclude.is_match(file) {
            return false;
        }
    }
    true
}

/// A selector blacklist entry.
#[derive(Debug, Clone)]
pub enum SelectorPattern {
    /// Matches when the selector contains the text.
    Literal(String),
    Regex(Regex),
}

impl SelectorPattern {
    /// `/body/` style entries become regexes, anything else is a literal.
    pub fn parse(entry: &str) -> Result<Self> {
        match entry
            .strip_prefix('/')
            .and_then(|rest| rest.strip_suffix('/'))
        {
            Some(source) if !source.is_empty() => Regex::new(source)
                .map(SelectorPattern::Regex)
                .map_err(|e| Error::invalid_pattern("selectorBlackList", entry, e)),
            _ => Ok(SelectorPattern::Literal(entry.to_string())),
        }
    }

    pub fn matches(&self, selector: &str) -> bool {
        match self {
            SelectorPattern::Literal(text) => selector.contains(text.as_str()),
            SelectorPattern::Regex(regex) => regex.is_match(selector),
        }
    }
}

pub fn is_blacklisted(blacklist: &[SelectorPattern], selector: &str) -> bool {
    blacklist.iter().any(|pattern| pattern.matches(selector))
}
