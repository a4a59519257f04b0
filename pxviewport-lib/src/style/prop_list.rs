//! Property list matching.
//!
//! Entry syntax:
//! - `width` exact name
//! - `*` every property
//! - `border*` starts with, `*-top` ends with, `*radius*` contains
//! - any of the above prefixed with `!` excludes instead

/// Decides whether a declaration's property is eligible for conversion.
#[derive(Debug, Clone, Default)]
pub struct PropListMatcher {
    wildcard: bool,
    exact: Vec<String>,
    starts_with: Vec<String>,
    ends_with: Vec<String>,
    contains: Vec<String>,
    not_exact: Vec<String>,
    not_starts_with: Vec<String>,
    not_ends_with: Vec<String>,
    not_contains: Vec<String>,
}

impl PropListMatcher {
    pub fn new<S: AsRef<str>>(prop_list: &[S]) -> Self {
        let mut matcher = PropListMatcher::default();

        for entry in prop_list.iter().map(AsRef::as_ref) {
            let (negated, pattern) = match entry.strip_prefix('!') {
                Some(rest) => (true, rest),
                None => (false, entry),
            };
            if pattern.is_empty() {
                continue;
            }
            if pattern == "*" {
                // `!*` excludes nothing meaningful; only a bare `*` counts.
                matcher.wildcard |= !negated;
                continue;
            }

            let leading = pattern.starts_with('*');
            let trailing = pattern.len() > 1 && pattern.ends_with('*');
            let core = pattern.trim_matches('*').to_string();
            let bucket = match (negated, leading, trailing) {
                (false, false, false) => &mut matcher.exact,
                (false, false, true) => &mut matcher.starts_with,
                (false, true, false) => &mut matcher.ends_with,
                (false, true, true) => &mut matcher.contains,
                (true, false, false) => &mut matcher.not_exact,
                (true, false, true) => &mut matcher.not_starts_with,
                (true, true, false) => &mut matcher.not_ends_with,
                (true, true, true) => &mut matcher.not_contains,
            };
            bucket.push(core);
        }

        matcher
    }

    /// Precedence: exact listing, then any exclusion, then wildcard and
    /// fragment matches.
    pub fn matches(&self, prop: &str) -> bool {
        if self.exact.iter().any(|name| name == prop) {
            return true;
        }
        if self.is_excluded(prop) {
            return false;
        }
        self.wildcard
            || self.starts_with.iter().any(|m| prop.starts_with(m.as_str()))
            || self.ends_with.iter().any(|m| prop.ends_with(m.as_str()))
            || self.contains.iter().any(|m| prop.contains(m.as_str()))
    }

    fn is_excluded(&self, prop: &str) -> bool {
        self.not_exact.iter().any(|name| name == prop)
            || self.not_starts_with.iter().any(|m| prop.starts_with(m.as_str()))
            || self.not_ends_with.iter().any(|m| prop.ends_with(m.as_str()))
            || self.not_contains.iter().any(|m| prop.contains(m.as_str()))
    }
}
