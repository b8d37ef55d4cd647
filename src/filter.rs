use regex::Regex;
use crate::error::WatchError;

/// A compiled set of user-supplied path patterns.
///
/// Matching is an unanchored search over the relative path, so `\.py$`
/// matches any path ending in `.py` and `tests/` matches anything under a
/// `tests` directory. An empty set matches every path.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    pub fn compile(patterns: &[String]) -> Result<Self, WatchError> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| WatchError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    pub fn match_all() -> Self {
        Self::default()
    }

    pub fn matches(&self, relative_path: &str) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|re| re.is_match(relative_path))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}
