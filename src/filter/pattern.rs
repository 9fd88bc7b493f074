use regex::Regex;

use crate::error::FilterError;
use crate::table::Record;

/// One case-sensitive regex searched for anywhere in a single column.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    candidates: Vec<String>,
    regex: Regex,
}

impl PatternMatcher {
    pub fn new<C>(candidates: C, regex: Regex) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            regex,
        }
    }

    /// Compile `pattern`; a bad pattern is a configuration error.
    pub fn compile<C>(candidates: C, pattern: &str) -> Result<Self, FilterError>
    where
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let regex = Regex::new(pattern)
            .map_err(|e| FilterError::Config(format!("invalid regex `{}`: {}", pattern, e)))?;
        Ok(Self::new(candidates, regex))
    }

    /// Column names tried in priority order.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Empty cells never match.
    pub fn matches_value(&self, value: &str) -> bool {
        !value.is_empty() && self.regex.is_match(value)
    }

    pub fn matches_at(&self, record: &Record<'_>, idx: usize) -> bool {
        self.matches_value(record.value_at(idx))
    }
}
