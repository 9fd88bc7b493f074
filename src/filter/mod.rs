// src/filter/mod.rs
use tracing::debug;

use crate::error::FilterError;
use crate::table::{Record, Table};

pub mod column;
pub mod keyword;
pub mod pattern;

pub use column::{resolve_column, ResolvedColumn};
pub use keyword::KeywordMatcher;
pub use pattern::PatternMatcher;

/// How rows are selected. One variant per matching strategy.
#[derive(Debug, Clone)]
pub enum MatchPolicy {
    Keyword(KeywordMatcher),
    Pattern(PatternMatcher),
}

/// A policy bound to one table's header, ready to test records.
#[derive(Debug)]
pub enum PreparedPolicy<'p> {
    Keyword {
        matcher: &'p KeywordMatcher,
        columns: Vec<usize>,
    },
    Pattern {
        matcher: &'p PatternMatcher,
        column: ResolvedColumn,
    },
}

impl MatchPolicy {
    /// Resolve target columns against `headers`.
    ///
    /// Keyword mode never fails: absent columns are read as empty. Pattern mode
    /// fails with [`FilterError::ColumnNotFound`] when no candidate exists.
    pub fn prepare(&self, headers: &[String]) -> Result<PreparedPolicy<'_>, FilterError> {
        match self {
            MatchPolicy::Keyword(matcher) => {
                let columns = matcher.present_columns(headers);
                debug!(?columns, "keyword columns");
                Ok(PreparedPolicy::Keyword { matcher, columns })
            }
            MatchPolicy::Pattern(matcher) => {
                let column = resolve_column(headers, matcher.candidates())?;
                debug!(column = %column.name, "pattern column");
                Ok(PreparedPolicy::Pattern { matcher, column })
            }
        }
    }

    /// Filter `table`, keeping matching rows in input order and the full header.
    pub fn apply(&self, table: &Table) -> Result<Table, FilterError> {
        let prepared = self.prepare(&table.headers)?;
        Ok(table.retain_matching(|record| prepared.matches(record)))
    }
}

impl PreparedPolicy<'_> {
    pub fn matches(&self, record: &Record<'_>) -> bool {
        match self {
            PreparedPolicy::Keyword { matcher, columns } => matcher.matches_at(record, columns),
            PreparedPolicy::Pattern { matcher, column } => matcher.matches_at(record, column.index),
        }
    }

    /// Header name of the column being tested, when there is exactly one.
    pub fn target_column(&self) -> Option<&str> {
        match self {
            PreparedPolicy::Keyword { .. } => None,
            PreparedPolicy::Pattern { column, .. } => Some(column.name.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolicyConfig;
    use std::collections::BTreeSet;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    fn keyword_policy() -> MatchPolicy {
        PolicyConfig::default().keyword_policy()
    }

    fn pattern_policy() -> MatchPolicy {
        PolicyConfig::default().pattern_policy().unwrap()
    }

    #[test]
    fn test_keyword_example_rows() {
        let t = table(
            &["region", "notes"],
            &[
                &["rural village, Henan", ""],
                &["urban", ""],
                &["", "countryside clinic"],
            ],
        );
        let out = keyword_policy().apply(&t).unwrap();
        assert_eq!(out.headers, t.headers);
        assert_eq!(out.rows, vec![t.rows[0].clone(), t.rows[2].clone()]);
    }

    #[test]
    fn test_pattern_example_rows() {
        let t = table(
            &["speaker_id", "accent"],
            &[&["1", "Henan"], &["2", "Beijing"], &["3", "Sichuan dialect"]],
        );
        let out = pattern_policy().apply(&t).unwrap();
        let ids: Vec<&str> = out.records().map(|r| r.get("speaker_id")).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(out.headers, t.headers);
    }

    #[test]
    fn test_keyword_filter_is_idempotent() {
        let t = table(
            &["id", "region", "notes"],
            &[
                &["1", "County seat", ""],
                &["2", "city", "met in a 村"],
                &["3", "city", "office"],
                &["4", "", ""],
                &["5", "Countryside", "x"],
            ],
        );
        let policy = keyword_policy();
        let once = policy.apply(&t).unwrap();
        let twice = policy.apply(&once).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once.len(), 3);
    }

    #[test]
    fn test_output_order_is_input_order() {
        let t = table(
            &["id", "region"],
            &[
                &["c", "village"],
                &["a", "town"],
                &["b", "county"],
                &["d", "rural"],
            ],
        );
        let out = keyword_policy().apply(&t).unwrap();
        let ids: Vec<&str> = out.records().map(|r| r.get("id")).collect();
        assert_eq!(ids, vec!["c", "b", "d"]);
    }

    #[test]
    fn test_accent_resolved_even_when_only_region_would_match() {
        let t = table(
            &["region", "accent"],
            &[&["Henan", "standard"], &["Sichuan", ""]],
        );
        let policy = pattern_policy();
        let prepared = policy.prepare(&t.headers).unwrap();
        assert_eq!(prepared.target_column(), Some("accent"));
        let out = policy.apply(&t).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_columns_by_mode() {
        let t = table(&["speaker_id", "gender"], &[&["rural-1", "F"]]);

        let err = pattern_policy().apply(&t).unwrap_err();
        assert_eq!(err.exit_code(), 3);

        let out = keyword_policy().apply(&t).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.headers, t.headers);
    }

    #[test]
    fn test_column_set_unchanged_in_both_modes() {
        let t = table(
            &["notes", "speaker_id", "Accent", "region"],
            &[&["village", "1", "Hunan", ""], &["", "2", "Shanghai", "urban"]],
        );
        for policy in [keyword_policy(), pattern_policy()] {
            let out = policy.apply(&t).unwrap();
            let cols: BTreeSet<&String> = out.headers.iter().collect();
            let expected: BTreeSet<&String> = t.headers.iter().collect();
            assert_eq!(cols, expected);
            assert_eq!(out.headers, t.headers);
            assert!(out.rows.iter().all(|r| r.len() == t.headers.len()));
        }
    }
}
