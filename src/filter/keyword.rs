use crate::table::{column_index, Record};

/// Literal keywords matched as lower-cased substrings of a few columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatcher {
    columns: Vec<String>,
    keywords: Vec<String>,
}

impl KeywordMatcher {
    pub fn new<C, K>(columns: C, keywords: K) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Column indices present in `headers`; absent columns are simply skipped.
    pub fn present_columns(&self, headers: &[String]) -> Vec<usize> {
        self.columns
            .iter()
            .filter_map(|c| column_index(headers, c))
            .collect()
    }

    /// True if any keyword occurs in any of the given cells.
    pub fn matches_at(&self, record: &Record<'_>, indices: &[usize]) -> bool {
        indices.iter().any(|&idx| {
            let value = record.value_at(idx).to_lowercase();
            self.keywords.iter().any(|k| value.contains(k.as_str()))
        })
    }

    /// Predicate over a standalone record; missing columns read as empty.
    pub fn matches(&self, record: &Record<'_>) -> bool {
        self.columns.iter().any(|c| {
            let value = record.get(c).to_lowercase();
            self.keywords.iter().any(|k| value.contains(k.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_KEYWORDS, DEFAULT_KEYWORD_COLUMNS};

    fn default_matcher() -> KeywordMatcher {
        KeywordMatcher::new(DEFAULT_KEYWORD_COLUMNS.iter().copied(), DEFAULT_KEYWORDS)
    }

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_case_insensitive_region() {
        let m = default_matcher();
        let headers = strings(&["region"]);
        for value in ["RURAL area", "rural", "Rural"] {
            let row = strings(&[value]);
            assert!(m.matches(&Record::new(&headers, &row)), "{}", value);
        }
    }

    #[test]
    fn test_notes_column_and_cjk_keywords() {
        let m = default_matcher();
        let headers = strings(&["region", "notes"]);
        let row = strings(&["", "来自河南某村"]);
        assert!(m.matches(&Record::new(&headers, &row)));
        let row = strings(&["城市", "downtown"]);
        assert!(!m.matches(&Record::new(&headers, &row)));
    }

    #[test]
    fn test_missing_columns_match_nothing() {
        let m = default_matcher();
        let headers = strings(&["speaker_id", "gender"]);
        let row = strings(&["rural", "village"]);
        let record = Record::new(&headers, &row);
        assert!(!m.matches(&record));
        assert!(m.present_columns(&headers).is_empty());
        assert!(!m.matches_at(&record, &[]));
    }

    #[test]
    fn test_configured_keywords_are_lowercased() {
        let m = KeywordMatcher::new(["Region"], ["Hamlet"]);
        assert_eq!(m, KeywordMatcher::new(["Region"], ["hamlet"]));
        let headers = strings(&["REGION"]);
        let row = strings(&["a HAMLET nearby"]);
        let record = Record::new(&headers, &row);
        assert!(m.matches(&record));
        assert!(m.matches_at(&record, &m.present_columns(&headers)));
    }
}
