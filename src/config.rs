// src/config.rs
use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::{fs, path::Path};
use tracing::info;

use crate::error::FilterError;
use crate::filter::{KeywordMatcher, MatchPolicy, PatternMatcher};

pub const DEFAULT_KEYWORD_COLUMNS: &[&str] = &["region", "notes"];

pub const DEFAULT_KEYWORDS: &[&str] = &["rural", "village", "county", "countryside", "乡", "村"];

/// Priority order: the first one present in the header is used.
pub const DEFAULT_PATTERN_COLUMNS: &[&str] = &["accent", "region", "notes"];

/// Provinces and dialect groups, each with its Romanized spelling.
pub const DEFAULT_PATTERN: &str = concat!(
    "河南|Henan|四川|Sichuan|山东|Shandong|湖南|Hunan|湖北|Hubei|",
    "贵州|Guizhou|云南|Yunnan|广西|Guangxi|甘肃|Gansu|江西|Jiangxi|",
    "安徽|Anhui|陕西|Shaanxi|山西|Shanxi|河北|Hebei|",
    "东北|Dongbei|闽南|Minnan|客家|Hakka|粤语|Cantonese|",
    "湘语|Xiang|赣语|吴语|Wu dialect|西南官话|Southwestern Mandarin"
);

static DEFAULT_REGEX: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| Regex::new(DEFAULT_PATTERN));

/// Which matching strategy a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Literal keywords, case-insensitive, against region and notes.
    Keyword,
    /// One regex, case-sensitive, against the first of accent/region/notes.
    Regex,
}

impl Mode {
    pub fn as_str(&self) -> &str {
        match self {
            Mode::Keyword => "keyword",
            Mode::Regex => "regex",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeywordSection {
    pub columns: Vec<String>,
    pub keywords: Vec<String>,
}

impl Default for KeywordSection {
    fn default() -> Self {
        Self {
            columns: DEFAULT_KEYWORD_COLUMNS.iter().map(|s| s.to_string()).collect(),
            keywords: DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatternSection {
    pub columns: Vec<String>,
    pub regex: String,
}

impl Default for PatternSection {
    fn default() -> Self {
        Self {
            columns: DEFAULT_PATTERN_COLUMNS.iter().map(|s| s.to_string()).collect(),
            regex: DEFAULT_PATTERN.to_string(),
        }
    }
}

/// Match policy settings. Every field is optional in YAML; omitted ones keep the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolicyConfig {
    pub keyword: KeywordSection,
    pub pattern: PatternSection,
}

impl PolicyConfig {
    /// Built-in defaults when `path` is `None`, otherwise the YAML file at `path`.
    pub fn load(path: Option<&Path>) -> Result<Self, FilterError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|e| {
            FilterError::Config(format!("reading {}: {}", path.display(), e))
        })?;
        let cfg = Self::from_yaml_str(&text)
            .map_err(|e| FilterError::Config(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), "loaded match policy config");
        Ok(cfg)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, String> {
        // an empty file deserializes as `null`
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: PolicyConfig = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), String> {
        if self.keyword.columns.is_empty() {
            return Err("keyword.columns must not be empty".into());
        }
        if self.keyword.keywords.is_empty() {
            return Err("keyword.keywords must not be empty".into());
        }
        if self.keyword.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err("keyword.keywords must not contain blank entries".into());
        }
        if self.pattern.columns.is_empty() {
            return Err("pattern.columns must not be empty".into());
        }
        if self.pattern.regex.is_empty() {
            return Err("pattern.regex must not be empty".into());
        }
        Ok(())
    }

    pub fn keyword_policy(&self) -> MatchPolicy {
        MatchPolicy::Keyword(KeywordMatcher::new(
            self.keyword.columns.iter().cloned(),
            &self.keyword.keywords,
        ))
    }

    pub fn pattern_policy(&self) -> Result<MatchPolicy, FilterError> {
        let columns = self.pattern.columns.iter().cloned();
        let matcher = if self.pattern.regex == DEFAULT_PATTERN {
            let regex = DEFAULT_REGEX
                .as_ref()
                .map_err(|e| FilterError::Config(format!("built-in regex: {}", e)))?;
            PatternMatcher::new(columns, regex.clone())
        } else {
            PatternMatcher::compile(columns, &self.pattern.regex)?
        };
        Ok(MatchPolicy::Pattern(matcher))
    }

    pub fn policy_for(&self, mode: Mode) -> Result<MatchPolicy, FilterError> {
        match mode {
            Mode::Keyword => Ok(self.keyword_policy()),
            Mode::Regex => self.pattern_policy(),
        }
    }
}
