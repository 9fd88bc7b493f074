// src/pipeline.rs
use anyhow::{Context, Result};
use std::{
    io::{self, Write},
    path::PathBuf,
};
use tracing::{debug, info, instrument};

use crate::config::{Mode, PolicyConfig};
use crate::table::{delimiter_for_path, Table};

/// Everything one run needs, after argument validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub mode: Mode,
    pub input: PathBuf,
    /// `None` writes to stdout.
    pub output: Option<PathBuf>,
    /// Overrides the extension-based choice when set.
    pub delimiter: Option<u8>,
    /// Optional YAML policy override.
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub total_rows: usize,
    pub matched_rows: usize,
    /// Column the regex was tested against; `None` in keyword mode.
    pub column: Option<String>,
}

/// load → filter → write, writing to the output path or process stdout.
pub fn run(cfg: &RunConfig) -> Result<Summary> {
    let stdout = io::stdout();
    run_with_stdout(cfg, stdout.lock())
}

/// Same as [`run`], with the stdout sink supplied by the caller.
#[instrument(level = "info", skip(cfg, stdout), fields(mode = cfg.mode.as_str(), input = %cfg.input.display()))]
pub fn run_with_stdout<W: Write>(cfg: &RunConfig, stdout: W) -> Result<Summary> {
    // ─── 1) match policy ─────────────────────────────────────────────
    let policy = PolicyConfig::load(cfg.config.as_deref())
        .and_then(|p| p.policy_for(cfg.mode))
        .context("building match policy")?;

    // ─── 2) load the whole table ─────────────────────────────────────
    let delimiter = cfg
        .delimiter
        .unwrap_or_else(|| delimiter_for_path(&cfg.input));
    debug!(delimiter = %(delimiter as char).escape_default(), "reading input");
    let table = Table::read_path(&cfg.input, delimiter)
        .with_context(|| format!("loading {}", cfg.input.display()))?;

    // ─── 3) resolve columns, then filter ─────────────────────────────
    // resolution happens before any output is opened
    let prepared = policy.prepare(&table.headers)?;
    let column = prepared.target_column().map(str::to_string);
    let matched = table.retain_matching(|record| prepared.matches(record));
    info!(
        total = table.len(),
        matched = matched.len(),
        column = column.as_deref().unwrap_or("-"),
        "filtered"
    );

    // ─── 4) write ────────────────────────────────────────────────────
    match &cfg.output {
        Some(path) => matched.write_path(path)?,
        None => matched.write_csv(stdout).context("writing to stdout")?,
    }

    Ok(Summary {
        total_rows: table.len(),
        matched_rows: matched.len(),
        column,
    })
}
