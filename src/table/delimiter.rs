use std::path::Path;

use crate::error::FilterError;

/// Field delimiter implied by the file extension: tab for `.tsv`, comma otherwise.
pub fn delimiter_for_path(path: &Path) -> u8 {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    }
}

/// Parse a `--delimiter` value: `tab`, `comma`, `\t`, or any single ASCII character.
pub fn parse_delimiter(raw: &str) -> Result<u8, FilterError> {
    match raw {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        "comma" => Ok(b','),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        other => Err(FilterError::Usage {
            message: format!("invalid delimiter `{}`", other),
            usage: "--delimiter <tab|comma|CHAR>".to_string(),
        }),
    }
}
