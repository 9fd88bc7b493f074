use crate::error::FilterError;
use crate::table::column_index;

/// A header column picked by [`resolve_column`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    pub index: usize,
    /// Spelling as it appears in the file's header.
    pub name: String,
}

/// Return the first of `candidates` present in `headers`, compared case-insensitively.
///
/// Only the header is consulted; cell contents never influence the choice.
pub fn resolve_column<S: AsRef<str>>(
    headers: &[String],
    candidates: &[S],
) -> Result<ResolvedColumn, FilterError> {
    candidates
        .iter()
        .find_map(|candidate| {
            column_index(headers, candidate.as_ref()).map(|index| ResolvedColumn {
                index,
                name: headers[index].clone(),
            })
        })
        .ok_or_else(|| FilterError::ColumnNotFound {
            candidates: candidates.iter().map(|c| c.as_ref().to_string()).collect(),
            available: headers.to_vec(),
        })
}
