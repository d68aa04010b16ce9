//! Normalisation of free-text inputs.
//!
//! Tool arguments arrive as flat strings where `""` means "not supplied".

/// Trimmed text, or `None` when nothing but whitespace was supplied.
pub fn non_empty(s: Option<&str>) -> Option<String> {
  s.map(str::trim).filter(|t| !t.is_empty()).map(str::to_owned)
}

/// Text kept exactly as supplied, or `None` when it is absent or `""`.
///
/// Used for review notes, where surrounding whitespace is part of the note.
pub fn supplied(s: Option<&str>) -> Option<String> {
  s.filter(|t| !t.is_empty()).map(str::to_owned)
}
