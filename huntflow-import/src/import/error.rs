//! Error types for the import run

use std::path::PathBuf;

use crate::api::ApiError;

/// Which kind of reference data a name was resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Opening,
    Stage,
}

impl ReferenceKind {
    /// Fixed failure message for a lookup of this kind
    pub fn message(&self) -> &'static str {
        match self {
            ReferenceKind::Opening => "Something went wrong with getting vacancy",
            ReferenceKind::Stage => "Something went wrong with getting status",
        }
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceKind::Opening => write!(f, "opening"),
            ReferenceKind::Stage => write!(f, "stage"),
        }
    }
}

/// Failure scoped to a single spreadsheet row
///
/// Any of these halts the run after the checkpoint is persisted.
#[derive(Debug)]
pub enum RowError {
    /// A required row position is absent or blank
    MissingCell { column: usize, label: &'static str },
    /// Resume glob matched zero or several files
    ResumeLookup {
        pattern: String,
        matches: Vec<PathBuf>,
    },
    /// Full name has fewer than two tokens
    MalformedName { value: String },
    /// Compensation does not reduce to a number
    InvalidCompensation { value: String },
    /// Zero or several openings/stages carry the requested name
    AmbiguousOrMissingReference {
        kind: ReferenceKind,
        name: String,
        matches: usize,
    },
    /// Comment is blank after trimming
    MissingComment,
    Upload(ApiError),
    Create(ApiError),
    Link(ApiError),
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowError::MissingCell { column, label } => {
                write!(f, "Row is missing {} (column {})", label, column + 1)
            }
            RowError::ResumeLookup { pattern, matches } => {
                write!(
                    f,
                    "Something went wrong with getting path of cv file: pattern '{}' matched {} files",
                    pattern,
                    matches.len()
                )?;
                if !matches.is_empty() {
                    let names: Vec<String> =
                        matches.iter().map(|p| p.display().to_string()).collect();
                    write!(f, " ({})", names.join(", "))?;
                }
                Ok(())
            }
            RowError::MalformedName { value } => {
                write!(
                    f,
                    "Full name '{}' needs at least a last name and a first name",
                    value
                )
            }
            RowError::InvalidCompensation { value } => {
                write!(f, "Compensation '{}' is not a number", value)
            }
            RowError::AmbiguousOrMissingReference {
                kind,
                name,
                matches,
            } => {
                write!(
                    f,
                    "{}: {} '{}' matched {} entries, expected exactly one",
                    kind.message(),
                    kind,
                    name,
                    matches
                )
            }
            RowError::MissingComment => write!(f, "Row comment is empty"),
            RowError::Upload(err) | RowError::Create(err) | RowError::Link(err) => {
                write!(f, "{}", err)
            }
        }
    }
}

impl std::error::Error for RowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RowError::Upload(err) | RowError::Create(err) | RowError::Link(err) => Some(err),
            _ => None,
        }
    }
}

/// Unrecoverable failure before any row is processed
#[derive(Debug)]
pub enum SetupError {
    AuthResolution(ApiError),
    ReferenceDataFetch(ApiError),
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::AuthResolution(err) => {
                write!(f, "Could not resolve the acting account: {}", err)
            }
            SetupError::ReferenceDataFetch(err) => {
                write!(f, "Could not fetch reference data: {}", err)
            }
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::AuthResolution(err) | SetupError::ReferenceDataFetch(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_error_names_kind_and_term() {
        let err = RowError::AmbiguousOrMissingReference {
            kind: ReferenceKind::Stage,
            name: "Interview".to_string(),
            matches: 0,
        };
        let text = err.to_string();
        assert!(text.starts_with("Something went wrong with getting status"));
        assert!(text.contains("stage 'Interview'"));
    }

    #[test]
    fn test_resume_lookup_lists_candidates() {
        let err = RowError::ResumeLookup {
            pattern: "Engineer/Ivanov*".to_string(),
            matches: vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")],
        };
        assert!(err.to_string().contains("matched 2 files (a.pdf, b.pdf)"));
    }
}
