//! Resolve opening and stage names to their identifiers
//!
//! Reference data is fetched once per run and held read-only. Matching is
//! exact and case-insensitive; anything other than a single match is an
//! error, never a guess.

use crate::api::{Opening, Stage};

use super::error::{ReferenceKind, RowError};

/// Read-only snapshot of the account's openings and stages
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub openings: Vec<Opening>,
    pub stages: Vec<Stage>,
}

impl ReferenceData {
    pub fn new(openings: Vec<Opening>, stages: Vec<Stage>) -> Self {
        Self { openings, stages }
    }

    pub fn opening(&self, name: &str) -> Result<&Opening, RowError> {
        resolve_opening(&self.openings, name)
    }

    pub fn stage(&self, name: &str) -> Result<&Stage, RowError> {
        resolve_stage(&self.stages, name)
    }
}

pub fn resolve_opening<'a>(openings: &'a [Opening], name: &str) -> Result<&'a Opening, RowError> {
    resolve_unique(openings, name, ReferenceKind::Opening, |o| o.name.as_str())
}

pub fn resolve_stage<'a>(stages: &'a [Stage], name: &str) -> Result<&'a Stage, RowError> {
    resolve_unique(stages, name, ReferenceKind::Stage, |s| s.name.as_str())
}

fn resolve_unique<'a, T>(
    items: &'a [T],
    name: &str,
    kind: ReferenceKind,
    display_name: impl Fn(&T) -> &str,
) -> Result<&'a T, RowError> {
    let wanted = name.to_lowercase();
    let matches: Vec<&T> = items
        .iter()
        .filter(|item| display_name(*item).to_lowercase() == wanted)
        .collect();

    match matches.as_slice() {
        [single] => Ok(*single),
        _ => {
            log::debug!("{} '{}' matched {} entries", kind, name, matches.len());
            Err(RowError::AmbiguousOrMissingReference {
                kind,
                name: name.to_string(),
                matches: matches.len(),
            })
        }
    }
}
