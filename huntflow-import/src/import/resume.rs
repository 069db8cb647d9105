//! Locate the resume file belonging to a spreadsheet row
//!
//! Resumes live under `<root>/<dir pattern>/`, and exactly one file in that
//! directory must match the file pattern. Patterns are templates with
//! `{opening}` and `{candidate}` placeholders; in the file pattern `*`
//! matches any run of characters and `?` a single character. Substituted
//! row values are always literal.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use super::error::RowError;

pub const OPENING_PLACEHOLDER: &str = "{opening}";
pub const CANDIDATE_PLACEHOLDER: &str = "{candidate}";

#[derive(Debug, Clone)]
pub struct ResumeLocator {
    root: PathBuf,
    dir_pattern: String,
    file_pattern: String,
}

impl ResumeLocator {
    pub fn new(
        root: impl Into<PathBuf>,
        dir_pattern: impl Into<String>,
        file_pattern: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            dir_pattern: dir_pattern.into(),
            file_pattern: file_pattern.into(),
        }
    }

    /// The single file matching this opening and candidate
    pub fn find(&self, opening: &str, candidate: &str) -> Result<PathBuf, RowError> {
        let dir = self.root.join(substitute(&self.dir_pattern, opening, candidate));
        let display_pattern = dir
            .join(substitute(&self.file_pattern, opening, candidate))
            .display()
            .to_string();

        let matcher = compile_file_pattern(&self.file_pattern, opening, candidate).map_err(|e| {
            log::warn!("Resume pattern '{}' did not compile: {}", display_pattern, e);
            RowError::ResumeLookup {
                pattern: display_pattern.clone(),
                matches: Vec::new(),
            }
        })?;

        let mut matches = matching_files(&dir, &matcher);
        matches.sort();

        log::debug!(
            "Resume pattern '{}' matched {} file(s)",
            display_pattern,
            matches.len()
        );

        if matches.len() == 1 {
            Ok(matches.remove(0))
        } else {
            Err(RowError::ResumeLookup {
                pattern: display_pattern,
                matches,
            })
        }
    }
}

fn substitute(template: &str, opening: &str, candidate: &str) -> String {
    template
        .replace(OPENING_PLACEHOLDER, opening)
        .replace(CANDIDATE_PLACEHOLDER, candidate)
}

/// Translate a file pattern template into an anchored regex
fn compile_file_pattern(
    template: &str,
    opening: &str,
    candidate: &str,
) -> Result<Regex, regex::Error> {
    let mut pattern = String::from("^");
    let mut rest = template;

    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix(OPENING_PLACEHOLDER) {
            pattern.push_str(&regex::escape(opening));
            rest = after;
            continue;
        }
        if let Some(after) = rest.strip_prefix(CANDIDATE_PLACEHOLDER) {
            pattern.push_str(&regex::escape(candidate));
            rest = after;
            continue;
        }

        match c {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            other => pattern.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
        rest = &rest[c.len_utf8()..];
    }

    pattern.push('$');
    Regex::new(&pattern)
}

/// Files (symlinks followed) in `dir` whose name matches; a missing directory has none
fn matching_files(dir: &Path, matcher: &Regex) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("Cannot list {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter(|entry| matcher.is_match(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.path())
        .collect()
}
