//! Spreadsheet-to-Huntflow candidate import
//!
//! Each data row names an opening, a candidate, their expected compensation,
//! a comment and a pipeline stage. The importer uploads the candidate's
//! resume, creates the candidate and places them on the opening at the
//! stage, recording progress in a checkpoint file so a failed run resumes
//! instead of starting over.

pub mod checkpoint;
pub mod driver;
pub mod error;
pub mod resolver;
pub mod resume;
pub mod transform;
pub mod workbook;

pub use checkpoint::CheckpointPolicy;
pub use driver::{Importer, RunOutcome};
pub use workbook::read_sheet_rows;
