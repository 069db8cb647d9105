//! The import loop
//!
//! Reference data is fetched once, then rows are processed strictly in sheet
//! order starting from the checkpoint. The first failing row halts the run
//! after the checkpoint is written.

use anyhow::{Context, Result};

use crate::api::RecruitingApi;
use crate::config::ImportConfig;

use super::checkpoint::{Checkpoint, CheckpointPolicy, CheckpointStore};
use super::error::{RowError, SetupError};
use super::resolver::ReferenceData;
use super::resume::ResumeLocator;
use super::transform::{build_candidate_payload, build_link_payload};
use super::workbook::{SheetRow, columns};

/// How a run ended when setup succeeded
#[derive(Debug)]
pub enum RunOutcome {
    /// Every remaining row was imported; the checkpoint was removed
    Completed { processed: usize },
    /// A row failed; the checkpoint was written before returning
    Halted {
        /// Sheet row number that failed
        row: usize,
        error: RowError,
        checkpoint: Checkpoint,
    },
}

/// Identifiers created for one imported row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportedRow {
    pub candidate_id: i64,
    pub opening_id: i64,
    pub stage_id: i64,
}

pub struct Importer<A> {
    api: A,
    locator: ResumeLocator,
    checkpoints: CheckpointStore,
    default_currency: String,
    policy: CheckpointPolicy,
}

impl<A: RecruitingApi> Importer<A> {
    pub fn new(api: A, config: &ImportConfig) -> Self {
        Self {
            api,
            locator: ResumeLocator::new(
                &config.resume_root,
                &config.resume_dir_pattern,
                &config.resume_file_pattern,
            ),
            checkpoints: CheckpointStore::new(&config.checkpoint_path),
            default_currency: config.default_currency.clone(),
            policy: config.checkpoint_policy,
        }
    }

    pub fn checkpoints(&self) -> &CheckpointStore {
        &self.checkpoints
    }

    /// Run the import over `rows` (header included)
    ///
    /// Returns `Err` only for setup failures and checkpoint I/O; row failures
    /// are reported through `RunOutcome::Halted`.
    pub async fn run(&self, rows: &[SheetRow]) -> Result<RunOutcome> {
        let account_id = self
            .api
            .account_id()
            .await
            .map_err(SetupError::AuthResolution)?;
        log::info!("Using account {}", account_id);

        let openings = self
            .api
            .openings(account_id)
            .await
            .map_err(SetupError::ReferenceDataFetch)?;
        let stages = self
            .api
            .stages(account_id)
            .await
            .map_err(SetupError::ReferenceDataFetch)?;
        log::info!(
            "Fetched {} openings and {} stages",
            openings.len(),
            stages.len()
        );
        let references = ReferenceData::new(openings, stages);

        let mut checkpoint = self.checkpoints.load()?;
        let first_row = checkpoint.first_sheet_row();
        if checkpoint != Checkpoint::default() {
            log::info!(
                "Resuming from sheet row {} (checkpoint {})",
                first_row,
                self.checkpoints.path().display()
            );
        }

        let mut processed = 0;

        for row in rows.iter().filter(|r| r.number >= first_row) {
            if self.policy == CheckpointPolicy::SkipFailed {
                checkpoint.advance();
            }

            log::info!(
                "Row {}: importing {}",
                row.number,
                row.cell(columns::FULL_NAME).unwrap_or("<no name>")
            );

            match self.import_row(account_id, &references, row).await {
                Ok(imported) => {
                    if self.policy == CheckpointPolicy::RetryFailed {
                        checkpoint.advance();
                    }
                    self.checkpoints.save(&checkpoint)?;
                    processed += 1;
                    log::info!(
                        "Row {}: candidate {} added to opening {} at stage {}",
                        row.number,
                        imported.candidate_id,
                        imported.opening_id,
                        imported.stage_id
                    );
                }
                Err(error) => {
                    log::error!("Row {}: {}", row.number, error);
                    self.checkpoints
                        .save(&checkpoint)
                        .with_context(|| format!("Row {} failed: {}", row.number, error))?;
                    return Ok(RunOutcome::Halted {
                        row: row.number,
                        error,
                        checkpoint,
                    });
                }
            }
        }

        self.checkpoints.clear()?;
        Ok(RunOutcome::Completed { processed })
    }

    /// Upload, create and link a single row
    async fn import_row(
        &self,
        account_id: i64,
        references: &ReferenceData,
        row: &SheetRow,
    ) -> Result<ImportedRow, RowError> {
        let opening_name = row.require(columns::OPENING)?;
        let candidate_name = row.require(columns::FULL_NAME)?;

        let resume = self.locator.find(opening_name, candidate_name)?;
        log::debug!("Row {}: uploading {}", row.number, resume.display());

        let upload = self
            .api
            .upload_resume(account_id, &resume)
            .await
            .map_err(RowError::Upload)?;

        let payload = build_candidate_payload(row, &upload, &self.default_currency)?;
        let candidate = self
            .api
            .create_candidate(account_id, &payload)
            .await
            .map_err(RowError::Create)?;

        let opening = references.opening(opening_name)?;
        let stage = references.stage(row.require(columns::STAGE)?)?;

        let link = build_link_payload(row, opening.id, stage.id, &candidate)?;
        let response = self
            .api
            .link_candidate(account_id, candidate.id, &link)
            .await
            .map_err(RowError::Link)?;
        log::info!("Row {}: link response {}", row.number, response);

        Ok(ImportedRow {
            candidate_id: candidate.id,
            opening_id: opening.id,
            stage_id: stage.id,
        })
    }
}
