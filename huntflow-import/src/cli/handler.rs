//! Import command handler

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::*;
use dialoguer::Input;

use super::Cli;
use crate::api::HuntflowClient;
use crate::config::{ENV_TOKEN, ImportConfig};
use crate::import::{CheckpointPolicy, Importer, RunOutcome, read_sheet_rows};

/// Run the import described by the command line
///
/// A halted run is reported and still returns `Ok`: the checkpoint has
/// been written and a rerun picks up from it.
pub async fn handle_import(args: Cli) -> Result<()> {
    let mut config = ImportConfig::load(args.config.as_deref())?;
    apply_overrides(&mut config, &args);

    let token = resolve_token(args.token)?;
    let workbook_path = resolve_workbook_path(args.path)?;
    let workbook_path = workbook_path
        .canonicalize()
        .with_context(|| format!("Workbook does not exist: {}", workbook_path.display()))?;

    let rows = read_sheet_rows(&workbook_path)?;
    println!(
        "Importing {} from {}",
        format!("{} row(s)", rows.len().saturating_sub(1)).cyan(),
        workbook_path.display().to_string().cyan()
    );
    log::debug!(
        "API {}, checkpoint {}, policy {}",
        config.base_url,
        config.checkpoint_path.display(),
        config.checkpoint_policy
    );

    let client = HuntflowClient::new(&config.base_url, token)?;
    let importer = Importer::new(client, &config);

    match importer.run(&rows).await? {
        RunOutcome::Completed { processed } => {
            println!(
                "{} Imported {} candidate(s)",
                "Done.".bright_green().bold(),
                processed
            );
        }
        RunOutcome::Halted {
            row,
            error,
            checkpoint,
        } => {
            eprintln!(
                "{} Row {} failed: {}",
                "Halted.".yellow().bold(),
                row,
                error
            );
            println!(
                "Progress saved to {}; the next run starts at sheet row {}",
                importer.checkpoints().path().display().to_string().yellow(),
                checkpoint.first_sheet_row()
            );
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut ImportConfig, args: &Cli) {
    if let Some(url) = &args.base_url {
        config.base_url = url.clone();
    }
    if let Some(path) = &args.checkpoint {
        config.checkpoint_path = path.clone();
    }
    if let Some(root) = &args.resume_root {
        config.resume_root = root.clone();
    }
    if args.retry_failed {
        config.checkpoint_policy = CheckpointPolicy::RetryFailed;
    }
}

/// Token from the flag, then the environment, then an interactive prompt
fn resolve_token(flag: Option<String>) -> Result<String> {
    let token = match flag.or_else(|| env::var(ENV_TOKEN).ok()) {
        Some(token) => token,
        None => rpassword::prompt_password("Enter Huntflow api token: ")
            .context("Failed to read API token")?,
    };

    let token = token.trim().to_string();
    if token.is_empty() {
        anyhow::bail!("API token must not be empty");
    }
    Ok(token)
}

fn resolve_workbook_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }

    let raw: String = Input::new()
        .with_prompt("Enter Huntflow database path")
        .interact_text()
        .context("Failed to read workbook path")?;
    Ok(PathBuf::from(raw.trim()))
}
