// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Command-line interface.
//!
//! - `ran add --gpx <path>` - ingest a GPX recording
//! - `ran api` - serve the read-only API and web UI

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

/// Ran - a personal running log.
#[derive(Debug, Parser)]
#[command(name = "ran")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add a GPX recording, replacing an earlier upload of the same file.
    Add(AddArgs),
    /// Serve the read-only API and web UI.
    Api,
}

/// Arguments for `ran add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Path to the GPX file.
    #[arg(long)]
    pub gpx: PathBuf,
}

/// Read a GPX file from disk, refusing directories.
pub async fn read_gpx_file(path: &Path) -> Result<Vec<u8>> {
    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        AppError::InvalidRecording(format!("Cannot read {}: {}", path.display(), e))
    })?;

    if metadata.is_dir() {
        return Err(AppError::InvalidRecording(format!(
            "{} is a directory",
            path.display()
        )));
    }

    Ok(tokio::fs::read(path).await?)
}
