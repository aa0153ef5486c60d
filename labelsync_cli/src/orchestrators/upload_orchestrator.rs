//! Upload command orchestrator
//!
//! Reads the locally edited VoTT document, transforms it into the
//! service's label submission format, and posts it.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::*;
use log::debug;

use labelsync_core::vott::VottDocument;
use labelsync_core::{LabelServiceClient, process_vott_document};

use super::require;
use crate::config::AppConfig;

/// Orchestrator for the upload command
pub struct UploadOrchestrator {
    service: LabelServiceClient,
    tagging_location: PathBuf,
}

impl UploadOrchestrator {
    /// Create a new upload orchestrator
    pub fn new(config: AppConfig) -> Result<Self> {
        require(&config.service.url, "service.url")?;
        require(&config.service.user, "service.user")?;

        let timeout = Duration::from_secs(config.service.timeout_seconds);
        let service = LabelServiceClient::new(&config.service.url, &config.service.user, timeout)
            .context("Failed to create labeling service client")?;

        Ok(Self {
            service,
            tagging_location: config.tagging_location(),
        })
    }

    /// Read the edited document and submit its labels
    pub async fn upload(&self) -> Result<()> {
        let document_path = self.tagging_location.join("data.json");
        println!("Uploading edited label document...");

        let content = fs::read_to_string(&document_path).with_context(|| {
            format!(
                "Failed to read {}; run 'labelsync download' and tag a batch first",
                document_path.display()
            )
        })?;

        let document: VottDocument = serde_json::from_str(&content)
            .context("data.json is not a valid labeling document")?;

        let submission = process_vott_document(&document)?;
        debug!(
            "Document has {} frame(s), {} visited",
            document.frames.len(),
            document.visited_frames.len()
        );

        if submission.image_labels.is_empty() {
            println!(
                "{}",
                "No visited frames in the document; nothing to upload.".yellow()
            );
            return Ok(());
        }

        self.service
            .submit_labels(&submission)
            .await
            .context("Failed to submit labels")?;

        println!(
            "Uploaded labels for {} image(s).",
            submission.image_labels.len()
        );
        println!("{}", "Done!".green().bold());

        Ok(())
    }
}
