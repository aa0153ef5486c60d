//! Onboard command orchestrator
//!
//! Walks a local folder, uploads every supported image to the temporary
//! storage container with onboarding metadata, then signals the service
//! to ingest the source container into the dataset.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use labelsync_core::{BlobClient, BlobMetadata, LabelServiceClient, OnboardRequest};

use super::require;
use crate::config::AppConfig;
use crate::file_discovery::{DiscoveredFile, FileDiscovery, FileDiscoveryOptions};
use crate::terminal;

/// Options for the onboard command
#[derive(Debug, Clone, Default)]
pub struct OnboardOptions {
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub use_defaults: bool,
}

/// Orchestrator for the onboard command
#[derive(Debug)]
pub struct OnboardOrchestrator {
    blob: BlobClient,
    service: LabelServiceClient,
    config: AppConfig,
}

impl OnboardOrchestrator {
    /// Create a new onboard orchestrator, validating required settings up front
    pub fn new(config: AppConfig) -> Result<Self> {
        require(&config.service.url, "service.url")?;
        require(&config.service.user, "service.user")?;
        require(&config.storage.account, "storage.account")?;
        require(&config.storage.account_key, "storage.account_key")?;
        require(&config.storage.container, "storage.container")?;
        require(&config.storage.temp_container, "storage.temp_container")?;
        require(&config.storage.sas_token, "storage.sas_token")?;

        let timeout = Duration::from_secs(config.service.timeout_seconds);
        let blob = BlobClient::new(&config.storage.account, &config.storage.sas_token, timeout)
            .context("Failed to create blob storage client")?;
        let service = LabelServiceClient::new(&config.service.url, &config.service.user, timeout)
            .context("Failed to create labeling service client")?;

        Ok(Self {
            blob,
            service,
            config,
        })
    }

    /// Upload every supported image under `folder` and trigger onboarding
    pub async fn onboard_folder(&self, folder: &Path, options: OnboardOptions) -> Result<()> {
        eprintln!("{}", "Walking file system...".bold().cyan());

        let discovery_options = FileDiscoveryOptions::new()
            .with_include_patterns(options.include_patterns)
            .with_exclude_patterns(options.exclude_patterns)
            .with_use_defaults(options.use_defaults);

        let files: Vec<DiscoveredFile> = FileDiscovery::new(folder, discovery_options)?
            .collect::<Result<Vec<_>, _>>()
            .context("File discovery failed")?;

        if files.is_empty() {
            println!(
                "{}",
                format!(
                    "No supported image files found under {}",
                    folder.display()
                )
                .yellow()
            );
            return Ok(());
        }

        eprintln!("Found {} file(s) to upload", files.len());

        let progress = if terminal::should_show_progress_by_default() {
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        for file in &files {
            let blob_name = blob_name_for(folder, &file.path);
            debug!(
                "Uploading {} as blob '{}' ({} bytes)",
                file.path.display(),
                blob_name,
                file.size
            );

            match &progress {
                Some(pb) => pb.set_message(blob_name.clone()),
                None => println!("Uploading {}", file.path.display()),
            }

            let metadata = BlobMetadata {
                upload_user: self.config.service.user.clone(),
                user_file_path: file.path.display().to_string(),
            };

            self.blob
                .upload_file(
                    &self.config.storage.temp_container,
                    &blob_name,
                    &file.path,
                    &metadata,
                )
                .await
                .with_context(|| format!("Failed to upload {}", file.path.display()))?;

            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = &progress {
            pb.finish_and_clear();
        }

        println!("Uploaded {} file(s).", files.len());

        // Trigger queue-based onboarding of the source container
        eprintln!(
            "Onboarding storage container {} into the dataset",
            self.config.storage.container
        );

        self.service
            .onboard_container(&OnboardRequest {
                storage_account: self.config.storage.account.clone(),
                storage_account_key: self.config.storage.account_key.clone(),
                storage_container: self.config.storage.container.clone(),
            })
            .await
            .context("Failed to signal container onboarding")?;

        println!(
            "{}",
            "Container set up for onboarding. Ingestion may take some time.".green()
        );

        Ok(())
    }
}

/// Blob name for a discovered file: its path with the command-line folder
/// prefix stripped, using forward slashes
///
/// Invoking `labelsync onboard /my/full/path` discovers files like
/// `/my/full/path/batch/1.jpg`; the blob should be named `batch/1.jpg`.
pub(crate) fn blob_name_for(folder: &Path, path: &Path) -> String {
    let relative: PathBuf = path
        .strip_prefix(folder)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf());

    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
