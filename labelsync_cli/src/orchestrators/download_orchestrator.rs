//! Download command orchestrator
//!
//! Checks out a batch of images from the labeling service, writes the
//! generated VoTT document to the tagging directory, and downloads every
//! referenced image next to it.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};

use labelsync_core::vott::file_name_from_url;
use labelsync_core::{LabelServiceClient, build_vott_document, resolve_image_count};

use super::require;
use crate::config::AppConfig;
use crate::terminal;

/// Orchestrator for the download command
pub struct DownloadOrchestrator {
    service: LabelServiceClient,
    tagging_location: PathBuf,
}

impl DownloadOrchestrator {
    /// Create a new download orchestrator
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

    /// Check out up to `count` images and materialize them for tagging
    pub async fn download(&self, count: Option<u32>) -> Result<()> {
        let count = resolve_image_count(count)?;
        debug!("Requesting a batch of {count} image(s)");

        let batch = self
            .service
            .fetch_images(count)
            .await
            .context("Failed to fetch images from the labeling service")?;

        println!("Received {} file(s).", batch.labels.len());

        if batch.labels.is_empty() {
            println!(
                "{}",
                "No images could be retrieved with the current retrieval strategy.".yellow()
            );
            return Ok(());
        }

        let (document, image_urls) =
            build_vott_document(&batch.labels, &batch.classification_list)?;

        if self.tagging_location.exists() {
            println!(
                "Removing existing tag data directory: {}",
                self.tagging_location.display()
            );
            let _ = fs::remove_dir_all(&self.tagging_location);
        }

        let data_dir = self.tagging_location.join("data");
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;

        // VoTT expects the document at the same level as the data directory
        let document_path = self.tagging_location.join("data.json");
        let json = serde_json::to_string(&document)?;
        fs::write(&document_path, json)
            .with_context(|| format!("Failed to write {}", document_path.display()))?;
        info!("Wrote labeling document to {}", document_path.display());

        eprintln!("Downloading files to {}", data_dir.display());

        let progress = if terminal::should_show_progress_by_default() {
            let pb = ProgressBar::new(image_urls.len() as u64);
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

        let mut local_paths = Vec::new();
        for url in &image_urls {
            let name = file_name_from_url(url)?;
            if let Some(pb) = &progress {
                pb.set_message(name.clone());
            }

            let dest = data_dir.join(&name);
            self.service
                .download_file(url, &dest)
                .await
                .with_context(|| format!("Failed to download {url}"))?;

            local_paths.push(dest);
            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = &progress {
            pb.finish_and_clear();
        }

        println!("Successfully downloaded {} image(s).", local_paths.len());
        for path in &local_paths {
            println!("{}", path.display());
        }
        println!("{}", "Ready to tag!".green().bold());

        Ok(())
    }
}
