//! Command orchestrators for business logic
//!
//! One orchestrator per command flow, coordinating the CLI layer with
//! the core service and storage clients.

pub mod download_orchestrator;
pub mod onboard_orchestrator;
pub mod upload_orchestrator;

use anyhow::Result;

/// Fail with a setup hint when a required configuration value is unset
pub(crate) fn require(value: &str, key: &str) -> Result<()> {
    if value.is_empty() {
        anyhow::bail!(
            "Missing configuration value '{key}'. Run 'labelsync config init' or \
             'labelsync config set {key} <value>'."
        );
    }
    Ok(())
}
