use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::{Confirm, Input, Password};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::paths;

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub tagging: TaggingConfig,
}

/// Labeling service endpoint and identity
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL of the labeling service functions host
    pub url: String,
    /// Tagging user reported on every call
    pub user: String,
    pub timeout_seconds: u64,
}

/// Blob storage account the onboarding flow uploads into
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct StorageConfig {
    pub account: String,
    /// Account key, forwarded to the onboarding endpoint
    pub account_key: String,
    /// Permanent container the service ingests from
    pub container: String,
    /// Temporary container uploads land in
    pub temp_container: String,
    /// Container SAS token authorizing blob writes
    pub sas_token: String,
}

/// Local tagging workspace settings
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TaggingConfig {
    /// Directory the download flow materializes into (`~` allowed)
    pub location: String,
    /// Default batch size for downloads
    pub image_count: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            user: String::new(),
            timeout_seconds: 30,
        }
    }
}

impl Default for TaggingConfig {
    fn default() -> Self {
        Self {
            location: "~/labelsync/tagging".to_string(),
            image_count: labelsync_core::DEFAULT_IMAGE_COUNT,
        }
    }
}

impl AppConfig {
    /// Resolved tagging directory with `~` expanded
    pub fn tagging_location(&self) -> PathBuf {
        paths::expand_tilde(&self.tagging.location)
    }
}

/// Configuration manager that handles XDG-compliant paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a new ConfigManager with default XDG-compliant paths
    pub fn new() -> Self {
        Self {
            config_path: paths::get_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path (for testing)
    #[allow(dead_code)]
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new();

        // Layer 1: Defaults
        figment = figment.merge(Serialized::defaults(AppConfig::default()));

        // Layer 2: Config file (if exists)
        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        // Layer 3: Environment variables
        figment = figment.merge(Env::prefixed("LABELSYNC_").split("__"));

        figment.extract().context("Failed to load configuration")
    }

    /// Get a configuration value by key (dot notation)
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.load()?;
        let toml_string = toml::to_string(&config)?;
        let value: toml::Value = toml::from_str(&toml_string)?;

        let parts: Vec<&str> = key.split('.').collect();
        let mut current = &value;

        for part in parts {
            match current {
                toml::Value::Table(table) => {
                    current = table
                        .get(part)
                        .ok_or_else(|| anyhow::anyhow!("Key '{}' not found", key))?;
                }
                _ => anyhow::bail!("Invalid key path: {}", key),
            }
        }

        match current {
            toml::Value::String(s) => Ok(s.clone()),
            toml::Value::Integer(i) => Ok(i.to_string()),
            toml::Value::Float(f) => Ok(f.to_string()),
            toml::Value::Boolean(b) => Ok(b.to_string()),
            _ => anyhow::bail!("Value at '{}' is not a simple type", key),
        }
    }

    /// Set a configuration value by key (dot notation)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // Validate the value based on the key
        self.validate_config_value(key, value)?;

        // Load existing config or create new
        let mut config = if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            toml::from_str(&content)?
        } else {
            toml::Value::Table(toml::map::Map::new())
        };

        // Parse the key path
        let parts: Vec<&str> = key.split('.').collect();
        if parts.is_empty() {
            anyhow::bail!("Empty key");
        }

        // Navigate to the correct position and set the value
        let mut current = &mut config;
        for (i, part) in parts.iter().enumerate() {
            if i == parts.len() - 1 {
                // Last part - set the value
                if let toml::Value::Table(table) = current {
                    let parsed_value = self.parse_config_value(key, value);
                    table.insert(part.to_string(), parsed_value);
                } else {
                    anyhow::bail!("Cannot set value on non-table");
                }
            } else {
                // Intermediate part - ensure table exists
                if let toml::Value::Table(table) = current {
                    if !table.contains_key(*part) {
                        table.insert(part.to_string(), toml::Value::Table(toml::map::Map::new()));
                    }
                    current = table.get_mut(*part).unwrap();
                } else {
                    anyhow::bail!("Invalid key path: expected table at '{}'", part);
                }
            }
        }

        // Ensure directory exists
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write the updated config
        let toml_string = toml::to_string_pretty(&config)?;
        fs::write(&self.config_path, toml_string)?;

        Ok(())
    }

    /// List all configuration values
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let config = self.load()?;
        let toml_string = toml::to_string(&config)?;
        let value: toml::Value = toml::from_str(&toml_string)?;

        let mut items = Vec::new();
        Self::collect_values(&value, String::new(), &mut items);
        items.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(items)
    }

    /// Recursively collect all key-value pairs from TOML
    fn collect_values(value: &toml::Value, prefix: String, items: &mut Vec<(String, String)>) {
        match value {
            toml::Value::Table(table) => {
                for (key, val) in table {
                    let new_prefix = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    Self::collect_values(val, new_prefix, items);
                }
            }
            toml::Value::String(s) => items.push((prefix, s.clone())),
            toml::Value::Integer(i) => items.push((prefix, i.to_string())),
            toml::Value::Float(f) => items.push((prefix, f.to_string())),
            toml::Value::Boolean(b) => items.push((prefix, b.to_string())),
            _ => {} // Skip arrays and other complex types
        }
    }

    /// Validate a configuration value
    fn validate_config_value(&self, key: &str, value: &str) -> Result<()> {
        match key {
            "service.url" => {
                if !value.starts_with("http://") && !value.starts_with("https://") {
                    anyhow::bail!("service.url must be an http(s) URL");
                }
            }
            "service.timeout_seconds" => {
                let timeout: u64 = value
                    .parse()
                    .context("timeout_seconds must be a positive integer")?;
                if timeout == 0 {
                    anyhow::bail!("timeout_seconds must be greater than 0");
                }
            }
            "tagging.image_count" => {
                let count: u32 = value
                    .parse()
                    .context("image_count must be a positive integer")?;
                if count == 0 || count > labelsync_core::MAX_IMAGE_COUNT {
                    anyhow::bail!(
                        "image_count must be between 1 and {}",
                        labelsync_core::MAX_IMAGE_COUNT
                    );
                }
            }
            _ => {} // No validation for other keys
        }
        Ok(())
    }

    /// Parse a value to the appropriate TOML type
    fn parse_config_value(&self, key: &str, value: &str) -> toml::Value {
        match key {
            k if k.ends_with("_seconds") || k.ends_with("_count") => value
                .parse::<i64>()
                .map(toml::Value::Integer)
                .unwrap_or_else(|_| toml::Value::String(value.to_string())),
            // Everything else is a string; storage keys and SAS tokens can
            // look numeric and must never be coerced
            _ => toml::Value::String(value.to_string()),
        }
    }
}

/// Get the default configuration
pub fn get_config() -> Result<AppConfig> {
    ConfigManager::new().load()
}

/// Interactive setup wizard for the service and storage settings
pub async fn interactive_init(force: bool) -> Result<()> {
    println!("{}", "Labelsync CLI Setup".bold());
    println!("{}", "===================".bold());
    println!();

    let mut config_mgr = ConfigManager::new();
    let current = config_mgr.load().ok();

    // Check if already configured
    let has_service = current
        .as_ref()
        .map(|c| !c.service.url.is_empty())
        .unwrap_or(false);

    if !force && has_service {
        let reconfigure = Confirm::new()
            .with_prompt("Configuration already exists. Reconfigure?")
            .default(false)
            .interact()
            .context("Failed to read input")?;

        if !reconfigure {
            println!("Setup cancelled.");
            return Ok(());
        }
    }

    println!("This tool requires:");
    println!("  • The labeling service functions URL");
    println!("  • A blob storage account with a container SAS token");
    println!();

    println!("{}", "Labeling Service".bold());

    let default_url = current
        .as_ref()
        .map(|c| c.service.url.clone())
        .unwrap_or_default();
    let url: String = Input::new()
        .with_prompt("Service URL")
        .with_initial_text(default_url)
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.starts_with("http://") || input.starts_with("https://") {
                Ok(())
            } else {
                Err("Must be an http(s) URL")
            }
        })
        .interact_text()
        .context("Failed to read service URL")?;

    let default_user = current
        .as_ref()
        .map(|c| c.service.user.clone())
        .unwrap_or_default();
    let user: String = Input::new()
        .with_prompt("Tagging user")
        .with_initial_text(default_user)
        .interact_text()
        .context("Failed to read tagging user")?;

    println!();
    println!("{}", "Blob Storage".bold());

    let account: String = Input::new()
        .with_prompt("Storage account")
        .interact_text()
        .context("Failed to read storage account")?;

    let account_key = Password::new()
        .with_prompt("Storage account key")
        .interact()
        .context("Failed to read storage account key")?;

    let container: String = Input::new()
        .with_prompt("Source container")
        .interact_text()
        .context("Failed to read source container")?;

    let temp_container: String = Input::new()
        .with_prompt("Temp upload container")
        .interact_text()
        .context("Failed to read temp container")?;

    let sas_token = Password::new()
        .with_prompt("Container SAS token")
        .interact()
        .context("Failed to read SAS token")?;

    // Save configuration
    config_mgr.set("service.url", &url)?;
    config_mgr.set("service.user", &user)?;
    config_mgr.set("storage.account", &account)?;
    config_mgr.set("storage.account_key", &account_key)?;
    config_mgr.set("storage.container", &container)?;
    config_mgr.set("storage.temp_container", &temp_container)?;
    config_mgr.set("storage.sas_token", &sas_token)?;

    println!();
    println!("{}", "✓ Configuration saved".green());
    println!();
    println!("You can now use:");
    println!("  labelsync onboard <folder>  - Upload images for labeling");
    println!("  labelsync download          - Check out a batch to tag");
    println!("  labelsync upload            - Submit edited labels");

    Ok(())
}
