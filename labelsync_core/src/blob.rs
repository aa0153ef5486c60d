//! Blob storage uploads
//!
//! Uploads local files to Azure-style blob storage over its REST surface
//! (Put Blob), authorized by a container SAS token. Metadata travels as
//! `x-ms-meta-*` headers so the service's onboarding pipeline can see who
//! uploaded which workstation path.

use std::path::Path;
use std::time::Duration;

use log::debug;

use crate::error::{Error, Result};

/// Metadata attached to every onboarded blob
#[derive(Debug, Clone)]
pub struct BlobMetadata {
    /// Tagging user performing the upload
    pub upload_user: String,
    /// Workstation path the file was uploaded from
    pub user_file_path: String,
}

/// Client for blob uploads against one storage account
#[derive(Debug, Clone)]
pub struct BlobClient {
    http: reqwest::Client,
    account: String,
    sas_token: String,
}

impl BlobClient {
    /// Create a client for the given account, authorized by a container SAS token
    pub fn new(account: &str, sas_token: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            account: account.to_string(),
            sas_token: sas_token.trim_start_matches('?').to_string(),
        })
    }

    /// URL of a blob within a container, SAS token appended
    pub fn blob_url(&self, container: &str, blob_name: &str) -> String {
        format!(
            "https://{}.blob.core.windows.net/{}/{}?{}",
            self.account, container, blob_name, self.sas_token
        )
    }

    /// Upload one local file as a block blob
    pub async fn upload_file(
        &self,
        container: &str,
        blob_name: &str,
        path: &Path,
        metadata: &BlobMetadata,
    ) -> Result<()> {
        let url = self.blob_url(container, blob_name);
        debug!("PUT blob {container}/{blob_name} from {}", path.display());

        let body = tokio::fs::read(path).await.map_err(|e| Error::io(path, e))?;
        let content_type = mime_guess::from_path(path).first_or_octet_stream();

        let response = self
            .http
            .put(&url)
            .header("x-ms-blob-type", "BlockBlob")
            .header("x-ms-meta-uploaduser", &metadata.upload_user)
            .header("x-ms-meta-userfilepath", &metadata.user_file_path)
            .header(reqwest::header::CONTENT_TYPE, content_type.as_ref())
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                endpoint: format!("{container}/{blob_name}"),
                status,
                body,
            });
        }

        Ok(())
    }
}
