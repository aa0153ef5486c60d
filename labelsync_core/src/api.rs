//! Labeling service API client
//!
//! Thin async client over the service's three REST endpoints plus the
//! image download used by the download flow. Every call is a single
//! request/response; non-success statuses surface as [`Error::Api`] with
//! the response body attached.

use std::path::Path;
use std::time::Duration;

use futures::StreamExt;
use log::debug;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::models::{ImageLabel, LabelSubmission, OnboardRequest, RawImagesResponse};

/// Batch size used when the caller does not ask for one
pub const DEFAULT_IMAGE_COUNT: u32 = 40;

/// Largest batch the service hands out per check-out
pub const MAX_IMAGE_COUNT: u32 = 100;

/// Resolve the requested batch size against the service bounds
pub fn resolve_image_count(requested: Option<u32>) -> Result<u32> {
    let count = requested.unwrap_or(DEFAULT_IMAGE_COUNT);

    if count == 0 || count > MAX_IMAGE_COUNT {
        return Err(Error::ImageLimit {
            requested: count,
            max: MAX_IMAGE_COUNT,
        });
    }

    Ok(count)
}

/// A batch of images checked out for tagging
#[derive(Debug, Clone)]
pub struct CheckedOutBatch {
    /// Label records, one per image
    pub labels: Vec<ImageLabel>,
    /// Classifications the dataset knows about
    pub classification_list: Vec<String>,
}

/// Client for the labeling service's HTTP API
#[derive(Debug, Clone)]
pub struct LabelServiceClient {
    http: reqwest::Client,
    base_url: String,
    user: String,
}

impl LabelServiceClient {
    /// Create a client for the given service URL and tagging user
    pub fn new(base_url: &str, user: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            user: user.to_string(),
        })
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/api/{}", self.base_url, name)
    }

    /// Turn a non-success response into [`Error::Api`]
    async fn check(endpoint: &str, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::Api {
            endpoint: endpoint.to_string(),
            status,
            body,
        })
    }

    /// Signal the service to ingest a storage container into the dataset
    pub async fn onboard_container(&self, request: &OnboardRequest) -> Result<()> {
        let endpoint = self.endpoint("onboardcontainer");
        debug!("POST {endpoint} for container {}", request.storage_container);

        let response = self
            .http
            .post(&endpoint)
            .query(&[("userName", self.user.as_str())])
            .json(request)
            .send()
            .await?;

        Self::check(&endpoint, response).await?;
        Ok(())
    }

    /// Check out a batch of images for tagging
    pub async fn fetch_images(&self, count: u32) -> Result<CheckedOutBatch> {
        let endpoint = self.endpoint("images");
        debug!("GET {endpoint} with imageCount={count}");

        let response = self
            .http
            .get(&endpoint)
            .query(&[
                ("imageCount", count.to_string().as_str()),
                ("userName", self.user.as_str()),
                ("checkOut", "true"),
            ])
            .send()
            .await?;

        let raw: RawImagesResponse = Self::check(&endpoint, response).await?.json().await?;
        let labels = raw.decode()?;

        Ok(CheckedOutBatch {
            labels,
            classification_list: raw.classification_list,
        })
    }

    /// Upload edited labels for previously checked-out images
    pub async fn submit_labels(&self, submission: &LabelSubmission) -> Result<()> {
        let endpoint = self.endpoint("labels");
        debug!(
            "POST {endpoint} with {} image label(s)",
            submission.image_labels.len()
        );

        let response = self
            .http
            .post(&endpoint)
            .query(&[("userName", self.user.as_str()), ("upload", "true")])
            .json(submission)
            .send()
            .await?;

        Self::check(&endpoint, response).await?;
        Ok(())
    }

    /// Stream an image URL to a local file
    ///
    /// A non-success status is an error; we never leave an empty file
    /// behind for an unreadable blob.
    pub async fn download_file(&self, url: &str, dest: &Path) -> Result<()> {
        let response = self.http.get(url).send().await?;
        let response = Self::check(url, response).await?;

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| Error::io(dest, e))?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk)
                .await
                .map_err(|e| Error::io(dest, e))?;
        }

        file.flush().await.map_err(|e| Error::io(dest, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_image_count_default() {
        assert_eq!(resolve_image_count(None).unwrap(), DEFAULT_IMAGE_COUNT);
    }

    #[test]
    fn test_resolve_image_count_in_bounds() {
        assert_eq!(resolve_image_count(Some(1)).unwrap(), 1);
        assert_eq!(resolve_image_count(Some(100)).unwrap(), 100);
    }

    #[test]
    fn test_resolve_image_count_rejects_zero() {
        assert!(matches!(
            resolve_image_count(Some(0)),
            Err(Error::ImageLimit { requested: 0, .. })
        ));
    }

    #[test]
    fn test_resolve_image_count_rejects_over_limit() {
        assert!(matches!(
            resolve_image_count(Some(101)),
            Err(Error::ImageLimit { requested: 101, .. })
        ));
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client =
            LabelServiceClient::new("https://funcs.example.com/", "ann", Duration::from_secs(5))
                .unwrap();
        assert_eq!(
            client.endpoint("images"),
            "https://funcs.example.com/api/images"
        );
    }
}
