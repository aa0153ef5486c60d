//! Wire models for the labeling service API
//!
//! These types mirror the JSON shapes the service exchanges on its
//! `images`, `onboardcontainer`, and `labels` endpoints. Identifier
//! fields are camelCase on the wire; bounding-box coordinates keep their
//! snake_case names.

use serde::{Deserialize, Serialize};

/// One bounding-box label on an image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageTag {
    /// Classification names applied to this box
    #[serde(rename = "classificationNames")]
    pub classification_names: Vec<String>,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// One image record as stored by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLabel {
    pub image_id: i64,
    /// HTTP URL of the stored image
    pub image_location: String,
    pub image_height: u32,
    pub image_width: u32,
    #[serde(default)]
    pub labels: Vec<ImageTag>,
}

/// Raw response of `GET /api/images`
///
/// The `images` field is double-encoded: a JSON string that itself
/// contains a JSON array of [`ImageLabel`]. [`RawImagesResponse::decode`]
/// unwraps the inner document.
#[derive(Debug, Deserialize)]
pub struct RawImagesResponse {
    pub images: String,
    #[serde(default)]
    pub classification_list: Vec<String>,
}

impl RawImagesResponse {
    /// Decode the inner `images` document
    pub fn decode(&self) -> serde_json::Result<Vec<ImageLabel>> {
        serde_json::from_str(&self.images)
    }
}

/// Body of `POST /api/onboardcontainer`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardRequest {
    pub storage_account: String,
    pub storage_account_key: String,
    pub storage_container: String,
}

/// Body of `POST /api/labels`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSubmission {
    pub image_labels: Vec<ImageLabel>,
}
