//! Labelsync Core Library
//!
//! This is the core library for the labelsync CLI, providing the labeling
//! service API client, blob storage uploads, and the VoTT document
//! transforms shared by the command flows.

pub mod api;
pub mod blob;
pub mod error;
pub mod models;
pub mod vott;

// Re-export main types
pub use api::{
    CheckedOutBatch, DEFAULT_IMAGE_COUNT, LabelServiceClient, MAX_IMAGE_COUNT,
    resolve_image_count,
};
pub use blob::{BlobClient, BlobMetadata};
pub use error::{Error, Result};
pub use models::{ImageLabel, ImageTag, LabelSubmission, OnboardRequest};
pub use vott::{VottDocument, VottRegion, build_vott_document, process_vott_document};
