//! VoTT document model and transforms
//!
//! The labeling tool (VoTT) reads and writes a single JSON document with
//! one frame per image. The two functions here are the pure mappings
//! between the service's label records and that document: one direction
//! when materializing a batch for tagging, the other when reading the
//! edited document back for submission. Neither touches the network or
//! the file system.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};
use crate::models::{ImageLabel, ImageTag, LabelSubmission};

/// Region shape VoTT uses for bounding boxes
const REGION_TYPE_RECTANGLE: &str = "Rectangle";

/// Colors assigned to classifications, cycled in order
const TAG_COLORS: &[&str] = &[
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8", "#f58231", "#911eb4", "#46f0f0", "#f032e6",
    "#bcf60c", "#fabebe",
];

/// One labeled region inside a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VottRegion {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Pixel width of the underlying image
    pub width: u32,
    /// Pixel height of the underlying image
    pub height: u32,
    /// Region id, unique within its frame
    pub id: u32,
    #[serde(rename = "type")]
    pub region_type: String,
    pub tags: Vec<String>,
}

/// The labeling tool's project document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VottDocument {
    /// Regions per frame, keyed by image file name
    pub frames: BTreeMap<String, Vec<VottRegion>>,
    pub framerate: String,
    /// Comma-joined classification list shown in the tool
    #[serde(rename = "inputTags")]
    pub input_tags: String,
    pub suggestiontype: String,
    pub scd: bool,
    /// Frames the tagger has reviewed; only these are submitted back
    #[serde(rename = "visitedFrames")]
    pub visited_frames: Vec<String>,
    #[serde(default)]
    pub tag_colors: Vec<String>,
}

/// Build the VoTT document for a checked-out batch
///
/// Returns the document together with the image URLs to download. Frames
/// are keyed by the file name component of each image URL. Images that
/// already carry labels start out visited so their boxes survive an
/// untouched round trip.
pub fn build_vott_document(
    labels: &[ImageLabel],
    classifications: &[String],
) -> Result<(VottDocument, Vec<String>)> {
    let mut frames = BTreeMap::new();
    let mut visited_frames = Vec::new();
    let mut image_urls = Vec::new();

    for label in labels {
        let frame_name = file_name_from_url(&label.image_location)?;

        let regions: Vec<VottRegion> = label
            .labels
            .iter()
            .enumerate()
            .map(|(id, tag)| VottRegion {
                x1: tag.x_min,
                y1: tag.y_min,
                x2: tag.x_max,
                y2: tag.y_max,
                width: label.image_width,
                height: label.image_height,
                id: id as u32,
                region_type: REGION_TYPE_RECTANGLE.to_string(),
                tags: tag.classification_names.clone(),
            })
            .collect();

        if !regions.is_empty() {
            visited_frames.push(frame_name.clone());
        }

        frames.insert(frame_name, regions);
        image_urls.push(label.image_location.clone());
    }

    let tag_colors = classifications
        .iter()
        .enumerate()
        .map(|(i, _)| TAG_COLORS[i % TAG_COLORS.len()].to_string())
        .collect();

    let document = VottDocument {
        frames,
        framerate: "1".to_string(),
        input_tags: classifications.join(","),
        suggestiontype: "track".to_string(),
        scd: false,
        visited_frames,
        tag_colors,
    };

    Ok((document, image_urls))
}

/// Turn the edited VoTT document back into a label submission
///
/// Only visited frames are submitted. A visited frame with no regions is
/// an explicit "reviewed, nothing present" and submits an empty tag
/// list. The image id is recovered from the frame's file-name stem,
/// which the download flow guarantees to be the numeric id.
pub fn process_vott_document(document: &VottDocument) -> Result<LabelSubmission> {
    let mut image_labels = Vec::new();

    for frame_name in &document.visited_frames {
        let image_id = image_id_from_frame(frame_name)?;

        let regions = document
            .frames
            .get(frame_name)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let labels: Vec<ImageTag> = regions
            .iter()
            .map(|region| ImageTag {
                classification_names: region.tags.clone(),
                x_min: region.x1,
                x_max: region.x2,
                y_min: region.y1,
                y_max: region.y2,
            })
            .collect();

        let (image_width, image_height) = regions
            .first()
            .map(|r| (r.width, r.height))
            .unwrap_or((0, 0));

        image_labels.push(ImageLabel {
            image_id,
            image_location: String::new(),
            image_height,
            image_width,
            labels,
        });
    }

    image_labels.sort_by_key(|label| label.image_id);

    Ok(LabelSubmission { image_labels })
}

/// Extract the file name component of an image URL
pub fn file_name_from_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|_| Error::InvalidImageUrl(url.to_string()))?;

    parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
        .ok_or_else(|| Error::InvalidImageUrl(url.to_string()))
}

/// Parse the numeric image id out of a frame's file name
fn image_id_from_frame(frame_name: &str) -> Result<i64> {
    Path::new(frame_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.parse().ok())
        .ok_or_else(|| Error::InvalidFrameName(frame_name.to_string()))
}
