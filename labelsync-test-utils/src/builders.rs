//! Test data builders for creating label scenarios

use labelsync_core::models::{ImageLabel, ImageTag};

/// Builder for [`ImageLabel`] test records
///
/// Defaults to a 640x480 image stored at
/// `https://store.example.com/perm/{id}.png` with no labels.
pub struct ImageLabelBuilder {
    image_id: i64,
    image_location: Option<String>,
    image_width: u32,
    image_height: u32,
    labels: Vec<ImageTag>,
}

impl ImageLabelBuilder {
    /// Create a builder for the given image id
    pub fn new(image_id: i64) -> Self {
        Self {
            image_id,
            image_location: None,
            image_width: 640,
            image_height: 480,
            labels: Vec::new(),
        }
    }

    /// Override the stored image URL
    pub fn with_location(mut self, location: &str) -> Self {
        self.image_location = Some(location.to_string());
        self
    }

    /// Override the image dimensions
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Add a bounding-box label
    pub fn with_box(
        mut self,
        classifications: &[&str],
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    ) -> Self {
        self.labels.push(ImageTag {
            classification_names: classifications.iter().map(|c| c.to_string()).collect(),
            x_min,
            x_max,
            y_min,
            y_max,
        });
        self
    }

    /// Build the label record
    pub fn build(self) -> ImageLabel {
        let image_location = self
            .image_location
            .unwrap_or_else(|| format!("https://store.example.com/perm/{}.png", self.image_id));

        ImageLabel {
            image_id: self.image_id,
            image_location,
            image_height: self.image_height,
            image_width: self.image_width,
            labels: self.labels,
        }
    }
}
