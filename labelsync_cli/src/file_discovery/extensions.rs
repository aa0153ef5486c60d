//! Default image file extensions
//!
//! The labeling service only ingests raster images; these are the
//! extensions onboarding picks up when no explicit include patterns are
//! given.

/// Image extensions the onboarding flow uploads by default
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Convert extensions to glob patterns
///
/// One pattern per extension; matching them without regard to case is
/// the filter's job, so `photo.Jpg` is picked up alongside `photo.jpg`.
pub fn extensions_to_patterns(extensions: &[&str]) -> Vec<String> {
    extensions.iter().map(|ext| format!("*.{ext}")).collect()
}
