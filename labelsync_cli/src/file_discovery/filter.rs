//! File filtering using glob patterns
//!
//! Include and exclude patterns compile into `GlobSet`s; excludes
//! override includes, and an empty include set means "everything".

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::Path;

use super::{DiscoveryError, Result};

/// File filter managing include and exclude patterns
#[derive(Debug)]
pub struct FileFilter {
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl FileFilter {
    /// Create a new file filter; patterns match case-sensitively
    pub fn new(include_patterns: &[String], exclude_patterns: &[String]) -> Result<Self> {
        Self::with_case_insensitive_includes(include_patterns, exclude_patterns, false)
    }

    /// Create a file filter whose include patterns optionally ignore case
    ///
    /// The default image extensions use this so `photo.Jpg` and
    /// `photo.JPG` are onboarded like `photo.jpg`. Excludes always match
    /// case-sensitively.
    pub fn with_case_insensitive_includes(
        include_patterns: &[String],
        exclude_patterns: &[String],
        case_insensitive: bool,
    ) -> Result<Self> {
        Ok(Self {
            include: Self::build_globset(include_patterns, case_insensitive)?,
            exclude: Self::build_globset(exclude_patterns, false)?,
        })
    }

    fn build_globset(patterns: &[String], case_insensitive: bool) -> Result<Option<GlobSet>> {
        if patterns.is_empty() {
            return Ok(None);
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = GlobBuilder::new(pattern)
                .case_insensitive(case_insensitive)
                .build()
                .map_err(|e| DiscoveryError::InvalidPattern(format!("{pattern}: {e}")))?;
            builder.add(glob);
        }

        let globset = builder
            .build()
            .map_err(|e| DiscoveryError::InvalidPattern(e.to_string()))?;
        Ok(Some(globset))
    }

    /// Check if a file should be included based on patterns
    ///
    /// Rules:
    /// 1. If path matches exclude patterns -> false (exclude overrides)
    /// 2. If no include patterns -> true (include all by default)
    /// 3. If path matches include patterns -> true
    /// 4. Otherwise -> false
    pub fn should_include(&self, path: &Path) -> bool {
        if let Some(ref exclude) = self.exclude
            && exclude.is_match(path)
        {
            return false;
        }

        match self.include {
            Some(ref include) => include.is_match(path),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(items: &[&str]) -> Vec<String> {
        items.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_filter_include_only() {
        let filter = FileFilter::new(&patterns(&["*.png", "*.jpg"]), &[]).unwrap();

        assert!(filter.should_include(Path::new("shot.png")));
        assert!(filter.should_include(Path::new("shot.jpg")));
        assert!(!filter.should_include(Path::new("shot.bmp")));
        assert!(filter.should_include(Path::new("/deep/path/shot.png")));
    }

    #[test]
    fn test_filter_exclude_overrides_include() {
        let filter =
            FileFilter::new(&patterns(&["*.png"]), &patterns(&["rejects/*.png"])).unwrap();

        assert!(filter.should_include(Path::new("shot.png")));
        assert!(filter.should_include(Path::new("keep/shot.png")));
        assert!(!filter.should_include(Path::new("rejects/shot.png")));
    }

    #[test]
    fn test_filter_no_patterns_includes_everything() {
        let filter = FileFilter::new(&[], &[]).unwrap();

        assert!(filter.should_include(Path::new("shot.png")));
        assert!(filter.should_include(Path::new("notes.txt")));
    }

    #[test]
    fn test_filter_exclude_only() {
        let filter = FileFilter::new(&[], &patterns(&["*.tmp", "*.bak"])).unwrap();

        assert!(filter.should_include(Path::new("shot.png")));
        assert!(!filter.should_include(Path::new("shot.tmp")));
        assert!(!filter.should_include(Path::new("backup.bak")));
    }

    #[test]
    fn test_filter_case_insensitive_includes() {
        let filter =
            FileFilter::with_case_insensitive_includes(&patterns(&["*.jpg"]), &[], true).unwrap();

        assert!(filter.should_include(Path::new("photo.jpg")));
        assert!(filter.should_include(Path::new("photo.Jpg")));
        assert!(filter.should_include(Path::new("photo.JPG")));

        let strict = FileFilter::new(&patterns(&["*.jpg"]), &[]).unwrap();
        assert!(!strict.should_include(Path::new("photo.Jpg")));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let result = FileFilter::new(&patterns(&["a[b"]), &[]);
        assert!(matches!(result, Err(DiscoveryError::InvalidPattern(_))));
    }
}
