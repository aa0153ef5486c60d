//! Directory walker for image discovery
//!
//! Streaming traversal using walkdir with pattern filtering. Hidden
//! files (dot-prefixed names) are always skipped, matching what the
//! onboarding pipeline accepts.

use std::path::Path;
use walkdir::{DirEntry, WalkDir};

use super::{
    DiscoveredFile, DiscoveryError, Result,
    extensions::{DEFAULT_IMAGE_EXTENSIONS, extensions_to_patterns},
    filter::FileFilter,
};

/// Options for file discovery
#[derive(Debug, Clone)]
pub struct FileDiscoveryOptions {
    /// Patterns to include (glob patterns)
    pub include_patterns: Vec<String>,
    /// Patterns to exclude (glob patterns, override includes)
    pub exclude_patterns: Vec<String>,
    /// Use default image extensions when no include patterns specified
    pub use_defaults: bool,
    /// Follow symbolic links
    pub follow_links: bool,
}

impl Default for FileDiscoveryOptions {
    fn default() -> Self {
        Self {
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            use_defaults: true,
            follow_links: false,
        }
    }
}

impl FileDiscoveryOptions {
    /// Create new options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Add include patterns
    pub fn with_include_patterns(mut self, patterns: Vec<String>) -> Self {
        self.include_patterns = patterns;
        self
    }

    /// Add exclude patterns
    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    /// Set whether to use default image extensions
    pub fn with_use_defaults(mut self, use_defaults: bool) -> Self {
        self.use_defaults = use_defaults;
        self
    }
}

/// File discovery iterator for streaming file enumeration
pub struct FileDiscovery {
    walker: walkdir::IntoIter,
    filter: FileFilter,
}

impl FileDiscovery {
    /// Create a new file discovery iterator
    pub fn new(path: &Path, options: FileDiscoveryOptions) -> Result<Self> {
        if !path.exists() {
            return Err(DiscoveryError::PathNotFound(path.to_path_buf()));
        }

        let mut include_patterns = options.include_patterns.clone();
        let mut case_insensitive = false;

        // Default to the supported image extensions when nothing explicit
        // was asked for; extensions match regardless of case
        if options.use_defaults && include_patterns.is_empty() {
            include_patterns = extensions_to_patterns(DEFAULT_IMAGE_EXTENSIONS);
            case_insensitive = true;
        }

        let filter = FileFilter::with_case_insensitive_includes(
            &include_patterns,
            &options.exclude_patterns,
            case_insensitive,
        )?;

        let walker = WalkDir::new(path).follow_links(options.follow_links);

        Ok(Self {
            walker: walker.into_iter(),
            filter,
        })
    }

    /// Check if an entry is a file we should include
    fn should_include_entry(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_file() {
            return false;
        }

        // Hidden files are never onboarded
        if entry.file_name().to_string_lossy().starts_with('.') {
            return false;
        }

        self.filter.should_include(entry.path())
    }
}

impl Iterator for FileDiscovery {
    type Item = Result<DiscoveredFile>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.walker.next()? {
                Ok(entry) => {
                    if self.should_include_entry(&entry) {
                        match entry.metadata() {
                            Ok(metadata) => {
                                return Some(Ok(DiscoveredFile {
                                    path: entry.path().to_path_buf(),
                                    size: metadata.len(),
                                }));
                            }
                            Err(e) => {
                                // Skip files we can't read metadata for
                                log::warn!("Failed to read metadata for {:?}: {}", entry.path(), e);
                                continue;
                            }
                        }
                    }
                }
                Err(e) => {
                    // Log walk errors but continue
                    log::warn!("Walk error: {e}");
                    continue;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_directory() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::write(base.join("one.png"), b"test").unwrap();
        fs::write(base.join("two.JPG"), b"test").unwrap();
        fs::write(base.join("four.Jpeg"), b"test").unwrap();
        fs::write(base.join("notes.txt"), b"test").unwrap();
        fs::write(base.join(".hidden.png"), b"test").unwrap();

        let subdir = base.join("batch");
        fs::create_dir(&subdir).unwrap();
        fs::write(subdir.join("three.jpeg"), b"test").unwrap();
        fs::write(subdir.join("scan.tiff"), b"test").unwrap();

        dir
    }

    fn discover(dir: &TempDir, options: FileDiscoveryOptions) -> Vec<DiscoveredFile> {
        FileDiscovery::new(dir.path(), options)
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_discovery_with_defaults_finds_images_only() {
        let dir = create_test_directory();
        let files = discover(&dir, FileDiscoveryOptions::new());

        // one.png, two.JPG, four.Jpeg, batch/three.jpeg
        assert_eq!(files.len(), 4);
        let names: Vec<_> = files.iter().map(|f| f.path.file_name().unwrap()).collect();
        assert!(names.iter().any(|n| *n == "one.png"));
        assert!(names.iter().any(|n| *n == "three.jpeg"));
    }

    #[test]
    fn test_discovery_defaults_ignore_extension_case() {
        let dir = create_test_directory();
        let files = discover(&dir, FileDiscoveryOptions::new());

        let names: Vec<_> = files.iter().map(|f| f.path.file_name().unwrap()).collect();
        assert!(names.iter().any(|n| *n == "two.JPG"));
        assert!(names.iter().any(|n| *n == "four.Jpeg"));
    }

    #[test]
    fn test_discovery_skips_hidden_files() {
        let dir = create_test_directory();
        let files = discover(&dir, FileDiscoveryOptions::new());

        assert!(
            !files
                .iter()
                .any(|f| f.path.file_name().unwrap() == ".hidden.png")
        );
    }

    #[test]
    fn test_discovery_with_explicit_patterns() {
        let dir = create_test_directory();
        let options = FileDiscoveryOptions::new()
            .with_include_patterns(vec!["*.tiff".to_string()])
            .with_use_defaults(false);

        let files = discover(&dir, options);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path.file_name().unwrap(), "scan.tiff");
    }

    #[test]
    fn test_discovery_exclude_overrides_defaults() {
        let dir = create_test_directory();
        let options =
            FileDiscoveryOptions::new().with_exclude_patterns(vec!["**/batch/*".to_string()]);

        let files = discover(&dir, options);

        assert_eq!(files.len(), 3);
        assert!(
            !files
                .iter()
                .any(|f| f.path.file_name().unwrap() == "three.jpeg")
        );
    }

    #[test]
    fn test_discovery_missing_path() {
        let result = FileDiscovery::new(
            Path::new("/definitely/not/here"),
            FileDiscoveryOptions::new(),
        );
        assert!(matches!(result, Err(DiscoveryError::PathNotFound(_))));
    }
}
