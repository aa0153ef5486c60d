//! Test utilities for the labelsync CLI
//!
//! This crate provides builders and fixtures for label records used by
//! the core transform tests.

pub mod builders;

// Re-export commonly used types
pub use builders::ImageLabelBuilder;
