//! Configuration and path management for snapvault

pub mod paths;

pub use paths::StorePaths;
