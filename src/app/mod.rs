//! Application Layer
//!
//! Contains app initialization, window management, navigation, and workspace.

pub mod application;
pub mod navigation;
pub mod workspace;
