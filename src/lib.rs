//! Scheduled maintenance agent for a search cluster's snapshot subsystem.
//!
//! Each run ensures the configured snapshot repository exists, prunes
//! snapshots past the retention window, and triggers a new timestamped
//! snapshot. Designed to be invoked periodically by an external scheduler;
//! one cluster endpoint and one repository per invocation.

pub mod config;
pub mod operations;
pub mod services;
