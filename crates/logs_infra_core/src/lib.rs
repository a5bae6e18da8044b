//! Typed descriptors for the access-log storage and catalog stack.
//!
//! This crate owns deterministic construction and validation of the bucket,
//! catalog database and catalog table descriptors, plus rendering them into a
//! provisioning template. It intentionally excludes AWS SDK calls and any
//! deployment mechanics; those belong to the provisioning engine.

pub mod catalog;
pub mod config;
pub mod container;
pub mod error;
pub mod location;
pub mod projection;
pub mod schema;
pub mod stack;
pub mod synth;

pub use config::StackConfig;
pub use error::ConfigurationError;
pub use stack::{build_descriptor_set, DescriptorSet};
