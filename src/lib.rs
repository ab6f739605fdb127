//! Catalog of the on-device LiteGuard model variants.
//!
//! The table in [`model::registry`] is the single source of download
//! locations, cache paths and sampling defaults for every supported model.

pub mod config;
pub mod error;
pub mod model;
pub mod server;

pub use error::{Error, Result};
pub use model::{ModelDescriptor, ModelId, ModelRegistry};
