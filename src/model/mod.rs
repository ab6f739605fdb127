pub mod descriptor;
pub mod presentation;
pub mod registry;

pub use descriptor::{Backend, DownloadRequest, InferenceSettings, ModelDescriptor, SamplingParams};
pub use presentation::{ModelResponse, UiVariant};
pub use registry::{validate_descriptors, ModelId, ModelRegistry, RegistryViolation};
