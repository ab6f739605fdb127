use super::presentation::UiVariant;
use super::registry::ModelId;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Compute backend an inference engine is hinted to prefer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Cpu,
    Gpu,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Cpu => write!(f, "cpu"),
            Backend::Gpu => write!(f, "gpu"),
        }
    }
}

/// One selectable model variant.
///
/// `storage_path` doubles as the key of the on-device weight cache, which
/// only looks at the file name, so both the path and its file name must be
/// unique across the registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDescriptor {
    pub id: ModelId,
    pub storage_path: &'static str,
    pub source_url: &'static str,
    /// Empty when the model has no license link.
    pub license_url: &'static str,
    pub requires_auth: bool,
    pub preferred_backend: Option<Backend>,
    pub ui_variant: UiVariant,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
}

/// Fields a downloader needs to fetch and cache the weights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadRequest {
    pub model: ModelId,
    pub source_url: &'static str,
    pub storage_path: &'static Path,
    pub requires_auth: bool,
    pub license_url: Option<&'static str>,
}

/// Fields an inference engine needs to load the model and sample from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceSettings {
    pub model: ModelId,
    pub model_path: &'static Path,
    pub preferred_backend: Option<Backend>,
    pub sampling: SamplingParams,
}

impl ModelDescriptor {
    pub fn name(&self) -> &'static str {
        self.id.as_str()
    }

    pub fn license_url(&self) -> Option<&'static str> {
        if self.license_url.is_empty() {
            None
        } else {
            Some(self.license_url)
        }
    }

    pub fn file_name(&self) -> Option<&'static str> {
        Path::new(self.storage_path)
            .file_name()
            .and_then(|name| name.to_str())
    }

    pub fn sampling(&self) -> SamplingParams {
        SamplingParams {
            temperature: self.temperature,
            top_k: self.top_k,
            top_p: self.top_p,
        }
    }

    pub fn download_request(&self) -> DownloadRequest {
        DownloadRequest {
            model: self.id,
            source_url: self.source_url,
            storage_path: Path::new(self.storage_path),
            requires_auth: self.requires_auth,
            license_url: self.license_url(),
        }
    }

    pub fn inference_settings(&self) -> InferenceSettings {
        InferenceSettings {
            model: self.id,
            model_path: Path::new(self.storage_path),
            preferred_backend: self.preferred_backend,
            sampling: self.sampling(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelRegistry;

    #[test]
    fn empty_license_is_none() {
        let registry = ModelRegistry::new();
        let gemma = registry.descriptor(ModelId::LiteGuard500Mb);
        let phi = registry.descriptor(ModelId::LiteGuard3Gb);

        assert_eq!(
            gemma.license_url(),
            Some("https://huggingface.co/litert-community/Gemma3-1B-IT")
        );
        assert_eq!(phi.license_url(), None);
    }

    #[test]
    fn download_request_carries_cache_key_and_auth() {
        let registry = ModelRegistry::new();
        let request = registry.descriptor(ModelId::LiteGuard500Mb).download_request();

        assert!(request.requires_auth);
        assert_eq!(
            request.storage_path,
            Path::new("/data/local/tmp/gemma3-1b-it-int4.task")
        );
        assert!(request.source_url.ends_with("gemma3-1b-it-int4.task"));
    }

    #[test]
    fn inference_settings_copy_sampling() {
        let registry = ModelRegistry::new();
        let settings = registry.descriptor(ModelId::LiteGuard1Gb).inference_settings();

        assert_eq!(settings.preferred_backend, None);
        assert_eq!(settings.sampling.top_k, 40);
        assert_eq!(settings.sampling.temperature, 0.6);
        assert_eq!(settings.sampling.top_p, 0.7);
        assert_eq!(
            settings.model_path,
            Path::new("/data/local/tmp/llm/deepseek3k_q8_ekv1280.task")
        );
    }

    #[test]
    fn file_name_from_storage_path() {
        let registry = ModelRegistry::new();
        assert_eq!(
            registry.descriptor(ModelId::LiteGuard2Gb).file_name(),
            Some("LiteGuard_merged_phi2.task")
        );
    }

    #[test]
    fn backend_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Backend::Cpu).unwrap(), "\"cpu\"");
        assert_eq!(Backend::Gpu.to_string(), "gpu");
    }
}
