use super::descriptor::{Backend, ModelDescriptor};
use super::presentation::UiVariant;
use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ModelId {
    #[serde(rename = "LiteGuard_500MB")]
    LiteGuard500Mb,
    #[serde(rename = "LiteGuard_1GB")]
    LiteGuard1Gb,
    #[serde(rename = "LiteGuard_2GB")]
    LiteGuard2Gb,
    #[serde(rename = "LiteGuard_3GB")]
    LiteGuard3Gb,
}

impl ModelId {
    pub const ALL: [ModelId; 4] = [
        ModelId::LiteGuard500Mb,
        ModelId::LiteGuard1Gb,
        ModelId::LiteGuard2Gb,
        ModelId::LiteGuard3Gb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::LiteGuard500Mb => "LiteGuard_500MB",
            ModelId::LiteGuard1Gb => "LiteGuard_1GB",
            ModelId::LiteGuard2Gb => "LiteGuard_2GB",
            ModelId::LiteGuard3Gb => "LiteGuard_3GB",
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        ModelId::ALL
            .into_iter()
            .find(|id| id.as_str() == trimmed)
            .ok_or_else(|| Error::ModelNotFound(s.to_string()))
    }
}

// Weight caching on device is keyed by file name alone, so every
// `storage_path` below must end in a distinct file name.
static MODELS: [ModelDescriptor; 4] = [
    ModelDescriptor {
        id: ModelId::LiteGuard500Mb,
        storage_path: "/data/local/tmp/gemma3-1b-it-int4.task",
        source_url: "https://huggingface.co/litert-community/Gemma3-1B-IT/resolve/main/gemma3-1b-it-int4.task",
        license_url: "https://huggingface.co/litert-community/Gemma3-1B-IT",
        requires_auth: true,
        preferred_backend: Some(Backend::Cpu),
        ui_variant: UiVariant::Generic,
        temperature: 1.0,
        top_k: 64,
        top_p: 0.95,
    },
    ModelDescriptor {
        id: ModelId::LiteGuard1Gb,
        storage_path: "/data/local/tmp/llm/deepseek3k_q8_ekv1280.task",
        source_url: "https://huggingface.co/litert-community/DeepSeek-R1-Distill-Qwen-1.5B/resolve/main/deepseek_q8_ekv1280.task",
        license_url: "",
        requires_auth: false,
        preferred_backend: None,
        ui_variant: UiVariant::DeepSeek,
        temperature: 0.6,
        top_k: 40,
        top_p: 0.7,
    },
    ModelDescriptor {
        id: ModelId::LiteGuard2Gb,
        storage_path: "/data/local/tmp/llm/LiteGuard_merged_phi2.task",
        source_url: "https://huggingface.co/T-tchi0/LiteGuard-merged-TFLITE/resolve/main/LiteGuard_merged.task",
        license_url: "",
        requires_auth: false,
        preferred_backend: None,
        ui_variant: UiVariant::Generic,
        temperature: 0.0,
        top_k: 40,
        top_p: 1.0,
    },
    ModelDescriptor {
        id: ModelId::LiteGuard3Gb,
        storage_path: "/data/local/tmp/llm/phi4_q8_ekv1280.task",
        source_url: "https://huggingface.co/litert-community/Phi-4-mini-instruct/resolve/main/phi4_q8_ekv1280.task",
        license_url: "",
        requires_auth: false,
        preferred_backend: None,
        ui_variant: UiVariant::Generic,
        temperature: 0.0,
        top_k: 40,
        top_p: 1.0,
    },
];

/// A broken registry invariant, reported by [`validate_descriptors`].
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryViolation {
    DuplicateIdentifier(ModelId),
    DuplicateStoragePath { model: ModelId, path: &'static str },
    DuplicateFileName { model: ModelId, file_name: String },
    RelativeStoragePath { model: ModelId, path: &'static str },
    EmptySourceUrl(ModelId),
    InvalidSourceUrl { model: ModelId, reason: String },
    InvalidLicenseUrl { model: ModelId, reason: String },
    TopPOutOfRange { model: ModelId, top_p: f32 },
    TopKZero(ModelId),
    InvalidTemperature { model: ModelId, temperature: f32 },
}

impl fmt::Display for RegistryViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryViolation::DuplicateIdentifier(model) => {
                write!(f, "{}: identifier declared more than once", model)
            }
            RegistryViolation::DuplicateStoragePath { model, path } => {
                write!(f, "{}: storage path {} already used", model, path)
            }
            RegistryViolation::DuplicateFileName { model, file_name } => {
                write!(f, "{}: file name {} already used", model, file_name)
            }
            RegistryViolation::RelativeStoragePath { model, path } => {
                write!(f, "{}: storage path {} is not absolute", model, path)
            }
            RegistryViolation::EmptySourceUrl(model) => write!(f, "{}: source URL is empty", model),
            RegistryViolation::InvalidSourceUrl { model, reason } => {
                write!(f, "{}: invalid source URL: {}", model, reason)
            }
            RegistryViolation::InvalidLicenseUrl { model, reason } => {
                write!(f, "{}: invalid license URL: {}", model, reason)
            }
            RegistryViolation::TopPOutOfRange { model, top_p } => {
                write!(f, "{}: top_p {} outside [0, 1]", model, top_p)
            }
            RegistryViolation::TopKZero(model) => write!(f, "{}: top_k must be at least 1", model),
            RegistryViolation::InvalidTemperature { model, temperature } => {
                write!(f, "{}: temperature {} must be finite and >= 0", model, temperature)
            }
        }
    }
}

fn check_url(raw: &str) -> std::result::Result<(), String> {
    let parsed = url::Url::parse(raw).map_err(|e| e.to_string())?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}

/// Checks every registry invariant over `descriptors` and returns what is
/// broken, in declaration order.
pub fn validate_descriptors(descriptors: &[ModelDescriptor]) -> Vec<RegistryViolation> {
    let mut violations = Vec::new();
    let mut ids = HashSet::new();
    let mut paths = HashSet::new();
    let mut file_names = HashSet::new();

    for model in descriptors {
        let id = model.id;

        if !ids.insert(id) {
            violations.push(RegistryViolation::DuplicateIdentifier(id));
        }

        if !paths.insert(model.storage_path) {
            violations.push(RegistryViolation::DuplicateStoragePath {
                model: id,
                path: model.storage_path,
            });
        } else if let Some(file_name) = model.file_name() {
            if !file_names.insert(file_name) {
                violations.push(RegistryViolation::DuplicateFileName {
                    model: id,
                    file_name: file_name.to_string(),
                });
            }
        }

        if !Path::new(model.storage_path).is_absolute() {
            violations.push(RegistryViolation::RelativeStoragePath {
                model: id,
                path: model.storage_path,
            });
        }

        if model.source_url.trim().is_empty() {
            violations.push(RegistryViolation::EmptySourceUrl(id));
        } else if let Err(reason) = check_url(model.source_url) {
            violations.push(RegistryViolation::InvalidSourceUrl { model: id, reason });
        }

        if let Some(license_url) = model.license_url() {
            if let Err(reason) = check_url(license_url) {
                violations.push(RegistryViolation::InvalidLicenseUrl { model: id, reason });
            }
        }

        if !(0.0..=1.0).contains(&model.top_p) {
            violations.push(RegistryViolation::TopPOutOfRange {
                model: id,
                top_p: model.top_p,
            });
        }

        if model.top_k == 0 {
            violations.push(RegistryViolation::TopKZero(id));
        }

        if !model.temperature.is_finite() || model.temperature < 0.0 {
            violations.push(RegistryViolation::InvalidTemperature {
                model: id,
                temperature: model.temperature,
            });
        }
    }

    violations
}

/// Read-only view over the built-in model table.
#[derive(Debug, Clone, Copy)]
pub struct ModelRegistry {
    models: &'static [ModelDescriptor],
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self { models: &MODELS }
    }

    /// All descriptors in declaration order.
    pub fn list(&self) -> &'static [ModelDescriptor] {
        self.models
    }

    pub fn get(&self, name: &str) -> Result<&'static ModelDescriptor> {
        let id = name.parse::<ModelId>()?;
        self.models
            .iter()
            .find(|model| model.id == id)
            .ok_or_else(|| Error::ModelNotFound(name.to_string()))
    }

    pub fn descriptor(&self, id: ModelId) -> &'static ModelDescriptor {
        // MODELS is declared in ModelId::ALL order.
        &self.models[id as usize]
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn validate(&self) -> Vec<RegistryViolation> {
        validate_descriptors(self.models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: ModelId, path: &'static str) -> ModelDescriptor {
        ModelDescriptor {
            id,
            storage_path: path,
            source_url: "https://example.com/model.task",
            license_url: "",
            requires_auth: false,
            preferred_backend: None,
            ui_variant: UiVariant::Generic,
            temperature: 0.5,
            top_k: 10,
            top_p: 0.9,
        }
    }

    #[test]
    fn builtin_registry_is_valid() {
        let violations = ModelRegistry::new().validate();
        assert!(violations.is_empty(), "{:?}", violations);
    }

    #[test]
    fn storage_paths_and_file_names_are_unique() {
        let registry = ModelRegistry::new();
        let paths: HashSet<_> = registry.list().iter().map(|m| m.storage_path).collect();
        let names: HashSet<_> = registry.list().iter().map(|m| m.file_name()).collect();
        assert_eq!(paths.len(), registry.len());
        assert_eq!(names.len(), registry.len());
    }

    #[test]
    fn identifiers_are_unique() {
        let registry = ModelRegistry::new();
        let ids: HashSet<_> = registry.list().iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), registry.len());
    }

    #[test]
    fn source_urls_parse() {
        for model in ModelRegistry::new().list() {
            assert!(!model.source_url.is_empty());
            assert!(url::Url::parse(model.source_url).is_ok(), "{}", model.id);
        }
    }

    #[test]
    fn sampling_params_in_range() {
        for model in ModelRegistry::new().list() {
            assert!((0.0..=1.0).contains(&model.top_p), "{}", model.id);
            assert!(model.top_k >= 1, "{}", model.id);
            assert!(model.temperature >= 0.0, "{}", model.id);
        }
    }

    #[test]
    fn list_is_stable_and_in_declaration_order() {
        let registry = ModelRegistry::new();
        let first: Vec<_> = registry.list().iter().map(|m| m.id).collect();
        let second: Vec<_> = registry.list().iter().map(|m| m.id).collect();

        assert_eq!(first.len(), 4);
        assert_eq!(first, second);
        assert_eq!(first, ModelId::ALL.to_vec());
    }

    #[test]
    fn descriptor_matches_get() {
        let registry = ModelRegistry::new();
        for id in ModelId::ALL {
            assert_eq!(registry.descriptor(id).id, id);
            assert_eq!(registry.get(id.as_str()).unwrap(), registry.descriptor(id));
        }
    }

    #[test]
    fn get_500mb() {
        let model = ModelRegistry::new().get("LiteGuard_500MB").unwrap();
        assert!(model.requires_auth);
        assert_eq!(model.preferred_backend, Some(Backend::Cpu));
        assert_eq!(model.ui_variant, UiVariant::Generic);
        assert_eq!(model.top_k, 64);
    }

    #[test]
    fn get_1gb() {
        let model = ModelRegistry::new().get("LiteGuard_1GB").unwrap();
        assert!(!model.requires_auth);
        assert_eq!(model.preferred_backend, None);
        assert_eq!(model.ui_variant, UiVariant::DeepSeek);
        assert!(model.license_url.is_empty());
    }

    #[test]
    fn get_unknown_is_not_found() {
        let err = ModelRegistry::new().get("nonexistent").unwrap_err();
        assert!(matches!(err, Error::ModelNotFound(ref name) if name == "nonexistent"));
    }

    #[test]
    fn identifier_lookup_is_case_sensitive() {
        assert!(ModelRegistry::new().get("liteguard_500mb").is_err());
        assert!(ModelRegistry::new().get(" LiteGuard_2GB ").is_ok());
    }

    #[test]
    fn model_id_display_round_trips() {
        for id in ModelId::ALL {
            assert_eq!(id.to_string().parse::<ModelId>().unwrap(), id);
        }
        assert_eq!(
            serde_json::to_string(&ModelId::LiteGuard3Gb).unwrap(),
            "\"LiteGuard_3GB\""
        );
    }

    #[test]
    fn flags_duplicates() {
        let models = [
            sample(ModelId::LiteGuard500Mb, "/data/a.task"),
            sample(ModelId::LiteGuard500Mb, "/data/a.task"),
            sample(ModelId::LiteGuard1Gb, "/data/other/a.task"),
        ];

        let violations = validate_descriptors(&models);
        assert_eq!(
            violations,
            vec![
                RegistryViolation::DuplicateIdentifier(ModelId::LiteGuard500Mb),
                RegistryViolation::DuplicateStoragePath {
                    model: ModelId::LiteGuard500Mb,
                    path: "/data/a.task",
                },
                RegistryViolation::DuplicateFileName {
                    model: ModelId::LiteGuard1Gb,
                    file_name: "a.task".to_string(),
                },
            ]
        );
    }

    #[test]
    fn flags_bad_urls() {
        let mut empty = sample(ModelId::LiteGuard500Mb, "/data/a.task");
        empty.source_url = "";
        let mut malformed = sample(ModelId::LiteGuard1Gb, "/data/b.task");
        malformed.source_url = "not a url";
        let mut ftp = sample(ModelId::LiteGuard2Gb, "/data/c.task");
        ftp.source_url = "ftp://example.com/c.task";
        let mut license = sample(ModelId::LiteGuard3Gb, "/data/d.task");
        license.license_url = "::";

        let violations = validate_descriptors(&[empty, malformed, ftp, license]);
        assert_eq!(violations.len(), 4);
        assert_eq!(violations[0], RegistryViolation::EmptySourceUrl(ModelId::LiteGuard500Mb));
        assert!(matches!(
            violations[1],
            RegistryViolation::InvalidSourceUrl { model: ModelId::LiteGuard1Gb, .. }
        ));
        assert!(matches!(
            violations[2],
            RegistryViolation::InvalidSourceUrl { model: ModelId::LiteGuard2Gb, .. }
        ));
        assert!(matches!(
            violations[3],
            RegistryViolation::InvalidLicenseUrl { model: ModelId::LiteGuard3Gb, .. }
        ));
    }

    #[test]
    fn flags_sampling_and_path_defects() {
        let mut model = sample(ModelId::LiteGuard2Gb, "relative/model.task");
        model.top_p = 1.5;
        model.top_k = 0;
        model.temperature = -0.1;

        let violations = validate_descriptors(&[model]);
        assert_eq!(
            violations,
            vec![
                RegistryViolation::RelativeStoragePath {
                    model: ModelId::LiteGuard2Gb,
                    path: "relative/model.task",
                },
                RegistryViolation::TopPOutOfRange {
                    model: ModelId::LiteGuard2Gb,
                    top_p: 1.5,
                },
                RegistryViolation::TopKZero(ModelId::LiteGuard2Gb),
                RegistryViolation::InvalidTemperature {
                    model: ModelId::LiteGuard2Gb,
                    temperature: -0.1,
                },
            ]
        );
    }

    #[test]
    fn nan_temperature_is_flagged() {
        let mut model = sample(ModelId::LiteGuard2Gb, "/data/a.task");
        model.temperature = f32::NAN;
        assert_eq!(validate_descriptors(&[model]).len(), 1);
    }

    #[test]
    fn violation_messages_name_the_model() {
        let message = RegistryViolation::TopKZero(ModelId::LiteGuard1Gb).to_string();
        assert_eq!(message, "LiteGuard_1GB: top_k must be at least 1");
    }
}
