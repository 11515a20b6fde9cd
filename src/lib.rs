#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod config;
pub mod numeric;
pub mod outcome;
pub mod postprocess;
pub mod registry;
pub mod resource;
pub mod roots;
pub mod rules;
pub mod tracker;

pub use config::{CheckManifest, FieldCheck, ManifestError, ValidatorConfig};
pub use outcome::{ValidationErrorKind, ValidationResult};
pub use postprocess::{AssetChanges, AssetPostProcessor, AssetProcessorPlugin};
pub use registry::{ValidationContext, ValidatorFn, ValidatorRegistry};
pub use resource::{validate_resource_file, validate_resource_folder};
pub use roots::ResourceRootCache;
pub use rules::{
    FieldValue, NumericRule, ResourceFileRule, ResourceFolderRule, Rule, RuleKind, VectorRule,
};
pub use tracker::AssetTracker;
