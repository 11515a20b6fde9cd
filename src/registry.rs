//! Explicit mapping from rule families to validator functions.

use std::collections::BTreeMap;
use std::rc::Rc;

use log::warn;

use crate::numeric::{unsupported, validate_numeric, validate_vector};
use crate::outcome::ValidationResult;
use crate::resource::{validate_resource_file, validate_resource_folder};
use crate::roots::ResourceRootCache;
use crate::rules::{FieldValue, Rule, RuleKind};

/// Shared state handed to every validator.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// Resource roots consulted by path validators.
    pub roots: Rc<ResourceRootCache>,
}

impl ValidationContext {
    /// Context backed by the given root cache.
    pub fn new(roots: Rc<ResourceRootCache>) -> Self {
        Self { roots }
    }
}

/// Signature shared by all registered validators.
pub type ValidatorFn = fn(&Rule, &FieldValue, &ValidationContext) -> ValidationResult;

/// Registry dispatching a [`Rule`] to the validator registered for its [`RuleKind`].
#[derive(Debug, Clone, Default)]
pub struct ValidatorRegistry {
    validators: BTreeMap<RuleKind, ValidatorFn>,
}

impl ValidatorRegistry {
    /// Registry with no validators.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the built-in validator for every rule family.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(RuleKind::ResourceFile, resource_file);
        registry.register(RuleKind::ResourceFolder, resource_folder);
        registry.register(RuleKind::Numeric, numeric);
        registry.register(RuleKind::Vector, vector);
        registry
    }

    /// Register `validator` for `kind`, returning the validator it replaced.
    pub fn register(&mut self, kind: RuleKind, validator: ValidatorFn) -> Option<ValidatorFn> {
        self.validators.insert(kind, validator)
    }

    /// Whether a validator is registered for `kind`.
    pub fn contains(&self, kind: RuleKind) -> bool {
        self.validators.contains_key(&kind)
    }

    /// Validate `value` against `rule`.
    ///
    /// Rules without a registered validator are skipped.
    pub fn validate(
        &self,
        rule: &Rule,
        value: &FieldValue,
        context: &ValidationContext,
    ) -> ValidationResult {
        match self.validators.get(&rule.kind()) {
            Some(validator) => validator(rule, value, context),
            None => {
                warn!("no validator registered for {:?}; skipping", rule.kind());
                ValidationResult::Skipped
            }
        }
    }
}

fn resource_file(rule: &Rule, value: &FieldValue, context: &ValidationContext) -> ValidationResult {
    match (rule, value) {
        (Rule::ResourceFile(rule), FieldValue::Text(text)) => {
            validate_resource_file(text, rule, &context.roots)
        }
        (_, other) => unsupported("resource file", other),
    }
}

fn resource_folder(
    rule: &Rule,
    value: &FieldValue,
    context: &ValidationContext,
) -> ValidationResult {
    match (rule, value) {
        (Rule::ResourceFolder(rule), FieldValue::Text(text)) => {
            validate_resource_folder(text, rule, &context.roots)
        }
        (_, other) => unsupported("resource folder", other),
    }
}

fn numeric(rule: &Rule, value: &FieldValue, _context: &ValidationContext) -> ValidationResult {
    match rule {
        Rule::Numeric { constraint } => validate_numeric(value, *constraint),
        _ => unsupported("numeric", value),
    }
}

fn vector(rule: &Rule, value: &FieldValue, _context: &ValidationContext) -> ValidationResult {
    match rule {
        Rule::Vector { constraint } => validate_vector(value, *constraint),
        _ => unsupported("vector", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::ValidationErrorKind;
    use crate::rules::{NumericRule, ResourceFileRule, VectorRule};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn context() -> ValidationContext {
        ValidationContext::new(Rc::new(ResourceRootCache::with_roots(
            Vec::<PathBuf>::new(),
        )))
    }

    #[test]
    fn dispatches_by_rule_kind() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("Dialogues")).unwrap();
        fs::write(temp.path().join("Dialogues/Intro.asset"), "fake").unwrap();
        let context = ValidationContext::new(Rc::new(ResourceRootCache::with_roots([
            temp.path().to_path_buf(),
        ])));
        let registry = ValidatorRegistry::with_defaults();

        let rule = Rule::from(ResourceFileRule::new("Dialogues", ".asset"));
        assert!(
            registry
                .validate(&rule, &FieldValue::from("Intro"), &context)
                .is_valid()
        );
        assert!(
            registry
                .validate(&rule, &FieldValue::from("Outro"), &context)
                .is_error()
        );

        let rule = Rule::from(NumericRule::Positive);
        assert!(registry.validate(&rule, &FieldValue::Int(-2), &context).is_error());

        let rule = Rule::from(VectorRule::NotOrigin);
        assert!(
            registry
                .validate(&rule, &FieldValue::Vector(vec![0.0, 1.0]), &context)
                .is_valid()
        );
    }

    #[test]
    fn text_rules_reject_non_text_values() {
        let registry = ValidatorRegistry::with_defaults();
        let rule = Rule::from(ResourceFileRule::default());
        let result = registry.validate(&rule, &FieldValue::Int(1), &context());
        assert_eq!(result.kind(), Some(ValidationErrorKind::UnsupportedValue));
    }

    #[test]
    fn unregistered_kinds_are_skipped() {
        let registry = ValidatorRegistry::empty();
        let rule = Rule::from(NumericRule::Positive);
        assert!(!registry.contains(RuleKind::Numeric));
        assert_eq!(
            registry.validate(&rule, &FieldValue::Int(-1), &context()),
            ValidationResult::Skipped
        );
    }

    #[test]
    fn custom_validators_replace_defaults() {
        fn always_valid(_: &Rule, _: &FieldValue, _: &ValidationContext) -> ValidationResult {
            ValidationResult::Valid
        }

        let mut registry = ValidatorRegistry::with_defaults();
        assert!(registry.register(RuleKind::Numeric, always_valid).is_some());

        let rule = Rule::from(NumericRule::Positive);
        assert!(registry.validate(&rule, &FieldValue::Int(-1), &context()).is_valid());
    }
}
