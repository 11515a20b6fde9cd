//! Rule and value types understood by the validators.

use serde::Deserialize;

/// Requires a string to name a file under one of the resource roots.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResourceFileRule {
  /// Path prepended to the value before searching, e.g. `Characters`.
  pub prepend_path: String,
  /// Extension appended to the value, including the leading dot.
  pub extension: String,
  /// Whether an empty value passes.
  pub allow_empty_path: bool,
  /// When set, only values starting with this marker are checked; the marker is stripped.
  pub required_start_character: Option<char>,
}

impl Default for ResourceFileRule {
  fn default() -> Self {
    Self {
      prepend_path: String::new(),
      extension: String::new(),
      allow_empty_path: true,
      required_start_character: None,
    }
  }
}

impl ResourceFileRule {
  /// Rule with a prepend path and an extension.
  pub fn new(prepend_path: impl Into<String>, extension: impl Into<String>) -> Self {
    Self {
      prepend_path: prepend_path.into(),
      extension: extension.into(),
      ..Self::default()
    }
  }

  /// Set whether empty values pass.
  pub fn allow_empty(mut self, allow: bool) -> Self {
    self.allow_empty_path = allow;
    self
  }

  /// Only validate values that start with `marker`.
  pub fn required_start(mut self, marker: char) -> Self {
    self.required_start_character = Some(marker);
    self
  }
}

/// Requires a string to name a folder under one of the resource roots.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResourceFolderRule {
  /// Path prepended to the value before searching.
  pub prepend_path: String,
  /// Path appended to the value before searching, e.g. `Variants`.
  pub append_path: String,
  /// Whether an empty value passes.
  pub allow_empty_path: bool,
}

impl Default for ResourceFolderRule {
  fn default() -> Self {
    Self {
      prepend_path: String::new(),
      append_path: String::new(),
      allow_empty_path: true,
    }
  }
}

impl ResourceFolderRule {
  /// Rule with prepend and append paths.
  pub fn new(prepend_path: impl Into<String>, append_path: impl Into<String>) -> Self {
    Self {
      prepend_path: prepend_path.into(),
      append_path: append_path.into(),
      ..Self::default()
    }
  }

  /// Set whether empty values pass.
  pub fn allow_empty(mut self, allow: bool) -> Self {
    self.allow_empty_path = allow;
    self
  }
}

/// Sign constraints for scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericRule {
  /// Strictly greater than zero.
  Positive,
  /// Strictly less than zero.
  Negative,
  /// Anything but zero.
  NonZero,
  /// Zero or greater.
  NonNegative,
  /// Zero or less.
  NonPositive,
}

/// Constraints for vector values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorRule {
  /// At least one component must be non-zero.
  NotOrigin,
}

/// Any rule the registry can dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
  /// See [`ResourceFileRule`].
  ResourceFile(ResourceFileRule),
  /// See [`ResourceFolderRule`].
  ResourceFolder(ResourceFolderRule),
  /// See [`NumericRule`].
  Numeric {
    /// Constraint to apply.
    constraint: NumericRule,
  },
  /// See [`VectorRule`].
  Vector {
    /// Constraint to apply.
    constraint: VectorRule,
  },
}

impl Rule {
  /// Dispatch key used by [`crate::ValidatorRegistry`].
  pub fn kind(&self) -> RuleKind {
    match self {
      Self::ResourceFile(_) => RuleKind::ResourceFile,
      Self::ResourceFolder(_) => RuleKind::ResourceFolder,
      Self::Numeric { .. } => RuleKind::Numeric,
      Self::Vector { .. } => RuleKind::Vector,
    }
  }
}

impl From<ResourceFileRule> for Rule {
  fn from(rule: ResourceFileRule) -> Self {
    Self::ResourceFile(rule)
  }
}

impl From<ResourceFolderRule> for Rule {
  fn from(rule: ResourceFolderRule) -> Self {
    Self::ResourceFolder(rule)
  }
}

impl From<NumericRule> for Rule {
  fn from(constraint: NumericRule) -> Self {
    Self::Numeric { constraint }
  }
}

impl From<VectorRule> for Rule {
  fn from(constraint: VectorRule) -> Self {
    Self::Vector { constraint }
  }
}

/// Rule families, one validator per family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleKind {
  /// Resource file lookups.
  ResourceFile,
  /// Resource folder lookups.
  ResourceFolder,
  /// Scalar sign constraints.
  Numeric,
  /// Vector constraints.
  Vector,
}

/// Field value handed to a validator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
  /// String field.
  Text(String),
  /// Integer field.
  Int(i64),
  /// Double precision field.
  Double(f64),
  /// Single precision field.
  #[serde(skip_deserializing)]
  Float(f32),
  /// Integer vector field.
  IntVector(Vec<i64>),
  /// Floating point vector field.
  Vector(Vec<f64>),
}

impl FieldValue {
  /// Short type name used in diagnostics.
  pub fn type_name(&self) -> &'static str {
    match self {
      Self::Text(_) => "text",
      Self::Int(_) => "int",
      Self::Double(_) => "double",
      Self::Float(_) => "float",
      Self::IntVector(_) => "int vector",
      Self::Vector(_) => "vector",
    }
  }
}

impl From<&str> for FieldValue {
  fn from(value: &str) -> Self {
    Self::Text(value.to_string())
  }
}

impl From<String> for FieldValue {
  fn from(value: String) -> Self {
    Self::Text(value)
  }
}

impl From<i64> for FieldValue {
  fn from(value: i64) -> Self {
    Self::Int(value)
  }
}

impl From<f32> for FieldValue {
  fn from(value: f32) -> Self {
    Self::Float(value)
  }
}

impl From<f64> for FieldValue {
  fn from(value: f64) -> Self {
    Self::Double(value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn file_rule_defaults_allow_empty_paths() {
    let rule: ResourceFileRule = serde_json::from_str(r#"{"prepend_path": "Dialogues"}"#).unwrap();
    assert_eq!(rule.prepend_path, "Dialogues");
    assert!(rule.allow_empty_path);
    assert_eq!(rule.required_start_character, None);
  }

  #[test]
  fn parses_tagged_rules() {
    let rule: Rule = serde_json::from_str(
      r#"{"kind": "resource_file", "extension": ".png", "required_start_character": "$"}"#,
    )
    .unwrap();
    assert_eq!(
      rule,
      Rule::ResourceFile(ResourceFileRule::new("", ".png").required_start('$'))
    );

    let rule: Rule =
      serde_json::from_str(r#"{"kind": "numeric", "constraint": "non_negative"}"#).unwrap();
    assert_eq!(rule.kind(), RuleKind::Numeric);
  }

  #[test]
  fn untagged_values_pick_the_narrowest_type() {
    let values: Vec<FieldValue> =
      serde_json::from_str(r#"["Hero/Idle", 3, 2.5, [0, 1], [0.5, 0.0]]"#).unwrap();
    assert_eq!(values, vec![
      FieldValue::Text("Hero/Idle".into()),
      FieldValue::Int(3),
      FieldValue::Double(2.5),
      FieldValue::IntVector(vec![0, 1]),
      FieldValue::Vector(vec![0.5, 0.0]),
    ]);
  }
}
