//! Sign constraints for scalar fields and origin checks for vector fields.

use crate::outcome::{ValidationErrorKind, ValidationResult};
use crate::rules::{FieldValue, NumericRule, VectorRule};

/// Scalar types the numeric rules can be applied to.
pub trait Scalar: Copy + PartialOrd {
    /// Additive identity.
    const ZERO: Self;

    /// Whether the value should be treated as zero by [`NumericRule::NonZero`].
    fn is_effectively_zero(self) -> bool;
}

impl Scalar for i64 {
    const ZERO: Self = 0;

    fn is_effectively_zero(self) -> bool {
        self == 0
    }
}

impl Scalar for f32 {
    const ZERO: Self = 0.0;

    fn is_effectively_zero(self) -> bool {
        // Same tolerance an engine uses for approximate float equality against zero.
        let smallest = f32::from_bits(1) * 8.0;
        self.abs() < (1e-6 * self.abs()).max(smallest)
    }
}

impl Scalar for f64 {
    const ZERO: Self = 0.0;

    fn is_effectively_zero(self) -> bool {
        self.abs() < 1e-10
    }
}

/// Apply `rule` to a scalar.
pub fn check_scalar<T: Scalar>(value: T, rule: NumericRule) -> ValidationResult {
    let message = match rule {
        NumericRule::Positive if value <= T::ZERO => "Value must be positive.",
        NumericRule::Negative if value >= T::ZERO => "Value must be negative.",
        NumericRule::NonZero if value.is_effectively_zero() => "Value must not be zero.",
        NumericRule::NonNegative if value < T::ZERO => "Value must not be negative.",
        NumericRule::NonPositive if value > T::ZERO => "Value must not be positive.",
        _ => return ValidationResult::Valid,
    };
    ValidationResult::error(ValidationErrorKind::OutOfRange, message)
}

/// Apply `rule` to the components of a vector.
pub fn check_vector<T: Scalar>(components: &[T], rule: VectorRule) -> ValidationResult {
    match rule {
        VectorRule::NotOrigin if components.iter().all(|c| *c == T::ZERO) => {
            ValidationResult::error(ValidationErrorKind::OutOfRange, "Value must not be origin.")
        }
        VectorRule::NotOrigin => ValidationResult::Valid,
    }
}

/// Apply a numeric rule to any field value.
pub fn validate_numeric(value: &FieldValue, rule: NumericRule) -> ValidationResult {
    match value {
        FieldValue::Int(v) => check_scalar(*v, rule),
        FieldValue::Float(v) => check_scalar(*v, rule),
        FieldValue::Double(v) => check_scalar(*v, rule),
        other => unsupported("numeric", other),
    }
}

/// Apply a vector rule to any field value.
pub fn validate_vector(value: &FieldValue, rule: VectorRule) -> ValidationResult {
    match value {
        FieldValue::IntVector(components) => check_vector(components, rule),
        FieldValue::Vector(components) => check_vector(components, rule),
        other => unsupported("vector", other),
    }
}

pub(crate) fn unsupported(rule: &str, value: &FieldValue) -> ValidationResult {
    ValidationResult::error(
        ValidationErrorKind::UnsupportedValue,
        format!("A {rule} rule cannot validate a {} value.", value.type_name()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_and_negative_reject_zero() {
        assert!(check_scalar(1_i64, NumericRule::Positive).is_valid());
        assert!(check_scalar(0_i64, NumericRule::Positive).is_error());
        assert!(check_scalar(-0.5_f64, NumericRule::Negative).is_valid());
        assert!(check_scalar(0.0_f32, NumericRule::Negative).is_error());
    }

    #[test]
    fn non_negative_and_non_positive_accept_zero() {
        assert!(check_scalar(0_i64, NumericRule::NonNegative).is_valid());
        assert!(check_scalar(-1_i64, NumericRule::NonNegative).is_error());
        assert!(check_scalar(0.0_f64, NumericRule::NonPositive).is_valid());
        assert_eq!(
            check_scalar(2.0_f32, NumericRule::NonPositive).message(),
            Some("Value must not be positive.")
        );
    }

    #[test]
    fn non_zero_uses_tolerances_for_floats() {
        assert!(check_scalar(0_i64, NumericRule::NonZero).is_error());
        assert!(check_scalar(1e-12_f64, NumericRule::NonZero).is_error());
        assert!(check_scalar(1e-8_f64, NumericRule::NonZero).is_valid());
        assert!(check_scalar(-0.0_f32, NumericRule::NonZero).is_error());
        assert!(check_scalar(1e-5_f32, NumericRule::NonZero).is_valid());
    }

    #[test]
    fn origin_vectors_are_rejected() {
        assert!(check_vector(&[0_i64, 0, 0], VectorRule::NotOrigin).is_error());
        assert!(check_vector(&[0.0_f64, 0.25], VectorRule::NotOrigin).is_valid());
    }

    #[test]
    fn mismatched_values_are_unsupported() {
        let result = validate_numeric(&FieldValue::from("12"), NumericRule::Positive);
        assert_eq!(result.kind(), Some(ValidationErrorKind::UnsupportedValue));

        let result = validate_vector(&FieldValue::Int(3), VectorRule::NotOrigin);
        assert_eq!(result.kind(), Some(ValidationErrorKind::UnsupportedValue));
    }
}
