use crate::outcome::{ValidationErrorKind, ValidationResult};
use crate::resource::paths::{combine, escapes_root, has_invalid_path_characters};
use crate::roots::ResourceRootCache;
use crate::rules::ResourceFolderRule;

/// Check that `value` names a folder under any of the cached resource roots.
pub fn validate_resource_folder(
    value: &str,
    rule: &ResourceFolderRule,
    roots: &ResourceRootCache,
) -> ValidationResult {
    if value.trim().is_empty() {
        return if rule.allow_empty_path {
            ValidationResult::Valid
        } else {
            ValidationResult::error(
                ValidationErrorKind::EmptyPath,
                "Folder path must not be empty.",
            )
        };
    }

    if has_invalid_path_characters(value) {
        return ValidationResult::error(
            ValidationErrorKind::InvalidCharacters,
            "Folder path contains invalid characters.",
        );
    }

    let relative_path = combine(&combine(&rule.prepend_path, value), &rule.append_path);
    if escapes_root(&relative_path) {
        return ValidationResult::error(
            ValidationErrorKind::OutsideRoot,
            format!("Folder path '{relative_path}' must stay inside the resource directories."),
        );
    }

    let found = roots
        .roots()
        .iter()
        .any(|root| root.join(&relative_path).is_dir());

    if found {
        ValidationResult::Valid
    } else {
        ValidationResult::error(
            ValidationErrorKind::NotFound,
            format!(
                "Could not find folder at relative path '{relative_path}' under any resource directory."
            ),
        )
    }
}
