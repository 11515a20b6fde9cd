//! Validation of values that name a file under a resource root.

use std::fs;
use std::path::{Path, PathBuf};

use log::{trace, warn};

use crate::outcome::{ValidationErrorKind, ValidationResult};
use crate::resource::paths::{
    combine, escapes_root, has_invalid_path_characters, split_wildcard, wildcard_count,
};
use crate::roots::ResourceRootCache;
use crate::rules::ResourceFileRule;

/// Check that `value` names a file under any of the cached resource roots.
///
/// The value is expanded to `prepend_path/value + extension`. A single `*` segment in the
/// expanded path matches any immediate subdirectory of the literal prefix.
pub fn validate_resource_file(
    value: &str,
    rule: &ResourceFileRule,
    roots: &ResourceRootCache,
) -> ValidationResult {
    if value.trim().is_empty() {
        return if rule.allow_empty_path {
            ValidationResult::Valid
        } else {
            ValidationResult::error(ValidationErrorKind::EmptyPath, "File path must not be empty.")
        };
    }

    let value = match rule.required_start_character {
        Some(marker) => match value.strip_prefix(marker) {
            Some(rest) => rest,
            None => return ValidationResult::Skipped,
        },
        None => value,
    };

    if has_invalid_path_characters(value) {
        return ValidationResult::error(
            ValidationErrorKind::InvalidCharacters,
            "File value contains invalid characters.",
        );
    }
    if has_invalid_path_characters(&rule.prepend_path) {
        return ValidationResult::error(
            ValidationErrorKind::InvalidCharacters,
            "File path contains invalid characters.",
        );
    }
    if has_invalid_path_characters(&rule.extension) {
        return ValidationResult::error(
            ValidationErrorKind::InvalidCharacters,
            "File extension contains invalid characters.",
        );
    }

    let relative_path = format!("{}{}", combine(&rule.prepend_path, value), rule.extension);
    if escapes_root(&relative_path) {
        return ValidationResult::error(
            ValidationErrorKind::OutsideRoot,
            format!("File path '{relative_path}' must stay inside the resource directories."),
        );
    }
    if wildcard_count(&relative_path) > 1 {
        return ValidationResult::error(
            ValidationErrorKind::AmbiguousWildcard,
            "File path contains more than one wildcard.",
        );
    }

    let found = match split_wildcard(&relative_path) {
        None => roots
            .roots()
            .iter()
            .any(|root| root.join(&relative_path).is_file()),
        Some((prefix, suffix)) => roots
            .roots()
            .iter()
            .any(|root| subdirectory_contains_file(&root.join(prefix), suffix)),
    };

    if found {
        ValidationResult::Valid
    } else {
        ValidationResult::error(
            ValidationErrorKind::NotFound,
            format!(
                "Could not find file at relative path '{relative_path}' under any resource directory."
            ),
        )
    }
}

fn subdirectory_contains_file(search_root: &Path, suffix: &str) -> bool {
    if !search_root.is_dir() {
        return false;
    }

    immediate_subdirectories(search_root)
        .iter()
        .any(|dir| dir.join(suffix).is_file())
}

fn immediate_subdirectories(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("failed to list {}: {err}", dir.display());
            return Vec::new();
        }
    };

    let subdirectories: Vec<PathBuf> = entries
        .flatten()
        .filter(|entry| entry.file_type().is_ok_and(|ft| ft.is_dir()))
        .map(|entry| entry.path())
        .collect();
    trace!(
        "{} subdirectories under {}",
        subdirectories.len(),
        dir.display()
    );
    subdirectories
}
