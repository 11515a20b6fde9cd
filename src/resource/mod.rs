//! Validators that resolve string values against the resource roots on disk.
//!
//! Values are composed into forward-slash relative paths and looked up under every root held
//! by a [`crate::ResourceRootCache`]. Path composition and wildcard splitting live in their
//! own submodule so the string handling can be tested without touching the filesystem.

mod file;
mod folder;
mod paths;

pub use file::validate_resource_file;
pub use folder::validate_resource_folder;
pub use paths::{
    WILDCARD, combine, escapes_root, has_invalid_path_characters, split_wildcard, wildcard_count,
};
