use std::path::{Component, Path};

use regex::Regex;

/// Marker matching any immediate subdirectory name.
pub const WILDCARD: char = '*';

fn invalid_path_characters() -> &'static Regex {
    use std::sync::OnceLock;

    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"["<>|\x00-\x1F]"#).expect("invalid path character regex")
    })
}

/// Determine whether `value` contains characters that cannot appear in an asset path.
///
/// The wildcard marker is not considered invalid here; wildcard handling happens once the
/// full relative path has been composed.
pub fn has_invalid_path_characters(value: &str) -> bool {
    invalid_path_characters().is_match(value)
}

/// Join two relative path fragments with a forward slash.
///
/// An empty side yields the other side unchanged, and no separator is inserted when `base`
/// already ends with one. The result always uses forward slashes.
pub fn combine(base: &str, tail: &str) -> String {
    let joined = if base.is_empty() {
        tail.to_string()
    } else if tail.is_empty() || base.ends_with(['/', '\\']) {
        format!("{base}{tail}")
    } else {
        format!("{base}/{tail}")
    };
    joined.replace('\\', "/")
}

/// Determine whether a composed relative path would resolve outside the directory it is
/// joined onto: it is absolute, carries a drive prefix, or contains a `..` component.
pub fn escapes_root(path: &str) -> bool {
    Path::new(path).components().any(|component| {
        matches!(
            component,
            Component::RootDir | Component::Prefix(_) | Component::ParentDir
        )
    })
}

/// Number of wildcard markers in `path`.
pub fn wildcard_count(path: &str) -> usize {
    path.matches(WILDCARD).count()
}

/// Split a path with a single wildcard into its literal prefix directory and the suffix
/// searched for inside each matching subdirectory.
///
/// Returns `None` when the path does not contain exactly one wildcard.
pub fn split_wildcard(path: &str) -> Option<(&str, &str)> {
    if wildcard_count(path) != 1 {
        return None;
    }
    let (prefix, suffix) = path.split_once(WILDCARD)?;
    Some((prefix, suffix.trim_start_matches(['/', '\\'])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_reserved_characters() {
        assert!(has_invalid_path_characters("Hero/Idl|e"));
        assert!(has_invalid_path_characters("a<b"));
        assert!(has_invalid_path_characters("tab\there"));
        assert!(!has_invalid_path_characters("Characters/*/Animations"));
        assert!(!has_invalid_path_characters("Hero Idle.png"));
    }

    #[test]
    fn combines_fragments_with_forward_slashes() {
        assert_eq!(combine("Characters", "Hero/Idle"), "Characters/Hero/Idle");
        assert_eq!(combine("Characters/", "Hero"), "Characters/Hero");
        assert_eq!(combine("", "Hero"), "Hero");
        assert_eq!(combine("Characters", ""), "Characters");
        assert_eq!(combine("Sprites\\NPCs", "Rival"), "Sprites/NPCs/Rival");
    }

    #[test]
    fn detects_paths_leaving_the_root() {
        assert!(escapes_root("/tmp/secret.txt"));
        assert!(escapes_root("../../etc/hostname"));
        assert!(escapes_root("Characters/../../Other.png"));
        assert!(!escapes_root("Characters/*/Animations/Idle.anim"));
        assert!(!escapes_root("Characters/./Hero..png"));
    }

    #[test]
    fn splits_single_wildcard() {
        assert_eq!(
            split_wildcard("Characters/*/Animations/Idle.anim"),
            Some(("Characters/", "Animations/Idle.anim"))
        );
        assert_eq!(split_wildcard("Characters/Hero.png"), None);
        assert_eq!(split_wildcard("*/a/*/b"), None);
    }
}
