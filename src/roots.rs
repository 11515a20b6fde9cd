//! Lazily discovered list of resource root directories.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::{debug, warn};
use same_file::is_same_file;
use walkdir::WalkDir;

use crate::postprocess::AssetPostProcessor;

/// Directory name that marks a resource root when none is configured.
pub const DEFAULT_RESOURCES_DIR_NAME: &str = "Resources";

/// Cache of resource root directories.
///
/// Roots are discovered on first access by walking the assets directory for folders with a
/// given name. [`ResourceRootCache::invalidate`] forgets the list so the next read walks the
/// tree again; pinned roots replace discovery entirely.
#[derive(Debug)]
pub struct ResourceRootCache {
    assets_dir: PathBuf,
    dir_name: String,
    cached: RefCell<Option<Rc<[PathBuf]>>>,
    pinned: RefCell<Option<Rc<[PathBuf]>>>,
}

impl ResourceRootCache {
    /// Discover roots named `dir_name` anywhere below `assets_dir`.
    pub fn discover(assets_dir: impl Into<PathBuf>, dir_name: impl Into<String>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
            dir_name: dir_name.into(),
            cached: RefCell::new(None),
            pinned: RefCell::new(None),
        }
    }

    /// Cache fixed to an explicit list of roots.
    pub fn with_roots<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let cache = Self::discover(PathBuf::new(), DEFAULT_RESOURCES_DIR_NAME);
        cache.pin(Some(roots.into_iter().map(Into::into).collect()));
        cache
    }

    /// Directory walked during discovery.
    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// Current roots, discovering them if the cache is empty.
    pub fn roots(&self) -> Rc<[PathBuf]> {
        if let Some(pinned) = self.pinned.borrow().as_ref() {
            return Rc::clone(pinned);
        }

        if let Some(cached) = self.cached.borrow().as_ref() {
            return Rc::clone(cached);
        }

        let discovered: Rc<[PathBuf]> = discover_roots(&self.assets_dir, &self.dir_name).into();
        debug!(
            "discovered {} resource roots under {}",
            discovered.len(),
            self.assets_dir.display()
        );
        *self.cached.borrow_mut() = Some(Rc::clone(&discovered));
        discovered
    }

    /// Forget discovered roots. Pinned roots are kept.
    pub fn invalidate(&self) {
        if self.cached.borrow_mut().take().is_some() {
            debug!("resource root cache invalidated");
        }
    }

    /// Replace discovery with a fixed list, or restore discovery with `None`.
    pub fn pin(&self, roots: Option<Vec<PathBuf>>) {
        *self.pinned.borrow_mut() = roots.map(Into::into);
    }

    /// Whether roots are currently cached or pinned.
    pub fn is_populated(&self) -> bool {
        self.pinned.borrow().is_some() || self.cached.borrow().is_some()
    }

    /// Invalidate this cache whenever `processor` finishes a batch of asset changes.
    pub fn attach(self: &Rc<Self>, processor: &mut AssetPostProcessor) {
        let cache = Rc::downgrade(self);
        processor.on_post_process(move || {
            if let Some(cache) = cache.upgrade() {
                cache.invalidate();
            }
        });
    }
}

fn discover_roots(assets_dir: &Path, dir_name: &str) -> Vec<PathBuf> {
    if !assets_dir.is_dir() {
        warn!(
            "assets directory {} does not exist; no resource roots available",
            assets_dir.display()
        );
        return Vec::new();
    }

    let mut found: Vec<PathBuf> = Vec::new();
    let walker = WalkDir::new(assets_dir)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry while scanning for resource roots: {err}");
                continue;
            }
        };

        if !entry.file_type().is_dir() || entry.file_name() != dir_name {
            continue;
        }

        let path = entry.into_path();
        let duplicate = found
            .iter()
            .any(|existing| is_same_file(existing, &path).unwrap_or(false));
        if !duplicate {
            found.push(path);
        }
    }

    found
}
