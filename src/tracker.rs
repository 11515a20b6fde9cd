//! Path-keyed view of loaded assets kept current by post-processor callbacks.

use std::collections::BTreeMap;
use std::path::Path;

use log::trace;

use crate::postprocess::AssetProcessorPlugin;

type Loader<T> = Box<dyn Fn(&Path) -> Option<T>>;
type PathFilter = Box<dyn Fn(&str) -> bool>;
type ImportListener<T> = Box<dyn FnMut(&[String], &[&T])>;
type DeleteListener = Box<dyn FnMut(&[String])>;

/// Passive map from asset path to a loaded value.
///
/// Imports run the loader and store whatever it returns; paths the loader rejects are
/// ignored. Deletions drop the entry. A move is handled as an import of the new path followed
/// by a deletion of the old one.
pub struct AssetTracker<T> {
  assets: BTreeMap<String, T>,
  loader: Loader<T>,
  filter: PathFilter,
  import_listeners: Vec<ImportListener<T>>,
  delete_listeners: Vec<DeleteListener>,
}

impl<T> AssetTracker<T> {
  /// Track every path accepted by `filter`, loading values with `loader`.
  pub fn new(
    filter: impl Fn(&str) -> bool + 'static,
    loader: impl Fn(&Path) -> Option<T> + 'static,
  ) -> Self {
    Self {
      assets: BTreeMap::new(),
      loader: Box::new(loader),
      filter: Box::new(filter),
      import_listeners: Vec::new(),
      delete_listeners: Vec::new(),
    }
  }

  /// Seed the tracker with already existing assets.
  pub fn start<I, S>(&mut self, paths: I)
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    for path in paths {
      let path = path.into();
      if !(self.filter)(&path) {
        continue;
      }
      if let Some(asset) = (self.loader)(Path::new(&path)) {
        self.assets.insert(path, asset);
      }
    }
  }

  /// Currently tracked assets.
  pub fn assets(&self) -> &BTreeMap<String, T> {
    &self.assets
  }

  /// Look up a tracked asset.
  pub fn get(&self, path: &str) -> Option<&T> {
    self.assets.get(path)
  }

  /// Register a listener receiving every non-empty batch of imported paths and their values.
  ///
  /// When the tracker is driven by an [`crate::AssetPostProcessor`], each batch holds a single
  /// path.
  pub fn on_imported(&mut self, listener: impl FnMut(&[String], &[&T]) + 'static) {
    self.import_listeners.push(Box::new(listener));
  }

  /// Register a listener receiving every non-empty batch of deleted paths.
  pub fn on_deleted(&mut self, listener: impl FnMut(&[String]) + 'static) {
    self.delete_listeners.push(Box::new(listener));
  }

  /// Load and store the given paths, then notify import listeners if anything was loaded.
  pub fn assets_imported(&mut self, paths: &[&str]) {
    let mut imported = Vec::new();
    for path in paths {
      if let Some(asset) = (self.loader)(Path::new(path)) {
        self.assets.insert(path.to_string(), asset);
        imported.push(path.to_string());
      }
    }
    trace!("tracker stored {} of {} imported assets", imported.len(), paths.len());

    if imported.is_empty() || self.import_listeners.is_empty() {
      return;
    }
    let values: Vec<&T> = imported
      .iter()
      .filter_map(|path| self.assets.get(path))
      .collect();
    for listener in &mut self.import_listeners {
      listener(&imported[..], &values[..]);
    }
  }

  /// Drop the given paths, then notify delete listeners if anything was tracked.
  pub fn assets_deleted(&mut self, paths: &[&str]) {
    let removed: Vec<String> = paths
      .iter()
      .filter(|path| self.assets.remove(**path).is_some())
      .map(|path| path.to_string())
      .collect();
    if removed.is_empty() {
      return;
    }

    for listener in &mut self.delete_listeners {
      listener(&removed[..]);
    }
  }
}

impl<T> AssetProcessorPlugin for AssetTracker<T> {
  fn applies_to_path(&self, path: &str) -> bool {
    (self.filter)(path)
  }

  fn on_imported(&mut self, path: &str) {
    self.assets_imported(&[path]);
  }

  fn on_deleted(&mut self, path: &str) {
    self.assets_deleted(&[path]);
  }

  fn on_moved(&mut self, from: &str, to: &str) {
    if (self.filter)(to) {
      self.assets_imported(&[to]);
    }
    self.assets_deleted(&[from]);
  }
}

impl<T> std::fmt::Debug for AssetTracker<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AssetTracker")
      .field("assets", &self.assets.keys().collect::<Vec<_>>())
      .finish_non_exhaustive()
  }
}
