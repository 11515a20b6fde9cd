//! Fan-out of asset import, delete and move notifications.
//!
//! The host editor reports a batch of changed asset paths after every refresh. The
//! post-processor forwards each path to the plugins that claim it and, once the whole batch
//! has been dispatched, fires the "post-process" listeners. Caches derived from the asset tree
//! register there to be invalidated.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

/// A batch of asset changes reported by the host after a refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetChanges {
  /// Paths of newly imported or re-imported assets.
  pub imported: Vec<String>,
  /// Paths of deleted assets.
  pub deleted: Vec<String>,
  /// Moved assets as `(from, to)` pairs.
  pub moved: Vec<(String, String)>,
}

impl AssetChanges {
  /// Returns `true` when the batch carries no paths.
  pub fn is_empty(&self) -> bool {
    self.imported.is_empty() && self.deleted.is_empty() && self.moved.is_empty()
  }
}

/// Receiver of per-path asset notifications.
pub trait AssetProcessorPlugin {
  /// Returns `true` when the plugin wants notifications for `path`.
  fn applies_to_path(&self, path: &str) -> bool;

  /// Called for every imported path the plugin applies to.
  fn on_imported(&mut self, _path: &str) {}

  /// Called for every deleted path the plugin applies to.
  fn on_deleted(&mut self, _path: &str) {}

  /// Called for every move where either end applies to the plugin.
  fn on_moved(&mut self, _from: &str, _to: &str) {}

  /// Called after any of the other hooks, with the current path of the asset.
  fn on_processed(&mut self, _path: &str) {}
}

impl<P: AssetProcessorPlugin> AssetProcessorPlugin for Rc<RefCell<P>> {
  fn applies_to_path(&self, path: &str) -> bool {
    self.borrow().applies_to_path(path)
  }

  fn on_imported(&mut self, path: &str) {
    self.borrow_mut().on_imported(path);
  }

  fn on_deleted(&mut self, path: &str) {
    self.borrow_mut().on_deleted(path);
  }

  fn on_moved(&mut self, from: &str, to: &str) {
    self.borrow_mut().on_moved(from, to);
  }

  fn on_processed(&mut self, path: &str) {
    self.borrow_mut().on_processed(path);
  }
}

/// Dispatches [`AssetChanges`] to plugins and post-process listeners.
#[derive(Default)]
pub struct AssetPostProcessor {
  plugins: Vec<Box<dyn AssetProcessorPlugin>>,
  listeners: Vec<Box<dyn FnMut()>>,
}

impl AssetPostProcessor {
  /// Create a processor with no plugins or listeners.
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a plugin. Plugins are notified in registration order.
  pub fn add_plugin(&mut self, plugin: impl AssetProcessorPlugin + 'static) {
    self.plugins.push(Box::new(plugin));
  }

  /// Register a listener fired once after every processed batch.
  pub fn on_post_process(&mut self, listener: impl FnMut() + 'static) {
    self.listeners.push(Box::new(listener));
  }

  /// Number of registered plugins.
  pub fn plugin_count(&self) -> usize {
    self.plugins.len()
  }

  /// Dispatch a batch of changes.
  pub fn process(&mut self, changes: &AssetChanges) {
    debug!(
      "processing {} imported, {} deleted, {} moved assets",
      changes.imported.len(),
      changes.deleted.len(),
      changes.moved.len()
    );

    for path in &changes.imported {
      for plugin in &mut self.plugins {
        if plugin.applies_to_path(path) {
          plugin.on_imported(path);
          plugin.on_processed(path);
        }
      }
    }

    for path in &changes.deleted {
      for plugin in &mut self.plugins {
        if plugin.applies_to_path(path) {
          plugin.on_deleted(path);
          plugin.on_processed(path);
        }
      }
    }

    for (from, to) in &changes.moved {
      for plugin in &mut self.plugins {
        if plugin.applies_to_path(to) || plugin.applies_to_path(from) {
          plugin.on_moved(from, to);
          plugin.on_processed(to);
        }
      }
    }

    for listener in &mut self.listeners {
      listener();
    }
  }
}

impl std::fmt::Debug for AssetPostProcessor {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AssetPostProcessor")
      .field("plugins", &self.plugins.len())
      .field("listeners", &self.listeners.len())
      .finish()
  }
}
