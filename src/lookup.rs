//! Texture existence lookup used by `managedmaterials`.

use std::collections::HashSet;
use std::path::PathBuf;

use tracing::debug;
use walkdir::WalkDir;

/// Answers whether a texture with the given file name is available.
pub trait ResourceLookup {
    fn texture_exists(&self, name: &str) -> bool;
}

/// Lookup that reports every texture as present.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumePresent;

impl ResourceLookup for AssumePresent {
    fn texture_exists(&self, _name: &str) -> bool {
        true
    }
}

/// File names found under a set of directories.
#[derive(Debug, Clone, Default)]
pub struct DirectoryLookup {
    names: HashSet<String>,
}

impl DirectoryLookup {
    /// Index every file below `dirs`. Unreadable entries are skipped.
    pub fn scan<P: Into<PathBuf> + Clone>(dirs: &[P]) -> Self {
        let mut names = HashSet::new();
        for dir in dirs {
            let root: PathBuf = dir.clone().into();
            for entry in WalkDir::new(&root)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if !entry.file_type().is_file() {
                    continue;
                }
                if let Some(name) = entry.file_name().to_str() {
                    names.insert(name.to_string());
                }
            }
        }
        debug!(textures = names.len(), "indexed resource directories");
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl ResourceLookup for DirectoryLookup {
    fn texture_exists(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

impl<T: ResourceLookup + ?Sized> ResourceLookup for Box<T> {
    fn texture_exists(&self, name: &str) -> bool {
        (**self).texture_exists(name)
    }
}
