use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use log::{info, warn};
use crate::constants::IMAGE_EXTENSIONS;

/// Image files available to the button, fixed for the lifetime of the window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    paths: Vec<PathBuf>,
}

impl Catalog {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get(index).map(PathBuf::as_path)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

// --- Scan a directory for images, sorted by file name ---
pub fn discover(dir: &Path) -> Result<Catalog> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read image directory {:?}", dir))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.context("Failed to read directory entry")?.path();
        if path.is_file() && is_image(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if paths.is_empty() {
        warn!("No images found in {:?}, the button will only play its sound", dir);
    } else {
        info!("Found {} images in {:?}", paths.len(), dir);
    }
    Ok(Catalog::new(paths))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn keeps_images_sorted_by_name() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.JPG", "c.gif", "notes.txt", "d.jpeg", "e.bmp", "noext"] {
            touch(dir.path(), name);
        }
        fs::create_dir(dir.path().join("z.png")).unwrap();

        let catalog = discover(dir.path()).unwrap();
        let names: Vec<_> = catalog
            .paths()
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["a.JPG", "b.png", "c.gif", "d.jpeg", "e.bmp"]);
    }

    #[test]
    fn empty_directory_is_an_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = discover(dir.path()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.get(0), None);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover(&dir.path().join("missing")).is_err());
    }
}
