//! Image manifest and eager preloading
//!
//! Every picture is decoded once before the session starts so trials never
//! wait on disk. A picture that fails to load is logged and skipped; the
//! session still runs.

use ahash::AHashMap;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;

use crate::catalog::Catalog;

pub const BLANK_IMAGE: &str = "blank.png";

/// Interface chrome loaded alongside the nouns
pub const CHROME_IMAGES: &[&str] = &["button-gradient.png", "stanford.png"];

/// `<dir>/<stem>.png`
pub fn image_path(dir: &Path, stem: &str) -> PathBuf {
    dir.join(format!("{}.png", stem))
}

/// Every image a session can show, deduplicated, in a stable order
pub fn manifest(image_dir: &Path, catalog: &Catalog) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = catalog
        .image_stems()
        .map(|stem| image_path(image_dir, stem))
        .chain(std::iter::once(image_dir.join(BLANK_IMAGE)))
        .chain(CHROME_IMAGES.iter().map(|name| image_dir.join(name)))
        .collect();
    paths.sort();
    paths.dedup();
    paths
}

/// Decoded images keyed by path
#[derive(Default)]
pub struct AssetCache {
    images: AHashMap<PathBuf, DynamicImage>,
    failed: Vec<PathBuf>,
}

impl AssetCache {
    /// Decode every path in `manifest`
    pub fn load(manifest: &[PathBuf]) -> Self {
        let mut cache = Self::default();
        for path in manifest {
            match image::open(path) {
                Ok(img) => {
                    cache.images.insert(path.clone(), img);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to preload image");
                    cache.failed.push(path.clone());
                }
            }
        }
        tracing::info!(
            loaded = cache.images.len(),
            failed = cache.failed.len(),
            "Preloading finished"
        );
        cache
    }

    pub fn get(&self, path: &Path) -> Option<&DynamicImage> {
        self.images.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.images.contains_key(path)
    }

    pub fn loaded(&self) -> usize {
        self.images.len()
    }

    pub fn failed(&self) -> &[PathBuf] {
        &self.failed
    }
}

/// Decode the manifest on the blocking pool; the caller polls the handle
/// and enables the start button once it resolves.
pub fn preload_in_background(manifest: Vec<PathBuf>) -> JoinHandle<AssetCache> {
    tokio::task::spawn_blocking(move || AssetCache::load(&manifest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_contents() {
        let paths = manifest(Path::new("images"), &Catalog::builtin());
        // 72 nouns + blank + 2 chrome
        assert_eq!(paths.len(), 75);
        assert!(paths.contains(&PathBuf::from("images/apple.png")));
        assert!(paths.contains(&PathBuf::from("images/party_hat.png")));
        assert!(paths.contains(&PathBuf::from("images/blank.png")));
        assert!(paths.contains(&PathBuf::from("images/stanford.png")));
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let paths = vec![
            PathBuf::from("definitely/missing/apple.png"),
            PathBuf::from("definitely/missing/pear.png"),
        ];
        let cache = AssetCache::load(&paths);
        assert_eq!(cache.loaded(), 0);
        assert_eq!(cache.failed().len(), 2);
        assert!(!cache.contains(&paths[0]));
    }

    #[test]
    fn test_decodes_real_png() {
        let dir = std::env::temp_dir().join(format!("book-or-assets-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = image_path(&dir, "dot");
        image::RgbImage::new(2, 2).save(&path).unwrap();

        let cache = AssetCache::load(&[path.clone()]);
        assert!(cache.contains(&path));
        assert_eq!(cache.get(&path).unwrap().width(), 2);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_background_preload_resolves() {
        let handle = preload_in_background(vec![PathBuf::from("nowhere/blank.png")]);
        let cache = handle.await.unwrap();
        assert_eq!(cache.failed().len(), 1);
    }
}
