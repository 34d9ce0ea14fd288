// Catalog store: the single JSON document behind the gallery. Every
// operation reads it whole, works in memory and writes it back whole.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{GalleryError, Result};

/// Header block of the catalog. `total_images` is derived from `images`
/// and rewritten on every save.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub generated: String,
    pub total_images: usize,
}

/// One picture in the gallery. `url` is either a remote raw-content URL or
/// a path relative to the web root.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub url: String,
    pub alt: String,
    pub description: String,
    pub repository: String,
    pub starred: bool,
    pub tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub metadata: Metadata,
    pub images: Vec<ImageEntry>,
}

impl Catalog {
    /// Build a catalog around `images` with a consistent count.
    pub fn new(title: &str, description: &str, generated: &str, images: Vec<ImageEntry>) -> Self {
        let mut catalog = Catalog {
            metadata: Metadata {
                title: title.to_string(),
                description: description.to_string(),
                generated: generated.to_string(),
                total_images: 0,
            },
            images,
        };
        catalog.recount();
        catalog
    }

    /// Read the catalog at `path`. A missing file is reported as
    /// `CatalogMissing`; anything unparsable is a hard `Json` error.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(GalleryError::CatalogMissing(path.to_path_buf()));
            }
            Err(source) => {
                return Err(GalleryError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let catalog: Catalog = serde_json::from_str(&text).map_err(|source| GalleryError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), images = catalog.images.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Append entries in order. Callers build the full batch first so a
    /// failed flow never leaves half of it behind.
    pub fn extend<I: IntoIterator<Item = ImageEntry>>(&mut self, entries: I) {
        self.images.extend(entries);
        self.recount();
    }

    pub fn recount(&mut self) {
        self.metadata.total_images = self.images.len();
    }

    /// Entries whose URL points at the remote host, in catalog order.
    pub fn remote_images(&self) -> impl Iterator<Item = &ImageEntry> {
        self.images
            .iter()
            .filter(|img| crate::url::is_remote_url(&img.url))
    }

    /// Recount and overwrite `path` with 2-space pretty JSON. The document is
    /// written to a sibling temp file and renamed over the target.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        self.recount();
        let io_err = |source: std::io::Error| GalleryError::Io {
            path: path.to_path_buf(),
            source,
        };
        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(io_err)?;

        let mut encoded = serde_json::to_string_pretty(self).map_err(|source| GalleryError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        encoded.push('\n');

        let mut tmp = NamedTempFile::new_in(parent).map_err(io_err)?;
        tmp.write_all(encoded.as_bytes()).map_err(io_err)?;
        tmp.flush().map_err(io_err)?;
        tmp.persist(path).map_err(|e| io_err(e.error))?;
        info!(path = %path.display(), images = self.images.len(), "saved catalog");
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample_entry(url: &str, repository: &str) -> ImageEntry {
    ImageEntry {
        url: url.to_string(),
        alt: format!("{repository} picture"),
        description: String::new(),
        repository: repository.to_string(),
        starred: true,
        tags: vec!["sample".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_reports_missing_file() {
        let temp = tempdir().expect("tempdir");
        let err = Catalog::load(&temp.path().join("images.json")).unwrap_err();
        assert!(matches!(err, GalleryError::CatalogMissing(_)));
        assert!(err.is_user_facing());
    }

    #[test]
    fn load_rejects_malformed_json() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("images.json");
        fs::write(&path, "{ \"metadata\": ").expect("write");
        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, GalleryError::Json { .. }));
        assert!(!err.is_user_facing());
    }

    #[test]
    fn save_without_changes_keeps_images_and_count() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("images.json");
        fs::write(
            &path,
            r#"{
  "metadata": {
    "title": "Gallery",
    "description": "Test",
    "generated": "2025-05-25",
    "total_images": 7
  },
  "images": [
    {
      "url": "a/one.png",
      "alt": "One",
      "description": "first",
      "repository": "A",
      "starred": true,
      "tags": ["a", "a"]
    },
    {
      "url": "b/two.png",
      "alt": "Two",
      "description": "second",
      "repository": "B",
      "starred": false,
      "tags": []
    }
  ]
}"#,
        )
        .expect("write");

        let mut catalog = Catalog::load(&path).expect("load");
        let before = catalog.images.clone();
        catalog.save(&path).expect("save");

        let reloaded = Catalog::load(&path).expect("reload");
        assert_eq!(reloaded.images, before);
        assert_eq!(reloaded.metadata.total_images, 2);
        assert_eq!(reloaded.metadata.generated, "2025-05-25");
    }

    #[test]
    fn save_writes_two_space_indentation() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("images.json");
        let mut catalog = Catalog::new("T", "D", "2025-01-01", vec![sample_entry("x.png", "X")]);
        catalog.save(&path).expect("save");
        let text = fs::read_to_string(&path).expect("read");
        assert!(text.starts_with("{\n  \"metadata\": {\n    \"title\": \"T\""));
        assert!(text.contains("\"total_images\": 1"));
    }

    #[test]
    fn extend_recounts() {
        let mut catalog = Catalog::new("T", "D", "2025-01-01", Vec::new());
        catalog.extend(vec![sample_entry("a.png", "A"), sample_entry("b.png", "B")]);
        assert_eq!(catalog.metadata.total_images, 2);
        assert_eq!(catalog.images[1].url, "b.png");
    }

    #[test]
    fn remote_images_filters_by_host() {
        let catalog = Catalog::new(
            "T",
            "D",
            "2025-01-01",
            vec![
                sample_entry("images/creative/a.png", "Creative"),
                sample_entry("https://github.com/o/r/blob/main/b.png?raw=true", "R"),
            ],
        );
        let remote: Vec<_> = catalog.remote_images().collect();
        assert_eq!(remote.len(), 1);
        assert_eq!(remote[0].repository, "R");
    }
}
