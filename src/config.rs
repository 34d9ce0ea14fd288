// Configuration for one run of the tool. Everything here is built once in
// `main` and handed to the operations by reference; nothing is global.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CATALOG_FILE: &str = "images.json";
pub const DEFAULT_PREVIEW_FILE: &str = "test_gallery.html";
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

pub const CATALOG_TITLE: &str = "AI Reality Check - Project Gallery";
pub const CATALOG_DESCRIPTION: &str =
    "Centralized gallery showcasing images from all projects and repositories";

/// A repository the editor knows about ahead of time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub name: String,
    /// `owner/name` on GitHub.
    pub repo: String,
    pub branch: String,
    pub description: String,
    /// Template copied into every new entry.
    pub tags: Vec<String>,
    pub layout: SourceLayout,
}

/// How the files of a configured source are picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLayout {
    /// A fixed list of files at the repository root. `title_prefix` is the
    /// camera style prefix replaced by "<name> - Image ".
    KnownFiles {
        files: Vec<String>,
        title_prefix: Option<String>,
    },
    /// Named subdirectories (with trailing `/`) and what they contain.
    Subdirs(Vec<SubdirConfig>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubdirConfig {
    pub path: String,
    pub description: String,
}

/// A local folder the scanner always looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    /// Relative to the base directory, forward slashes.
    pub path: String,
    pub repo_name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub base_dir: PathBuf,
    pub targets: Vec<ScanTarget>,
    /// Top-level folder names never picked up by auto-discovery.
    pub excluded_dirs: Vec<String>,
}

impl ScanConfig {
    /// The folders of the gallery site plus the usual non-content ones.
    pub fn with_defaults(base_dir: impl Into<PathBuf>) -> Self {
        let targets = vec![
            scan_target("ai-sauces", "AI Sauces", "AI-generated sauce mockups and parodies"),
            scan_target("AI Sauces", "AI Sauces", "AI-generated sauce mockups and parodies"),
            scan_target("images/creative", "Creative", "Creative and artistic content"),
            scan_target("images/portfolio", "Portfolio", "Portfolio and professional work"),
            scan_target("images/case-studies", "Case Studies", "Project case studies and examples"),
        ];
        ScanConfig::new(base_dir, targets)
    }

    /// Build a config for `targets`. The first path component of every target
    /// is excluded from auto-discovery along with `.git`, `node_modules`,
    /// `images` and `_unused`.
    pub fn new(base_dir: impl Into<PathBuf>, targets: Vec<ScanTarget>) -> Self {
        let mut excluded_dirs: Vec<String> = [".git", "node_modules", "images", "_unused"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        for target in &targets {
            if let Some(top) = target.path.split('/').next() {
                if !top.is_empty() && !excluded_dirs.iter().any(|d| d == top) {
                    excluded_dirs.push(top.to_string());
                }
            }
        }
        ScanConfig {
            base_dir: base_dir.into(),
            targets,
            excluded_dirs,
        }
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.base_dir.join(DEFAULT_CATALOG_FILE)
    }

    pub fn preview_path(&self) -> PathBuf {
        self.base_dir.join(DEFAULT_PREVIEW_FILE)
    }
}

fn scan_target(path: &str, repo_name: &str, description: &str) -> ScanTarget {
    ScanTarget {
        path: path.to_string(),
        repo_name: repo_name.to_string(),
        description: description.to_string(),
    }
}

/// Settings for the interactive tool and the non-interactive commands.
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    pub catalog_path: PathBuf,
    pub probe_timeout: Duration,
    pub sources: Vec<SourceConfig>,
    pub scan: ScanConfig,
}

impl GalleryConfig {
    /// Read `GALLERY_CATALOG`, `GALLERY_BASE_DIR` and
    /// `GALLERY_PROBE_TIMEOUT_SECS`, falling back to `images.json`, `.` and
    /// 10 seconds.
    pub fn from_env() -> Self {
        let catalog_path = env_value("GALLERY_CATALOG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_FILE));
        let base_dir = env_value("GALLERY_BASE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let timeout_secs = env_value("GALLERY_PROBE_TIMEOUT_SECS")
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_PROBE_TIMEOUT_SECS);

        GalleryConfig {
            catalog_path,
            probe_timeout: Duration::from_secs(timeout_secs),
            sources: Self::default_sources(),
            scan: ScanConfig::with_defaults(base_dir),
        }
    }

    /// Override the catalog location, e.g. from a command line flag.
    pub fn with_catalog_path(mut self, path: &Path) -> Self {
        self.catalog_path = path.to_path_buf();
        self
    }

    /// Override the scan root, keeping the configured targets.
    pub fn with_base_dir(mut self, base_dir: &Path) -> Self {
        self.scan = ScanConfig::new(base_dir, self.scan.targets.clone());
        self
    }

    pub fn default_sources() -> Vec<SourceConfig> {
        vec![
            SourceConfig {
                name: "Apple Juice".into(),
                repo: "UsernameTron/Apple-Juice".into(),
                branch: "main".into(),
                description: "Creative images from the Apple Juice project".into(),
                tags: strings(&["apple-juice", "creative", "project"]),
                layout: SourceLayout::KnownFiles {
                    files: strings(&[
                        "IMG_4967.png",
                        "IMG_5013.png",
                        "IMG_5014.png",
                        "IMG_5016.png",
                        "IMG_5017.png",
                    ]),
                    title_prefix: Some("IMG_".into()),
                },
            },
            SourceConfig {
                name: "GI-ERROR Project".into(),
                repo: "UsernameTron/GI-ERROR-Project".into(),
                branch: "cbfdae15630258b50285b14815ce828ea87d43b6".into(),
                description: "Images from the GI-ERROR satirical UX strategy project".into(),
                tags: strings(&["gi-error", "satire", "ux"]),
                layout: SourceLayout::Subdirs(vec![
                    SubdirConfig {
                        path: "characters/".into(),
                        description: "Character designs and artwork".into(),
                    },
                    SubdirConfig {
                        path: "cinematic/".into(),
                        description: "Cinematic scenes and storyboards".into(),
                    },
                    SubdirConfig {
                        path: "posters/".into(),
                        description: "Promotional posters and marketing materials".into(),
                    },
                ]),
            },
        ]
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
