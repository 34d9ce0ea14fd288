// Directory scanner: rebuilds the whole catalog from the image files on
// disk. It never reads the existing catalog; the result replaces it.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::catalog::{Catalog, ImageEntry};
use crate::config::{ScanConfig, CATALOG_DESCRIPTION, CATALOG_TITLE};
use crate::error::{GalleryError, Result};
use crate::naming;

/// Number of entries shown in the HTML preview.
pub const PREVIEW_LIMIT: usize = 20;

/// One scanned folder and how many images it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub directory: String,
    pub found: usize,
    pub discovered: bool,
}

#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub catalog: Catalog,
    pub summaries: Vec<ScanSummary>,
}

/// Image files directly inside `dir` (no recursion), sorted by name. Each
/// entry's URL is `url_prefix/filename`.
pub fn scan_directory(
    dir: &Path,
    url_prefix: &str,
    repo_name: &str,
    description: &str,
) -> Result<Vec<ImageEntry>> {
    let tag = naming::source_tag(repo_name);
    let entries = image_files(dir)?
        .into_iter()
        .map(|filename| ImageEntry {
            url: format!("{url_prefix}/{filename}"),
            alt: naming::title_from_filename(&filename),
            description: description.to_string(),
            repository: repo_name.to_string(),
            starred: true,
            tags: vec![tag.clone()],
        })
        .collect();
    Ok(entries)
}

/// Top-level folders of the base directory that are not excluded and hold
/// at least one image file.
pub fn discover_directories(config: &ScanConfig) -> Result<Vec<String>> {
    let mut found = Vec::new();
    for entry in list_dir(&config.base_dir)? {
        if !entry.file_type().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if config.excluded_dirs.iter().any(|d| d == name) {
            continue;
        }
        if !image_files(entry.path())?.is_empty() {
            found.push(name.to_string());
        }
    }
    Ok(found)
}

/// Scan the configured targets and then the auto-discovered folders, and
/// assemble the catalog sorted by (repository, url).
pub fn build_catalog(config: &ScanConfig, generated: NaiveDate) -> Result<ScanOutcome> {
    let mut images = Vec::new();
    let mut summaries = Vec::new();

    for target in &config.targets {
        let dir = config.base_dir.join(&target.path);
        if !dir.is_dir() {
            debug!(path = %dir.display(), "scan target missing, skipped");
            continue;
        }
        let found = scan_directory(&dir, &target.path, &target.repo_name, &target.description)?;
        info!(directory = %target.path, found = found.len(), "scanned directory");
        summaries.push(ScanSummary {
            directory: target.path.clone(),
            found: found.len(),
            discovered: false,
        });
        images.extend(found);
    }

    for name in discover_directories(config)? {
        let repo_name = naming::display_name_from_slug(&name);
        let description = format!("Image from {repo_name} project");
        let found = scan_directory(&config.base_dir.join(&name), &name, &repo_name, &description)?;
        info!(directory = %name, found = found.len(), "scanned discovered directory");
        summaries.push(ScanSummary {
            directory: name,
            found: found.len(),
            discovered: true,
        });
        images.extend(found);
    }

    images.sort_by(|a, b| (&a.repository, &a.url).cmp(&(&b.repository, &b.url)));

    let generated = generated.format("%Y-%m-%d").to_string();
    Ok(ScanOutcome {
        catalog: Catalog::new(CATALOG_TITLE, CATALOG_DESCRIPTION, &generated, images),
        summaries,
    })
}

/// Static HTML page showing the first few entries. Not part of the
/// catalog contract; regenerated on every scan.
pub fn render_preview(catalog: &Catalog) -> String {
    let mut html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Test Gallery - AI Reality Check</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 20px; }}
        .gallery {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; }}
        .item {{ border: 1px solid #ddd; padding: 10px; border-radius: 8px; }}
        .item img {{ width: 100%; height: 150px; object-fit: cover; border-radius: 4px; }}
        .repo {{ background: #f0f0f0; padding: 4px 8px; border-radius: 4px; font-size: 12px; margin-bottom: 8px; }}
    </style>
</head>
<body>
    <h1>Test Gallery - {} Images Found</h1>
    <div class="gallery">
"#,
        catalog.images.len()
    );

    for img in catalog.images.iter().take(PREVIEW_LIMIT) {
        html.push_str(&format!(
            r#"
        <div class="item">
            <div class="repo">{}</div>
            <img src="{}" alt="{}" loading="lazy">
            <h4>{}</h4>
            <p>{}</p>
        </div>
"#,
            escape_html(&img.repository),
            escape_html(&img.url),
            escape_html(&img.alt),
            escape_html(&img.alt),
            escape_html(&img.description),
        ));
    }

    html.push_str(&format!(
        r#"
    </div>
    <p><em>This is a test gallery showing the first {PREVIEW_LIMIT} images. Use the full gallery.html for the complete experience.</em></p>
</body>
</html>
"#
    ));
    html
}

/// Write the catalog and the preview page, replacing both.
pub fn write_outputs(outcome: &mut ScanOutcome, catalog_path: &Path, preview_path: &Path) -> Result<()> {
    outcome.catalog.save(catalog_path)?;
    fs::write(preview_path, render_preview(&outcome.catalog)).map_err(|source| GalleryError::Io {
        path: preview_path.to_path_buf(),
        source,
    })?;
    info!(path = %preview_path.display(), "wrote preview");
    Ok(())
}

/// Immediate children of `dir`, symlinks resolved. Children that cannot be
/// read (e.g. dangling links) are skipped; an unreadable `dir` is an error.
fn list_dir(dir: &Path) -> Result<Vec<DirEntry>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) => entries.push(entry),
            Err(err) if err.depth() > 0 => {
                warn!(path = ?err.path(), error = %err, "skipping unreadable entry");
            }
            Err(err) => {
                return Err(GalleryError::Io {
                    path: dir.to_path_buf(),
                    source: err.into(),
                });
            }
        }
    }
    Ok(entries)
}

fn image_files(dir: &Path) -> Result<Vec<String>> {
    Ok(list_dir(dir)?
        .into_iter()
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| naming::is_image_file(name))
        .collect())
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
