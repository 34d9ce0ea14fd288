// Read-only listing of the remote entries, grouped by repository.

use crate::catalog::{Catalog, ImageEntry};

#[derive(Debug)]
pub struct RepoGroup<'a> {
    pub repository: &'a str,
    pub images: Vec<&'a ImageEntry>,
}

/// Group remote entries by `repository`. Groups appear in first-seen order
/// and keep catalog order inside.
pub fn group_remote(catalog: &Catalog) -> Vec<RepoGroup<'_>> {
    let mut groups: Vec<RepoGroup<'_>> = Vec::new();
    for img in catalog.remote_images() {
        match groups.iter_mut().find(|g| g.repository == img.repository) {
            Some(group) => group.images.push(img),
            None => groups.push(RepoGroup {
                repository: &img.repository,
                images: vec![img],
            }),
        }
    }
    groups
}

/// Lines of the listing; starred entries get a star, others two spaces.
pub fn render(groups: &[RepoGroup<'_>]) -> Vec<String> {
    let total: usize = groups.iter().map(|g| g.images.len()).sum();
    if total == 0 {
        return vec!["ℹ️  No GitHub URLs found in gallery".to_string()];
    }
    let mut lines = vec![
        format!("\n📋 GitHub Images in Gallery ({total} total):"),
        "-".repeat(60),
    ];
    for group in groups {
        lines.push(format!("\n📁 {} ({} images):", group.repository, group.images.len()));
        for img in &group.images {
            let marker = if img.starred { "⭐" } else { "  " };
            lines.push(format!("  {} {}", marker, img.alt));
        }
    }
    lines
}
