// Interactive catalog editor: builds new entries from prompts and appends
// them to the catalog. Entries are built in full before anything is
// written, so an aborted flow leaves the file untouched.

use std::path::Path;

use tracing::info;

use crate::catalog::{Catalog, ImageEntry};
use crate::config::{SourceConfig, SourceLayout, SubdirConfig};
use crate::error::{GalleryError, Result};
use crate::naming;
use crate::prompt::Prompter;
use crate::url::repo_raw_url;

/// What the source menu asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceChoice {
    Configured(usize),
    Custom,
    Exit,
}

/// Load the catalog, let the user pick a source, collect entries and save.
/// Returns how many entries were added; zero means nothing was written.
pub fn add_images(
    catalog_path: &Path,
    sources: &[SourceConfig],
    prompter: &mut dyn Prompter,
) -> Result<usize> {
    prompter.say("🐙 GitHub Repository Image Adder");
    prompter.say("================================");

    let mut catalog = Catalog::load(catalog_path)?;
    prompter.say(&format!("📊 Current gallery has {} images", catalog.images.len()));

    let entries = match choose_source(sources, prompter)? {
        SourceChoice::Exit => return Ok(0),
        SourceChoice::Custom => vec![custom_entry(prompter)?],
        SourceChoice::Configured(idx) => entries_from_source(&sources[idx], prompter)?,
    };

    let added = entries.len();
    catalog.extend(entries);
    catalog.save(catalog_path)?;
    info!(added, total = catalog.images.len(), "catalog updated");
    prompter.say(&format!("\n🎉 Gallery updated! Total images: {}", catalog.images.len()));
    Ok(added)
}

/// Numbered source menu: configured sources first, then custom, then exit.
pub fn choose_source(sources: &[SourceConfig], prompter: &mut dyn Prompter) -> Result<SourceChoice> {
    prompter.say("\nAvailable repositories:");
    for (i, source) in sources.iter().enumerate() {
        prompter.say(&format!("{}. {} ({})", i + 1, source.name, source.repo));
    }
    let custom = sources.len() + 1;
    let exit = sources.len() + 2;
    prompter.say(&format!("{custom}. Add custom GitHub repository"));
    prompter.say(&format!("{exit}. Exit"));

    let answer = prompter.ask(&format!("Select repository [1-{exit}]"))?;
    match answer.parse::<usize>() {
        Ok(n) if n >= 1 && n <= sources.len() => Ok(SourceChoice::Configured(n - 1)),
        Ok(n) if n == custom => Ok(SourceChoice::Custom),
        Ok(n) if n == exit => Ok(SourceChoice::Exit),
        _ => Err(GalleryError::InvalidSelection(format!("no repository {answer:?}"))),
    }
}

/// Run the flow that matches the source's layout.
pub fn entries_from_source(source: &SourceConfig, prompter: &mut dyn Prompter) -> Result<Vec<ImageEntry>> {
    prompter.say(&format!("\n📁 Adding images from {}", source.name));
    match &source.layout {
        SourceLayout::KnownFiles { files, title_prefix } => {
            known_file_entries(source, files, title_prefix.as_deref(), prompter)
        }
        SourceLayout::Subdirs(subdirs) => Ok(vec![subdir_entry(source, subdirs, prompter)?]),
    }
}

/// Parse `all` or a comma separated list of 1-based indices into 0-based
/// positions. One bad token rejects the whole answer.
pub fn parse_selection(answer: &str, count: usize) -> Result<Vec<usize>> {
    if answer.trim().eq_ignore_ascii_case("all") {
        return Ok((0..count).collect());
    }
    answer
        .split(',')
        .map(|token| {
            let token = token.trim();
            match token.parse::<usize>() {
                Ok(n) if n >= 1 && n <= count => Ok(n - 1),
                _ => Err(GalleryError::InvalidSelection(format!(
                    "{token:?} is not a number between 1 and {count}"
                ))),
            }
        })
        .collect()
}

fn known_file_entries(
    source: &SourceConfig,
    files: &[String],
    title_prefix: Option<&str>,
    prompter: &mut dyn Prompter,
) -> Result<Vec<ImageEntry>> {
    prompter.say("Known images in this repository:");
    for (i, filename) in files.iter().enumerate() {
        prompter.say(&format!("  {}. {}", i + 1, filename));
    }

    let answer = prompter.ask("Enter image numbers to add (comma-separated, or 'all')")?;
    let picked = parse_selection(&answer, files.len())?;

    let entries: Vec<ImageEntry> = picked
        .into_iter()
        .map(|idx| {
            let filename = &files[idx];
            ImageEntry {
                url: repo_raw_url(&source.repo, &source.branch, filename),
                alt: naming::known_file_title(filename, &source.name, title_prefix),
                description: source.description.clone(),
                repository: source.name.clone(),
                starred: true,
                tags: source.tags.clone(),
            }
        })
        .collect();

    for entry in &entries {
        prompter.say(&format!("✅ Added: {}", entry.alt));
    }
    Ok(entries)
}

fn subdir_entry(
    source: &SourceConfig,
    subdirs: &[SubdirConfig],
    prompter: &mut dyn Prompter,
) -> Result<ImageEntry> {
    prompter.say("Available directories:");
    for (i, subdir) in subdirs.iter().enumerate() {
        prompter.say(&format!("  {}. {} - {}", i + 1, subdir.path, subdir.description));
    }

    let answer = prompter.ask(&format!("Select directory [1-{}]", subdirs.len()))?;
    let subdir = match answer.parse::<usize>() {
        Ok(n) if n >= 1 && n <= subdirs.len() => &subdirs[n - 1],
        _ => {
            return Err(GalleryError::InvalidSelection(format!("no directory {answer:?}")));
        }
    };

    let filename = prompter.ask(&format!("Enter filename in {}", subdir.path))?;
    if filename.is_empty() {
        return Err(GalleryError::MissingField("Filename"));
    }
    let url = repo_raw_url(&source.repo, &source.branch, &format!("{}{}", subdir.path, filename));

    let mut title = prompter.ask("Enter title for this image")?;
    if title.is_empty() {
        title = naming::title_from_picked_file(&filename);
    }

    let mut description = prompter.ask(&format!("Enter description (default: {})", source.description))?;
    if description.is_empty() {
        description = source.description.clone();
    }

    let mut tags = source.tags.clone();
    tags.extend(split_tags(&prompter.ask("Enter additional tags (comma-separated)")?));
    let dir_tag = naming::subdir_tag(&subdir.path);
    if !tags.contains(&dir_tag) {
        tags.push(dir_tag);
    }

    prompter.say(&format!("✅ Added: {title}"));
    Ok(ImageEntry {
        url,
        alt: title,
        description,
        repository: source.name.clone(),
        starred: true,
        tags,
    })
}

/// Free-form entry for any GitHub repository.
pub fn custom_entry(prompter: &mut dyn Prompter) -> Result<ImageEntry> {
    prompter.say("\n🔧 Custom Repository Setup");

    let repo = prompter.ask("Enter repository (format: username/repo-name)")?;
    let mut branch = prompter.ask("Enter branch name (default: main)")?;
    if branch.is_empty() {
        branch = "main".to_string();
    }
    let filepath = prompter.ask("Enter file path")?;
    if repo.is_empty() || filepath.is_empty() {
        return Err(GalleryError::MissingField("Repository and file path"));
    }

    let url = repo_raw_url(&repo, &branch, &filepath);
    prompter.say(&format!("\n📋 Generated URL: {url}"));

    let title = prompter.ask("Enter image title")?;
    let description = prompter.ask("Enter description")?;
    let slug = repo.rsplit('/').next().unwrap_or(&repo);
    let mut repository = prompter.ask(&format!("Enter repository display name (default: {slug})"))?;
    if repository.is_empty() {
        repository = naming::display_name_from_slug(slug);
    }
    let tags = split_tags(&prompter.ask("Enter tags (comma-separated)")?);
    let starred = !matches!(
        prompter.ask("Display in gallery? (y/n, default: y)")?.to_lowercase().as_str(),
        "n" | "no"
    );

    prompter.say(&format!("✅ Added custom image: {title}"));
    Ok(ImageEntry {
        url,
        alt: title,
        description,
        repository,
        starred,
        tags,
    })
}

fn split_tags(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::catalog::sample_entry;
    use crate::config::GalleryConfig;
    use crate::prompt::ScriptedPrompter;
    use tempfile::tempdir;

    fn known_source(files: usize) -> SourceConfig {
        SourceConfig {
            name: "Apple Juice".into(),
            repo: "UsernameTron/Apple-Juice".into(),
            branch: "main".into(),
            description: "Creative images".into(),
            tags: vec!["apple-juice".into(), "creative".into()],
            layout: SourceLayout::KnownFiles {
                files: (0..files).map(|i| format!("IMG_{}.png", 5000 + i)).collect(),
                title_prefix: Some("IMG_".into()),
            },
        }
    }

    fn subdir_source() -> SourceConfig {
        GalleryConfig::default_sources().remove(1)
    }

    fn catalog_file(dir: &Path, entries: usize) -> std::path::PathBuf {
        let path = dir.join("images.json");
        let images = (0..entries)
            .map(|i| sample_entry(&format!("images/creative/{i}.png"), "Creative"))
            .collect();
        Catalog::new("Gallery", "Test", "2025-05-25", images)
            .save(&path)
            .expect("seed catalog");
        path
    }

    #[test]
    fn selection_all_and_lists() {
        assert_eq!(parse_selection("all", 3).expect("all"), vec![0, 1, 2]);
        assert_eq!(parse_selection("ALL", 2).expect("all"), vec![0, 1]);
        assert_eq!(parse_selection("3, 1,3", 3).expect("list"), vec![2, 0, 2]);
    }

    #[test]
    fn selection_rejects_any_bad_token() {
        for answer in ["99", "1,99", "0", "two", "1,,2", ""] {
            let err = parse_selection(answer, 5).unwrap_err();
            assert!(matches!(err, GalleryError::InvalidSelection(_)), "{answer}");
        }
    }

    #[test]
    fn all_known_files_keep_list_order() {
        let source = known_source(5);
        let mut prompter = ScriptedPrompter::new(["all"]);
        let entries = entries_from_source(&source, &mut prompter).expect("entries");
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].alt, "Apple Juice - Image 5000");
        assert_eq!(entries[4].alt, "Apple Juice - Image 5004");
        assert_eq!(
            entries[0].url,
            "https://github.com/UsernameTron/Apple-Juice/blob/main/IMG_5000.png?raw=true"
        );
        assert!(entries.iter().all(|e| e.starred && e.repository == "Apple Juice"));
    }

    #[test]
    fn entry_tags_do_not_alias_the_template() {
        let source = known_source(2);
        let mut prompter = ScriptedPrompter::new(["1,2"]);
        let mut entries = entries_from_source(&source, &mut prompter).expect("entries");
        entries[0].tags.push("edited".into());
        assert_eq!(source.tags, vec!["apple-juice".to_string(), "creative".to_string()]);
        assert_eq!(entries[1].tags, source.tags);
    }

    #[test]
    fn out_of_range_selection_adds_nothing() {
        let temp = tempdir().expect("tempdir");
        let path = catalog_file(temp.path(), 2);
        let before = fs::read_to_string(&path).expect("read");

        let sources = vec![known_source(5)];
        let mut prompter = ScriptedPrompter::new(["1", "99"]);
        let err = add_images(&path, &sources, &mut prompter).unwrap_err();
        assert!(matches!(err, GalleryError::InvalidSelection(_)));
        assert_eq!(fs::read_to_string(&path).expect("read"), before);
    }

    #[test]
    fn adding_updates_total_and_file() {
        let temp = tempdir().expect("tempdir");
        let path = catalog_file(temp.path(), 2);

        let sources = vec![known_source(5)];
        let mut prompter = ScriptedPrompter::new(["1", "2,4"]);
        let added = add_images(&path, &sources, &mut prompter).expect("add");
        assert_eq!(added, 2);

        let catalog = Catalog::load(&path).expect("reload");
        assert_eq!(catalog.images.len(), 4);
        assert_eq!(catalog.metadata.total_images, 4);
        assert_eq!(catalog.images[2].alt, "Apple Juice - Image 5001");
        assert_eq!(catalog.images[3].alt, "Apple Juice - Image 5003");
        assert!(prompter.saw("Total images: 4"));
    }

    #[test]
    fn missing_catalog_aborts_before_prompting() {
        let temp = tempdir().expect("tempdir");
        let mut prompter = ScriptedPrompter::new(["1", "all"]);
        let err = add_images(&temp.path().join("images.json"), &[known_source(1)], &mut prompter)
            .unwrap_err();
        assert!(matches!(err, GalleryError::CatalogMissing(_)));
        assert_eq!(prompter.remaining(), 2);
        assert!(!temp.path().join("images.json").exists());
    }

    #[test]
    fn exit_choice_writes_nothing() {
        let temp = tempdir().expect("tempdir");
        let path = catalog_file(temp.path(), 1);
        let before = fs::read_to_string(&path).expect("read");
        let mut prompter = ScriptedPrompter::new(["3"]);
        let added = add_images(&path, &[known_source(1)], &mut prompter).expect("exit");
        assert_eq!(added, 0);
        assert_eq!(fs::read_to_string(&path).expect("read"), before);
    }

    #[test]
    fn subdir_entry_uses_defaults_and_dir_tag() {
        let source = subdir_source();
        let mut prompter = ScriptedPrompter::new(["3", "movie-night_poster.png", "", "", "print, promo"]);
        let entries = entries_from_source(&source, &mut prompter).expect("entry");
        let entry = &entries[0];
        assert_eq!(
            entry.url,
            "https://github.com/UsernameTron/GI-ERROR-Project/blob/cbfdae15630258b50285b14815ce828ea87d43b6/posters/movie-night_poster.png?raw=true"
        );
        assert_eq!(entry.alt, "Movie Night Poster");
        assert_eq!(entry.description, source.description);
        assert_eq!(entry.tags, vec!["gi-error", "satire", "ux", "print", "promo", "posters"]);
        assert_eq!(source.tags, vec!["gi-error", "satire", "ux"]);
    }

    #[test]
    fn subdir_tag_is_not_duplicated() {
        let source = subdir_source();
        let mut prompter = ScriptedPrompter::new(["1", "hero.png", "Hero", "Main character", "characters"]);
        let entries = entries_from_source(&source, &mut prompter).expect("entry");
        assert_eq!(entries[0].alt, "Hero");
        assert_eq!(entries[0].description, "Main character");
        assert_eq!(entries[0].tags.iter().filter(|t| *t == "characters").count(), 1);
    }

    #[test]
    fn subdir_flow_rejects_bad_choice_and_blank_filename() {
        let source = subdir_source();
        let mut prompter = ScriptedPrompter::new(["4"]);
        assert!(matches!(
            entries_from_source(&source, &mut prompter).unwrap_err(),
            GalleryError::InvalidSelection(_)
        ));

        let mut prompter = ScriptedPrompter::new(["2", ""]);
        assert!(matches!(
            entries_from_source(&source, &mut prompter).unwrap_err(),
            GalleryError::MissingField("Filename")
        ));
    }

    #[test]
    fn custom_entry_defaults() {
        let mut prompter = ScriptedPrompter::new([
            "someone/night-sky-photos",
            "",
            "shots/moon.jpg",
            "Moon",
            "Full moon",
            "",
            "space, night ,",
            "",
        ]);
        let entry = custom_entry(&mut prompter).expect("entry");
        assert_eq!(
            entry.url,
            "https://github.com/someone/night-sky-photos/blob/main/shots/moon.jpg?raw=true"
        );
        assert_eq!(entry.repository, "Night Sky Photos");
        assert_eq!(entry.tags, vec!["space", "night"]);
        assert!(entry.starred);
        assert!(prompter.saw("Generated URL"));
    }

    #[test]
    fn custom_entry_only_explicit_no_unstars() {
        for (answer, starred) in [("n", false), ("No", false), ("maybe", true), ("y", true)] {
            let mut prompter =
                ScriptedPrompter::new(["o/r", "dev", "a.png", "A", "", "Shown Name", "", answer]);
            let entry = custom_entry(&mut prompter).expect("entry");
            assert_eq!(entry.starred, starred, "{answer}");
            assert_eq!(entry.repository, "Shown Name");
            assert!(entry.tags.is_empty());
        }
    }

    #[test]
    fn custom_entry_requires_repo_and_path() {
        let mut prompter = ScriptedPrompter::new(["", "main", "a.png"]);
        assert!(matches!(
            custom_entry(&mut prompter).unwrap_err(),
            GalleryError::MissingField(_)
        ));
        let mut prompter = ScriptedPrompter::new(["o/r", "main", ""]);
        assert!(matches!(
            custom_entry(&mut prompter).unwrap_err(),
            GalleryError::MissingField(_)
        ));
        assert!(!prompter.saw("Generated URL"));
    }
}
