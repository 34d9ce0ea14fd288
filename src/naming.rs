// Filename and label helpers shared by the editor and the scanner.

use std::path::Path;

pub const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "gif", "webp", "bmp", "svg", "tiff"];

/// Extension check, case-insensitive.
pub fn is_image_file(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Drop a trailing recognised image extension, leave anything else alone.
pub fn strip_image_extension(filename: &str) -> &str {
    if !is_image_file(filename) {
        return filename;
    }
    match filename.rfind('.') {
        Some(idx) => &filename[..idx],
        None => filename,
    }
}

/// Upper-case the first character of each whitespace separated word and
/// lower-case the rest. Runs of whitespace collapse to one space.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Human readable title for a scanned file:
/// `20250101_1200_remix_mytitle.png` becomes `Mytitle`.
pub fn title_from_filename(filename: &str) -> String {
    let path = Path::new(filename);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);

    let title = strip_date_stamp(stem).unwrap_or(stem).replace("_remix_", " ");
    let title = title_case(&title.replace(['_', '-'], " "));
    if title.is_empty() {
        stem.to_string()
    } else {
        title
    }
}

/// `YYYYMMDD_HHMM_rest` -> `rest`, and `YYYYMMDD_HHMM_remix_rest` -> `rest`.
/// Works on the raw stem: both stamp segments must be `_` delimited and
/// something must follow them.
fn strip_date_stamp(stem: &str) -> Option<&str> {
    let (date, rest) = stem.split_once('_')?;
    if date.len() != 8 || !date.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (_time, remainder) = rest.split_once('_')?;
    Some(remainder.strip_prefix("remix_").unwrap_or(remainder))
}

/// Default title for a file picked by hand: extension dropped, separators
/// turned into spaces, words capitalised.
pub fn title_from_picked_file(filename: &str) -> String {
    title_case(&strip_image_extension(filename).replace(['-', '_'], " "))
}

/// Title for a known file of a configured source, e.g. `IMG_4967.png` with
/// prefix `IMG_` becomes `Apple Juice - Image 4967`.
pub fn known_file_title(filename: &str, source_name: &str, prefix: Option<&str>) -> String {
    let stem = strip_image_extension(filename);
    match prefix {
        Some(prefix) if !prefix.is_empty() => stem.replace(prefix, &format!("{source_name} - Image ")),
        _ => stem.to_string(),
    }
}

/// Tag used for scanned entries: `AI Sauces` becomes `aisauces`.
pub fn source_tag(display_name: &str) -> String {
    display_name.to_lowercase().replace(['-', ' '], "")
}

/// Display name from a folder or repository slug: `case-studies` becomes
/// `Case Studies`.
pub fn display_name_from_slug(slug: &str) -> String {
    title_case(&slug.replace('-', " "))
}

/// Tag for a repository subdirectory: `posters/` becomes `posters`,
/// `art/concept/` becomes `art-concept`.
pub fn subdir_tag(subdir: &str) -> String {
    subdir.trim_end_matches('/').replace('/', "-")
}
