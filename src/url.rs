// URL builder for files hosted on GitHub. Pure string work: nothing here
// touches the network or checks that the file exists.

pub const GITHUB_PREFIX: &str = "https://github.com/";

/// Turn a repository URL, a branch (or commit) and a path inside the
/// repository into a URL that serves the raw file. Inputs that are not
/// `https://github.com/...` URLs come back unchanged.
pub fn raw_url(repo_url: &str, branch: &str, filepath: &str) -> String {
    match repo_url.strip_prefix(GITHUB_PREFIX) {
        Some(repo_path) => format!("{GITHUB_PREFIX}{repo_path}/blob/{branch}/{filepath}?raw=true"),
        None => repo_url.to_string(),
    }
}

/// Same as [`raw_url`] for an `owner/name` identifier.
pub fn repo_raw_url(repo: &str, branch: &str, filepath: &str) -> String {
    raw_url(&format!("{GITHUB_PREFIX}{repo}"), branch, filepath)
}

/// Loose check used by the link checker and the viewer.
pub fn is_remote_url(url: &str) -> bool {
    url.contains("github.com")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_blob_url_with_raw_flag() {
        assert_eq!(
            repo_raw_url("UsernameTron/Apple-Juice", "main", "IMG_4967.png"),
            "https://github.com/UsernameTron/Apple-Juice/blob/main/IMG_4967.png?raw=true"
        );
    }

    #[test]
    fn keeps_commit_refs_and_nested_paths() {
        let url = raw_url(
            "https://github.com/UsernameTron/GI-ERROR-Project",
            "cbfdae15630258b50285b14815ce828ea87d43b6",
            "characters/hero.png",
        );
        assert_eq!(
            url,
            "https://github.com/UsernameTron/GI-ERROR-Project/blob/cbfdae15630258b50285b14815ce828ea87d43b6/characters/hero.png?raw=true"
        );
        assert_eq!(
            url,
            raw_url(
                "https://github.com/UsernameTron/GI-ERROR-Project",
                "cbfdae15630258b50285b14815ce828ea87d43b6",
                "characters/hero.png",
            )
        );
    }

    #[test]
    fn unknown_hosts_pass_through() {
        assert_eq!(
            raw_url("https://gitlab.com/owner/repo", "main", "a.png"),
            "https://gitlab.com/owner/repo"
        );
    }

    #[test]
    fn remote_predicate_is_substring_match() {
        assert!(is_remote_url("https://github.com/o/r/blob/main/a.png?raw=true"));
        assert!(is_remote_url("https://raw.github.com/o/r/a.png"));
        assert!(!is_remote_url("images/portfolio/a.png"));
    }
}
