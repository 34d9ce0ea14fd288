// Error types shared by the library modules. The binary and the menu glue
// wrap these in `anyhow` and decide which ones are user mistakes (reported,
// back to the menu) and which ones end the run.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    /// The catalog file does not exist. Only the scanner may create it.
    #[error("{} not found. Please run from the website root directory.", .0.display())]
    CatalogMissing(PathBuf),

    /// A menu choice or index list could not be used as given.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// A mandatory prompt was left blank.
    #[error("{0} required")]
    MissingField(&'static str),

    #[error("failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("terminal input failed")]
    Terminal(#[source] std::io::Error),

    #[error("failed to build HTTP client")]
    Http(#[from] reqwest::Error),
}

impl GalleryError {
    /// True for errors caused by what the user typed or where they ran the
    /// tool from. These are reported and the menu carries on.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            GalleryError::CatalogMissing(_)
                | GalleryError::InvalidSelection(_)
                | GalleryError::MissingField(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;
