// Library root
// ------------
// The binary (`main.rs`) wires these modules into a small CLI around the
// gallery's `images.json` catalog.
//
// Module responsibilities:
// - `catalog`: the JSON document, loading and atomic saving.
// - `url`: raw-content URLs for files in GitHub repositories.
// - `naming`: image extensions, titles and tags derived from file names.
// - `config`: preconfigured sources, scan folders and runtime settings.
// - `prompt`: the "ask the user" capability (terminal or scripted).
// - `editor`: interactive flows that append entries to the catalog.
// - `scanner`: rebuilds the catalog from local folders.
// - `checker`: HEAD probes for remote entries.
// - `viewer`: remote entries grouped by repository.
// - `ui`: the numbered menu tying the flows together.
pub mod catalog;
pub mod checker;
pub mod config;
pub mod editor;
pub mod error;
pub mod naming;
pub mod prompt;
pub mod scanner;
pub mod ui;
pub mod url;
pub mod viewer;
