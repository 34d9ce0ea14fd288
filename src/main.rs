// Entrypoint for the CLI application.
// - Keeps `main` small: resolve configuration, then hand off to the menu
//   or to one of the non-interactive commands.
// - Returns `anyhow::Result` so fatal errors (malformed catalog, I/O)
//   end the process with a message and a non-zero exit code.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use gallery_catalog::checker::HttpProbe;
use gallery_catalog::config::GalleryConfig;
use gallery_catalog::prompt::{Prompter, TerminalPrompter};
use gallery_catalog::{scanner, ui};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "gallery-catalog", version, about = "Maintain the gallery's images.json catalog")]
struct Cli {
    /// Catalog file used by the menu, `check` and `view`.
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,
    /// Folder scanned by `scan`; the generated files are written here.
    #[arg(long, global = true, value_name = "PATH")]
    base_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interactive menu (default).
    Menu,
    /// Rebuild the catalog and the preview page from local folders.
    Scan,
    /// Probe every GitHub URL in the catalog.
    Check,
    /// List GitHub entries grouped by repository.
    View,
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = GalleryConfig::from_env();
    if let Some(path) = &cli.catalog {
        config = config.with_catalog_path(path);
    }
    if let Some(dir) = &cli.base_dir {
        config = config.with_base_dir(dir);
    }

    let mut prompter = TerminalPrompter;
    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let probe = HttpProbe::new(config.probe_timeout)?;
            ui::main_menu(&config, &mut prompter, &probe)?;
        }
        Commands::Scan => {
            prompter.say("🔍 Scanning for images in your project directories...");
            let today = chrono::Local::now().date_naive();
            let mut outcome = scanner::build_catalog(&config.scan, today)
                .with_context(|| format!("failed to scan {}", config.scan.base_dir.display()))?;
            let catalog_path = config.scan.catalog_path();
            let preview_path = config.scan.preview_path();
            scanner::write_outputs(&mut outcome, &catalog_path, &preview_path)?;
            ui::report_scan(&outcome, &catalog_path, &preview_path, &mut prompter);
        }
        Commands::Check => {
            let probe = HttpProbe::new(config.probe_timeout)?;
            match ui::test_links(&config.catalog_path, &mut prompter, &probe) {
                Ok(0) => {}
                Ok(_) => return Ok(ExitCode::FAILURE),
                Err(err) if err.is_user_facing() => {
                    prompter.say(&format!("❌ {err}"));
                    return Ok(ExitCode::FAILURE);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Commands::View => match ui::view_remote(&config.catalog_path, &mut prompter) {
            Ok(()) => {}
            Err(err) if err.is_user_facing() => {
                prompter.say(&format!("❌ {err}"));
                return Ok(ExitCode::FAILURE);
            }
            Err(err) => return Err(err.into()),
        },
    }
    Ok(ExitCode::SUCCESS)
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`), so
/// they never mix with the prompts on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
