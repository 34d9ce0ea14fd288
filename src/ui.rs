// UI layer: the numbered top-level menu and the small flows behind it.
// All input and output goes through a `Prompter`, so the same code runs on
// the terminal and under test.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use crate::catalog::Catalog;
use crate::checker::{check_links, LinkProbe};
use crate::config::GalleryConfig;
use crate::editor;
use crate::error::GalleryError;
use crate::prompt::Prompter;
use crate::scanner::ScanOutcome;
use crate::viewer;

/// Main interactive menu. Runs until the user picks "Exit" or input ends.
/// Mistakes (bad choice, blank required field, no catalog) are reported and
/// the menu comes back; anything else ends the loop with an error.
pub fn main_menu(config: &GalleryConfig, prompter: &mut dyn Prompter, probe: &dyn LinkProbe) -> Result<()> {
    loop {
        prompter.say("\n🖼️  GitHub Repository Image Manager");
        prompter.say("===================================");
        prompter.say("1. Add images from repository");
        prompter.say("2. Test GitHub URLs");
        prompter.say("3. View GitHub images in gallery");
        prompter.say("4. Exit");

        let choice = prompter.ask("Select option [1-4]")?;
        let outcome = match choice.as_str() {
            "1" => editor::add_images(&config.catalog_path, &config.sources, prompter).map(|_| ()),
            "2" => test_links(&config.catalog_path, prompter, probe).map(|_| ()),
            "3" => view_remote(&config.catalog_path, prompter),
            "4" => {
                prompter.say("👋 Goodbye!");
                break;
            }
            _ => {
                prompter.say("❌ Invalid choice");
                continue;
            }
        };
        report(outcome, prompter)?;
    }
    Ok(())
}

/// Print user mistakes and keep going; hand everything else back.
fn report(outcome: std::result::Result<(), GalleryError>, prompter: &mut dyn Prompter) -> Result<()> {
    match outcome {
        Ok(()) => Ok(()),
        Err(err) if err.is_user_facing() => {
            prompter.say(&format!("❌ {err}"));
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Probe every GitHub URL in the catalog and print one line per entry.
/// Returns the number of failed links.
pub fn test_links(
    catalog_path: &Path,
    prompter: &mut dyn Prompter,
    probe: &dyn LinkProbe,
) -> std::result::Result<usize, GalleryError> {
    prompter.say("\n🧪 Testing GitHub URLs in gallery...");
    let catalog = Catalog::load(catalog_path)?;

    let total = catalog.remote_images().count();
    if total == 0 {
        prompter.say("ℹ️  No GitHub URLs found in gallery");
        return Ok(0);
    }
    prompter.say(&format!("Testing {total} GitHub URLs..."));

    // indicatif hides itself when stderr is not a terminal.
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(120));

    let mut checked = 0;
    let reports = check_links(&catalog, probe, |report| {
        checked += 1;
        spinner.suspend(|| prompter.say(&report.render()));
        spinner.set_message(format!("{checked}/{total}"));
    });
    spinner.finish_and_clear();

    Ok(reports.iter().filter(|r| !r.is_ok()).count())
}

/// Print the remote entries grouped by repository.
pub fn view_remote(catalog_path: &Path, prompter: &mut dyn Prompter) -> std::result::Result<(), GalleryError> {
    let catalog = Catalog::load(catalog_path)?;
    for line in viewer::render(&viewer::group_remote(&catalog)) {
        prompter.say(&line);
    }
    Ok(())
}

/// Summary printed after a scan.
pub fn report_scan(outcome: &ScanOutcome, catalog_path: &Path, preview_path: &Path, prompter: &mut dyn Prompter) {
    for summary in &outcome.summaries {
        if summary.discovered {
            prompter.say(&format!("📁 Scanning additional directory {}...", summary.directory));
        } else {
            prompter.say(&format!("📁 Scanning {}...", summary.directory));
        }
        prompter.say(&format!("   Found {} images", summary.found));
    }
    prompter.say(&format!(
        "\n✅ Generated {} with {} images",
        catalog_path.display(),
        outcome.catalog.images.len()
    ));
    prompter.say(&format!("🧪 Test gallery created: {}", preview_path.display()));
    prompter.say("\n📋 Next steps:");
    prompter.say("1. Review the generated catalog file");
    prompter.say("2. Set 'starred': false for images you don't want to display");
    prompter.say("3. Update descriptions and alt text as needed");
    prompter.say("4. Open the test gallery to preview your images");
}
