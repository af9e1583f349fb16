use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gams_lib::catalog::AssetEntry;
use gams_lib::{Site, delete_orphans, scan_orphans};

use crate::error::CliError;

/// Report unreferenced game files and thumbnails; optionally delete them.
pub(crate) fn run_orphans(site: &Site, delete: bool) -> Result<(), CliError> {
    let doc = site.load()?;
    let report = scan_orphans(site, &doc)?;

    if report.is_empty() {
        log::info!(
            "{}",
            "No orphaned files.".if_supports_color(Stdout, |t| t.green()),
        );
        return Ok(());
    }

    print_group("Game files", &report.assets);
    print_group("Thumbnails", &report.images);

    if !delete {
        crate::log_blank();
        log::info!("Run 'gams orphans --delete' to remove them.");
        return Ok(());
    }

    let all: Vec<AssetEntry> = report.assets.into_iter().chain(report.images).collect();
    let (deleted, failed) = delete_orphans(site, &all);
    crate::log_blank();
    log::info!(
        "{} Deleted {} orphan(s)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        deleted.len()
    );
    for (path, err) in &failed {
        log::warn!("Could not delete {}: {}", path.display(), err);
    }
    if failed.is_empty() {
        Ok(())
    } else {
        Err(CliError::other(format!(
            "{} orphan(s) could not be deleted",
            failed.len()
        )))
    }
}

fn print_group(title: &str, entries: &[AssetEntry]) {
    if entries.is_empty() {
        return;
    }
    log::info!(
        "{} ({})",
        title.if_supports_color(Stdout, |t| t.bold()),
        entries.len()
    );
    for entry in entries {
        let suffix = if entry.is_dir { "/" } else { "" };
        log::info!("  {}{}", entry.path.display(), suffix);
    }
}
