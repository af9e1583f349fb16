use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gams_lib::catalog::Catalog;
use gams_lib::{Site, delete_game};

use crate::error::CliError;
use crate::prompt;

/// Installed game names containing `query`, ignoring case, in document order.
pub(crate) fn matching_names(catalog: &Catalog, query: &str) -> Vec<String> {
    let query = query.to_lowercase();
    catalog
        .games()
        .map(|(_, _, game)| game.name())
        .filter(|name| name.to_lowercase().contains(&query))
        .map(String::from)
        .collect()
}

/// Remove a game by exact name, after confirmation unless `yes`.
pub(crate) fn run_delete(
    site: &Site,
    name: &str,
    keep_files: bool,
    yes: bool,
) -> Result<(), CliError> {
    let doc = site.load()?;
    let Some((_, _, game)) = doc.catalog.find_game(name) else {
        let similar = matching_names(&doc.catalog, name);
        if !similar.is_empty() {
            log::info!("Did you mean:");
            for candidate in &similar {
                log::info!("  {}", candidate);
            }
        }
        return Err(CliError::other(format!("No game named '{name}'")));
    };

    if !yes {
        let what = if keep_files {
            format!("Remove '{}' from the list?", game.name())
        } else {
            format!(
                "Remove '{}' and delete {} and {}?",
                game.name(),
                game.file_path(),
                game.image_path()
            )
        };
        if !prompt::confirm(&what)? {
            log::info!("Cancelled.");
            return Ok(());
        }
    }

    let summary = delete_game(site, name, keep_files)?;
    log::info!(
        "{} Removed {} from {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        summary.removed.game.name().if_supports_color(Stdout, |t| t.bold()),
        summary.removed.section.if_supports_color(Stdout, |t| t.cyan()),
    );
    for path in &summary.deleted {
        log::info!("  Deleted {}", path.display());
    }
    for path in &summary.missing {
        log::warn!("{} was already missing", path);
    }
    for path in &summary.shared {
        log::warn!("Kept {}: still used by another game", path);
    }
    for (path, err) in &summary.failed {
        log::warn!("Could not delete {}: {}", path, err);
    }
    Ok(())
}
