use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gams_lib::catalog::{ClusterKind, find_duplicates, find_slug_collisions};
use gams_lib::{Site, prune_duplicates};

use crate::error::CliError;

/// Report name duplicates and slug collisions; optionally prune duplicates.
pub(crate) fn run_duplicates(site: &Site, prune: bool) -> Result<(), CliError> {
    let doc = site.load()?;
    let clusters: Vec<_> = find_duplicates(&doc.catalog)
        .into_iter()
        .chain(find_slug_collisions(&doc.catalog))
        .collect();

    if clusters.is_empty() {
        log::info!(
            "{}",
            "No duplicates found.".if_supports_color(Stdout, |t| t.green()),
        );
        return Ok(());
    }

    for cluster in &clusters {
        let label = match cluster.kind {
            ClusterKind::Name => "Duplicate name",
            ClusterKind::Slug => "Shared slug",
        };
        log::info!(
            "{} {}",
            format!("{label}:").if_supports_color(Stdout, |t| t.yellow()),
            cluster.key.if_supports_color(Stdout, |t| t.bold()),
        );
        for member in &cluster.members {
            log::info!(
                "  {} {}",
                member.name,
                format!("({} #{})", member.section, member.position + 1)
                    .if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }

    if !prune {
        crate::log_blank();
        log::info!("Run 'gams duplicates --prune' to keep only the first of each name.");
        return Ok(());
    }

    let removed = prune_duplicates(site)?;
    crate::log_blank();
    for r in &removed {
        log::info!("  Removed {} from {}", r.game.name(), r.section);
    }
    log::info!(
        "{} Pruned {} duplicate(s)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        removed.len()
    );
    Ok(())
}
