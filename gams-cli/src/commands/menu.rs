//! Interactive menu, used when no subcommand is given.
//!
//! Each entry collects its inputs with prompts and then runs the same code as
//! the matching subcommand. A failing action is reported and the menu
//! continues.

use gams_lib::catalog::{ClusterKind, find_duplicates};
use gams_lib::{Site, prune_duplicates, scan_orphans};

use super::add::{fetch_index, run_add};
use super::backup::run_backup;
use super::delete::{matching_names, run_delete};
use super::duplicates::run_duplicates;
use super::image::run_assign_image;
use super::list::{run_list, run_new_section};
use super::orphans::run_orphans;
use crate::error::CliError;
use crate::prompt;

const ENTRIES: [&str; 9] = [
    "Add a game",
    "Delete a game",
    "Find duplicates",
    "Find orphaned files",
    "List games",
    "Assign a thumbnail",
    "Back up the game list",
    "New section",
    "Exit",
];

pub(crate) fn run_menu(site: &Site, quiet: bool) -> Result<(), CliError> {
    loop {
        println!();
        let Some(choice) = prompt::choose("Gams", &ENTRIES)? else {
            return Ok(());
        };
        let result = match choice {
            0 => add(site, quiet),
            1 => delete(site),
            2 => duplicates(site),
            3 => orphans(site),
            4 => run_list(site),
            5 => image(site, quiet),
            6 => run_backup(site),
            7 => new_section(site),
            _ => return Ok(()),
        };
        if let Err(e) = result {
            log::error!("{e}");
        }
    }
}

fn add(site: &Site, quiet: bool) -> Result<(), CliError> {
    let client = super::add::client(site)?;
    let index = fetch_index(&client, quiet)?;

    let Some(query) = prompt::read_line("Search term, or a single letter to browse: ")? else {
        return Ok(());
    };
    let mut chars = query.chars();
    let ids = match (chars.next(), chars.next()) {
        (None, _) => return Ok(()),
        (Some(c), None) if c.is_alphanumeric() => index.by_letter(c),
        _ => index.search(&query),
    };
    if ids.is_empty() {
        log::info!("No games match '{}'.", query);
        return Ok(());
    }

    let labels: Vec<String> = ids
        .iter()
        .map(|id| format!("{} ({id})", index.display_name(id)))
        .collect();
    let Some(pick) = prompt::choose("Matching games", &labels)? else {
        return Ok(());
    };
    let id = ids[pick];
    let default_name = index.display_name(id);

    let name = prompt::read_line(&format!("Display name [{default_name}]: "))?
        .filter(|n| !n.is_empty());

    let doc = site.load()?;
    let titles: Vec<&str> = doc.catalog.sections().iter().map(|s| s.title()).collect();
    let Some(section) = prompt::choose("Section", &titles)? else {
        return Ok(());
    };
    let custom_image = prompt::yes_no("Will you supply a custom thumbnail?", false)?;

    run_add(
        site,
        id,
        name,
        Some(titles[section].to_string()),
        custom_image,
        quiet,
    )
}

/// Search installed games and let the user pick one.
fn pick_installed(site: &Site) -> Result<Option<String>, CliError> {
    let Some(query) = prompt::read_line("Search installed games: ")? else {
        return Ok(None);
    };
    let doc = site.load()?;
    let mut names = matching_names(&doc.catalog, &query);
    if names.is_empty() {
        log::info!("No installed games match '{}'.", query);
        return Ok(None);
    }
    Ok(prompt::choose("Installed games", &names)?.map(|i| names.swap_remove(i)))
}

fn delete(site: &Site) -> Result<(), CliError> {
    let Some(name) = pick_installed(site)? else {
        return Ok(());
    };
    let keep_files = prompt::yes_no("Keep the game files on disk?", false)?;
    run_delete(site, &name, keep_files, false)
}

fn duplicates(site: &Site) -> Result<(), CliError> {
    run_duplicates(site, false)?;
    let doc = site.load()?;
    let any_names = find_duplicates(&doc.catalog)
        .iter()
        .any(|c| c.kind == ClusterKind::Name);
    if any_names && prompt::yes_no("Remove all but the first of each duplicate?", false)? {
        let removed = prune_duplicates(site)?;
        log::info!("Pruned {} duplicate(s)", removed.len());
    }
    Ok(())
}

fn orphans(site: &Site) -> Result<(), CliError> {
    run_orphans(site, false)?;
    let doc = site.load()?;
    if !scan_orphans(site, &doc)?.is_empty() && prompt::confirm("Delete these files?")? {
        run_orphans(site, true)?;
    }
    Ok(())
}

fn image(site: &Site, quiet: bool) -> Result<(), CliError> {
    let Some(name) = pick_installed(site)? else {
        return Ok(());
    };
    let url = prompt::read_line("Image URL (empty for the default logo): ")?
        .filter(|u| !u.is_empty());
    run_assign_image(site, &name, url, quiet)
}

fn new_section(site: &Site) -> Result<(), CliError> {
    match prompt::read_line("Section title: ")? {
        Some(title) if !title.is_empty() => run_new_section(site, &title),
        _ => Ok(()),
    }
}
