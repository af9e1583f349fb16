use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gams_lib::{AddRequest, Site, UgsClient, UgsIndex, add_game};

use crate::error::CliError;
use crate::spinner;

/// Accept ids with or without the index prefix.
pub(crate) fn full_id(id: &str, prefix: &str) -> String {
    if id.starts_with(prefix) {
        id.to_string()
    } else {
        format!("{prefix}{id}")
    }
}

pub(crate) fn client(site: &Site) -> Result<UgsClient, CliError> {
    Ok(UgsClient::new(site.settings().remote.clone())?)
}

pub(crate) fn fetch_index(client: &UgsClient, quiet: bool) -> Result<UgsIndex, CliError> {
    let pb = spinner::start("Fetching game index...", quiet);
    let index = client.fetch_index();
    pb.finish_and_clear();
    Ok(index?)
}

/// Download a game and add it to a section.
pub(crate) fn run_add(
    site: &Site,
    id: &str,
    name: Option<String>,
    section: Option<String>,
    custom_image: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let client = client(site)?;
    let request = AddRequest {
        id: full_id(id, client.prefix()),
        name,
        section: section.unwrap_or_else(|| site.settings().site.default_section.clone()),
        custom_image,
    };

    let pb = spinner::start(format!("Downloading {}...", request.id), quiet);
    let result = add_game(site, &client, &request);
    pb.finish_and_clear();
    let summary = result?;

    log::info!(
        "{} Added {} to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        summary.name.if_supports_color(Stdout, |t| t.bold()),
        summary.section.if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!("  File: {}", summary.file.display());
    match &summary.thumbnail {
        Some(path) => log::info!("  Thumbnail: {}", path.display()),
        None if custom_image => log::info!(
            "  {}",
            format!(
                "No thumbnail generated; run 'gams assign-image \"{}\" --url <url>'",
                summary.name
            )
            .if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => {}
    }
    Ok(())
}

/// Search the remote index by name.
pub(crate) fn run_search(site: &Site, query: &str, quiet: bool) -> Result<(), CliError> {
    let client = client(site)?;
    let index = fetch_index(&client, quiet)?;
    let matches = index.search(query);
    if matches.is_empty() {
        log::info!("No games match '{}'.", query);
        return Ok(());
    }
    print_ids(site, &index, &matches);
    Ok(())
}

/// Browse the remote index by letter.
pub(crate) fn run_browse(site: &Site, letter: Option<char>, quiet: bool) -> Result<(), CliError> {
    let client = client(site)?;
    let index = fetch_index(&client, quiet)?;
    match letter {
        None => {
            let letters: String = index.letters().into_iter().collect();
            log::info!("{} games. Letters: {}", index.len(), letters);
        }
        Some(c) => {
            let ids = index.by_letter(c);
            if ids.is_empty() {
                log::info!("No games start with '{}'.", c);
            } else {
                print_ids(site, &index, &ids);
            }
        }
    }
    Ok(())
}

fn print_ids(site: &Site, index: &UgsIndex, ids: &[&str]) {
    // A missing or broken host document just means nothing is marked installed.
    let catalog = site.load().ok().map(|doc| doc.catalog);
    for id in ids {
        let name = index.display_name(id);
        let installed = catalog
            .as_ref()
            .is_some_and(|c| c.find_game(&name).is_some());
        log::info!(
            "  {} {}{}",
            name.if_supports_color(Stdout, |t| t.bold()),
            format!("({id})").if_supports_color(Stdout, |t| t.dimmed()),
            if installed {
                format!(" {}", "[installed]".if_supports_color(Stdout, |t| t.green()))
            } else {
                String::new()
            },
        );
    }
    crate::log_blank();
    log::info!("{} result(s)", ids.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_id_adds_missing_prefix() {
        assert_eq!(full_id("DriveMad", "cl"), "clDriveMad");
        assert_eq!(full_id("clDriveMad", "cl"), "clDriveMad");
    }
}
