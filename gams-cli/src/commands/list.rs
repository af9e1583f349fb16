use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gams_lib::catalog::LaunchType;
use gams_lib::{Site, create_section};

use crate::error::CliError;

/// Print every section and its games in document order.
pub(crate) fn run_list(site: &Site) -> Result<(), CliError> {
    let doc = site.load()?;
    for section in doc.catalog.sections() {
        log::info!(
            "{} {}",
            section.title().if_supports_color(Stdout, |t| t.bold()),
            format!("({})", section.len()).if_supports_color(Stdout, |t| t.dimmed()),
        );
        for game in section.games() {
            let raw = match game.launch_type() {
                LaunchType::Raw => format!(" {}", "[raw]".if_supports_color(Stdout, |t| t.magenta())),
                LaunchType::Standard => String::new(),
            };
            log::info!(
                "  {}{} {}",
                game.name(),
                raw,
                game.file_path().if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }
    crate::log_blank();
    log::info!(
        "{} games in {} sections",
        doc.catalog.game_count(),
        doc.catalog.sections().len()
    );
    Ok(())
}

/// Print section titles with their game counts.
pub(crate) fn run_sections(site: &Site) -> Result<(), CliError> {
    let doc = site.load()?;
    for section in doc.catalog.sections() {
        log::info!(
            "  {} {}",
            section.title().if_supports_color(Stdout, |t| t.cyan()),
            format!("({})", section.len()).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

pub(crate) fn run_new_section(site: &Site, title: &str) -> Result<(), CliError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CliError::other("Section title must not be empty"));
    }
    create_section(site, title)?;
    log::info!(
        "{} Created section {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        title.if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}
