//! gams CLI
//!
//! Command-line interface for managing the game list of a Gams site.

mod cli_types;
mod commands;
mod error;
mod logging;
mod prompt;
mod spinner;

use std::process::ExitCode;

use clap::Parser;

use gams_lib::{Site, load_settings};

use cli_types::{Cli, Commands, ConfigAction};
use error::CliError;

/// Blank line through the logger, so it is suppressed by `--quiet` and
/// mirrored to the log file.
pub(crate) fn log_blank() {
    log::info!("");
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to set up logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = load_settings();

    if let Some(Commands::Config { action }) = &cli.command {
        return match action {
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::Show => {
                commands::config::run_config_show(&settings, cli.root.as_deref());
                Ok(())
            }
            ConfigAction::Init { force } => commands::config::run_config_init(&settings, *force),
        };
    }

    let root = settings.resolve_root(cli.root.clone());
    let site = Site::new(root, settings);
    log::debug!("Site root: {}", site.root().display());
    let quiet = cli.quiet;

    let Some(command) = cli.command else {
        return commands::menu::run_menu(&site, quiet);
    };

    match command {
        Commands::Add {
            id,
            name,
            section,
            custom_image,
        } => commands::add::run_add(&site, &id, name, section, custom_image, quiet),
        Commands::Search { query } => commands::add::run_search(&site, &query, quiet),
        Commands::Browse { letter } => commands::add::run_browse(&site, letter, quiet),
        Commands::Delete {
            name,
            keep_files,
            yes,
        } => commands::delete::run_delete(&site, &name, keep_files, yes),
        Commands::Duplicates { prune } => commands::duplicates::run_duplicates(&site, prune),
        Commands::Orphans { delete } => commands::orphans::run_orphans(&site, delete),
        Commands::List => commands::list::run_list(&site),
        Commands::Sections => commands::list::run_sections(&site),
        Commands::NewSection { title } => commands::list::run_new_section(&site, &title),
        Commands::AssignImage { name, url } => {
            commands::image::run_assign_image(&site, &name, url, quiet)
        }
        Commands::Backup => commands::backup::run_backup(&site),
        Commands::Config { .. } => Ok(()),
    }
}
