use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gams_lib::Site;

use crate::error::CliError;

pub(crate) fn run_backup(site: &Site) -> Result<(), CliError> {
    let path = site.backup()?;
    log::info!(
        "{} Backed up {} to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        site.document_path().display(),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
