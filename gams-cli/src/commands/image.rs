use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gams_lib::{ImageSource, Site, assign_image};

use crate::error::CliError;
use crate::spinner;

/// Replace a game's thumbnail from the default logo or a URL.
pub(crate) fn run_assign_image(
    site: &Site,
    name: &str,
    url: Option<String>,
    quiet: bool,
) -> Result<(), CliError> {
    let client = super::add::client(site)?;
    let source = match url {
        Some(url) => ImageSource::Url(url),
        None => ImageSource::DefaultLogo,
    };

    let pb = match &source {
        ImageSource::Url(url) => spinner::start(format!("Downloading {url}..."), quiet),
        ImageSource::DefaultLogo => indicatif::ProgressBar::hidden(),
    };
    let result = assign_image(site, &client, name, &source);
    pb.finish_and_clear();
    let path = result?;

    log::info!(
        "{} Thumbnail for {} written to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        name.if_supports_color(Stdout, |t| t.bold()),
        path.display(),
    );
    Ok(())
}
