use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gams_lib::Settings;
use gams_lib::settings::{ROOT_ENV_VAR, save_settings_to, settings_path};

use crate::error::CliError;

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}

/// Write the effective settings to the settings file so they can be edited.
pub(crate) fn run_config_init(settings: &Settings, force: bool) -> Result<(), CliError> {
    let path = settings_path();
    if path.exists() && !force {
        return Err(CliError::other(format!(
            "{} already exists; use --force to overwrite",
            path.display()
        )));
    }
    save_settings_to(settings, &path)?;
    log::info!(
        "{} Wrote {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

/// Show effective settings and where the site root came from.
pub(crate) fn run_config_show(settings: &Settings, root_flag: Option<&Path>) {
    let path = settings_path();
    log::info!(
        "{}",
        "Gams Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    let status = if path.exists() { "(exists)" } else { "(not found, using defaults)" };
    log::info!(
        "  Settings file: {} {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        status.if_supports_color(Stdout, |t| t.dimmed()),
    );

    let (root, source) = root_with_source(settings, root_flag);
    log::info!(
        "  Site root: {} {}",
        root.display().if_supports_color(Stdout, |t| t.cyan()),
        format!("({source})").if_supports_color(Stdout, |t| t.dimmed()),
    );
    crate::log_blank();

    let site = &settings.site;
    let backup_dir = site
        .backup_dir
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<site root>".to_string());
    let fields = [
        ("site.document", site.document.clone()),
        ("site.list_variable", site.list_variable.clone()),
        ("site.default_image", site.default_image.clone()),
        ("site.default_section", site.default_section.clone()),
        ("site.backup_dir", backup_dir),
        ("site.whitelist", site.whitelist.join(", ")),
        ("remote.index_url", settings.remote.index_url.clone()),
        ("remote.base_url", settings.remote.base_url.clone()),
        ("remote.id_prefix", settings.remote.id_prefix.clone()),
        ("remote.timeout_secs", settings.remote.timeout_secs.to_string()),
        ("thumbnail.size", settings.thumbnail.size.to_string()),
    ];
    for (name, value) in fields {
        log::info!(
            "  {} {}",
            format!("{name}:").if_supports_color(Stdout, |t| t.cyan()),
            value
        );
    }
}

fn root_with_source(settings: &Settings, root_flag: Option<&Path>) -> (PathBuf, &'static str) {
    let root = settings.resolve_root(root_flag.map(Path::to_path_buf));
    let source = if root_flag.is_some() {
        "--root"
    } else if std::env::var_os(ROOT_ENV_VAR).is_some() {
        ROOT_ENV_VAR
    } else if settings.site.root.is_some() {
        "settings file"
    } else {
        "current directory"
    };
    (root, source)
}
