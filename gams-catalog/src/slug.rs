//! Canonical slug and default path derivation.

/// Directory (relative to the site root) holding playable game files.
pub const GAMES_DIR: &str = "g/g";

/// Directory (relative to the site root) holding game thumbnails.
pub const IMAGE_DIR: &str = "img";

/// Characters that never survive into a slug, on top of whitespace.
const UNSAFE_CHARS: &[char] = &['/', '\\', '"', '\'', '`', ':', '*', '?', '<', '>', '|'];

/// Derive the canonical slug for a display name.
///
/// Lowercases, drops all whitespace, and drops characters that are unsafe in
/// a filesystem path.
///
/// ```
/// use gams_catalog::slugify;
///
/// assert_eq!(slugify("Drive Mad"), "drivemad");
/// assert_eq!(slugify("DriveMad"), "drivemad");
/// assert_eq!(slugify("AC/DC \"Live\""), "acdclive");
/// ```
pub fn slugify(display_name: &str) -> String {
    display_name
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control() && !UNSAFE_CHARS.contains(c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Default playable file path for a slug: `g/g/<slug>.html`.
pub fn default_file_path(slug: &str) -> String {
    format!("{GAMES_DIR}/{slug}.html")
}

/// Default thumbnail path for a slug: `img/<slug>.png`.
pub fn default_image_path(slug: &str) -> String {
    format!("{IMAGE_DIR}/{slug}.png")
}
