//! Render a catalog back into list-literal syntax and splice it into the
//! host document.

use crate::error::ParseError;
use crate::slug::{default_file_path, default_image_path};
use crate::types::{Catalog, Game, LaunchType, Layout};

/// Replace the list literal body of `original` with the rendering of `catalog`.
///
/// `original` must be the document `catalog` was parsed from; everything
/// outside the literal body is copied through unchanged.
pub fn render_document(catalog: &Catalog, original: &str) -> Result<String, ParseError> {
    let span = catalog.span();
    let (Some(head), Some(rest)) = (original.get(..span.start), original.get(span.end..)) else {
        return Err(ParseError::ListNotFound(catalog.variable().to_string()));
    };
    if !head.ends_with('[') || !rest.starts_with(']') {
        return Err(ParseError::ListNotFound(catalog.variable().to_string()));
    }

    let body = render_list(catalog);
    let mut out = String::with_capacity(head.len() + body.len() + rest.len());
    out.push_str(head);
    out.push_str(&body);
    out.push_str(rest);
    Ok(out)
}

/// Render the literal body (the text between `[` and `]`).
///
/// Parsed records are emitted exactly as read. Records built in memory are
/// rendered canonically. Every record but the last is guaranteed a comma.
pub fn render_list(catalog: &Catalog) -> String {
    let mut records: Vec<(&Layout, String)> = Vec::new();
    for section in catalog.sections() {
        records.push((&section.layout, render_marker(section.title())));
        for game in section.games() {
            records.push((&game.layout, render_entry(game)));
        }
    }

    let last = records.len().saturating_sub(1);
    let mut out = String::new();
    for (i, (layout, rendered)) in records.into_iter().enumerate() {
        out.push_str(&layout.leading);
        match &layout.source {
            Some(source) => out.push_str(source),
            None => out.push_str(&rendered),
        }
        if !layout.trailer.is_empty() {
            out.push_str(&layout.trailer);
        } else if i != last {
            out.push(',');
        }
    }
    out.push_str(&catalog.tail);
    out
}

/// Canonical record text for a game.
///
/// Overrides equal to the derived default are omitted.
///
/// ```
/// use gams_catalog::{Game, render_entry};
///
/// let game = Game::new("Slope").with_file_path("g/g/slope.html");
/// assert_eq!(render_entry(&game), r#"{name: "Slope"}"#);
///
/// let game = Game::new("Cookie").with_file_path("g/g/cookie/index.html");
/// assert_eq!(render_entry(&game), r#"{name: "Cookie", href: "g/g/cookie/index.html"}"#);
/// ```
pub fn render_entry(game: &Game) -> String {
    let mut out = format!("{{name: {}", quote(game.name()));
    if let Some(href) = game
        .file_override()
        .filter(|href| *href != default_file_path(game.slug()))
    {
        out.push_str(&format!(", href: {}", quote(href)));
    }
    if let Some(img) = game
        .image_override()
        .filter(|img| *img != default_image_path(game.slug()))
    {
        out.push_str(&format!(", img: {}", quote(img)));
    }
    if game.launch_type() == LaunchType::Raw {
        out.push_str(", type: \"raw\"");
    }
    out.push('}');
    out
}

fn render_marker(title: &str) -> String {
    format!("{{title: {}, type: \"section\"}}", quote(title))
}

/// Double-quote a string, escaping what the parser would decode.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
