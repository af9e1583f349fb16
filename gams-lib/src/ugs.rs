//! The remote game index (a single HTML document listing playable ids) and
//! game downloads from the same CDN.

use std::time::Duration;

use crate::GamsError;
use crate::manage::GameSource;
use crate::settings::RemoteSettings;

/// Ids listed in the remote index, in index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UgsIndex {
    ids: Vec<String>,
    prefix: String,
}

impl UgsIndex {
    /// Extract the `const files = [ ... ]` list from the index document,
    /// keeping only ids that start with `prefix`.
    pub fn parse(content: &str, prefix: &str) -> Result<Self, GamsError> {
        let start = content
            .find("const files")
            .and_then(|at| content[at..].find('[').map(|i| at + i + 1))
            .ok_or_else(|| GamsError::index("could not find the `files` list"))?;
        let end = content[start..]
            .find(']')
            .map(|i| start + i)
            .ok_or_else(|| GamsError::index("the `files` list is never closed"))?;

        let ids = quoted_strings(&content[start..end])
            .into_iter()
            .filter(|id| id.starts_with(prefix))
            .collect();
        Ok(Self {
            ids,
            prefix: prefix.to_string(),
        })
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids whose name (prefix removed) contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let query = query.to_lowercase();
        self.ids
            .iter()
            .filter(|id| strip_prefix(id, &self.prefix).to_lowercase().contains(&query))
            .map(String::as_str)
            .collect()
    }

    /// Distinct uppercase first letters of all names, sorted.
    pub fn letters(&self) -> Vec<char> {
        let mut letters: Vec<char> = self
            .ids
            .iter()
            .filter_map(|id| first_letter(id, &self.prefix))
            .collect();
        letters.sort_unstable();
        letters.dedup();
        letters
    }

    /// Ids whose name starts with `letter`, ignoring case.
    pub fn by_letter(&self, letter: char) -> Vec<&str> {
        let letter = letter.to_ascii_uppercase();
        self.ids
            .iter()
            .filter(|id| first_letter(id, &self.prefix) == Some(letter))
            .map(String::as_str)
            .collect()
    }

    /// Human-readable name for an id from this index.
    pub fn display_name(&self, id: &str) -> String {
        display_name(id, &self.prefix)
    }
}

fn strip_prefix<'a>(id: &'a str, prefix: &str) -> &'a str {
    id.strip_prefix(prefix).unwrap_or(id)
}

fn first_letter(id: &str, prefix: &str) -> Option<char> {
    strip_prefix(id, prefix)
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase())
}

/// All single- or double-quoted strings in `text`, in order.
fn quoted_strings(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\'' && c != '"' {
            continue;
        }
        let value: String = chars.by_ref().take_while(|&ch| ch != c).collect();
        if !value.is_empty() {
            out.push(value);
        }
    }
    out
}

/// Turn an index id into a display name.
///
/// Drops the prefix, splits camel case and digit/letter boundaries, and
/// capitalizes each word.
///
/// ```
/// use gams_lib::ugs::display_name;
///
/// assert_eq!(display_name("clDriveMad", "cl"), "Drive Mad");
/// assert_eq!(display_name("cl2048Cupcakes", "cl"), "2048 Cupcakes");
/// ```
pub fn display_name(id: &str, prefix: &str) -> String {
    let name = strip_prefix(id, prefix);

    let mut spaced = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if let Some(p) = prev {
            let camel = p.is_ascii_lowercase() && c.is_ascii_uppercase();
            let digit = p.is_ascii_digit() && c.is_ascii_alphabetic();
            if camel || digit {
                spaced.push(' ');
            }
        }
        spaced.push(c);
        prev = Some(c);
    }

    spaced
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// File name a downloaded game is saved under: the id without its prefix, plus `.html`.
pub fn asset_file_name(id: &str, prefix: &str) -> String {
    format!("{}.html", strip_prefix(id, prefix))
}

// ── HTTP ────────────────────────────────────────────────────────────────────

/// Blocking client for the remote index and game files.
pub struct UgsClient {
    client: reqwest::blocking::Client,
    settings: RemoteSettings,
}

impl UgsClient {
    pub fn new(settings: RemoteSettings) -> Result<Self, GamsError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| GamsError::download(&settings.index_url, e))?;
        Ok(Self { client, settings })
    }

    pub fn prefix(&self) -> &str {
        &self.settings.id_prefix
    }

    /// Fetch and parse the remote index.
    pub fn fetch_index(&self) -> Result<UgsIndex, GamsError> {
        let body = self.get_text(&self.settings.index_url)?;
        let index = UgsIndex::parse(&body, &self.settings.id_prefix)?;
        log::debug!("Loaded {} games from the remote index", index.len());
        Ok(index)
    }

    /// URL a game id is downloaded from.
    pub fn game_url(&self, id: &str) -> String {
        format!("{}/{}.html", self.settings.base_url.trim_end_matches('/'), id)
    }

    /// Fetch raw bytes from any URL (custom thumbnails).
    pub fn get_bytes(&self, url: &str) -> Result<Vec<u8>, GamsError> {
        let response = self.send(url)?;
        let bytes = response.bytes().map_err(|e| GamsError::download(url, e))?;
        Ok(bytes.to_vec())
    }

    fn get_text(&self, url: &str) -> Result<String, GamsError> {
        let response = self.send(url)?;
        response.text().map_err(|e| GamsError::download(url, e))
    }

    fn send(&self, url: &str) -> Result<reqwest::blocking::Response, GamsError> {
        log::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| GamsError::download(url, e))?;
        if !response.status().is_success() {
            return Err(GamsError::download(url, format!("HTTP {}", response.status())));
        }
        Ok(response)
    }
}

impl GameSource for UgsClient {
    fn download(&self, id: &str) -> Result<String, GamsError> {
        self.get_text(&self.game_url(id))
    }

    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, GamsError> {
        self.get_bytes(url)
    }

    fn file_name(&self, id: &str) -> String {
        asset_file_name(id, &self.settings.id_prefix)
    }

    fn display_name(&self, id: &str) -> String {
        display_name(id, &self.settings.id_prefix)
    }
}
