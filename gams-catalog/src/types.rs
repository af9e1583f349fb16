//! In-memory representation of the game list.
//!
//! A [`Catalog`] owns its [`Section`]s, which own their [`Game`]s, all in
//! document order. Parsed records remember their exact source text so that an
//! unmodified catalog renders back byte-for-byte.

use std::ops::Range;

use crate::slug::{default_file_path, default_image_path, slugify};

// ── Layout ──────────────────────────────────────────────────────────────────

/// Where a record sat in the source literal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Layout {
    /// Whitespace and comments between the previous record (or `[`) and `{`.
    pub(crate) leading: String,
    /// Exact `{ ... }` text as parsed. `None` for records built in memory.
    pub(crate) source: Option<String>,
    /// Inline whitespace plus the `,` following the record, if any.
    pub(crate) trailer: String,
}

impl Layout {
    /// Layout for a record inserted after one with layout `prev`.
    ///
    /// Reuses the indentation of `prev`'s last line and always ends in a comma.
    pub(crate) fn following(prev: Option<&Layout>) -> Self {
        let indent = prev
            .and_then(|l| l.leading.rsplit_once('\n').map(|(_, tail)| tail))
            .filter(|tail| tail.chars().all(|c| c == ' ' || c == '\t'))
            .unwrap_or("  ");
        Self {
            leading: format!("\n{indent}"),
            source: None,
            trailer: ",".to_string(),
        }
    }
}

// ── Game ────────────────────────────────────────────────────────────────────

/// How the site opens a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaunchType {
    /// Opened through the site's game wrapper.
    #[default]
    Standard,
    /// The asset path is opened directly (tools, standalone pages).
    Raw,
}

/// One game entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    name: String,
    slug: String,
    file_override: Option<String>,
    image_override: Option<String>,
    launch_type: LaunchType,
    pub(crate) layout: Layout,
}

impl Game {
    /// A standard game with no overrides.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            slug: slugify(&name),
            name,
            file_override: None,
            image_override: None,
            launch_type: LaunchType::Standard,
            layout: Layout::default(),
        }
    }

    /// Set an explicit playable file path (`href`).
    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_override = Some(path.into());
        self
    }

    /// Set an explicit thumbnail path (`img`).
    pub fn with_image_path(mut self, path: impl Into<String>) -> Self {
        self.image_override = Some(path.into());
        self
    }

    pub fn with_launch_type(mut self, launch_type: LaunchType) -> Self {
        self.launch_type = launch_type;
        self
    }

    pub(crate) fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Resolved playable file path: the override if any, else `g/g/<slug>.html`.
    pub fn file_path(&self) -> String {
        self.file_override
            .clone()
            .unwrap_or_else(|| default_file_path(&self.slug))
    }

    /// Resolved thumbnail path: the override if any, else `img/<slug>.png`.
    pub fn image_path(&self) -> String {
        self.image_override
            .clone()
            .unwrap_or_else(|| default_image_path(&self.slug))
    }

    pub fn file_override(&self) -> Option<&str> {
        self.file_override.as_deref()
    }

    pub fn image_override(&self) -> Option<&str> {
        self.image_override.as_deref()
    }

    pub fn launch_type(&self) -> LaunchType {
        self.launch_type
    }
}

// ── Section ─────────────────────────────────────────────────────────────────

/// A titled group of games.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    title: String,
    pub(crate) games: Vec<Game>,
    pub(crate) layout: Layout,
}

impl Section {
    pub(crate) fn new(title: impl Into<String>, layout: Layout) -> Self {
        Self {
            title: title.into(),
            games: Vec::new(),
            layout,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Layout of the last record in this section (marker or game).
    pub(crate) fn last_layout(&self) -> &Layout {
        self.games.last().map_or(&self.layout, |g| &g.layout)
    }
}

// ── Catalog ─────────────────────────────────────────────────────────────────

/// The full game list of one host document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub(crate) variable: String,
    pub(crate) sections: Vec<Section>,
    /// Trivia between the last record and the closing `]`.
    pub(crate) tail: String,
    /// Byte range of the literal body (between `[` and `]`) in the source document.
    pub(crate) span: Range<usize>,
}

impl Catalog {
    /// Name of the list variable this catalog was read from.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Look up a section by exact title.
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }

    /// Index of the section with this exact title.
    pub fn section_index(&self, title: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.title == title)
    }

    /// Every game in document order, with its section index and position.
    pub fn games(&self) -> impl Iterator<Item = (usize, usize, &Game)> + '_ {
        self.sections.iter().enumerate().flat_map(|(si, section)| {
            section
                .games
                .iter()
                .enumerate()
                .map(move |(gi, game)| (si, gi, game))
        })
    }

    pub fn game_count(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    /// First game (in document order) whose display name matches exactly.
    pub fn find_game(&self, name: &str) -> Option<(usize, usize, &Game)> {
        self.games().find(|(_, _, g)| g.name() == name)
    }

    /// Byte range of the literal body within the document it was parsed from.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}
