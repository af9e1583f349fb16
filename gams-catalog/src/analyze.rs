//! Integrity checks over a catalog: duplicate names, slug collisions, and
//! files on disk that no game references.
//!
//! These only report. Deciding what to delete is left to the caller.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use crate::types::{Catalog, Game};

/// Where a game sits in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLocation {
    pub name: String,
    pub section: String,
    pub section_index: usize,
    pub position: usize,
}

impl GameLocation {
    pub(crate) fn new(catalog: &Catalog, section_index: usize, position: usize, game: &Game) -> Self {
        Self {
            name: game.name().to_string(),
            section: catalog.sections()[section_index].title().to_string(),
            section_index,
            position,
        }
    }
}

/// Why games were grouped together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterKind {
    /// Same display name, ignoring case.
    Name,
    /// Different display names that derive the same slug, so they would
    /// share default file and image paths.
    Slug,
}

/// A group of games that collide, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateCluster {
    pub kind: ClusterKind,
    /// The shared key: lowercased name or slug.
    pub key: String,
    pub members: Vec<GameLocation>,
}

/// Group games by case-insensitive display name; report groups of two or more.
///
/// Clusters are ordered by the first appearance of their key.
pub fn find_duplicates(catalog: &Catalog) -> Vec<DuplicateCluster> {
    group_by(catalog, ClusterKind::Name, |game| game.name().to_lowercase())
}

/// Group games by slug; report groups whose members do not all share a name.
///
/// Groups that are plain name duplicates are already covered by
/// [`find_duplicates`] and are left out.
pub fn find_slug_collisions(catalog: &Catalog) -> Vec<DuplicateCluster> {
    group_by(catalog, ClusterKind::Slug, |game| game.slug().to_string())
        .into_iter()
        .filter(|cluster| {
            let first = cluster.members[0].name.to_lowercase();
            cluster
                .members
                .iter()
                .any(|m| m.name.to_lowercase() != first)
        })
        .collect()
}

fn group_by(
    catalog: &Catalog,
    kind: ClusterKind,
    key_of: impl Fn(&Game) -> String,
) -> Vec<DuplicateCluster> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<GameLocation>> = HashMap::new();

    for (si, gi, game) in catalog.games() {
        let key = key_of(game);
        let members = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            Vec::new()
        });
        members.push(GameLocation::new(catalog, si, gi, game));
    }

    order
        .into_iter()
        .filter_map(|key| {
            let members = groups.remove(&key)?;
            (members.len() > 1).then_some(DuplicateCluster { kind, key, members })
        })
        .collect()
}

// ── Orphans ─────────────────────────────────────────────────────────────────

/// One entry of a directory listing, relative to the site root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

impl AssetEntry {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dir: false,
        }
    }

    pub fn dir(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dir: true,
        }
    }

    fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

/// Entries of the game-assets listing that no game's resolved file path
/// points at or into.
///
/// A single-file game (`g/g/slope.html`) references exactly that file. A
/// directory (`g/g/cookie`) is referenced if any game's file path lies inside
/// it. Entries whose file name is in `whitelist` are never reported.
pub fn find_orphan_assets<S: AsRef<str>>(
    catalog: &Catalog,
    listing: &[AssetEntry],
    whitelist: &[S],
) -> Vec<AssetEntry> {
    let referenced: Vec<PathBuf> = catalog
        .games()
        .map(|(_, _, game)| PathBuf::from(game.file_path()))
        .collect();
    orphans_against(&referenced, listing, whitelist)
}

/// Entries of the image listing that no game's resolved image path points at
/// or into. See [`find_orphan_assets`].
pub fn find_orphan_images<S: AsRef<str>>(
    catalog: &Catalog,
    listing: &[AssetEntry],
    whitelist: &[S],
) -> Vec<AssetEntry> {
    let referenced: Vec<PathBuf> = catalog
        .games()
        .map(|(_, _, game)| PathBuf::from(game.image_path()))
        .collect();
    orphans_against(&referenced, listing, whitelist)
}

fn orphans_against<S: AsRef<str>>(
    referenced: &[PathBuf],
    listing: &[AssetEntry],
    whitelist: &[S],
) -> Vec<AssetEntry> {
    listing
        .iter()
        .filter(|entry| {
            !entry
                .file_name()
                .is_some_and(|name| whitelist.iter().any(|w| w.as_ref() == name))
        })
        .filter(|entry| !is_referenced(&entry.path, referenced))
        .cloned()
        .collect()
}

/// Whether any of `referenced` equals `candidate` or lies beneath it.
pub(crate) fn is_referenced(candidate: &Path, referenced: &[PathBuf]) -> bool {
    let candidate = normalize(candidate);
    // An empty path names nothing, so nothing can point into it.
    if candidate.as_os_str().is_empty() {
        return false;
    }
    referenced
        .iter()
        .any(|path| normalize(path).starts_with(&candidate))
}

/// Drop `.` components so `./g/g/x.html` and `g/g/x.html` compare equal.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn referenced_file_and_directory() {
        let refs = vec![
            PathBuf::from("g/g/slope.html"),
            PathBuf::from("g/g/cookie/index.html"),
        ];
        assert!(is_referenced(Path::new("g/g/slope.html"), &refs));
        assert!(is_referenced(Path::new("./g/g/cookie"), &refs));
        assert!(!is_referenced(Path::new("g/g/slope"), &refs));
        assert!(!is_referenced(Path::new("g/g/cookie/old.html"), &refs));
    }

    #[test]
    fn empty_candidate_is_never_referenced() {
        let refs = vec![PathBuf::from("g/g/slope.html")];
        assert!(!is_referenced(Path::new(""), &refs));
        assert!(!is_referenced(Path::new("."), &refs));
    }

    #[test]
    fn partial_name_is_not_a_prefix() {
        let refs = vec![PathBuf::from("g/g/slope2/index.html")];
        assert!(!is_referenced(Path::new("g/g/slope"), &refs));
    }
}
