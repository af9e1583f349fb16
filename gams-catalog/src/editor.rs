//! Catalog edits: the only way a parsed [`Catalog`] changes.
//!
//! Edits touch only the target record. Every other record keeps its layout
//! and position, so rendering an edited catalog differs from the original
//! document only where the edit happened.

use std::path::{Path, PathBuf};

use crate::analyze::{GameLocation, is_referenced};
use crate::error::EditError;
use crate::types::{Catalog, Game, Layout, Section};

/// Outcome of a successful [`Catalog::insert_game`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertReport {
    pub section: usize,
    pub position: usize,
    /// Existing games whose slug equals the new game's slug. These would
    /// share default file and image paths on disk.
    pub slug_collisions: Vec<GameLocation>,
}

/// A game taken out of the catalog, with the paths its files live at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedGame {
    pub game: Game,
    pub section: String,
    pub position: usize,
    pub file_path: String,
    pub image_path: String,
}

impl Catalog {
    /// Append `game` to the end of the section titled `section_title`.
    ///
    /// The section must already exist; sections are only created through
    /// [`Catalog::create_section`]. Duplicate names are not rejected.
    pub fn insert_game(
        &mut self,
        section_title: &str,
        game: Game,
    ) -> Result<InsertReport, EditError> {
        let section_index = self
            .section_index(section_title)
            .ok_or_else(|| EditError::SectionNotFound(section_title.to_string()))?;

        let slug_collisions: Vec<GameLocation> = self
            .games()
            .filter(|(_, _, existing)| existing.slug() == game.slug())
            .map(|(si, gi, existing)| GameLocation::new(self, si, gi, existing))
            .collect();

        let section = &mut self.sections[section_index];
        let layout = Layout::following(Some(section.last_layout()));
        section.games.push(game.with_layout(layout));

        Ok(InsertReport {
            section: section_index,
            position: section.games.len() - 1,
            slug_collisions,
        })
    }

    /// Append a new, empty section at the end of the catalog.
    ///
    /// Returns the new section's index.
    pub fn create_section(&mut self, title: &str) -> Result<usize, EditError> {
        if self.section_index(title).is_some() {
            return Err(EditError::DuplicateSection(title.to_string()));
        }
        let layout = Layout::following(self.sections.last().map(Section::last_layout));
        self.sections.push(Section::new(title, layout));
        Ok(self.sections.len() - 1)
    }

    /// Remove the first game, in document order, named exactly `name`.
    ///
    /// The section is kept even if this leaves it empty.
    pub fn remove_game(&mut self, name: &str) -> Result<RemovedGame, EditError> {
        let (section, position, _) = self
            .find_game(name)
            .ok_or_else(|| EditError::GameNotFound(name.to_string()))?;
        self.remove_game_at(section, position)
    }

    /// Remove the game at `position` within section `section`.
    pub fn remove_game_at(
        &mut self,
        section: usize,
        position: usize,
    ) -> Result<RemovedGame, EditError> {
        let target = self
            .sections
            .get_mut(section)
            .filter(|s| position < s.games.len())
            .ok_or(EditError::PositionOutOfRange { section, position })?;

        let game = target.games.remove(position);
        log::debug!("removed `{}` from section `{}`", game.name(), target.title());
        Ok(RemovedGame {
            section: target.title().to_string(),
            position,
            file_path: game.file_path(),
            image_path: game.image_path(),
            game,
        })
    }

    /// The subset of `candidates` that no game's resolved file path points at
    /// or into.
    ///
    /// Paths are relative to the site root (`g/g/slope.html`, `g/g/cookie`).
    /// The catalog is not modified; deleting the returned paths is up to the
    /// caller.
    pub fn unreferenced_paths<P: AsRef<Path>>(&self, candidates: &[P]) -> Vec<PathBuf> {
        let referenced: Vec<PathBuf> = self
            .games()
            .map(|(_, _, game)| PathBuf::from(game.file_path()))
            .collect();
        candidates
            .iter()
            .map(|p| p.as_ref())
            .filter(|candidate| !is_referenced(candidate, &referenced))
            .map(Path::to_path_buf)
            .collect()
    }
}
