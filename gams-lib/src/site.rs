//! A Gams checkout on disk: the host document, the `g/g/` game files, the
//! `img/` thumbnails, and backups.

use std::fs;
use std::path::{Component, Path, PathBuf};

use gams_catalog::slug::{GAMES_DIR, IMAGE_DIR};
use gams_catalog::{AssetEntry, Catalog, ParseError, parse_catalog_with, render_document};

use crate::GamsError;
use crate::settings::Settings;

/// The host document as read from disk, with its parsed catalog.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub catalog: Catalog,
}

impl Document {
    pub fn parse(text: String, variable: &str) -> Result<Self, ParseError> {
        let catalog = parse_catalog_with(&text, variable)?;
        Ok(Self { text, catalog })
    }

    /// Full document text with the current catalog spliced in.
    pub fn render(&self) -> Result<String, ParseError> {
        render_document(&self.catalog, &self.text)
    }
}

/// Paths and file operations for one site root.
#[derive(Debug, Clone)]
pub struct Site {
    root: PathBuf,
    settings: Settings,
}

impl Site {
    pub fn new(root: impl Into<PathBuf>, settings: Settings) -> Self {
        Self {
            root: root.into(),
            settings,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn document_path(&self) -> PathBuf {
        self.root.join(&self.settings.site.document)
    }

    pub fn default_image(&self) -> PathBuf {
        self.root.join(&self.settings.site.default_image)
    }

    pub fn backup_dir(&self) -> PathBuf {
        match &self.settings.site.backup_dir {
            Some(dir) => self.root.join(dir),
            None => self.root.clone(),
        }
    }

    /// Turn a site-relative path (as stored in the catalog) into a filesystem
    /// path, refusing anything that would escape the root.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, GamsError> {
        let rel = Path::new(relative);
        let escapes = rel.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        let names_something = rel.components().any(|c| matches!(c, Component::Normal(_)));
        if escapes || !names_something {
            return Err(GamsError::OutsideRoot(relative.to_string()));
        }
        Ok(self.root.join(rel))
    }

    /// Read and parse the host document.
    pub fn load(&self) -> Result<Document, GamsError> {
        let path = self.document_path();
        let text = fs::read_to_string(&path).map_err(|e| GamsError::io(&path, e))?;
        let doc = Document::parse(text, &self.settings.site.list_variable)?;
        log::debug!(
            "Loaded {} ({} sections, {} games)",
            path.display(),
            doc.catalog.sections().len(),
            doc.catalog.game_count()
        );
        Ok(doc)
    }

    /// Render `doc` and write it over the host document (temp file, then rename).
    pub fn save(&self, doc: &Document) -> Result<(), GamsError> {
        let rendered = doc.render()?;
        let path = self.document_path();
        let tmp = path.with_extension("html.tmp");
        fs::write(&tmp, rendered).map_err(|e| GamsError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| GamsError::io(&path, e))?;
        log::debug!("Wrote {}", path.display());
        Ok(())
    }

    /// Top-level entries of `g/g/`, relative to the root, sorted by name.
    pub fn list_assets(&self) -> Result<Vec<AssetEntry>, GamsError> {
        self.list_dir(GAMES_DIR)
    }

    /// Top-level entries of `img/`, relative to the root, sorted by name.
    pub fn list_images(&self) -> Result<Vec<AssetEntry>, GamsError> {
        self.list_dir(IMAGE_DIR)
    }

    fn list_dir(&self, relative: &str) -> Result<Vec<AssetEntry>, GamsError> {
        let dir = self.root.join(relative);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries: Vec<_> = fs::read_dir(&dir)
            .map_err(|e| GamsError::io(&dir, e))?
            .filter_map(|e| e.ok())
            .collect();
        entries.sort_by_key(|e| e.file_name());

        Ok(entries
            .into_iter()
            .map(|e| AssetEntry {
                path: Path::new(relative).join(e.file_name()),
                is_dir: e.file_type().is_ok_and(|t| t.is_dir()),
            })
            .collect())
    }

    /// Delete the files behind a game's resolved file path.
    ///
    /// A path inside a game subdirectory (`g/g/cookie/index.html`) deletes the
    /// whole `g/g/cookie/` directory. Returns the deleted path, or `None` if
    /// nothing existed.
    pub fn remove_game_asset(&self, file_path: &str) -> Result<Option<PathBuf>, GamsError> {
        let target = self.resolve(file_path)?;
        let game_dir = game_subdirectory(file_path).map(|dir| self.root.join(dir));

        let victim = match game_dir {
            Some(dir) if dir.is_dir() => dir,
            _ => target,
        };
        self.remove_path(&victim)
    }

    /// Delete a site-relative file or directory. Returns `None` if it did not exist.
    pub fn remove_relative(&self, relative: &Path) -> Result<Option<PathBuf>, GamsError> {
        let path = self.resolve(&relative.to_string_lossy())?;
        self.remove_path(&path)
    }

    fn remove_path(&self, path: &Path) -> Result<Option<PathBuf>, GamsError> {
        if path.is_dir() {
            fs::remove_dir_all(path).map_err(|e| GamsError::io(path, e))?;
        } else if path.exists() {
            fs::remove_file(path).map_err(|e| GamsError::io(path, e))?;
        } else {
            return Ok(None);
        }
        log::debug!("Deleted {}", path.display());
        Ok(Some(path.to_path_buf()))
    }

    /// Copy the host document to `<backup_dir>/<document>.bak.<unix seconds>`.
    pub fn backup(&self) -> Result<PathBuf, GamsError> {
        let source = self.document_path();
        let dir = self.backup_dir();
        fs::create_dir_all(&dir).map_err(|e| GamsError::io(&dir, e))?;

        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Gams.html".to_string());
        let stamp = chrono::Utc::now().timestamp();
        let target = dir.join(format!("{name}.bak.{stamp}"));

        fs::copy(&source, &target).map_err(|e| GamsError::io(&source, e))?;
        Ok(target)
    }
}

/// The path that owns a game's files: `g/g/<dir>` for games living in a
/// subdirectory of `g/g/`, otherwise the file path itself.
pub fn asset_root(file_path: &str) -> PathBuf {
    game_subdirectory(file_path).unwrap_or_else(|| PathBuf::from(file_path))
}

/// `g/g/<dir>` when `file_path` lies inside a subdirectory of `g/g/`.
fn game_subdirectory(file_path: &str) -> Option<PathBuf> {
    let rest = Path::new(file_path).strip_prefix(GAMES_DIR).ok()?;
    let mut components = rest.components();
    let first = components.next()?;
    components.next()?;
    Some(Path::new(GAMES_DIR).join(first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DOC: &str = "<html>\n<script>\nvar gamsList = [\n  {title: \"Custom\", type: \"section\"},\n  {name: \"Slope\"},\n];\n</script>\n</html>\n";

    fn site() -> (TempDir, Site) {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Gams.html"), DOC).unwrap();
        let site = Site::new(tmp.path(), Settings::default());
        (tmp, site)
    }

    #[test]
    fn load_and_save_round_trip() {
        let (_tmp, site) = site();
        let doc = site.load().unwrap();
        assert_eq!(doc.catalog.game_count(), 1);
        site.save(&doc).unwrap();
        assert_eq!(fs::read_to_string(site.document_path()).unwrap(), DOC);
    }

    #[test]
    fn missing_document_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path(), Settings::default());
        assert!(matches!(site.load(), Err(GamsError::Io { .. })));
    }

    #[test]
    fn resolve_rejects_escapes() {
        let (_tmp, site) = site();
        assert!(site.resolve("g/g/slope.html").is_ok());
        assert!(matches!(
            site.resolve("../etc/passwd"),
            Err(GamsError::OutsideRoot(_))
        ));
        assert!(matches!(site.resolve("/etc/passwd"), Err(GamsError::OutsideRoot(_))));
        assert!(matches!(site.resolve(""), Err(GamsError::OutsideRoot(_))));
        assert!(matches!(site.resolve("./."), Err(GamsError::OutsideRoot(_))));
    }

    #[test]
    fn lists_assets_sorted_with_kinds() {
        let (tmp, site) = site();
        let games = tmp.path().join("g/g");
        fs::create_dir_all(games.join("cookie")).unwrap();
        fs::write(games.join("slope.html"), "x").unwrap();
        fs::write(games.join("apple.html"), "x").unwrap();

        let listing = site.list_assets().unwrap();
        assert_eq!(
            listing,
            vec![
                AssetEntry::file("g/g/apple.html"),
                AssetEntry::dir("g/g/cookie"),
                AssetEntry::file("g/g/slope.html"),
            ]
        );
        assert!(site.list_images().unwrap().is_empty());
    }

    #[test]
    fn removes_single_file_game() {
        let (tmp, site) = site();
        let games = tmp.path().join("g/g");
        fs::create_dir_all(&games).unwrap();
        fs::write(games.join("slope.html"), "x").unwrap();

        let removed = site.remove_game_asset("g/g/slope.html").unwrap();
        assert_eq!(removed, Some(games.join("slope.html")));
        assert!(!games.join("slope.html").exists());
        assert_eq!(site.remove_game_asset("g/g/slope.html").unwrap(), None);
    }

    #[test]
    fn removes_whole_game_directory() {
        let (tmp, site) = site();
        let cookie = tmp.path().join("g/g/cookie");
        fs::create_dir_all(cookie.join("assets")).unwrap();
        fs::write(cookie.join("index.html"), "x").unwrap();

        let removed = site.remove_game_asset("g/g/cookie/index.html").unwrap();
        assert_eq!(removed, Some(cookie.clone()));
        assert!(!cookie.exists());
        assert!(tmp.path().join("g/g").exists());
    }

    #[test]
    fn game_subdirectory_detection() {
        assert_eq!(
            game_subdirectory("g/g/cookie/index.html"),
            Some(PathBuf::from("g/g/cookie"))
        );
        assert_eq!(game_subdirectory("g/g/slope.html"), None);
        assert_eq!(game_subdirectory("tools/term.html"), None);
        assert_eq!(asset_root("g/g/cookie/index.html"), PathBuf::from("g/g/cookie"));
        assert_eq!(asset_root("g/g/slope.html"), PathBuf::from("g/g/slope.html"));
    }

    #[test]
    fn backup_copies_document() {
        let (tmp, mut site) = site();
        site.settings.site.backup_dir = Some(PathBuf::from("backups"));
        let path = site.backup().unwrap();
        assert!(path.starts_with(tmp.path().join("backups")));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("Gams.html.bak."), "{name}");
        assert_eq!(fs::read_to_string(path).unwrap(), DOC);
    }
}
