//! End-to-end workflows: each loads the host document, applies one change,
//! writes it back, and then touches game files and thumbnails.
//!
//! File writes are not transactional. If the document write fails after a
//! game file was saved, the file stays on disk until an orphan scan finds it.

use std::fs;
use std::path::{Path, PathBuf};

use gams_catalog::slug::GAMES_DIR;
use gams_catalog::{
    AssetEntry, ClusterKind, EditError, Game, GameLocation, RemovedGame, find_duplicates,
    find_orphan_assets, find_orphan_images,
};

use crate::GamsError;
use crate::site::{Document, Site, asset_root};
use crate::thumbnail::{save_image_bytes, synthesize_thumbnail};

/// Where game files and remote images come from.
pub trait GameSource {
    /// Fetch the playable HTML for `id`.
    fn download(&self, id: &str) -> Result<String, GamsError>;

    /// Fetch arbitrary bytes, used for custom thumbnails.
    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, GamsError>;

    /// File name under `g/g/` the game is saved as.
    fn file_name(&self, id: &str) -> String;

    /// Default display name for `id`.
    fn display_name(&self, id: &str) -> String;
}

// ── Add ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct AddRequest {
    pub id: String,
    /// Display name; derived from the id when `None`.
    pub name: Option<String>,
    pub section: String,
    /// Skip thumbnail synthesis because the user will supply one.
    pub custom_image: bool,
}

#[derive(Debug, Clone)]
pub struct AddSummary {
    pub name: String,
    pub section: String,
    pub file: PathBuf,
    pub thumbnail: Option<PathBuf>,
    pub slug_collisions: Vec<GameLocation>,
}

/// Download a game, save it under `g/g/`, create its thumbnail, and add it
/// to the end of `request.section`.
///
/// The section is checked before anything is downloaded.
pub fn add_game(
    site: &Site,
    source: &dyn GameSource,
    request: &AddRequest,
) -> Result<AddSummary, GamsError> {
    let mut doc = site.load()?;

    let name = request
        .name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| source.display_name(&request.id));
    let href = format!("{GAMES_DIR}/{}", source.file_name(&request.id));
    let mut game = Game::new(name.as_str());
    if game.file_path() != href {
        game = game.with_file_path(href.as_str());
    }
    let image_rel = game.image_path();

    let report = doc.catalog.insert_game(&request.section, game)?;
    for other in &report.slug_collisions {
        log::warn!(
            "'{}' shares its slug with '{}' in section '{}'; they will share thumbnail paths",
            name,
            other.name,
            other.section,
        );
    }

    let content = source.download(&request.id)?;
    let file = site.resolve(&href)?;
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).map_err(|e| GamsError::io(parent, e))?;
    }
    fs::write(&file, content).map_err(|e| GamsError::io(&file, e))?;
    log::debug!("Saved {}", file.display());

    let thumbnail = if request.custom_image {
        None
    } else {
        ensure_thumbnail(site, &image_rel)?
    };

    site.save(&doc)?;

    Ok(AddSummary {
        name,
        section: request.section.clone(),
        file,
        thumbnail,
        slug_collisions: report.slug_collisions,
    })
}

/// Synthesize a thumbnail at `image_rel` unless one already exists.
///
/// A missing or unreadable logo is reported as a warning; the game is still
/// added.
fn ensure_thumbnail(site: &Site, image_rel: &str) -> Result<Option<PathBuf>, GamsError> {
    let out = site.resolve(image_rel)?;
    if out.exists() {
        log::debug!("Thumbnail {} already exists", out.display());
        return Ok(None);
    }
    let logo = site.default_image();
    if !logo.exists() {
        log::warn!("Default logo not found at {}; no thumbnail created", logo.display());
        return Ok(None);
    }
    match synthesize_thumbnail(&logo, &out, site.settings().thumbnail.size) {
        Ok(()) => Ok(Some(out)),
        Err(e) => {
            log::warn!("Could not create thumbnail: {e}");
            Ok(None)
        }
    }
}

// ── Delete ──────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct DeleteSummary {
    pub removed: RemovedGame,
    /// Files and directories that were deleted.
    pub deleted: Vec<PathBuf>,
    /// Resolved paths that had nothing on disk.
    pub missing: Vec<String>,
    /// Paths left alone because another game still uses them.
    pub shared: Vec<String>,
    /// Paths that could not be deleted after the entry was already removed.
    pub failed: Vec<(String, GamsError)>,
}

/// Remove the first game named exactly `name`, write the document, then
/// delete its game files and thumbnail unless `keep_files` is set.
///
/// Paths outside the site root are refused before the document is written.
/// File deletion failures after the write are collected in
/// [`DeleteSummary::failed`].
pub fn delete_game(site: &Site, name: &str, keep_files: bool) -> Result<DeleteSummary, GamsError> {
    let mut doc = site.load()?;
    let removed = doc.catalog.remove_game(name)?;
    if !keep_files {
        site.resolve(&removed.file_path)?;
        site.resolve(&removed.image_path)?;
    }
    site.save(&doc)?;

    let mut summary = DeleteSummary {
        removed,
        deleted: Vec::new(),
        missing: Vec::new(),
        shared: Vec::new(),
        failed: Vec::new(),
    };
    if keep_files {
        return Ok(summary);
    }

    let file_path = summary.removed.file_path.clone();
    let owner = asset_root(&file_path);
    if doc.catalog.unreferenced_paths(&[&owner]).is_empty() {
        summary.shared.push(owner.display().to_string());
    } else {
        match site.remove_game_asset(&file_path) {
            Ok(Some(path)) => summary.deleted.push(path),
            Ok(None) => summary.missing.push(file_path),
            Err(e) => summary.failed.push((file_path, e)),
        }
    }

    let image_path = summary.removed.image_path.clone();
    let image_in_use = doc
        .catalog
        .games()
        .any(|(_, _, game)| game.image_path() == image_path);
    if image_in_use {
        summary.shared.push(image_path);
    } else {
        match site.remove_relative(Path::new(&image_path)) {
            Ok(Some(path)) => summary.deleted.push(path),
            Ok(None) => summary.missing.push(image_path),
            Err(e) => summary.failed.push((image_path, e)),
        }
    }

    Ok(summary)
}

/// Remove every name-duplicate except the first in document order.
///
/// Game files are left alone; the kept entry still points at them.
pub fn prune_duplicates(site: &Site) -> Result<Vec<RemovedGame>, GamsError> {
    let mut doc = site.load()?;
    let mut targets: Vec<(usize, usize)> = find_duplicates(&doc.catalog)
        .into_iter()
        .filter(|cluster| cluster.kind == ClusterKind::Name)
        .flat_map(|cluster| {
            cluster
                .members
                .into_iter()
                .skip(1)
                .map(|m| (m.section_index, m.position))
        })
        .collect();
    if targets.is_empty() {
        return Ok(Vec::new());
    }

    // Remove from the back so earlier positions stay valid.
    targets.sort_unstable_by(|a, b| b.cmp(a));
    let mut removed = targets
        .into_iter()
        .map(|(section, position)| doc.catalog.remove_game_at(section, position))
        .collect::<Result<Vec<_>, EditError>>()?;
    removed.reverse();

    site.save(&doc)?;
    Ok(removed)
}

// ── Orphans ─────────────────────────────────────────────────────────────────

/// Files on disk that no game references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrphanReport {
    pub assets: Vec<AssetEntry>,
    pub images: Vec<AssetEntry>,
}

impl OrphanReport {
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty() && self.images.is_empty()
    }
}

/// Compare `g/g/` and `img/` against the catalog in `doc`.
pub fn scan_orphans(site: &Site, doc: &Document) -> Result<OrphanReport, GamsError> {
    let whitelist = &site.settings().site.whitelist;
    Ok(OrphanReport {
        assets: find_orphan_assets(&doc.catalog, &site.list_assets()?, whitelist),
        images: find_orphan_images(&doc.catalog, &site.list_images()?, whitelist),
    })
}

/// Delete the given orphans. Failures are collected, not fatal.
pub fn delete_orphans(
    site: &Site,
    entries: &[AssetEntry],
) -> (Vec<PathBuf>, Vec<(PathBuf, GamsError)>) {
    let mut deleted = Vec::new();
    let mut failed = Vec::new();
    for entry in entries {
        match site.remove_relative(&entry.path) {
            Ok(Some(path)) => deleted.push(path),
            Ok(None) => log::debug!("{} already gone", entry.path.display()),
            Err(e) => failed.push((entry.path.clone(), e)),
        }
    }
    (deleted, failed)
}

// ── Images and sections ─────────────────────────────────────────────────────

/// Where a game's new thumbnail comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Synthesized from the site logo.
    DefaultLogo,
    /// Downloaded from a URL.
    Url(String),
}

/// Write a thumbnail for the game named exactly `name` at its resolved image
/// path, replacing any existing file.
pub fn assign_image(
    site: &Site,
    source: &dyn GameSource,
    name: &str,
    image: &ImageSource,
) -> Result<PathBuf, GamsError> {
    let doc = site.load()?;
    let (_, _, game) = doc
        .catalog
        .find_game(name)
        .ok_or_else(|| EditError::GameNotFound(name.to_string()))?;
    let out = site.resolve(&game.image_path())?;

    match image {
        ImageSource::DefaultLogo => {
            synthesize_thumbnail(&site.default_image(), &out, site.settings().thumbnail.size)?
        }
        ImageSource::Url(url) => save_image_bytes(&source.fetch_image(url)?, &out)?,
    }
    Ok(out)
}

/// Append an empty section to the catalog and write the document.
pub fn create_section(site: &Site, title: &str) -> Result<usize, GamsError> {
    let mut doc = site.load()?;
    let index = doc.catalog.create_section(title)?;
    site.save(&doc)?;
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use image::{DynamicImage, Rgba, RgbaImage};
    use std::cell::RefCell;
    use tempfile::TempDir;

    const DOC: &str = "<html>\n<script>\nvar gamsList = [\n  {title: \"Custom\", type: \"section\"},\n  {name: \"Slope\"},\n  {title: \"Unity\", type: \"section\"},\n  {name: \"Cookie Clicker\", href: \"g/g/cookie/index.html\"},\n];\n</script>\n</html>\n";

    struct FakeSource {
        downloads: RefCell<Vec<String>>,
        image: Vec<u8>,
    }

    impl FakeSource {
        fn new() -> Self {
            let mut png = Vec::new();
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255])))
                .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
                .unwrap();
            Self {
                downloads: RefCell::new(Vec::new()),
                image: png,
            }
        }
    }

    impl GameSource for FakeSource {
        fn download(&self, id: &str) -> Result<String, GamsError> {
            self.downloads.borrow_mut().push(id.to_string());
            Ok(format!("<html>{id}</html>"))
        }

        fn fetch_image(&self, _url: &str) -> Result<Vec<u8>, GamsError> {
            Ok(self.image.clone())
        }

        fn file_name(&self, id: &str) -> String {
            crate::ugs::asset_file_name(id, "cl")
        }

        fn display_name(&self, id: &str) -> String {
            crate::ugs::display_name(id, "cl")
        }
    }

    fn site() -> (TempDir, Site) {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Gams.html"), DOC).unwrap();
        fs::create_dir_all(tmp.path().join("img")).unwrap();
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(16, 16, Rgba([255, 0, 0, 255])))
            .save(tmp.path().join("img/gams.png"))
            .unwrap();
        let mut settings = Settings::default();
        settings.thumbnail.size = 8;
        let site = Site::new(tmp.path(), settings);
        (tmp, site)
    }

    fn request(id: &str, section: &str) -> AddRequest {
        AddRequest {
            id: id.to_string(),
            name: None,
            section: section.to_string(),
            custom_image: false,
        }
    }

    #[test]
    fn add_saves_file_thumbnail_and_entry() {
        let (tmp, site) = site();
        let source = FakeSource::new();
        let summary = add_game(&site, &source, &request("clDriveMad", "Unity")).unwrap();

        assert_eq!(summary.name, "Drive Mad");
        assert_eq!(summary.file, tmp.path().join("g/g/DriveMad.html"));
        assert_eq!(
            fs::read_to_string(&summary.file).unwrap(),
            "<html>clDriveMad</html>"
        );
        assert_eq!(summary.thumbnail, Some(tmp.path().join("img/drivemad.png")));
        assert!(summary.slug_collisions.is_empty());

        let text = fs::read_to_string(site.document_path()).unwrap();
        assert!(text.contains(
            "{name: \"Cookie Clicker\", href: \"g/g/cookie/index.html\"},\n  {name: \"Drive Mad\", href: \"g/g/DriveMad.html\"},\n];"
        ));
    }

    #[test]
    fn add_to_missing_section_downloads_nothing() {
        let (tmp, site) = site();
        let source = FakeSource::new();
        let err = add_game(&site, &source, &request("clSlope", "Nope")).unwrap_err();
        assert!(matches!(err, GamsError::Edit(EditError::SectionNotFound(_))));
        assert!(source.downloads.borrow().is_empty());
        assert!(!tmp.path().join("g/g").exists());
        assert_eq!(fs::read_to_string(site.document_path()).unwrap(), DOC);
    }

    #[test]
    fn add_with_custom_name_and_image() {
        let (tmp, site) = site();
        let source = FakeSource::new();
        let mut req = request("clslope", "Custom");
        req.name = Some("Slope Two".to_string());
        req.custom_image = true;
        let summary = add_game(&site, &source, &req).unwrap();
        assert_eq!(summary.name, "Slope Two");
        assert_eq!(summary.thumbnail, None);
        assert!(!tmp.path().join("img/slopetwo.png").exists());
    }

    #[test]
    fn add_reports_slug_collision() {
        let (_tmp, site) = site();
        let source = FakeSource::new();
        let mut req = request("clSlope", "Unity");
        req.name = Some("SLOPE".to_string());
        let summary = add_game(&site, &source, &req).unwrap();
        assert_eq!(summary.slug_collisions.len(), 1);
        assert_eq!(summary.slug_collisions[0].name, "Slope");
    }

    #[test]
    fn delete_removes_entry_and_files() {
        let (tmp, site) = site();
        let cookie = tmp.path().join("g/g/cookie");
        fs::create_dir_all(&cookie).unwrap();
        fs::write(cookie.join("index.html"), "x").unwrap();
        fs::write(tmp.path().join("img/cookieclicker.png"), "x").unwrap();

        let summary = delete_game(&site, "Cookie Clicker", false).unwrap();
        assert_eq!(summary.removed.section, "Unity");
        assert_eq!(
            summary.deleted,
            vec![cookie.clone(), tmp.path().join("img/cookieclicker.png")]
        );
        assert!(summary.missing.is_empty());
        assert!(!cookie.exists());

        let text = fs::read_to_string(site.document_path()).unwrap();
        assert!(!text.contains("Cookie Clicker"));
        assert!(text.contains("{title: \"Unity\", type: \"section\"},"));
    }

    #[test]
    fn delete_reports_missing_files_and_keeps_when_asked() {
        let (tmp, site) = site();
        fs::create_dir_all(tmp.path().join("g/g")).unwrap();
        fs::write(tmp.path().join("g/g/slope.html"), "x").unwrap();

        let summary = delete_game(&site, "Slope", true).unwrap();
        assert!(summary.deleted.is_empty());
        assert!(tmp.path().join("g/g/slope.html").exists());

        let (_tmp2, site2) = self::site();
        let summary = delete_game(&site2, "Slope", false).unwrap();
        assert_eq!(summary.missing, vec!["g/g/slope.html", "img/slope.png"]);
    }

    #[test]
    fn delete_outside_root_writes_nothing() {
        let (tmp, site) = site();
        let doc = DOC.replace(
            "  {name: \"Slope\"},",
            "  {name: \"Slope\"},\n  {name: \"Shell\", href: \"../shared/sh.html\", type: \"raw\"},",
        );
        fs::write(site.document_path(), &doc).unwrap();

        let err = delete_game(&site, "Shell", false).unwrap_err();
        assert!(matches!(err, GamsError::OutsideRoot(ref p) if p == "../shared/sh.html"));
        assert_eq!(fs::read_to_string(site.document_path()).unwrap(), doc);

        let summary = delete_game(&site, "Shell", true).unwrap();
        assert!(summary.deleted.is_empty() && summary.failed.is_empty());
        assert_eq!(fs::read_to_string(site.document_path()).unwrap(), DOC);
        assert!(tmp.path().join("Gams.html").exists());
    }

    #[test]
    fn delete_unknown_game() {
        let (_tmp, site) = site();
        let err = delete_game(&site, "Nope", false).unwrap_err();
        assert!(matches!(err, GamsError::Edit(EditError::GameNotFound(_))));
        assert_eq!(fs::read_to_string(site.document_path()).unwrap(), DOC);
    }

    #[test]
    fn prune_keeps_first_of_each_cluster() {
        let (_tmp, site) = site();
        let doc = DOC.replace(
            "  {name: \"Cookie Clicker\"",
            "  {name: \"slope\"},\n  {name: \"Slope\"},\n  {name: \"Cookie Clicker\"",
        );
        fs::write(site.document_path(), doc).unwrap();

        let removed = prune_duplicates(&site).unwrap();
        let names: Vec<_> = removed.iter().map(|r| r.game.name()).collect();
        assert_eq!(names, vec!["slope", "Slope"]);
        assert_eq!(fs::read_to_string(site.document_path()).unwrap(), DOC);
        assert!(prune_duplicates(&site).unwrap().is_empty());
    }

    #[test]
    fn orphan_scan_and_delete() {
        let (tmp, site) = site();
        let games = tmp.path().join("g/g");
        fs::create_dir_all(games.join("cookie")).unwrap();
        fs::create_dir_all(games.join("Ruffle")).unwrap();
        fs::create_dir_all(games.join("oldgame")).unwrap();
        fs::write(games.join("slope.html"), "x").unwrap();
        fs::write(games.join("stale.html"), "x").unwrap();
        fs::write(tmp.path().join("img/slope.png"), "x").unwrap();
        fs::write(tmp.path().join("img/gone.png"), "x").unwrap();

        let doc = site.load().unwrap();
        let report = scan_orphans(&site, &doc).unwrap();
        assert_eq!(
            report.assets,
            vec![AssetEntry::dir("g/g/oldgame"), AssetEntry::file("g/g/stale.html")]
        );
        assert_eq!(report.images, vec![AssetEntry::file("img/gone.png")]);

        let (deleted, failed) = delete_orphans(&site, &report.assets);
        assert_eq!(deleted.len(), 2);
        assert!(failed.is_empty());
        assert!(!games.join("oldgame").exists());
        assert!(games.join("slope.html").exists());
        assert!(scan_orphans(&site, &doc).unwrap().assets.is_empty());
    }

    #[test]
    fn assign_image_from_logo_and_url() {
        let (tmp, site) = site();
        let source = FakeSource::new();

        let path = assign_image(&site, &source, "Slope", &ImageSource::DefaultLogo).unwrap();
        assert_eq!(path, tmp.path().join("img/slope.png"));
        assert_eq!(image::open(&path).unwrap().width(), 8);

        let url = ImageSource::Url("https://example.com/x.png".to_string());
        assign_image(&site, &source, "Slope", &url).unwrap();
        assert_eq!(image::open(&path).unwrap().width(), 4);

        assert!(assign_image(&site, &source, "slope", &url).is_err());
    }

    #[test]
    fn create_section_writes_document() {
        let (_tmp, site) = site();
        assert_eq!(create_section(&site, "Flash").unwrap(), 2);
        let doc = site.load().unwrap();
        assert!(doc.catalog.section("Flash").unwrap().is_empty());
        assert!(matches!(
            create_section(&site, "Flash"),
            Err(GamsError::Edit(EditError::DuplicateSection(_)))
        ));
    }
}
