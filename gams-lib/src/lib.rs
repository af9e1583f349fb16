//! Site-level operations for a Gams checkout: settings, reading and writing
//! the host document, the remote game index, thumbnails, backups, and the
//! add/delete/cleanup workflows built on `gams-catalog`.

pub mod error;
pub mod manage;
pub mod settings;
pub mod site;
pub mod thumbnail;
pub mod ugs;

pub use error::GamsError;
pub use gams_catalog as catalog;
pub use manage::{
    AddRequest, AddSummary, DeleteSummary, GameSource, ImageSource, OrphanReport, add_game,
    assign_image, create_section, delete_game, delete_orphans, prune_duplicates, scan_orphans,
};
pub use settings::{Settings, load_settings, settings_path};
pub use site::{Document, Site};
pub use ugs::{UgsClient, UgsIndex};
