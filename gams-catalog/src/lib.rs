//! Game list model, parser, editor and serializer for the Gams host document.
//!
//! The host document is opaque text except for one embedded list literal
//! (`var gamsList = [ ... ];`). This crate parses that literal into a
//! [`Catalog`], offers the edit and analysis operations over it, and renders
//! it back into the document without touching anything outside the literal.
//! No I/O happens here; callers read and write the document themselves.

pub mod analyze;
pub mod editor;
pub mod error;
pub mod parser;
pub mod serializer;
pub mod slug;
pub mod types;

pub use analyze::{
    AssetEntry, ClusterKind, DuplicateCluster, GameLocation, find_duplicates, find_orphan_assets,
    find_orphan_images, find_slug_collisions,
};
pub use editor::{InsertReport, RemovedGame};
pub use error::{EditError, ParseError};
pub use parser::{DEFAULT_LIST_VARIABLE, parse_catalog, parse_catalog_with};
pub use serializer::{render_document, render_entry, render_list};
pub use slug::{default_file_path, default_image_path, slugify};
pub use types::{Catalog, Game, LaunchType, Section};
