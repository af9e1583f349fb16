pub(crate) mod add;
pub(crate) mod backup;
pub(crate) mod config;
pub(crate) mod delete;
pub(crate) mod duplicates;
pub(crate) mod image;
pub(crate) mod list;
pub(crate) mod menu;
pub(crate) mod orphans;
