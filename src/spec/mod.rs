//! The top-level widget document: video catalog, settings, blocks and its compressed envelope.

pub(crate) mod database;
pub(crate) mod document;
pub(crate) mod envelope;
pub(crate) mod settings;
pub(crate) mod vgrid;
