pub mod connection_settings;
pub mod error;
pub mod format;
pub mod payload;
pub mod reader;
pub mod render;
pub mod tail;
pub mod variant;
