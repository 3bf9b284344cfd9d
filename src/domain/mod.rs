pub mod config;
pub mod money;
pub mod ports;
pub mod receipt;
pub mod screen;
pub mod session;
pub mod text_entry;
pub mod validation;
