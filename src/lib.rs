// Public API for integration tests and potential library usage

pub mod api;
pub mod cleanup;
pub mod error;
pub mod images;
pub mod state;
pub mod types;
pub mod words;
