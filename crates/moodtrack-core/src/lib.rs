pub mod api;
pub mod config;
pub mod editor;
pub mod error;
pub mod model;
pub mod report;
pub mod session;
