pub mod api;
pub mod batch;
pub mod config;
pub mod control;
pub mod desktop;
pub mod error;
pub mod models;
