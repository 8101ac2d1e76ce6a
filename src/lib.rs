pub mod config;
pub mod encoder;
pub mod handler;
pub mod models;
pub mod resources;
pub mod utils;
