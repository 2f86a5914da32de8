pub mod args;
pub mod cli;
pub mod config;
pub mod error;
pub mod mirror_api;
pub mod qbo_api;
pub mod sync;

mod terminal;
