pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod state;
pub mod swaps;
pub mod users;
pub mod viewer;
