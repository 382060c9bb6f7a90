pub mod auth;
pub mod db;
pub mod limiter;
pub mod mail;
pub mod templates;
pub mod utils;
