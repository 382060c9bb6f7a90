pub mod auth;
pub mod error_pages;
