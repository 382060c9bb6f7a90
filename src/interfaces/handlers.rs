pub mod api;
pub mod auth;
pub mod experiences;
pub mod messages;
pub mod pages;
pub mod palettes;
pub mod projects;
pub mod settings;
pub mod skills;
pub mod system;
