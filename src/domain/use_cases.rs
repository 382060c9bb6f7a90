pub mod auth;
pub mod contact;
pub mod experience;
pub mod extractors;
pub mod palette;
pub mod project;
pub mod site_settings;
pub mod skill;
pub mod theme;
