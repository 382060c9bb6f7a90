pub mod contact_message;
pub mod experience;
pub mod palette;
pub mod project;
pub mod site_settings;
pub mod skill;
pub mod sqlx_repo;
