pub mod contact_message;
pub mod experience;
pub mod option_fields;
pub mod pagination;
pub mod palette;
pub mod project;
pub mod site_settings;
pub mod skill;
pub mod token;
pub mod validation;
