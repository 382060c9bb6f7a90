use actix_web::web;

mod admin;
mod api;
mod json_error;
mod pages;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(pages::config_routes)
        .configure(api::config_routes)
        .configure(admin::config_routes)
        .configure(json_error::config_routes);
}
