use actix_web::web;

use crate::handlers::{pages, system};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(pages::home)))
        .service(web::resource("/projects/").route(web::get().to(pages::projects)))
        .service(web::resource("/projects/{slug}/").route(web::get().to(pages::project_detail)))
        .service(web::resource("/about/").route(web::get().to(pages::about)))
        .service(
            web::resource("/contact/")
                .route(web::get().to(pages::contact_form))
                .route(web::post().to(pages::contact_submit)),
        )
        .service(web::resource(pages::CONTACT_SUCCESS_PATH).route(web::get().to(pages::contact_success)))
        .service(web::resource("/health/").route(web::get().to(system::health_check)));
}
