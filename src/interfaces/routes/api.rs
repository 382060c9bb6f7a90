use actix_web::web;

use crate::handlers::api;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(web::resource("/palette/").route(web::get().to(api::active_palette)))
            .service(web::resource("/skills/").route(web::get().to(api::skills))),
    );
}
