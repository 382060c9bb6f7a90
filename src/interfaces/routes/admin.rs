use actix_web::web;

use crate::handlers::{auth, experiences, messages, palettes, projects, settings, skills};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(web::resource("/login/").route(web::post().to(auth::login)))
            .configure(palette_routes)
            .configure(project_routes)
            .configure(skill_routes)
            .configure(experience_routes)
            .configure(message_routes)
            .service(
                web::resource("/settings/")
                    .route(web::get().to(settings::get_settings))
                    .route(web::patch().to(settings::update_settings)),
            ),
    );
}

fn palette_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/palettes/")
            .route(web::get().to(palettes::list_palettes))
            .route(web::post().to(palettes::create_palette)),
    )
    .service(
        web::resource("/palettes/{id}/")
            .route(web::get().to(palettes::get_palette))
            .route(web::patch().to(palettes::update_palette))
            .route(web::delete().to(palettes::delete_palette)),
    )
    .service(web::resource("/palettes/{id}/activate/").route(web::post().to(palettes::activate_palette)));
}

fn project_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/projects/")
            .route(web::get().to(projects::list_projects))
            .route(web::post().to(projects::create_project)),
    )
    .service(
        web::resource("/projects/{id}/")
            .route(web::get().to(projects::get_project))
            .route(web::patch().to(projects::update_project))
            .route(web::delete().to(projects::delete_project)),
    );
}

fn skill_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/skills/")
            .route(web::get().to(skills::list_skills))
            .route(web::post().to(skills::create_skill)),
    )
    .service(
        web::resource("/skills/{id}/")
            .route(web::get().to(skills::get_skill))
            .route(web::patch().to(skills::update_skill))
            .route(web::delete().to(skills::delete_skill)),
    );
}

fn experience_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/experiences/")
            .route(web::get().to(experiences::list_experiences))
            .route(web::post().to(experiences::create_experience)),
    )
    .service(
        web::resource("/experiences/{id}/")
            .route(web::get().to(experiences::get_experience))
            .route(web::patch().to(experiences::update_experience))
            .route(web::delete().to(experiences::delete_experience)),
    );
}

fn message_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/messages/").route(web::get().to(messages::list_messages)))
        .service(
            web::resource("/messages/{id}/")
                .route(web::get().to(messages::get_message))
                .route(web::patch().to(messages::update_message)),
        );
}
