//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod health;
mod posts;
mod present;
mod users;


use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login))
                .route("/logout", web::post().to(auth::logout))
                .route("/me", web::get().to(auth::me)),
        )
        .service(
            web::scope("/posts")
                .route("", web::get().to(posts::list))
                .route("", web::post().to(posts::create))
                .route("/{id}", web::get().to(posts::show))
                .route("/{id}", web::put().to(posts::update))
                .route("/{id}", web::delete().to(posts::delete))
                .route("/{id}/comments", web::get().to(comments::list_for_post))
                .route("/{id}/comments", web::post().to(comments::create)),
        )
        .service(
            web::scope("/users")
                .route("", web::get().to(users::list))
                .route("/{id}", web::get().to(users::show))
                .route("/{id}", web::put().to(users::update))
                .route("/{id}/posts", web::get().to(users::posts))
                .route("/{id}/comments", web::get().to(users::comments)),
        );
}
