//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Post routes. The static "/extended" segment is registered
            // before the "{post_id}" catch-all so it wins the match.
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/extended", web::get().to(posts::list_posts_extended))
                    .route("/{post_id}/extended", web::get().to(posts::get_post_extended))
                    .route("/{post_id}", web::get().to(posts::get_post))
                    .route("/{post_id}", web::delete().to(posts::delete_post))
                    .route("/{post_id}/comments", web::post().to(posts::create_comment))
                    .route(
                        "/{post_id}/comments/{comment_id}",
                        web::get().to(posts::get_comment),
                    )
                    .route(
                        "/{post_id}/comments/{comment_id}",
                        web::delete().to(posts::delete_comment),
                    )
                    .route("/{post_id}/likes", web::post().to(posts::like_post))
                    .route("/{post_id}/likes", web::delete().to(posts::dislike_post)),
            ),
    );
}
