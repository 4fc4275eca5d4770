mod handlers;
mod routes;

pub use routes::PaginationParams;

use crate::config::Config;
use crate::db::Database;
use anyhow::Result;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Start the API server
pub async fn start_api_server(db: Arc<Database>) -> Result<()> {
    let config = Config::get();

    // Set up CORS
    let cors = if config.api.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::permissive()
    };

    // Create router with all routes
    let app = Router::new()
        // General routes
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::get_metrics))
        // Profile routes
        .route("/api/profiles/:id", get(handlers::profiles::get_profile))
        .route(
            "/api/profiles/by-username/:username",
            get(handlers::profiles::get_profile_by_username),
        )
        .route("/api/profiles/me", put(handlers::profiles::update_my_profile))
        .route(
            "/api/profiles/:id/posts",
            get(handlers::profiles::get_profile_posts),
        )
        // Social graph routes
        .route(
            "/api/profiles/:id/follow",
            post(handlers::social_graph::follow_user)
                .delete(handlers::social_graph::unfollow_user),
        )
        .route(
            "/api/profiles/:id/following",
            get(handlers::social_graph::get_following),
        )
        .route(
            "/api/profiles/:id/followers",
            get(handlers::social_graph::get_followers),
        )
        .route(
            "/api/profiles/:id/follow-state",
            get(handlers::social_graph::check_following),
        )
        .route(
            "/api/profiles/:id/follow-stats",
            get(handlers::social_graph::get_follow_stats),
        )
        // Post routes
        .route(
            "/api/posts",
            get(handlers::posts::list_posts).post(handlers::posts::create_post),
        )
        .route("/api/posts/featured", get(handlers::posts::get_featured_post))
        .route(
            "/api/posts/by-face-shape/:shape",
            get(handlers::posts::list_posts_by_face_shape),
        )
        .route("/api/posts/:id", get(handlers::posts::get_post))
        .route("/api/posts/:id/view", post(handlers::posts::increment_views))
        // Engagement routes
        .route("/api/posts/:id/like", post(handlers::engagement::toggle_like))
        .route(
            "/api/posts/:id/favorite",
            post(handlers::engagement::toggle_favorite),
        )
        .route(
            "/api/posts/:id/engagement",
            get(handlers::engagement::engagement_status),
        )
        .route("/api/me/favorites", get(handlers::engagement::list_my_favorites))
        // Comment routes
        .route(
            "/api/posts/:id/comments",
            get(handlers::comments::list_comments).post(handlers::comments::create_comment),
        )
        .route(
            "/api/comments/:id",
            axum::routing::delete(handlers::comments::delete_comment),
        )
        .route(
            "/api/comments/:id/replies",
            get(handlers::comments::list_replies),
        )
        .route(
            "/api/comments/:id/like",
            post(handlers::comments::toggle_comment_like),
        )
        // Product routes
        .route("/api/products", get(handlers::products::list_products))
        .route("/api/products/:id", get(handlers::products::get_product))
        .route(
            "/api/products/:id/reviews",
            get(handlers::reviews::list_reviews).post(handlers::reviews::create_review),
        )
        // Add state and middleware
        .with_state(db.get_pool().clone())
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Get bind address
    let addr = format!("{}:{}", config.api.host, config.api.port).parse::<SocketAddr>()?;

    // Start server
    info!("Starting API server on {}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
