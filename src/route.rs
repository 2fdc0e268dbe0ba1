use std::sync::Arc;

use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handler::*, AppState};

pub fn create_router(app_state: Arc<AppState>, cors_origin: Option<HeaderValue>) -> Router {
    let api = Router::new()
        .route("/todos", get(get_todos).post(create_todo))
        .route(
            "/todos/:id",
            get(get_todo).patch(update_todo).delete(delete_todo),
        );

    let mut app = Router::new()
        .route("/", get(index))
        .route("/add", post(add_todo))
        .route("/complete/:id", get(complete_todo))
        .route("/delete/:id", get(remove_todo))
        .route("/health", get(health_checker_handler))
        .nest("/api", api)
        .with_state(app_state);

    if let Some(origin) = cors_origin {
        let cors = CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
            .allow_headers([ACCEPT, CONTENT_TYPE]);
        app = app.layer(cors);
    }

    app.layer(TraceLayer::new_for_http())
}
