pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod handler;
pub mod model;
pub mod page;
pub mod probe;
pub mod route;
pub mod schema;

pub use config::Config;
pub use db::TodoStore;
pub use route::create_router;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Struct representing the application state
pub struct AppState {
    pub store: TodoStore,
}
