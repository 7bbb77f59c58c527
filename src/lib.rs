pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod query;
pub mod state;
pub mod stats;
pub mod store;

pub use app::build_router;
