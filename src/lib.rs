pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod interaction;
pub mod models;
pub mod mutations;
pub mod notify;
pub mod query;
pub mod state;
pub mod status;
pub mod storage;
pub mod ui;
pub mod view;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::ItemStore;
