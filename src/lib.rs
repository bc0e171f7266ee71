pub mod app;
pub mod autofit;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod quote;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use clock::Clock;
pub use config::Config;
pub use quote::QuoteClient;
pub use state::AppState;
pub use storage::{load_data, resolve_data_path};
