pub mod catalog;
pub mod config;
pub mod corpus;
pub mod game;
pub mod models;
pub mod plan;
pub mod server;

pub use config::AppConfig;
pub use corpus::CorpusStore;
pub use server::run_server;
