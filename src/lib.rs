pub mod clients;
pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod http;
pub mod schemas;

pub use engine::{Classification, ResponseEngine, classify_and_respond};
pub use schemas::ResponseDocument;
