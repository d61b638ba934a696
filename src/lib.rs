pub mod addresses;
pub mod api;
pub mod cli;
pub mod config;
pub mod controller;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod node;
pub mod params;
pub mod server;
pub mod tasks;
pub mod transactions;
pub mod types;

pub use errors::{ApiError, AppError};
