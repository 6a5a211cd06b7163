/// Content Service Library
///
/// Handles posts, votes, and the home feed for the driftboard platform.
/// Authentication lives upstream; every operation here takes the caller's
/// user id as an explicit argument.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Data structures for posts and votes
/// - `services`: Business logic layer
/// - `db`: Database access layer and repositories
/// - `middleware`: Request identity extraction
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
