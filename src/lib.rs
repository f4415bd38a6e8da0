/// Blog Service Library
///
/// A small social blogging backend: users publish posts (optionally
/// tagged to a group, optionally with an image), comment on posts,
/// and follow authors for a personalized feed.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and the route table
/// - `models`: row types and joined view shapes
/// - `services`: business logic (feeds, follows, posts, comments)
/// - `db`: repository functions over PostgreSQL
/// - `forms`: request-input validators
/// - `pagination`: fixed-size page assembly and clamping
/// - `media`: image sniffing and file-store persistence
/// - `cache`: the 20-second full-page cache for the global feed
/// - `middleware`: session resolution and the authentication gate
/// - `error`: error types and HTTP mapping
/// - `config`: configuration management
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod media;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
