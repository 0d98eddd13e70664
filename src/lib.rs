//! Japanese random phrase generator with a local history of everything it
//! has produced.
//!
//! A phrase is a prefix, a middle and a suffix drawn uniformly from a
//! read-only word database. Generated phrases are saved to a per-user SQLite
//! store where they can be listed, searched, favorited and removed.
//!
//! # Modules
//!
//! - [`config`]: configuration loading from TOML files and environment variables
//! - [`paths`]: where the word database and the user store live
//! - [`words`]: read-only access to the word database
//! - [`generator`]: phrase composition
//! - [`db`]: user store initialization and schema
//! - [`history`]: history and favorite repositories
//! - [`render`]: plain and table output
//! - [`count`]: resolving counts from positional arguments and flags
//! - [`download`]: fetching the word database

pub mod config;
pub mod count;
pub mod db;
pub mod download;
pub mod error;
pub mod generator;
pub mod history;
pub mod paths;
pub mod render;
pub mod words;
