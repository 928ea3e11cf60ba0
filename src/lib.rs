//! Duckpipe - line-oriented query bridge over an embedded DuckDB database.
//!
//! The binary is meant to be spawned as a subprocess and driven over its
//! standard streams: it opens (or creates) `mydata.db`, seeds a sample table
//! exactly once, prints `READY`, and then answers each `QUERY:<sql>` input
//! line with exactly one output line — a single-line JSON array of row
//! objects on success, or `ERROR: <message>` on failure. The loop exits
//! normally when stdin closes.
//!
//! # Modules
//!
//! - [`app`] - the command loop over the standard streams
//! - [`bootstrap`] - one-time schema creation and seeding
//! - [`db`] - storage handle owning the engine connection
//! - [`encode`] - result set to single-line JSON
//! - [`error`] - error types for the crate
//! - [`protocol`] - command grammar for input lines
//! - [`value`] - dynamically-typed scalars at the engine boundary
//!
//! # Example
//!
//! ```no_run
//! use duckpipe::app::App;
//! use duckpipe::db::Storage;
//!
//! let storage = Storage::open_in_memory().unwrap();
//! duckpipe::bootstrap::run(&storage).unwrap();
//! App::new(storage)
//!     .serve(std::io::empty(), std::io::sink())
//!     .unwrap();
//! ```

pub mod app;
pub mod bootstrap;
pub mod db;
pub mod encode;
pub mod error;
pub mod protocol;
pub mod value;
