//! Yoga Master - course marketplace REST backend
//!
//! Students browse and buy yoga classes, instructors publish them and
//! administrators moderate classes and instructor applications.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and reporting pipelines
//! - **services**: Application use cases, including the checkout transaction
//! - **infra**: Database, repositories, unit of work and payment gateway
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{User, UserRole};
pub use errors::{AppError, AppResult};
