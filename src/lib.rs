//! # Image Vault - Content-Addressed Image Uploads
//!
//! An upload service that names every stored image by the SHA-256 digest of
//! its bytes, writes each distinct image exactly once and serves it back
//! under `/files/<digest><ext>`.
//!
//! ## Architecture Layers
//!
//! - **Domain**: Upload payload, object names and the admission policy
//! - **Application**: Use cases, the object store port and URL resolution
//! - **Infrastructure**: Filesystem store and content hasher
//! - **API**: HTTP handlers and middleware
//!
//! ## Key Features
//!
//! - Exclusive-create publish: an existing object is never overwritten
//! - Deduplication reported as a normal outcome (`dedup: true`)
//! - Type and size checks before any hashing or disk I/O
//! - Public URLs resolved from configuration or proxy headers
//!
//! ## Example Usage
//!
//! ```no_run
//! use image_vault::{create_router, ApplicationBuilder, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = ApplicationBuilder::new(Config::from_env())
//!     .with_storage()
//!     .await?
//!     .build()?;
//! let app = create_router(state);
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use api::errors as api_errors;
pub use api::{create_router, router::AppState};
pub use application::builder::ApplicationBuilder;
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};
