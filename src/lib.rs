//! # AlchemyAPI client
//!
//! A client for the AlchemyAPI text analysis web service. The API exposes a
//! family of named analyses (sentiment, entities, keywords, concepts,
//! relations, language detection, text extraction, taxonomy and more), each
//! accepting its input as plain text, a URL or raw HTML.
//!
//! The crate is a thin binding: a data-driven endpoint table, one form-POST
//! dispatch path, and a named method per analysis. Responses come back as
//! open JSON mappings ([`AnalysisResult`]) because the service defines no
//! schema beyond its `status` envelope.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use alchemyapi::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AlchemyClient::builder()
//!         .api_key("your-api-key")
//!         .build()?;
//!
//!     let result = client
//!         .sentiment("text", "Rust makes network clients pleasant to write", None)
//!         .await?;
//!     println!("{:?}", result.get("docSentiment"));
//!
//!     // Per-call options ride along as extra form fields.
//!     let opts = RequestOptions::new().with("maxRetrieve", "10");
//!     let entities = client
//!         .entities("url", "https://www.example.com/article", Some(opts))
//!         .await?;
//!     println!("{:?}", entities.get("entities"));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Unknown (action, flavor) combinations and missing required parameters
//! fail locally, before any network traffic. An API response with
//! `status == "ERROR"` becomes [`AlchemyError::ApiError`] that still carries
//! the decoded body. Nothing is retried and no error is swallowed.

#![deny(unsafe_code)]

pub mod builder;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod types;

pub use builder::AlchemyBuilder;
pub use client::{AlchemyClient, DEFAULT_BASE_URL};
pub use endpoints::EndpointTable;
pub use error::AlchemyError;
pub use types::{AnalysisResult, RequestOptions};

/// Commonly used imports.
pub mod prelude {
    pub use crate::builder::AlchemyBuilder;
    pub use crate::client::{AlchemyClient, DEFAULT_BASE_URL};
    pub use crate::endpoints::EndpointTable;
    pub use crate::error::AlchemyError;
    pub use crate::types::{AnalysisResult, RequestOptions};
}
