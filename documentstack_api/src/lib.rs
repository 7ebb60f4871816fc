//! Client for the DocumentStack PDF generation API.
//!
//! ```no_run
//! use documentstack_api::{Client, Config, Context, GenerateRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(Config::new("your-api-key"))?;
//! let request = GenerateRequest::new()
//!     .with_data("name", "John Doe")
//!     .with_data("amount", 100)
//!     .with_filename("invoice");
//!
//! let result = client
//!     .generate(&Context::background(), "template-id", Some(&request))
//!     .await?;
//! std::fs::write("invoice.pdf", &result.pdf)?;
//! # Ok(())
//! # }
//! ```
mod client;
mod config;
mod context;
mod debug;
mod errors;
mod metadata;
pub mod types;
pub use self::client::Client;
pub use self::config::{Config, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use self::context::{CancelHandle, Context, ContextError};
pub use self::debug::{DebugEvent, DebugSink, TracingSink};
pub use self::errors::{classify_error_response, ApiError, Error, ErrorCategory};
pub use self::types::{GenerateOptions, GenerateRequest, GenerateResponse, TemplateData};
