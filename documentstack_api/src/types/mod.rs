//! Request and response types for the generate endpoint.

mod request;
mod response;

pub use request::{GenerateOptions, GenerateRequest, TemplateData};
pub use response::GenerateResponse;
