use thiserror::Error;

mod colors;
mod domain_types;
mod ids;
mod properties;
mod rich_text;
mod values;

pub use colors::*;
pub use domain_types::*;
pub use ids::*;
pub use properties::*;
pub use rich_text::*;
pub use values::*;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid Notion ID format: {0}")]
    InvalidId(String),

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },
}
