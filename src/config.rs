// src/config.rs
use crate::constants::{
    API_BASE_URL, ENV_API_BASE_URL, ENV_API_KEY, ENV_NOTION_VERSION, NOTION_VERSION,
};
use crate::error::AppError;
use crate::types::{ApiKey, ValidatedUrl};
use clap::{Parser, Subcommand};

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about = "Query and edit Notion databases, pages and blocks", long_about = None)]
pub struct CommandLineInput {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Query a database and print the matching pages
    Query {
        /// Database URL or ID
        database: String,

        /// Filter object as JSON
        #[arg(long)]
        filter: Option<String>,

        /// Sorts array as JSON
        #[arg(long)]
        sorts: Option<String>,

        /// Follow the cursor and print every result
        #[arg(long, default_value_t = false)]
        all: bool,
    },

    /// Print a page with its decoded properties
    Page {
        /// Page URL or ID
        page: String,
    },

    /// Update page properties
    Update {
        /// Page URL or ID
        page: String,

        /// `name=value`; a value that parses as JSON is sent as JSON, anything else as text
        #[arg(long = "set", value_name = "NAME=VALUE", required = true)]
        assignments: Vec<String>,
    },

    /// List a block's children
    Blocks {
        /// Block or page URL or ID
        block: String,
    },

    /// Append paragraphs under a block
    Append {
        /// Block or page URL or ID
        block: String,

        /// Paragraph text, one block per occurrence
        #[arg(long, required = true)]
        paragraph: Vec<String>,

        /// Insert after this child block
        #[arg(long)]
        after: Option<String>,
    },
}

/// Connection settings for the Notion API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: ApiKey,
    pub base_url: ValidatedUrl,
    pub notion_version: String,
}

impl ClientConfig {
    /// Configuration with the default base URL and API version.
    pub fn new(api_key: ApiKey) -> Result<Self, AppError> {
        Ok(Self {
            api_key,
            base_url: ValidatedUrl::parse(API_BASE_URL)?,
            notion_version: NOTION_VERSION.to_string(),
        })
    }

    /// Reads `NOTION_API_KEY`, plus the optional `NOTION_API_BASE_URL` and `NOTION_VERSION`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let api_key_str = lookup(ENV_API_KEY).ok_or_else(|| {
            AppError::MissingConfiguration(format!("{} environment variable not set", ENV_API_KEY))
        })?;
        let mut config = Self::new(ApiKey::new(api_key_str)?)?;

        if let Some(base_url) = lookup(ENV_API_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = ValidatedUrl::parse(base_url.trim())?;
        }
        if let Some(version) = lookup(ENV_NOTION_VERSION).filter(|v| !v.trim().is_empty()) {
            config.notion_version = version.trim().to_string();
        }

        Ok(config)
    }
}
