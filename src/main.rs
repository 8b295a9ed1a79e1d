// src/main.rs
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notionapi::config::{Command, CommandLineInput};
use notionapi::{
    AppError, BlockId, BlockValue, ClientConfig, DatabaseId, DatabaseQuery, NewBlock, NotionApi,
    PageId, PropertyUpdate,
};
use serde::Serialize;
use serde_json::Value;
use std::fs;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notionapi.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    // stderr keeps stdout clean for JSON output
    let console_appender = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("console", Box::new(console_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Splits `name=value` on the first `=`. The value is taken as JSON when it parses,
/// otherwise as plain text.
fn parse_assignment(assignment: &str) -> Result<(String, PropertyUpdate), AppError> {
    let (name, raw) = assignment.split_once('=').ok_or_else(|| {
        AppError::InvalidInput(format!(
            "expected NAME=VALUE, got '{}'",
            assignment
        ))
    })?;
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "missing property name in '{}'",
            assignment
        )));
    }
    let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((name.to_string(), PropertyUpdate::from(value)))
}

fn parse_json_arg(name: &str, raw: Option<&str>) -> Result<Option<Value>, AppError> {
    raw.map(|text| {
        serde_json::from_str(text)
            .map_err(|e| AppError::InvalidInput(format!("--{} is not valid JSON: {}", name, e)))
    })
    .transpose()
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(api: &NotionApi, command: Command) -> Result<(), AppError> {
    match command {
        Command::Query {
            database,
            filter,
            sorts,
            all,
        } => {
            let database = DatabaseId::parse(&database)?;
            let mut query = DatabaseQuery::default();
            if let Some(filter) = parse_json_arg("filter", filter.as_deref())? {
                query = query.with_filter(filter);
            }
            if let Some(sorts) = parse_json_arg("sorts", sorts.as_deref())? {
                query = query.with_sorts(sorts);
            }

            if all {
                let pages = api.query_database_all(&database, &query).await?;
                log::info!("Query returned {} pages", pages.len());
                print_json(&pages)
            } else {
                print_json(&api.query_database(&database, &query).await?)
            }
        }
        Command::Page { page } => {
            let page = PageId::parse(&page)?;
            print_json(&api.retrieve_page(&page).await?)
        }
        Command::Update { page, assignments } => {
            let page = PageId::parse(&page)?;
            let updates = assignments
                .iter()
                .map(|a| parse_assignment(a))
                .collect::<Result<Vec<_>, _>>()?;
            print_json(&api.update_page_properties(&page, updates).await?)
        }
        Command::Blocks { block } => {
            let block = BlockId::parse(&block)?;
            print_json(&api.retrieve_all_block_children(&block).await?)
        }
        Command::Append {
            block,
            paragraph,
            after,
        } => {
            let block = BlockId::parse(&block)?;
            let after = after.as_deref().map(BlockId::parse).transpose()?;
            let children: Vec<NewBlock> = paragraph
                .iter()
                .map(|text| NewBlock::from(BlockValue::paragraph(text)))
                .collect();
            print_json(
                &api.append_block_children(&block, &children, after.as_ref())
                    .await?,
            )
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = ClientConfig::from_env()?;
    let api = NotionApi::from_config(&config)?;

    run(&api, cli.command).await?;

    Ok(())
}
