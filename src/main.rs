// src/main.rs

mod cli;

use crate::cli::{Command, CommandLineInput};
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_typed::convert::{
    ApiConverter, DatabaseConverter, PageConverter, ResultPageConverter, UserConverter,
};
use notion_typed::{
    ClientConfiguration, DatabaseId, DatabaseQuery, NotionClient, PageId, Pagination, UserId,
};
use serde_json::Value;
use std::fs;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_typed.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    // stdout carries the command's JSON output; diagnostics go to stderr.
    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Builds the client configuration from the environment and global flags.
fn resolve_configuration(cli: &CommandLineInput) -> anyhow::Result<ClientConfiguration> {
    let mut builder = ClientConfiguration::from_env()?.logging_level(cli.http_log);
    if let Some(proxy) = &cli.proxy {
        builder = builder.http_proxy(proxy.clone());
    }
    Ok(builder.build()?)
}

/// Runs one command and returns its result re-encoded as wire JSON.
async fn run(client: &NotionClient, command: Command) -> anyhow::Result<Value> {
    let value = match command {
        Command::User { id } => {
            let id = UserId::parse(&id)?;
            UserConverter::encode_value(&client.users().get_user(&id).await?)?
        }
        Command::Me => UserConverter::encode_value(&client.users().me().await?)?,
        Command::Users { cursor, page_size } => {
            let pagination = Pagination {
                start_cursor: cursor,
                page_size,
            };
            let page = client.users().list_users(&pagination).await?;
            ResultPageConverter::<UserConverter>::encode_value(&page)?
        }
        Command::Page { id } => {
            let id = PageId::parse(&id)?;
            PageConverter::encode_value(&client.pages().get_page(&id).await?)?
        }
        Command::Database { id } => {
            let id = DatabaseId::parse(&id)?;
            DatabaseConverter::encode_value(&client.databases().get_database(&id).await?)?
        }
        Command::Query { id, filter } => {
            let id = DatabaseId::parse(&id)?;
            let query = DatabaseQuery {
                filter,
                ..DatabaseQuery::default()
            };
            let pages = client.databases().query_all(&id, &query).await?;
            let encoded = pages
                .iter()
                .map(PageConverter::encode_value)
                .collect::<Result<Vec<_>, _>>()?;
            Value::Array(encoded)
        }
    };
    Ok(value)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let configuration = resolve_configuration(&cli)?;
    let client = NotionClient::new(configuration);

    let result = run(&client, cli.command).await;
    client.close();

    println!("{}", serde_json::to_string_pretty(&result?)?);
    Ok(())
}
