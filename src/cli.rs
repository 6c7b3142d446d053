// src/cli.rs
//! Command-line surface of the `notion-typed` binary.

use clap::{Parser, Subcommand};
use notion_typed::{HttpLoggingLevel, HttpProxy};
use serde_json::Value;

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false, global = true)]
    pub verbose: bool,

    /// HTTP diagnostics: none, info, headers, body or all
    #[arg(long, default_value = "none", global = true)]
    pub http_log: HttpLoggingLevel,

    /// Route every request through this HTTP proxy (host:port)
    #[arg(long, global = true)]
    pub proxy: Option<HttpProxy>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Retrieve a user by id
    User { id: String },

    /// Retrieve the bot user behind the token
    Me,

    /// List workspace users, one page at a time
    Users {
        /// Cursor returned by a previous call
        #[arg(long)]
        cursor: Option<String>,

        /// Results per page (at most 100)
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Retrieve a page by id or URL
    Page { id: String },

    /// Retrieve a database schema by id or URL
    Database { id: String },

    /// Query every page of a database
    Query {
        id: String,

        /// Filter object forwarded verbatim, as JSON
        #[arg(long, value_parser = parse_filter)]
        filter: Option<Value>,
    },
}

/// A query filter must be a JSON object.
fn parse_filter(raw: &str) -> Result<Value, String> {
    match serde_json::from_str(raw) {
        Ok(filter @ Value::Object(_)) => Ok(filter),
        Ok(_) => Err("expected a JSON object".to_string()),
        Err(e) => Err(format!("invalid JSON: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_options_after_subcommand() {
        let cli = CommandLineInput::try_parse_from([
            "notion-typed",
            "users",
            "--page-size",
            "10",
            "--proxy",
            "localhost:3128",
            "--http-log",
            "headers",
        ])
        .unwrap();

        assert_eq!(cli.http_log, HttpLoggingLevel::Headers);
        assert_eq!(cli.proxy.unwrap().port(), 3128);
        match cli.command {
            Command::Users { cursor, page_size } => {
                assert!(cursor.is_none());
                assert_eq!(page_size, Some(10));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_log_level() {
        let parsed = CommandLineInput::try_parse_from(["notion-typed", "--http-log", "loud", "me"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn filter_must_be_a_json_object() {
        let cli = CommandLineInput::try_parse_from([
            "notion-typed",
            "query",
            "d9824bdc84454327be8b5b47500af6ce",
            "--filter",
            r#"{"property":"Done","checkbox":{"equals":false}}"#,
        ])
        .unwrap();
        match cli.command {
            Command::Query { filter, .. } => {
                assert_eq!(filter.unwrap()["property"], "Done");
            }
            other => panic!("unexpected command: {other:?}"),
        }

        for rejected in ["[1, 2]", "\"Done\"", "{not json"] {
            let parsed = CommandLineInput::try_parse_from([
                "notion-typed",
                "query",
                "d9824bdc84454327be8b5b47500af6ce",
                "--filter",
                rejected,
            ]);
            assert!(parsed.is_err(), "{rejected} was accepted");
        }
    }
}
