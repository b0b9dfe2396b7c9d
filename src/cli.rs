//! Command-line interface definitions for the news summarizer.
//!
//! Without a subcommand the dashboard is served. Options that matter for
//! deployment can also come from environment variables.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the news summarizer.
///
/// # Examples
///
/// ```sh
/// # Serve the dashboard on the configured address
/// news_summarizer
///
/// # Serve on another address
/// news_summarizer serve --bind 0.0.0.0:8080
///
/// # One pass printed as Markdown, with a JSON snapshot
/// news_summarizer pass -t "Artificial Intelligence" -q 10 -j ./json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to config.yaml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Address the dashboard listens on, overriding the configuration file
    #[arg(long, global = true, env = "NEWS_SUMMARIZER_BIND")]
    pub bind: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Serve the dashboard
    Serve,
    /// Run one pass for a topic and print the result
    Pass {
        /// Feed topic, or "Research Papers"
        #[arg(short, long, default_value = "Technology")]
        topic: String,

        /// Number of articles, clamped to 5..=25
        #[arg(short, long)]
        quantity: Option<usize>,

        /// Print JSON instead of Markdown
        #[arg(long)]
        json: bool,

        /// Also write a dated JSON snapshot under this directory
        #[arg(short, long)]
        json_output_dir: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_serving() {
        let cli = Cli::parse_from(["news_summarizer"]);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_pass_parsing() {
        let cli = Cli::parse_from([
            "news_summarizer",
            "pass",
            "--topic",
            "Artificial Intelligence",
            "--quantity",
            "10",
            "--json",
            "--json-output-dir",
            "./json",
        ]);

        assert_eq!(
            cli.command,
            Some(Command::Pass {
                topic: "Artificial Intelligence".to_string(),
                quantity: Some(10),
                json: true,
                json_output_dir: Some(PathBuf::from("./json")),
            })
        );
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "news_summarizer",
            "pass",
            "-c",
            "/etc/news.yaml",
            "-t",
            "Science",
            "-j",
            "/tmp/json",
        ]);

        assert_eq!(cli.config, Some(PathBuf::from("/etc/news.yaml")));
        let Some(Command::Pass {
            topic,
            quantity,
            json,
            json_output_dir,
        }) = cli.command
        else {
            panic!("expected pass subcommand");
        };
        assert_eq!(topic, "Science");
        assert_eq!(quantity, None);
        assert!(!json);
        assert_eq!(json_output_dir, Some(PathBuf::from("/tmp/json")));
    }

    #[test]
    fn test_cli_serve_bind() {
        let cli = Cli::parse_from(["news_summarizer", "serve", "--bind", "0.0.0.0:8080"]);
        assert_eq!(cli.command, Some(Command::Serve));
        assert_eq!(cli.bind.as_deref(), Some("0.0.0.0:8080"));
    }
}
