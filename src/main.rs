// src/main.rs

//! Campus Guide CLI
//!
//! Local harness around the guide core: run searches, open facility
//! details, print the navigation menu, export the keyword index, and
//! validate the content files.

use std::collections::HashMap;
use std::fs;

use clap::{Parser, Subcommand};

use campus_guide::app::{GuideApp, SearchOutput};
use campus_guide::config::Config;
use campus_guide::error::Result;
use campus_guide::source::LocalContentSource;

#[derive(Parser, Debug)]
#[command(
    name = "campus-guide",
    version = "1.0.0",
    about = "Campus guide search and navigation core"
)]

/// CLI Arguments
struct Cli {
    #[arg(short, long, default_value = "data/config.toml")]
    config: String,

    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

/// CLI Commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Search the loaded corpus and print the rendered fragments
    Search {
        query: String,
        /// Override the persisted campus selection
        #[arg(long)]
        campus: Option<String>,
    },
    /// Show a facility detail view
    Detail {
        /// Facility kind: dormitory or canteen
        kind: String,
        /// Facility id
        key: String,
    },
    /// Print the navigation menu markup
    Nav,
    /// Export the keyword index
    Index {
        /// Output file
        #[arg(short, long, default_value = "index.json")]
        output: String,
    },
    /// Validate configuration and content files
    Validate,
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config);

    let level = if cli.quiet {
        "error".to_string()
    } else {
        config.logging.level.clone()
    };
    env_logger::Builder::new().parse_filters(&level).init();

    let source = LocalContentSource::new(config.paths.guide_path(), config.paths.campus_path());
    let mut app = GuideApp::boot(config, &source).await;

    match cli.command {
        Command::Search { query, campus } => {
            if let Some(campus) = campus {
                app.select_campus(&campus)?;
            }
            match app.handle_search_input(&query) {
                SearchOutput::Hidden => log::info!("Empty query; live panel stays hidden"),
                SearchOutput::Results(markup) => println!("{markup}"),
            }
        }
        Command::Detail { kind, key } => {
            let mut attrs = HashMap::new();
            attrs.insert("is-detail".to_string(), "true".to_string());
            attrs.insert("detail-type".to_string(), kind);
            attrs.insert("detail-key".to_string(), key);
            for effect in app.handle_result_click(&attrs) {
                println!("{effect:?}");
            }
        }
        Command::Nav => println!("{}", app.menu()),
        Command::Index { output } => {
            let index = app.token_index();
            fs::write(&output, serde_json::to_vec_pretty(index)?)?;
            log::info!(
                "Keyword index: {} tokens over {} documents written to {}",
                index.token_count,
                index.doc_count,
                output
            );
        }
        Command::Validate => {
            app.validate()?;
            log::info!("Configuration and content files are valid");
            println!("OK");
        }
    }

    Ok(())
}
