//! Command-line interface definitions for Cursos Gratuitos.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option can be provided via command-line flag or environment variable.

use crate::scrapers::fetch::DEFAULT_TIMEOUT;
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;

/// Command-line arguments for the Cursos Gratuitos application.
///
/// # Examples
///
/// ```sh
/// # Serve the scraper API on the default address
/// cursos_gratuitos serve
///
/// # Collect one platform and push it to a spreadsheet
/// SPREADSHEET_ID=1abc GOOGLE_SHEETS_TOKEN=ya29... cursos_gratuitos collect ciee
///
/// # Run the boilerplate example service
/// cursos_gratuitos example --bind 127.0.0.1:8080
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Command,
}

/// Settings shared by the collection commands.
#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// Directory for the CSV files
    #[arg(long, global = true, env = "DATA_DIR", default_value = "data")]
    pub data_dir: String,

    /// Google spreadsheet receiving one tab per platform
    #[arg(long, global = true, env = "SPREADSHEET_ID")]
    pub spreadsheet_id: Option<String>,

    /// OAuth 2 access token with the spreadsheets scope
    #[arg(long, global = true, env = "GOOGLE_SHEETS_TOKEN", hide_env_values = true)]
    pub sheets_token: Option<String>,

    /// Timeout for each listing download, in seconds
    #[arg(long, global = true, env = "FETCH_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the course collection API
    Serve {
        #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:5000")]
        bind: SocketAddr,
    },
    /// Collect once and exit
    Collect {
        /// Platform route or slug (google-atelie, senai, gov-br, ciee), or `all`
        platform: String,
    },
    /// Serve the boilerplate example API
    Example {
        #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:5000")]
        bind: SocketAddr,
    },
}
