//! Command line and environment configuration.

use clap::Parser;
use libreviews_search::{DEFAULT_INDEX, SearchConfig};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "libreviews-web")]
#[command(about = "lib.reviews web frontend")]
pub struct Config {
    /// HTTP port to listen on
    #[arg(short, long, env = "LIBREVIEWS_PORT", default_value = "8080")]
    pub port: u16,

    /// Address to bind the HTTP listener to
    #[arg(long, env = "LIBREVIEWS_BIND", default_value = "127.0.0.1")]
    pub bind: IpAddr,

    /// Base URL of the search service
    #[arg(long, env = "LIBREVIEWS_SEARCH_URL", default_value = "http://localhost:9200")]
    pub search_url: String,

    /// Name of the search index
    #[arg(long, env = "LIBREVIEWS_SEARCH_INDEX", default_value = DEFAULT_INDEX)]
    pub search_index: String,

    /// Search request timeout in seconds
    #[arg(long, env = "LIBREVIEWS_SEARCH_TIMEOUT", default_value = "10")]
    pub search_timeout: u64,

    /// JSON file with users, things and reviews to load at startup
    #[arg(long, env = "LIBREVIEWS_SEED")]
    pub seed: Option<PathBuf>,

    /// Create the search index and its mappings before serving
    #[arg(long, env = "LIBREVIEWS_CREATE_INDICES")]
    pub create_indices: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            base_url: self.search_url.clone(),
            index: self.search_index.clone(),
            timeout_secs: self.search_timeout,
        }
    }

    /// Default filter directive when `RUST_LOG` is unset.
    pub fn log_directive(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
