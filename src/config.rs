//! Runtime configuration assembled from CLI arguments and the environment

use std::env::var;

use anyhow::Context;

/// Environment variable holding the stop feed endpoint.
pub const ENDPOINT_ENV: &str = "SUNSPOT_ENDPOINT";

#[derive(Clone, Debug)]
pub struct Config {
    /// Full URL of the stop list feed.
    pub endpoint_url: String,
}

impl Config {
    /// An `--endpoint` argument wins over the environment.
    pub fn from_sources(cli_endpoint: Option<String>) -> Result<Config, anyhow::Error> {
        let endpoint_url = match cli_endpoint {
            Some(url) => url,
            None => var(ENDPOINT_ENV)
                .with_context(|| format!("Couldn't get {ENDPOINT_ENV} env variable"))?,
        };

        Ok(Config { endpoint_url })
    }
}
