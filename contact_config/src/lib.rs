use std::{
    net::{IpAddr, SocketAddr},
    path::Path,
};

use anyhow::{ensure, Context};
use config::{File, FileFormat};
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    let sources = paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    parse(sources.iter().map(String::as_str))
}

fn parse<'a>(sources: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Config> {
    let config = sources
        .into_iter()
        .fold(config::Config::builder(), |builder, source| {
            builder.add_source(File::from_str(source, FileFormat::Toml))
        })
        .build()?
        .try_deserialize::<Config>()
        .context("Failed to load config")?;

    config.validate()?;
    Ok(config)
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub contact: ContactConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub address: SocketAddr,
    pub real_ip: Option<RealIpConfig>,
}

#[derive(Debug, Deserialize)]
pub struct RealIpConfig {
    pub header: String,
    pub set_from: IpAddr,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub processing_delay: Duration,
    pub fault_injection: Option<FaultInjectionConfig>,
}

#[derive(Debug, Deserialize)]
pub struct FaultInjectionConfig {
    pub probability: f64,
}

#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    pub url: Url,
    pub revert_after: Duration,
}

impl Config {
    fn validate(&self) -> anyhow::Result<()> {
        if let Some(FaultInjectionConfig { probability }) = self.contact.fault_injection {
            ensure!(
                (0.0..=1.0).contains(&probability),
                "contact.fault_injection.probability must be between 0 and 1, got {probability}"
            );
        }
        Ok(())
    }
}
