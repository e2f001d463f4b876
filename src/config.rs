//! Service configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is read first, if present.
//!
//! - `LISTEN_ADDR`: socket address to bind (default: `0.0.0.0:8080`)
//! - `LOG_FORMAT`: `text` or `json` (default: `text`)
//! - `RUST_LOG`: tracing filter directives (default: `info`)

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::error::Error;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Shape of the log output.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err("expected `text` or `json`".to_owned()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub log_format: LogFormat,
}

impl Config {
    /// Reads `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Self, Error> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let listen_addr = parse("LISTEN_ADDR", lookup("LISTEN_ADDR"), DEFAULT_LISTEN_ADDR)?;
        let log_format = parse("LOG_FORMAT", lookup("LOG_FORMAT"), "text")?;
        Ok(Self { listen_addr, log_format })
    }
}

fn parse<T>(key: &'static str, value: Option<String>, default: &str) -> Result<T, Error>
where
    T: FromStr,
    T::Err: ToString,
{
    let value = value.unwrap_or_else(|| default.to_owned());
    match value.trim().parse::<T>() {
        Ok(parsed) => Ok(parsed),
        Err(e) => Err(Error::Config { key, reason: e.to_string(), value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, Error> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.listen_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(cfg.log_format, LogFormat::Text);
    }

    #[test]
    fn overrides() {
        let cfg = config(&[("LISTEN_ADDR", "127.0.0.1:3000"), ("LOG_FORMAT", "JSON")]).unwrap();
        assert_eq!(cfg.listen_addr.port(), 3000);
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_values_name_the_key() {
        let err = config(&[("LISTEN_ADDR", "not-an-addr")]).unwrap_err();
        assert!(matches!(err, Error::Config { key: "LISTEN_ADDR", .. }));
        assert!(err.to_string().contains("not-an-addr"));

        let err = config(&[("LOG_FORMAT", "xml")]).unwrap_err();
        assert!(matches!(err, Error::Config { key: "LOG_FORMAT", .. }));
    }
}
