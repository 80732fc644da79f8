//! Runtime settings, from command-line flags or the environment.

use clap::builder::RangedU64ValueParser;
use clap::Parser;
use std::net::SocketAddr;

pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

#[derive(Parser, Debug, Clone)]
#[command(name = "composite-content")]
#[command(about = "Composite template import and rendering service", long_about = None)]
pub struct ContentConfig {
    /// Address the HTTP server listens on
    #[arg(long, env = "CONTENT_BIND", default_value = "127.0.0.1:8282")]
    pub bind: SocketAddr,

    /// Request buffer of every factory actor (at least 1)
    #[arg(
        long,
        env = "CONTENT_CHANNEL_CAPACITY",
        default_value_t = DEFAULT_CHANNEL_CAPACITY,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub channel_capacity: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ContentConfig::parse_from(["composite-content"]);
        assert_eq!(config.bind, "127.0.0.1:8282".parse::<SocketAddr>().unwrap());
        assert_eq!(config.channel_capacity, DEFAULT_CHANNEL_CAPACITY);
    }

    #[test]
    fn test_flags() {
        let config = ContentConfig::parse_from([
            "composite-content",
            "--bind",
            "0.0.0.0:9000",
            "--channel-capacity",
            "8",
        ]);
        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.channel_capacity, 8);
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let result = ContentConfig::try_parse_from([
            "composite-content",
            "--channel-capacity",
            "0",
        ]);
        assert!(result.is_err());
    }
}
