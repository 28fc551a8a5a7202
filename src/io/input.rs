use std::path::PathBuf;

use clap::Parser;

use crate::general::logging::LogConfig;
use crate::io::config::Config;
use crate::remote::osc_sender::{Destination, Protocol, DEFAULT_HOST, DEFAULT_PORT};

#[derive(Parser, Debug)]
#[command(name = "osc-send")]
#[command(about = "Send a single OSC message", long_about = None)]
pub struct Args {
    /// OSC address, e.g. /synth/freq
    #[arg(value_parser = clap::builder::NonEmptyStringValueParser::new())]
    pub path: String,

    /// Argument values, typed by inference unless --type-tags is given
    #[arg(allow_negative_numbers = true)]
    pub values: Vec<String>,

    /// Destination port [default: 31337]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Destination host [default: 127.0.0.1]
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Type tags, one per value (i f s T F N I t)
    #[arg(short, long)]
    pub type_tags: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Use the stream (TCP) transport
    #[arg(short = 'T', long)]
    pub tcp: bool,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    pub fn protocol(&self) -> Protocol {
        if self.tcp {
            Protocol::Tcp
        } else {
            Protocol::Udp
        }
    }

    pub fn destination(&self, config: &Config) -> Destination {
        Destination {
            host: self
                .host
                .clone()
                .or_else(|| config.host.clone())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: self.port.or(config.port).unwrap_or(DEFAULT_PORT),
        }
    }

    pub fn log_config(&self, config: &Config) -> LogConfig {
        LogConfig {
            verbose: self.verbose || config.verbose.unwrap_or(false),
            color: !self.no_color && config.color.unwrap_or(true),
        }
    }
}
