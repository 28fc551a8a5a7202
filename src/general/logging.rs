use std::fmt::Display;
use std::io::Write;
use std::net::SocketAddr;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing_subscriber::EnvFilter;

use crate::general::message::Message;

/// How chatty the process is, decided once at startup and passed around.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub verbose: bool,
    pub color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            verbose: false,
            color: true,
        }
    }
}

impl LogConfig {
    fn color_choice(&self) -> ColorChoice {
        if self.color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        }
    }

    fn default_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

/// Install the stderr tracing subscriber. `RUST_LOG` overrides the level.
pub fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log.default_filter()));
    // a subscriber may already be installed (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(log.color)
        .try_init();
}

/// Single diagnostic line on stderr, printed before a failing exit.
pub fn print_error(log: &LogConfig, err: &dyn Display) {
    let mut stderr = StandardStream::stderr(log.color_choice());
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_intense(true));
    let _ = write!(&mut stderr, "error:");
    let _ = stderr.reset();
    let _ = writeln!(&mut stderr, " {}", err);
}

/// Verbose-only report of what went out on the wire.
pub fn print_sent(log: &LogConfig, msg: &Message, bytes_sent: usize, target: SocketAddr) {
    if !log.verbose {
        return;
    }
    let mut stdout = StandardStream::stdout(log.color_choice());
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_intense(true));
    let _ = write!(&mut stdout, "[OSC]");
    let _ = stdout.reset();
    let _ = writeln!(&mut stdout, " Sent {} bytes to {}: {}", bytes_sent, target, msg);
}
