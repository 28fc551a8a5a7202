use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::debug;

use osc_send::general::logging::{init_tracing, print_error, LogConfig};
use osc_send::io::config::Config;
use osc_send::io::input::Args;
use osc_send::{assemble, OscSendError, Scheduler, SendJob, UdpSink};

fn main() -> ExitCode {
    let args = Args::parse();
    let fallback_log = LogConfig {
        verbose: args.verbose,
        color: !args.no_color,
    };
    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            print_error(&fallback_log, &err);
            return ExitCode::FAILURE;
        }
    };
    let log = args.log_config(&config);
    init_tracing(&log);

    match run(&args, &config, log) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&log, &err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, config: &Config, log: LogConfig) -> Result<(), OscSendError> {
    let message = assemble(&args.path, &args.values, args.type_tags.as_deref())?;
    let destination = args.destination(config);
    debug!("Assembled {} for {}", message, destination);

    let job = SendJob::new(message, destination, args.protocol(), log);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(job.run(Arc::new(UdpSink), &Scheduler::new()))?;
    Ok(())
}
