//! RTD HAT CLI
//!
//! A command-line interface for the eight channel RTD data acquisition HAT
//! of the Raspberry Pi, talking to the boards over I2C.
//!
//! This tool allows users to:
//! - Read temperatures and resistances of every RTD channel.
//! - Calibrate channels and reset their calibration.
//! - Read and set LED modes, LED thresholds, sensor types and the sample switch count.
//! - Configure and reload the hardware watchdog.
//! - List the boards attached to the bus.
//!
//! Run `rtd -h` for the list of commands.

use flexi_logger::{Logger, LoggerHandle};
use log::*;
use rtd_lib::i2c::LinuxI2c;
use std::panic;
use std::process::ExitCode;

mod commandline;
mod config;

fn logging_init(loglevel: LevelFilter) -> Option<LoggerHandle> {
    let log_handle = match Logger::try_with_env_or_str(loglevel.as_str()).and_then(|l| l.start()) {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Cannot init logging: {err}");
            None
        }
    };

    panic::set_hook(Box::new(|panic_info| {
        let (filename, line, column) = panic_info
            .location()
            .map(|loc| (loc.file(), loc.line(), loc.column()))
            .unwrap_or(("<unknown_file>", 0, 0));

        let cause_str = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            *s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.as_str()
        } else {
            "<unknown_panic_cause>"
        };

        error!(
            target: "panic",
            "Thread '{}' panicked at '{}': {}:{} - Cause: {}",
            std::thread::current().name().unwrap_or("<unnamed>"),
            filename,
            line,
            column,
            cause_str
        );
    }));
    log_handle
}

fn run(config: &config::Config) -> Result<(), commandline::DispatchError> {
    let args = commandline::collect_args(std::env::args_os())?;
    let mut transport = LinuxI2c::new(config.i2c_bus);
    let mut stdout = std::io::stdout().lock();
    let mut session = commandline::Session {
        transport: &mut transport,
        out: &mut stdout,
    };
    commandline::dispatch(&args, &mut session)
}

fn main() -> ExitCode {
    let config = match config::get_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err:?}");
            return ExitCode::FAILURE;
        }
    };

    let _log_handle = logging_init(config.log_level());
    debug!("Config: {config:?}");

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let commandline::DispatchError::Failed(cause) = &err {
                eprintln!("Error: {cause:?}");
            }
            ExitCode::from(err.exit_code())
        }
    }
}
