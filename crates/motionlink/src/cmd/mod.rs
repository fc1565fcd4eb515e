use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Subcommand, ValueEnum};
use motionlink_frame::Mode;

use crate::exit::{CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod drive;
pub mod home;
pub mod monitor;
pub mod ports;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List serial ports known to the operating system.
    Ports(PortsArgs),
    /// Print inbound telemetry lines from a platform (receive-only).
    Monitor(MonitorArgs),
    /// Stream axis values to a platform at the output cadence.
    Drive(DriveArgs),
    /// Home the platform, hold it, then close.
    Home(HomeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Ports(args) => ports::run(args, format),
        Command::Monitor(args) => monitor::run(args, format),
        Command::Drive(args) => drive::run(args, format),
        Command::Home(args) => home::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Serial settings shared by every command that opens a port.
#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Serial port identifier, e.g. /dev/ttyUSB0 or COM12.
    #[arg(long, short = 'p', env = "MOTIONLINK_PORT")]
    pub port: String,
    /// Baud rate.
    #[arg(long, short = 'b', env = "MOTIONLINK_BAUD", default_value_t = 9600)]
    pub baud: u32,
}

/// Wire representation for outbound axis values.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModeArg {
    /// Six unsigned bytes per frame, home at 128.
    Byte,
    /// Six little-endian f32 values per frame, home at 0.0.
    Float,
}

impl ModeArg {
    pub fn as_mode(self) -> Mode {
        match self {
            ModeArg::Byte => Mode::EightBit,
            ModeArg::Float => Mode::Float32,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct PortsArgs {}

#[derive(Args, Debug)]
pub struct MonitorArgs {
    #[command(flatten)]
    pub link: LinkArgs,
    /// Exit after printing N lines.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct DriveArgs {
    #[command(flatten)]
    pub link: LinkArgs,
    /// Value representation.
    #[arg(long, value_enum, default_value = "float")]
    pub mode: ModeArg,
    /// Six comma-separated axis values [sway,surge,heave,pitch,roll,yaw].
    /// Defaults to the homed attitude.
    #[arg(long, value_delimiter = ',')]
    pub axes: Option<Vec<String>>,
    /// Output cadence (e.g. 20ms).
    #[arg(long, default_value = "20ms")]
    pub interval: String,
    /// How long to stream before closing; omit to run until Ctrl-C.
    #[arg(long)]
    pub duration: Option<String>,
    /// Bound on queued messages per direction.
    #[arg(long, default_value_t = 100)]
    pub capacity: usize,
}

#[derive(Args, Debug)]
pub struct HomeArgs {
    #[command(flatten)]
    pub link: LinkArgs,
    /// Value representation.
    #[arg(long, value_enum, default_value = "float")]
    pub mode: ModeArg,
    /// How long to hold the homed attitude before closing.
    #[arg(long, default_value = "500ms")]
    pub settle: String,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build information.
    #[arg(long)]
    pub extended: bool,
}

pub(crate) fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(USAGE, "duration must not be empty"));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number
        .parse()
        .map_err(|_| CliError::new(USAGE, format!("invalid duration value: {input}")))?;

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}

pub(crate) fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_millisecond_and_second_durations() {
        assert_eq!(
            parse_duration("20ms").expect("ms should parse"),
            Duration::from_millis(20)
        );
        assert_eq!(
            parse_duration("5s").expect("s should parse"),
            Duration::from_secs(5)
        );
        assert_eq!(
            parse_duration("3").expect("bare seconds should parse"),
            Duration::from_secs(3)
        );
    }

    #[test]
    fn rejects_malformed_durations() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("fast").is_err());
        assert!(parse_duration("-2s").is_err());
    }
}
