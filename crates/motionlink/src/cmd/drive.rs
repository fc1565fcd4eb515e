use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use motionlink_channel::{ChannelConfig, PlatformChannel, DEFAULT_TICK_INTERVAL};
use motionlink_frame::{Axis, AxisValue, Mode, AXIS_COUNT};
use motionlink_link::LinkConfig;

use crate::cmd::{install_ctrlc_handler, parse_duration, DriveArgs};
use crate::exit::{channel_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::OutputFormat;

pub fn run(args: DriveArgs, _format: OutputFormat) -> CliResult<i32> {
    let interval = parse_duration(&args.interval)?;
    let duration = args.duration.as_deref().map(parse_duration).transpose()?;
    let mode = args.mode.as_mode();
    // Validate the command before touching the port.
    let values = resolve_axes(args.axes.as_deref(), mode)?;

    let config = ChannelConfig {
        link: LinkConfig {
            port: args.link.port.clone(),
            baud_rate: args.link.baud,
            ..LinkConfig::default()
        },
        mode,
        tick_interval: interval,
        queue_capacity: args.capacity,
        ..ChannelConfig::default()
    };

    let mut channel = PlatformChannel::new(config);
    channel.open().map_err(|err| channel_error("open failed", err))?;

    for (axis, value) in Axis::ALL.into_iter().zip(values) {
        channel.set_axis(axis, value);
    }

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let started = Instant::now();
    while running.load(Ordering::SeqCst) {
        channel.tick();
        if let Some(limit) = duration {
            if started.elapsed() >= limit {
                break;
            }
        }
        thread::sleep(interval.min(DEFAULT_TICK_INTERVAL));
    }

    channel.shutdown();
    Ok(SUCCESS)
}

/// Parse `--axes` in the selected mode; default is the homed attitude.
fn resolve_axes(axes: Option<&[String]>, mode: Mode) -> CliResult<Vec<AxisValue>> {
    let Some(axes) = axes else {
        return Ok(match mode {
            Mode::EightBit => vec![AxisValue::EightBit(128); AXIS_COUNT],
            Mode::Float32 => vec![AxisValue::Float32(0.0); AXIS_COUNT],
        });
    };

    if axes.len() != AXIS_COUNT {
        return Err(CliError::new(
            USAGE,
            format!("--axes needs exactly {AXIS_COUNT} values, got {}", axes.len()),
        ));
    }

    axes.iter()
        .map(|raw| parse_axis_value(raw, mode))
        .collect()
}

fn parse_axis_value(raw: &str, mode: Mode) -> CliResult<AxisValue> {
    let raw = raw.trim();
    match mode {
        Mode::EightBit => raw
            .parse::<u8>()
            .map(AxisValue::EightBit)
            .map_err(|_| CliError::new(USAGE, format!("axis value out of byte range: {raw}"))),
        Mode::Float32 => {
            let value: f32 = raw
                .parse()
                .map_err(|_| CliError::new(USAGE, format!("invalid axis value: {raw}")))?;
            if !value.is_finite() {
                return Err(CliError::new(USAGE, format!("axis value not finite: {raw}")));
            }
            Ok(AxisValue::Float32(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_to_homed_attitude() {
        let values = resolve_axes(None, Mode::EightBit).expect("defaults should resolve");
        assert_eq!(values, vec![AxisValue::EightBit(128); 6]);
    }

    #[test]
    fn parses_six_byte_values() {
        let raw = strings(&["10", "20", "30", "40", "50", "60"]);
        let values = resolve_axes(Some(&raw), Mode::EightBit).expect("bytes should parse");
        assert_eq!(values[5], AxisValue::EightBit(60));
    }

    #[test]
    fn rejects_wrong_count_and_range() {
        let raw = strings(&["1", "2", "3"]);
        assert_eq!(
            resolve_axes(Some(&raw), Mode::Float32).expect_err("count should fail").code,
            USAGE
        );

        let raw = strings(&["256", "0", "0", "0", "0", "0"]);
        assert_eq!(
            resolve_axes(Some(&raw), Mode::EightBit).expect_err("range should fail").code,
            USAGE
        );
    }

    #[test]
    fn rejects_non_finite_floats() {
        let raw = strings(&["NaN", "0", "0", "0", "0", "0"]);
        assert!(resolve_axes(Some(&raw), Mode::Float32).is_err());
    }
}
