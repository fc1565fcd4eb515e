use std::thread;
use std::time::Instant;

use motionlink_channel::{ChannelConfig, PlatformChannel, DEFAULT_TICK_INTERVAL};
use motionlink_link::LinkConfig;

use crate::cmd::{parse_duration, HomeArgs};
use crate::exit::{channel_error, CliResult, SUCCESS};
use crate::output::OutputFormat;

pub fn run(args: HomeArgs, _format: OutputFormat) -> CliResult<i32> {
    let settle = parse_duration(&args.settle)?;

    let config = ChannelConfig {
        link: LinkConfig {
            port: args.link.port.clone(),
            baud_rate: args.link.baud,
            ..LinkConfig::default()
        },
        mode: args.mode.as_mode(),
        ..ChannelConfig::default()
    };

    // Opening homes the platform immediately; hold the attitude for the
    // settle window so the actuators come to rest before the port drops.
    let mut channel = PlatformChannel::new(config);
    channel.open().map_err(|err| channel_error("open failed", err))?;

    let deadline = Instant::now() + settle;
    while Instant::now() < deadline {
        channel.tick();
        thread::sleep(DEFAULT_TICK_INTERVAL);
    }

    channel.shutdown();
    Ok(SUCCESS)
}
