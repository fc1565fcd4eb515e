use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use motionlink_channel::{ChannelConfig, PlatformChannel, DEFAULT_TICK_INTERVAL};
use motionlink_link::LinkConfig;

use crate::cmd::{install_ctrlc_handler, MonitorArgs};
use crate::exit::{channel_error, CliResult, SUCCESS};
use crate::output::{print_line, OutputFormat};

pub fn run(args: MonitorArgs, format: OutputFormat) -> CliResult<i32> {
    let config = ChannelConfig {
        link: LinkConfig {
            port: args.link.port.clone(),
            baud_rate: args.link.baud,
            ..LinkConfig::default()
        },
        // Listen only: the writer side is never fed.
        transmit_commands: false,
        ..ChannelConfig::default()
    };

    let mut channel = PlatformChannel::new(config);
    channel.open().map_err(|err| channel_error("open failed", err))?;

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let printed = Arc::new(AtomicUsize::new(0));
    let counter = printed.clone();
    channel.register_consumer(Box::new(move |line: &str| {
        print_line(line, format);
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    while running.load(Ordering::SeqCst) {
        channel.tick();
        if let Some(count) = args.count {
            if printed.load(Ordering::SeqCst) >= count {
                break;
            }
        }
        thread::sleep(DEFAULT_TICK_INTERVAL);
    }

    channel.shutdown();
    Ok(SUCCESS)
}
