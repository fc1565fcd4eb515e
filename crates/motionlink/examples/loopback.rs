//! Loopback demo — a simulated platform on an in-memory cable.
//!
//! The host side runs a real [`PlatformChannel`]; the device side is a
//! thread that acknowledges every command frame with a telemetry line.
//!
//! Run with:
//!   cargo run --example loopback

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use motionlink::channel::{ChannelConfig, PlatformChannel};
use motionlink::frame::{Axis, AxisValue, Mode, END_MARKER};
use motionlink::link::{ByteLink, Result as LinkResult};

/// One end of an in-memory duplex cable.
#[derive(Clone)]
struct CableEnd {
    rx: Arc<Mutex<VecDeque<u8>>>,
    tx: Arc<Mutex<VecDeque<u8>>>,
}

/// Two crossed ends: what one writes, the other reads.
fn cable() -> (CableEnd, CableEnd) {
    let a = Arc::new(Mutex::new(VecDeque::new()));
    let b = Arc::new(Mutex::new(VecDeque::new()));
    (
        CableEnd {
            rx: a.clone(),
            tx: b.clone(),
        },
        CableEnd { rx: b, tx: a },
    )
}

impl ByteLink for CableEnd {
    fn read_byte_if_available(&mut self) -> LinkResult<Option<u8>> {
        Ok(self.rx.lock().expect("cable lock").pop_front())
    }

    fn write(&mut self, bytes: &[u8]) -> LinkResult<()> {
        self.tx.lock().expect("cable lock").extend(bytes);
        Ok(())
    }
}

fn main() {
    let (host, device) = cable();

    // Simulated platform: count frames by their end marker and
    // acknowledge each one with a line.
    let stop = Arc::new(AtomicBool::new(false));
    let device_stop = stop.clone();
    let device_thread = thread::spawn(move || {
        let mut device = device;
        let mut frames = 0usize;
        while !device_stop.load(Ordering::SeqCst) {
            match device.read_byte_if_available() {
                Ok(Some(END_MARKER)) => {
                    frames += 1;
                    let _ = device.write(format!("ack {frames}\r\n").as_bytes());
                }
                Ok(Some(_)) => {}
                Ok(None) => thread::sleep(Duration::from_millis(1)),
                Err(_) => break,
            }
        }
    });

    let config = ChannelConfig {
        mode: Mode::Float32,
        ..ChannelConfig::default()
    };
    let mut channel = PlatformChannel::from_parts(host.clone(), host, config);

    channel.register_consumer(Box::new(|line: &str| {
        println!("platform says: {line}");
    }));

    channel.set_axis(Axis::Heave, AxisValue::Float32(0.25));
    channel.set_axis(Axis::Pitch, AxisValue::Float32(-1.5));

    let deadline = Instant::now() + Duration::from_millis(300);
    while Instant::now() < deadline {
        channel.tick();
        thread::sleep(Duration::from_millis(10));
    }

    channel.shutdown();
    stop.store(true, Ordering::SeqCst);
    device_thread.join().expect("device thread should exit");
}
