use std::io::{Read, Write};
use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, SerialPort, SerialPortType, StopBits};
use tracing::{debug, info};

use crate::error::{LinkError, Result};
use crate::traits::ByteLink;

/// Connection settings for one platform link.
///
/// Parity (none), data bits (8), and stop bits (1) are fixed by the
/// platform protocol and not configurable. Settings are immutable once
/// a link is open; changing them requires a full close and reopen.
#[derive(Clone, Debug)]
pub struct LinkConfig {
    /// Port identifier, e.g. `/dev/ttyUSB0` or `COM12`.
    pub port: String,
    /// Baud rate. The platform ships at 9600.
    pub baud_rate: u32,
    /// Upper bound on any blocking read inside the port driver.
    pub read_timeout: Duration,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            port: String::new(),
            baud_rate: 9600,
            read_timeout: Duration::from_millis(100),
        }
    }
}

/// One endpoint of the physical serial connection.
///
/// Opened once per channel, then cloned so the reader and writer
/// threads each own a handle. The port is released when the last
/// handle drops; there is no separate close call to misuse.
pub struct SerialLink {
    port: Box<dyn SerialPort>,
    name: String,
}

impl SerialLink {
    /// Open the configured port at 8-N-1 with no flow control.
    ///
    /// Failure (port unavailable, held by another process, bad
    /// settings) is reported to the caller and leaves nothing open.
    pub fn open(config: &LinkConfig) -> Result<Self> {
        let device = device_path(&config.port);
        let port = serialport::new(device, config.baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(config.read_timeout)
            .open()
            .map_err(|source| LinkError::Open {
                port: config.port.clone(),
                source,
            })?;

        info!(port = %config.port, baud = config.baud_rate, "opened serial link");

        Ok(Self {
            port,
            name: config.port.clone(),
        })
    }

    /// Second handle to the same port, for the other traffic direction.
    pub fn try_clone(&self) -> Result<Self> {
        let port = self.port.try_clone()?;
        Ok(Self {
            port,
            name: self.name.clone(),
        })
    }

    /// The port identifier this link was opened with.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ByteLink for SerialLink {
    fn read_byte_if_available(&mut self) -> Result<Option<u8>> {
        if self.port.bytes_to_read()? == 0 {
            return Ok(None);
        }

        let mut buf = [0u8; 1];
        match self.port.read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(err)
                if err.kind() == std::io::ErrorKind::TimedOut
                    || err.kind() == std::io::ErrorKind::WouldBlock =>
            {
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.port.write_all(bytes)?;
        Ok(())
    }
}

impl std::fmt::Debug for SerialLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialLink").field("port", &self.name).finish()
    }
}

/// A serial port known to the operating system.
#[derive(Clone, Debug)]
pub struct PortInfo {
    pub name: String,
    /// Transport kind: usb, pci, bluetooth, or unknown.
    pub kind: &'static str,
}

/// List the serial ports the operating system currently knows about.
pub fn enumerate() -> Result<Vec<PortInfo>> {
    let ports = serialport::available_ports()?;
    debug!(count = ports.len(), "enumerated serial ports");

    Ok(ports
        .into_iter()
        .map(|p| PortInfo {
            name: p.port_name,
            kind: match p.port_type {
                SerialPortType::UsbPort(_) => "usb",
                SerialPortType::PciPort => "pci",
                SerialPortType::BluetoothPort => "bluetooth",
                SerialPortType::Unknown => "unknown",
            },
        })
        .collect())
}

/// Map a user-facing port name to the device path the OS accepts.
///
/// Windows `COMn` names beyond COM9 only open through the `\\.\COMn`
/// device-path form, so bare `COM` names get the prefix there. All
/// other names pass through untouched.
fn device_path(port: &str) -> String {
    if cfg!(windows) && port.to_ascii_uppercase().starts_with("COM") && !port.starts_with(r"\\.\") {
        format!(r"\\.\{port}")
    } else {
        port.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_invalid_port_reports_failure() {
        let config = LinkConfig {
            port: "ZZ99".to_string(),
            ..LinkConfig::default()
        };
        let result = SerialLink::open(&config);
        assert!(matches!(result, Err(LinkError::Open { ref port, .. }) if port == "ZZ99"));
    }

    #[test]
    fn default_config_is_platform_baseline() {
        let config = LinkConfig::default();
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.read_timeout, Duration::from_millis(100));
    }

    #[cfg(windows)]
    #[test]
    fn com_ports_get_device_path_prefix() {
        assert_eq!(device_path("COM12"), r"\\.\COM12");
        assert_eq!(device_path(r"\\.\COM12"), r"\\.\COM12");
    }

    #[cfg(not(windows))]
    #[test]
    fn unix_port_names_pass_through() {
        assert_eq!(device_path("/dev/ttyUSB0"), "/dev/ttyUSB0");
    }
}
