use crate::cmd::PortsArgs;
use crate::exit::{link_error, CliResult, SUCCESS};
use crate::output::{print_ports, OutputFormat};

pub fn run(_args: PortsArgs, format: OutputFormat) -> CliResult<i32> {
    let ports =
        motionlink_link::enumerate().map_err(|err| link_error("port enumeration failed", err))?;
    print_ports(&ports, format);
    Ok(SUCCESS)
}
