use std::io::IsTerminal;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use motionlink_link::PortInfo;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct PortRecord<'a> {
    name: &'a str,
    kind: &'a str,
}

pub fn print_ports(ports: &[PortInfo], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let records: Vec<PortRecord<'_>> = ports
                .iter()
                .map(|p| PortRecord {
                    name: &p.name,
                    kind: p.kind,
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string(&records).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["PORT", "KIND"]);
            for p in ports {
                table.add_row(vec![p.name.clone(), p.kind.to_string()]);
            }
            println!("{table}");
        }
        OutputFormat::Raw => {
            for p in ports {
                println!("{}", p.name);
            }
        }
    }
}

#[derive(Serialize)]
struct LineRecord<'a> {
    line: &'a str,
    timestamp: String,
}

pub fn print_line(line: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let record = LineRecord {
                line,
                timestamp: now_unix_seconds(),
            };
            println!(
                "{}",
                serde_json::to_string(&record).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty | OutputFormat::Raw => {
            println!("{line}");
        }
    }
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}
