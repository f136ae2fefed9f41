use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use bm58_rs::{connection::Serial, memory::SlotRecord, Bm58, LogOutput, Logger};

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum Format {
    /// One terse line per record.
    Plain,
    /// One labeled line per record.
    Print,
    /// CSV rows with a heading.
    Csv,
}

/// Read stored measurements from a Beurer BM-58 blood pressure meter.
///
/// Connect the meter, switch it to ON, then press MEM before running.
#[derive(Parser)]
struct Opts {
    /// Serial device the meter is connected to.
    #[arg(short = 'F', long, default_value = "/dev/ttyUSB0")]
    device: String,

    /// User memory slot to label the output with (the meter uploads
    /// whichever memory is active on the device itself).
    #[arg(short = 'U', long, value_parser = clap::value_parser!(u8).range(1..=2), default_value_t = 1)]
    memory: u8,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Print)]
    format: Format,

    /// CSV delimiter.
    #[arg(long, default_value = ";")]
    delimiter: String,
}

fn main() {
    pretty_env_logger::formatted_builder()
        .parse_filters(&std::env::var("RUST_LOG").unwrap_or("info".to_string()))
        .init();

    let opts = Opts::parse();

    let port = match Serial::open(&opts.device) {
        Ok(port) => port,
        Err(e) => {
            eprintln!("ERROR: Could not open BM-58 serial port {}: {e}", opts.device);
            std::process::exit(1);
        }
    };

    let mut bm58 = match Bm58::connect(port) {
        Ok(bm58) => bm58,
        Err(e) => {
            log::debug!("Handshake failed: {e:?}");
            eprintln!("Beurer BM-58 did not respond.");
            eprintln!("Connect the BM-58 to your computer, switch it to ON, then press MEM and try again");
            std::process::exit(2);
        }
    };

    let debug_output = LogOutput::LogTarget(log::Level::Debug, "read_records".into());

    let ident = match bm58.ident() {
        Ok(ident) => ident,
        Err(e) => {
            eprintln!("ERROR: Could not read device identity: {e:?}");
            std::process::exit(2);
        }
    };

    println!("Device name: {}", ident.text());
    Logger::log(&debug_output, &ident);

    println!("Selected memory: U{}", opts.memory);

    let records = match bm58.records() {
        Ok(records) => records,
        Err(e) => {
            eprintln!("ERROR: Could not read record count: {e:?}");
            std::process::exit(2);
        }
    };

    println!("Available records: {}", records.len());

    let progress_bar = ProgressBar::new(records.len() as u64)
        .with_style(
            ProgressStyle::with_template("[{bar:.green/white}] {prefix} ({pos}/{len})")
                .unwrap()
                .progress_chars("#>-"),
        )
        .with_prefix("Fetching records");

    let outcomes = records
        .map(|v| {
            progress_bar.inc(1);
            v
        })
        .collect::<Vec<_>>();

    progress_bar.finish_and_clear();

    let delimiter = &opts.delimiter;

    if opts.format == Format::Csv {
        println!(
            "Memory{delimiter}Date{delimiter}Systole{delimiter}Diastole{delimiter}Pulse"
        );
    }

    for (index, record) in &outcomes {
        match record {
            SlotRecord::Present(m) => {
                let ts = m.timestamp();
                match opts.format {
                    Format::Plain => println!(
                        "{index:2} - {ts} S={:3}  D={:3}  P={}",
                        m.systole, m.diastole, m.pulse
                    ),
                    Format::Print => println!(
                        "{index:2} - {ts}: Systole {:3}  Diastole {:3}  Pulse {}",
                        m.systole, m.diastole, m.pulse
                    ),
                    Format::Csv => println!(
                        "{index}{delimiter}{ts}{delimiter}{}{delimiter}{}{delimiter}{}",
                        m.systole, m.diastole, m.pulse
                    ),
                }
            }
            SlotRecord::Absent => println!("  WARNING: not available"),
            SlotRecord::Malformed { len } => {
                println!("  ERROR: Only {len} bytes received, 1 or 9 expected")
            }
        }
    }
}
