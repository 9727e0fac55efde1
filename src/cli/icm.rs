use std::path::PathBuf;

use clap::Parser;
use icm::Icm;
use image::Rgba;

use super::{parse_module_args, print_module_help, Cli, CliRes};

/// Looks up the palette index of a color in an interpolation table
#[derive(Debug, Parser)]
#[command(name = "icm")]
struct IcmArgs {
    /// .icm file
    file: PathBuf,
    /// Brightness level, 0 to 9
    #[arg(short, long, default_value_t = 0)]
    brightness: u8,
    /// Color as `rrggbb` or `#rrggbb`
    #[arg(value_parser = parse_hex_color)]
    color: Rgba<u8>,
}

pub struct IcmCli;

impl Cli for IcmCli {
    fn name(&self) -> &'static str {
        "icm"
    }

    fn cli(&self) -> CliRes {
        let args = match parse_module_args::<IcmArgs>() {
            Ok(args) => args,
            Err(res) => return res,
        };

        let index = Icm::open_from_file(&args.file)
            .and_then(|table| table.index(args.brightness, args.color));

        match index {
            Ok(index) => {
                println!("{index}");
                CliRes::Ok
            }
            Err(err) => {
                println!("{err}");
                CliRes::Err
            }
        }
    }

    fn cli_help(&self) {
        print_module_help::<IcmArgs>();
    }
}

fn parse_hex_color(s: &str) -> Result<Rgba<u8>, String> {
    let hex = s.strip_prefix('#').unwrap_or(s);

    if hex.len() != 6 || !hex.is_ascii() {
        return Err(format!("Expect 6 hex digits, got {s:?}"));
    }

    let channel = |at: usize| {
        u8::from_str_radix(&hex[at..at + 2], 16).map_err(|op| op.to_string())
    };

    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, 255]))
}
