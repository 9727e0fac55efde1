use std::{io::Write, path::PathBuf};

use clap::Parser;
use palette::Palette;

use super::{parse_module_args, print_module_help, Cli, CliRes};

/// Prints the colors of a JASC palette
#[derive(Debug, Parser)]
#[command(name = "palette")]
struct PaletteArgs {
    /// JASC palette file
    file: PathBuf,
    /// Prints `#rrggbb` instead of `r g b`
    #[arg(long)]
    hex: bool,
}

pub struct PaletteCli;

impl Cli for PaletteCli {
    fn name(&self) -> &'static str {
        "palette"
    }

    fn cli(&self) -> CliRes {
        let args = match parse_module_args::<PaletteArgs>() {
            Ok(args) => args,
            Err(res) => return res,
        };

        let palette = match Palette::open_from_file(&args.file) {
            Ok(palette) => palette,
            Err(err) => {
                println!("Cannot open {}: {err}", args.file.display());
                return CliRes::Err;
            }
        };

        if let Err(err) = print_palette(&palette, args.hex, &mut std::io::stdout().lock()) {
            println!("{err}");
            return CliRes::Err;
        }

        CliRes::Ok
    }

    fn cli_help(&self) {
        print_module_help::<PaletteArgs>();
    }
}

fn print_palette(palette: &Palette, hex: bool, out: &mut impl Write) -> std::io::Result<()> {
    for (index, color) in palette.colors().iter().enumerate() {
        let [r, g, b, _] = color.0;

        if hex {
            writeln!(out, "{index:>3} #{r:02x}{g:02x}{b:02x}")?;
        } else {
            writeln!(out, "{index:>3} {r} {g} {b}")?;
        }
    }

    Ok(())
}
