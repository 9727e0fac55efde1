use std::{io::Write, path::PathBuf};

use blendomatic::Blendomatic;
use clap::Parser;

use super::{parse_module_args, print_module_help, Cli, CliRes};

/// Prints the blending modes of a blendomatic file
#[derive(Debug, Parser)]
#[command(name = "blendomatic")]
struct BlendomaticArgs {
    /// blendomatic.dat
    file: PathBuf,
}

pub struct BlendomaticCli;

impl Cli for BlendomaticCli {
    fn name(&self) -> &'static str {
        "blendomatic"
    }

    fn cli(&self) -> CliRes {
        let args = match parse_module_args::<BlendomaticArgs>() {
            Ok(args) => args,
            Err(res) => return res,
        };

        let file = match Blendomatic::open_from_file(&args.file) {
            Ok(file) => file,
            Err(err) => {
                println!("Cannot open {}: {err}", args.file.display());
                return CliRes::Err;
            }
        };

        if let Err(err) = print_modes(&file, &mut std::io::stdout().lock()) {
            println!("{err}");
            return CliRes::Err;
        }

        CliRes::Ok
    }

    fn cli_help(&self) {
        print_module_help::<BlendomaticArgs>();
    }
}

fn print_modes(file: &Blendomatic, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(
        out,
        "{} modes, {} tiles",
        file.header.mode_count, file.header.tile_count
    )?;

    for (index, mode) in file.modes.iter().enumerate() {
        let alpha_pixels = mode
            .tile_bits
            .iter()
            .enumerate()
            .filter(|&(pixel, _)| mode.is_alpha_pixel(0, pixel) == Some(true))
            .count();

        writeln!(
            out,
            "mode {index}: {} pixels per tile, {alpha_pixels} alpha pixels in tile 0",
            mode.tile_size
        )?;
    }

    Ok(())
}
