use std::{io::Write, path::PathBuf};

use clap::{Parser, Subcommand};
use eyre::eyre;
use palette::Palette;
use slp::{Slp, MAX_PLAYER};

use crate::{
    config::{parse_config, parse_config_from_file, Config},
    modules::{
        render::{render_frames, RenderOptions},
        source::SlpSource,
    },
};

use super::{parse_module_args, print_module_help, Cli, CliRes};

/// Inspects and renders SLP sprites
///
/// FILE is either an .slp file or `<archive.drs>:<id>`.
#[derive(Debug, Parser)]
#[command(name = "slp")]
struct SlpArgs {
    #[command(subcommand)]
    command: Commands,
    /// Config file. Defaults to `config.toml` next to the binary.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Prints the header and frame table
    Info { file: SlpSource },
    /// Renders frames to .png
    Render {
        file: SlpSource,
        /// JASC palette
        #[arg(short, long)]
        palette: Option<PathBuf>,
        /// Player color, 0 to 7
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=MAX_PLAYER as i64))]
        player: Option<u8>,
        /// Only renders this frame
        #[arg(short, long)]
        frame: Option<usize>,
        /// Output folder
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub struct SlpCli;

impl Cli for SlpCli {
    fn name(&self) -> &'static str {
        "slp"
    }

    fn cli(&self) -> CliRes {
        let args = match parse_module_args::<SlpArgs>() {
            Ok(args) => args,
            Err(res) => return res,
        };

        match run(args) {
            Ok(()) => CliRes::Ok,
            Err(err) => {
                println!("{err}");
                CliRes::Err
            }
        }
    }

    fn cli_help(&self) {
        print_module_help::<SlpArgs>();
    }
}

struct RenderSettings {
    palette: PathBuf,
    player: u8,
    output: PathBuf,
}

/// Flags take priority over the config.
fn render_settings(
    config: Config,
    palette: Option<PathBuf>,
    player: Option<u8>,
    output: Option<PathBuf>,
) -> eyre::Result<RenderSettings> {
    let palette = palette.or(config.palette).ok_or_else(|| {
        eyre!("No palette. Pass `--palette` or set `palette` in the config file.")
    })?;

    Ok(RenderSettings {
        palette,
        player: player.or(config.player).unwrap_or(0),
        output: output
            .or(config.output)
            .unwrap_or_else(|| PathBuf::from(".")),
    })
}

fn run(args: SlpArgs) -> eyre::Result<()> {
    match args.command {
        Commands::Info { file } => {
            let slp = file.load()?;

            print_info(&slp, &mut std::io::stdout().lock())?;
        }
        Commands::Render {
            file,
            palette,
            player,
            frame,
            output,
        } => {
            let config = match &args.config {
                Some(path) => parse_config_from_file(path)?,
                None => parse_config()?,
            };

            let settings = render_settings(config, palette, player, output)?;

            let palette = Palette::open_from_file(&settings.palette)
                .map_err(|op| eyre!("Cannot open {}: {op}", settings.palette.display()))?;
            let slp = file.load()?;
            let name = file.stem();

            let report = render_frames(
                &slp,
                &RenderOptions {
                    palette: &palette,
                    player: settings.player,
                    frame,
                    output: &settings.output,
                    name: &name,
                },
            )?;

            println!(
                "Rendered {} frames to {}",
                report.written.len(),
                settings.output.display()
            );

            for (index, err) in &report.failed {
                println!("Frame {index}: {err}");
            }

            if !report.failed.is_empty() {
                return Err(eyre!("{} frames failed", report.failed.len()));
            }
        }
    }

    Ok(())
}

fn print_info(slp: &Slp, out: &mut impl Write) -> std::io::Result<()> {
    let header = &slp.header;

    writeln!(out, "version: {}", String::from_utf8_lossy(&header.version))?;
    writeln!(out, "frames: {}", header.frame_count)?;
    writeln!(
        out,
        "comment: {}",
        String::from_utf8_lossy(&header.comment).trim_end_matches('\0')
    )?;

    writeln!(out)?;
    writeln!(
        out,
        "{:>5} {:>9} {:>11} {:>8} {:>8} {:>8}",
        "frame", "size", "hotspot", "outline", "commands", "data"
    )?;

    for frame in slp.frames() {
        let (width, height) = frame.info.size();
        let (x, y) = frame.info.hotspot();

        writeln!(
            out,
            "{:>5} {:>9} {:>11} {:>8} {:>8} {:>8}",
            frame.index,
            format!("{width}x{height}"),
            format!("{x},{y}"),
            frame.info.outline_table_offset,
            frame.info.cmd_table_offset,
            frame.data_size
        )?;
    }

    Ok(())
}
