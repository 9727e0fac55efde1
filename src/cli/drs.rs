use std::{io::Write, path::PathBuf};

use clap::{Parser, Subcommand};
use drs::{Drs, FileId};
use eyre::eyre;

use super::{parse_module_args, print_module_help, Cli, CliRes};

/// Lists and extracts files from DRS archives
#[derive(Debug, Parser)]
#[command(name = "drs")]
struct DrsArgs {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Lists every table and file
    List {
        /// .drs archive
        file: PathBuf,
    },
    /// Writes one file out of the archive
    Extract {
        /// .drs archive
        file: PathBuf,
        id: u32,
        /// Defaults to `<id>.<extension>` in the current folder
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub struct DrsCli;

impl Cli for DrsCli {
    fn name(&self) -> &'static str {
        "drs"
    }

    fn cli(&self) -> CliRes {
        let args = match parse_module_args::<DrsArgs>() {
            Ok(args) => args,
            Err(res) => return res,
        };

        match run(args.command) {
            Ok(()) => CliRes::Ok,
            Err(err) => {
                println!("{err}");
                CliRes::Err
            }
        }
    }

    fn cli_help(&self) {
        print_module_help::<DrsArgs>();
    }
}

fn run(command: Commands) -> eyre::Result<()> {
    match command {
        Commands::List { file } => {
            let drs = Drs::open_from_file(&file)?;

            print_listing(&drs, &mut std::io::stdout().lock())?;
        }
        Commands::Extract { file, id, output } => {
            let drs = Drs::open_from_file(&file)?;
            let path = extract(&drs, FileId(id), output)?;

            println!("Extracted {id} to {}", path.display());
        }
    }

    Ok(())
}

fn print_listing(drs: &Drs, out: &mut impl Write) -> std::io::Result<()> {
    let header = &drs.header;

    writeln!(out, "version: {}", String::from_utf8_lossy(&header.version))?;
    writeln!(
        out,
        "type: {}",
        String::from_utf8_lossy(&header.file_type).trim_end_matches('\0')
    )?;
    writeln!(
        out,
        "{} tables, {} files",
        drs.tables.len(),
        drs.file_count()
    )?;

    for table in &drs.tables {
        writeln!(out)?;
        writeln!(out, "[{}] {} files", table.extension(), table.files.len())?;
        writeln!(out, "{:>8} {:>10} {:>10}", "id", "offset", "size")?;

        for file in &table.files {
            writeln!(
                out,
                "{:>8} {:>10} {:>10}",
                file.id.0, file.offset, file.size
            )?;
        }
    }

    Ok(())
}

fn extract(drs: &Drs, id: FileId, output: Option<PathBuf>) -> eyre::Result<PathBuf> {
    let (table, file) = drs
        .files()
        .find(|(_, file)| file.id == id)
        .ok_or_else(|| eyre!("No file with id {id}"))?;

    let path = output.unwrap_or_else(|| PathBuf::from(format!("{id}.{}", table.extension())));

    std::fs::write(&path, drs.file_data(file)?)?;

    Ok(path)
}
