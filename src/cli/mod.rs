use clap::{CommandFactory, Parser};

use self::{
    blendomatic::BlendomaticCli, drs::DrsCli, icm::IcmCli, palette::PaletteCli, slp::SlpCli,
};

mod blendomatic;
mod drs;
mod icm;
mod palette;
mod slp;

pub enum CliRes {
    Ok,
    Err,
}

pub trait Cli {
    fn name(&self) -> &'static str;
    /// Each module has to handle the arguments by itself.
    fn cli(&self) -> CliRes;
    fn cli_help(&self);
}

/// Runs command-line options
pub fn cli() -> CliRes {
    let args: Vec<String> = std::env::args().collect();

    // Add new modules here.
    let modules: &[&dyn Cli] = &[&DrsCli, &PaletteCli, &SlpCli, &IcmCli, &BlendomaticCli];

    let help = || {
        println!(
            "\
genieutil

Available modules:"
        );
        for module in modules {
            println!("{}", module.name());
        }
    };

    let Some(command) = args.get(1) else {
        help();
        return CliRes::Err;
    };

    for module in modules {
        if command == module.name() {
            if args.len() == 2 {
                module.cli_help();
                return CliRes::Err;
            }

            return module.cli();
        }
    }

    // In case nothing fits then prints this again.
    help();

    CliRes::Err
}

/// Parses the arguments after the module name.
///
/// Clap prints its own help and errors, the caller only has to return the [`CliRes`].
fn parse_module_args<T: Parser>() -> Result<T, CliRes> {
    // the module name takes the place of the binary name
    T::try_parse_from(std::env::args().skip(1)).map_err(|err| {
        let _ = err.print();

        if err.use_stderr() {
            CliRes::Err
        } else {
            CliRes::Ok
        }
    })
}

fn print_module_help<T: CommandFactory>() {
    let _ = T::command().print_help();
}
