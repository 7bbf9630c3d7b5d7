mod convert;
mod histogram;

use convert::run_convert;
use histogram::run_histogram;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Convert(args) => run_convert(args, ctx),
        Command::Histogram(args) => run_histogram(args, ctx),
    }
}
