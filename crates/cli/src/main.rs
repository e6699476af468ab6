use std::{env, process::ExitCode};

use env_logger::init;

fn main() -> ExitCode {
    init();
    fontbatch_cli::run(env::args_os())
}
