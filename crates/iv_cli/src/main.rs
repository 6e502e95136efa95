mod args;
mod logging;
mod run;

use std::process::ExitCode;

use clap::Parser;
use iv_parser::Session;
use iv_syntax::RenderOptions;

use crate::args::CliArgs;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    logging::init();

    let config = match args.build_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("iv: {e:#}");
            return ExitCode::from(2);
        }
    };
    let mut session = Session::new(config);
    if args.verbose {
        session = session.with_render_options(RenderOptions::verbose());
    }

    match run::run(&args, &mut session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("iv: {e:#}");
            ExitCode::from(1)
        }
    }
}
