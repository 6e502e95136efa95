use std::fs::File;
use std::io::{self, BufReader};

use anyhow::{Context, anyhow};
use iv_parser::Session;

use crate::args::CliArgs;

/// Input lines with `-e`, else each file in turn, else stdin.
pub(crate) fn run(args: &CliArgs, session: &mut Session) -> anyhow::Result<()> {
    if args.execute {
        let mut text = args.positional.join("\n");
        text.push('\n');
        return session.execute(&text).map_err(fatal);
    }
    if args.positional.is_empty() {
        return session.run_interactive(io::stdin().lock()).map_err(fatal);
    }
    for path in &args.positional {
        let file = File::open(path).with_context(|| format!("open {path}"))?;
        tracing::debug!(file = %path, "running script");
        session.run(path, BufReader::new(file)).map_err(fatal)?;
    }
    Ok(())
}

// Session errors hold `Rc` locations and are not `Send`; keep only the message.
fn fatal(e: iv_parser::Error) -> anyhow::Error {
    anyhow!("{e}")
}
