use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

use config::Config;
use eyre::Context;
use mec::session::Session;
use shell::Shell;
use tracing::info;

mod command;
mod config;
mod shell;

fn fallible_main() -> eyre::Result<()> {
    let config = Config::load()?;

    let mut session = Session::with_settings(config.search);
    if let Some(path) = &config.session.load {
        session
            .load_file(Some(path), false)
            .with_context(|| format!("cannot load session '{}'", path.display()))?;
        info!(path = %path.display(), "session loaded");
    }

    let mut shell = Shell::new(session);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(script) => shell.run_script(&script, &mut out)?,
        None => {
            let stdin = io::stdin();
            let prompt = stdin.is_terminal();
            if prompt {
                eprintln!("mec {} (type `help` to list commands)", mec::VERSION);
            }
            shell.run_interactive(stdin.lock(), &mut out, prompt)?;
        }
    }

    info!(objects = shell.session().workspace().len(), "done");
    Ok(())
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    fallible_main()
}
