use lox_scan::lox::{Lox, Outcome};
use std::{
    env,
    io::{self, Write},
    process,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> io::Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    match args.len() {
        1 => run_prompt()?,
        2 => run_file(args[1].as_str())?,
        _ => {
            writeln!(io::stdout(), "Usage: lox-scan [script]")?;
            process::exit(64);
        },
    };

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn run_file(path: &str) -> io::Result<()> {
    let contents = match std::fs::read(path) {
        Ok(contents) => contents,
        Err(e) => {
            writeln!(io::stderr(), "Could not read {}: {}", path, e)?;
            process::exit(74);
        },
    };

    let mut lox = Lox::new(io::stdout().lock(), io::stderr());
    if lox.run(&contents)? == Outcome::LexicalError {
        process::exit(65);
    }

    Ok(())
}

fn run_prompt() -> io::Result<()> {
    let stdin = io::stdin();
    Lox::new(io::stdout(), io::stderr()).run_prompt(stdin.lock())
}
