use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use counted_bst::script::{Script, Session};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Run counted-BST scripts: one command per line (`insert dbfac`, `remove b`, `depth c`, `print`, ...)
#[derive(Parser, Debug)]
#[command(name = "counted-bst")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Script to run, `-` for stdin. Stdin is read when neither a script nor `-e` is given
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Command to run after the script, may be repeated
    #[arg(short = 'e', long = "execute", value_name = "COMMAND")]
    commands: Vec<String>,

    /// Debug level, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let script = load_script(&cli)?;
    tracing::info!(commands = script.len(), "running script");

    let mut output = String::new();
    let result = Session::new().run(&script, &mut output);
    print!("{}", output);
    result.context("script failed")
}

fn load_script(cli: &Cli) -> Result<Script> {
    let text = match &cli.script {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?,
        Some(_) => read_stdin()?,
        None if cli.commands.is_empty() => read_stdin()?,
        None => String::new(),
    };

    let mut script = Script::parse(&text).context("invalid script")?;
    for command in &cli.commands {
        let line = script.next_line();
        script
            .extend_from(command, line)
            .with_context(|| format!("invalid command `{}`", command))?;
    }
    Ok(script)
}

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("failed to read script from stdin")?;
    Ok(text)
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // `RUST_LOG` wins over `-d` when set.
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(true)
        .with_env_filter(filter)
        .init();

    tracing::debug!(?level, "logging initialized");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn execute_flags_repeat() {
        let cli = Cli::parse_from(["counted-bst", "-e", "insert ab", "-e", "print", "-dd"]);

        assert_eq!(cli.script, None);
        assert_eq!(cli.commands, ["insert ab", "print"]);
        assert_eq!(cli.debug, 2);
    }

    #[test]
    fn execute_only_skips_stdin() {
        let cli = Cli::parse_from(["counted-bst", "-e", "insert ab", "-e", "depth b"]);
        let script = load_script(&cli).unwrap();

        assert_eq!(script.len(), 2);
    }
}
