use std::env;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use todo_app::shell::{self, Flow};
use todo_app::{AppError, Cli, Command, Shell, Transport, UreqTransport};
use todo_core::TodoClient;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "todo failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TODO_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "todo_app=debug,todo_core=debug,info"
        } else {
            "todo_app=warn,todo_core=warn"
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<ExitCode, AppError> {
    cli.config.validate()?;
    let client = TodoClient::new(&cli.config.base_url);
    let mut shell = Shell::new(client, UreqTransport::new(cli.config.timeout()));

    match cli.command.unwrap_or(Command::Browse) {
        Command::Browse => browse(&mut shell),
        Command::List { filter } => {
            shell.start();
            shell.handle(shell::Command::Filter(filter));
            print_once(&shell)
        }
        Command::Show { id } => {
            shell.open(id);
            print_once(&shell)
        }
    }
}

fn print_once<T: Transport>(shell: &Shell<T>) -> Result<ExitCode, AppError> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", shell.render())?;
    Ok(if shell.has_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn browse<T: Transport>(shell: &mut Shell<T>) -> Result<ExitCode, AppError> {
    shell.start();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    write!(stdout, "{}", shell.render())?;
    writeln!(stdout, "(type `help` for commands)")?;

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if shell.handle_line(&line) == Flow::Quit {
            break;
        }
        write!(stdout, "{}", shell.render())?;
    }
    Ok(ExitCode::SUCCESS)
}
