use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use bpaf::Bpaf;
use sbc_detect_core::{release, BoardId, HardwareInfo, NativePlatform};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::detection::{identifier, Identifier};

mod config;
mod detection;

#[derive(Clone, Debug, Bpaf)]
enum Command {
    /// Print the detected board name (default)
    #[bpaf(command)]
    Name,
    /// Check whether this is the given board.
    /// Exits with status 1 if it is not.
    #[bpaf(command)]
    Check {
        /// Board identifier, eg. raspberry_pi_3b
        #[bpaf(positional("BOARD"))]
        board: String,
    },
    /// List known boards and their revision codes
    #[bpaf(command)]
    Boards,
    /// Print the raw identifiers used for detection
    #[bpaf(command)]
    Probe,
    /// Write the default config file
    #[bpaf(command("init-config"))]
    InitConfig,
}

#[derive(Clone, Debug, Bpaf)]
#[bpaf(options, version, descr(env!("CARGO_PKG_DESCRIPTION")))]
struct Cli {
    /// Read config from PATH instead of the default location
    #[bpaf(long, argument("PATH"))]
    config: Option<PathBuf>,
    /// Log detection steps to stderr
    #[bpaf(short, long)]
    verbose: bool,
    #[bpaf(external(command), fallback(Command::Name))]
    command: Command,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_boards() {
    for id in BoardId::ALL {
        println!(
            "{:<22} {:<30} {}",
            id.as_str(),
            id.display_name(),
            id.revision_codes().join(" ")
        );
    }
}

fn print_probe(id: &Identifier) {
    let hardware = id.hardware();
    let show = |v: Option<String>| v.unwrap_or_else(|| "-".into());

    println!("linux:     {}", id.runtime().is_linux());
    println!("platform:  {}", id.runtime().platform());
    println!("hardware:  {}", show(hardware.field("Hardware")));
    println!("revision:  {}", show(hardware.field("Revision")));
    println!("native:    {}", show(id.native().platform_name()));
    let armbian = match release::read_board(id.release_file()) {
        Ok(board) => show(board),
        Err(e) => format!("- ({e})"),
    };
    println!("armbian:   {armbian}");
    println!("board:     {}", show(id.name().map(|n| n.to_string())));
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = cli().run();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    match cli.command {
        Command::Name => match identifier(&config).name() {
            Some(name) => {
                println!("{name}");
                Ok(ExitCode::SUCCESS)
            },
            None => {
                println!("none");
                Ok(ExitCode::FAILURE)
            },
        },
        Command::Check { board } => {
            let supported = identifier(&config).supports_named(&board)?;
            println!("{supported}");
            Ok(if supported {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        },
        Command::Boards => {
            print_boards();
            Ok(ExitCode::SUCCESS)
        },
        Command::Probe => {
            print_probe(&identifier(&config));
            Ok(ExitCode::SUCCESS)
        },
        Command::InitConfig => {
            let path = config.save_with_header(cli.config.as_deref())?;
            println!("wrote config to {}", path.display());
            Ok(ExitCode::SUCCESS)
        },
    }
}
