use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use stowbox::error::Result;
use stowbox::file_ops;
use stowbox::key_input::{KeyReader, ReaderKeyReader, TerminalKeyReader};

#[derive(Parser, Debug)]
#[command(
    name = "stowbox",
    version,
    about = "hide a message in any file with a short shared key"
)]
struct Cli {
    /// Read key from stdin instead of from terminal
    #[arg(long = "key-stdin", action = ArgAction::SetTrue, global = true)]
    key_stdin: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Hide a message inside a carrier file
    Hide {
        /// Path to the carrier file the message is hidden in
        #[arg(short = 'i', long = "input")]
        input: PathBuf,
        /// Path to write the encoded file to
        #[arg(short = 'o', long = "output")]
        output: PathBuf,
        /// The message to hide
        #[arg(short = 'm', long = "message")]
        message: String,
    },
    /// Reveal the message hidden in an encoded file
    Reveal {
        /// Path to the encoded file
        #[arg(short = 'i', long = "input")]
        input: PathBuf,
        /// Path to write the recovered message to (stdout when omitted)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
}

fn run(cli: Cli) -> Result<()> {
    let mut key_reader: Box<dyn KeyReader> = if cli.key_stdin {
        Box::new(ReaderKeyReader::new(Box::new(std::io::stdin())))
    } else {
        Box::new(TerminalKeyReader::new())
    };

    match cli.command {
        Commands::Hide {
            input,
            output,
            message,
        } => file_ops::conceal_file(&input, &output, &message, key_reader.as_mut()),
        Commands::Reveal { input, output } => {
            let message = file_ops::reveal_file(&input, key_reader.as_mut())?;
            match output {
                Some(path) => std::fs::write(&path, message).map_err(|e| {
                    stowbox::error::StowboxError::with_kind_and_source(
                        stowbox::error::ErrorCategory::User,
                        stowbox::error::ErrorKind::Io,
                        format!("failed to write to {}", path.display()),
                        e,
                    )
                }),
                None => {
                    println!("{}", message);
                    Ok(())
                }
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
