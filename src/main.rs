//! prefixr binary

use prefixr::cli::Cli;
use prefixr::{PrefixerError, NAME};
use std::process;

fn main() {
    let mut cli = Cli::new();

    match cli.run() {
        Ok(()) => {}
        Err(PrefixerError::Io(e)) => {
            eprintln!("IO Error: {}", e);
            process::exit(1);
        }
        Err(e @ PrefixerError::Parse { .. }) => {
            eprintln!("Parse error: {}", e);
            if let (Some(line), PrefixerError::Parse { column, .. }) = (e.source_line(), &e) {
                eprintln!("  {}", line);
                eprintln!("  {}^", " ".repeat(column.saturating_sub(1)));
            }
            process::exit(1);
        }
        Err(e) => {
            eprintln!("{}: {}", NAME, e);
            process::exit(1);
        }
    }
}
