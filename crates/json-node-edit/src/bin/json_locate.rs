//! `json-locate`: print the value at a path of a JSON document.
//!
//! Usage:
//!   json-locate '<path>'
//!
//! The document is read from stdin. The path is the first argument, either a
//! locator (`$["a"][0]`) or a JSON array (`["a",0]`).

use std::io::{self, Read, Write};

use json_node_edit::cli::{init_logging, load_options, lookup_path, CliError};

fn run(path: &str) -> Result<String, CliError> {
    let options = load_options()?;
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    lookup_path(buf.trim(), path, &options)
}

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    let path = match args.get(1) {
        Some(p) => p.clone(),
        None => {
            eprintln!("First argument must be a path.");
            std::process::exit(1);
        }
    };

    match run(&path) {
        Ok(result) => {
            let mut out = io::stdout();
            if let Err(e) = out
                .write_all(result.as_bytes())
                .and_then(|_| out.write_all(b"\n"))
            {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
