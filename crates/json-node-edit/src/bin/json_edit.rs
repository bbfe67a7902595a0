//! `json-edit`: write a value at a path of a JSON document.
//!
//! Usage:
//!   json-edit '<path>' '<value>' [rows]
//!
//! The document is read from stdin. `<path>` is a JSON array (`["a",0]`) or a
//! locator (`$["a"][0]`). `<value>` is coerced to a scalar, or parsed as JSON
//! when it opens an object/array or when `rows` is greater than one.

use std::io::{self, Read, Write};

use json_node_edit::cli::{edit_document, init_logging, load_options, parse_row_count, CliError};

fn run(args: &[String]) -> Result<String, CliError> {
    let options = load_options()?;
    let rows = parse_row_count(args.get(3).map(String::as_str))?;

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;

    edit_document(buf.trim(), &args[1], &args[2], rows, &options)
}

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: json-edit '<path>' '<value>' [rows]");
        std::process::exit(1);
    }

    match run(&args) {
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
