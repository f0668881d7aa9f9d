use erdot::dot;
use erdot::parser::Parser;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <descriptor file> <output file>", args[0]);
        eprintln!("Supply the ERD descriptor file and the dot output file name.");
        process::exit(1);
    }

    let input_path = &args[1];
    let output_path = &args[2];

    let source = match fs::read_to_string(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {}", input_path, e);
            process::exit(1);
        }
    };

    let mut parser = Parser::new(&source);
    let schema = match parser.parse() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    for warning in parser.warnings() {
        eprintln!("warning: {}", warning);
    }

    // The output file is only touched once the descriptor parsed cleanly.
    if Path::new(output_path).exists() && !confirm_overwrite(output_path) {
        return;
    }

    let file = match fs::File::create(output_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Failed to write {}: {}", output_path, e);
            process::exit(1);
        }
    };

    // Output streams record by record; on a resolution failure whatever was
    // already flushed stays on disk and the file is not valid dot.
    if let Err(e) = dot::write_dot(&schema, file) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn confirm_overwrite(path: &str) -> bool {
    print!("File: {} exists. Overwrite? (y/n): ", path);
    io::stdout().flush().ok();
    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    answer.trim() == "y"
}
