use std::{
    env,
    io::{self, Read},
    process::ExitCode,
    time::Instant,
};

use teddy::{display_error, init_tracing, lexer::lexer::tokenize_reader};
use tracing::{debug, error};

fn read_source(path: Option<&str>) -> io::Result<(String, Vec<u8>)> {
    match path {
        None | Some("-") => {
            let mut content = Vec::new();
            io::stdin().read_to_end(&mut content)?;
            Ok((String::from("stdin"), content))
        }
        Some(path) => {
            let file_name = if path.contains('/') {
                path.rsplit('/').next().unwrap_or(path)
            } else {
                path
            };
            Ok((String::from(file_name), std::fs::read(path)?))
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    if args.len() > 2 {
        eprintln!("usage: {} [FILE]", args[0]);
        return ExitCode::from(2);
    }

    let (file_name, content) = match read_source(args.get(1).map(String::as_str)) {
        Ok(source) => source,
        Err(e) => {
            error!(error = %e, "failed to read source");
            eprintln!("Failed to read source: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();

    let tokens = match tokenize_reader(content.as_slice(), Some(file_name)) {
        Ok(tokens) => tokens,
        Err(e) => {
            display_error(&e, &String::from_utf8_lossy(&content));
            return ExitCode::FAILURE;
        }
    };

    debug!(elapsed = ?start.elapsed(), count = tokens.len(), "tokenized");

    for token in &tokens {
        println!("{}", token.debug());
    }

    ExitCode::SUCCESS
}
