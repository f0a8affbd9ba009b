use huffzip::{compress_file, decompress_file};
use std::path::PathBuf;
use std::process::ExitCode;

const HELP: &str = "fct - File Compression Tool

Usage:
    fct -c <file> [-d <archive>]
    fct -x <file.zip>

Commands:
    -c      compress the input file
    -x      decompress the input file
    -d      name of the compressed file, defaults to <input_file>.zip
    -h      help information
";

#[derive(Debug, PartialEq)]
enum Command {
    Compress {
        source: PathBuf,
        destination: Option<PathBuf>,
    },
    Decompress {
        source: PathBuf,
    },
    Help,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command, String> {
    let mut compress = false;
    let mut extract = false;
    let mut destination = None;
    let mut files = Vec::new();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-c" => compress = true,
            "-x" => extract = true,
            "-d" => {
                let name = args.next().ok_or("-d needs a file name")?;
                destination = Some(PathBuf::from(name));
            }
            flag if flag.starts_with('-') => return Err(format!("unknown flag {}", flag)),
            _ => files.push(PathBuf::from(arg)),
        }
    }

    let source = match files.as_slice() {
        [source] => source.clone(),
        [] => return Err("file name not given".to_string()),
        _ => return Err("expected exactly one file name".to_string()),
    };

    match (compress, extract) {
        (true, false) => Ok(Command::Compress {
            source,
            destination,
        }),
        (false, true) if destination.is_none() => Ok(Command::Decompress { source }),
        (false, true) => Err("-d only applies to -c".to_string()),
        _ => Err("choose exactly one of -c or -x".to_string()),
    }
}

fn main() -> ExitCode {
    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("fct: {}\n\n{}", message, HELP);
            return ExitCode::FAILURE;
        }
    };

    let (stage, result) = match command {
        Command::Help => {
            print!("{}", HELP);
            return ExitCode::SUCCESS;
        }
        Command::Compress {
            source,
            destination,
        } => ("compress", compress_file(&source, destination.as_deref())),
        Command::Decompress { source } => ("decompress", decompress_file(&source)),
    };

    match result {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("fct: {}: {}", stage, e);
            ExitCode::FAILURE
        }
    }
}
