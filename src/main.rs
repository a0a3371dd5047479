mod report;

use composer_core::{
    DialogData, Project, codec, create_cross_train_config, focus::FocusPath, generate_project_recognizers,
    get_dialog_data,
};
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

enum Command {
    Encode(String),
    Decode(String),
    Get(String),
    CrossTrain,
    Recognizers,
}

enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    fn parse(value: &str) -> Self {
        if value == "-" { Source::Stdin } else { Source::File(PathBuf::from(value)) }
    }

    fn reader(&self) -> io::Result<Box<dyn Read>> {
        Ok(match self {
            Source::Stdin => Box::new(io::stdin().lock()),
            Source::File(path) => Box::new(BufReader::new(File::open(path)?)),
        })
    }
}

struct CliConfig {
    command: Command,
    source: Source,
    report: bool,
    color: bool,
}

fn run(config: &CliConfig) -> composer_core::Result<()> {
    match &config.command {
        Command::Encode(path) => {
            let dialog: Value = serde_json::from_reader(config.source.reader()?)?;
            println!("{}", codec::encode_array_path_to_designer_path(&dialog, path));
        }
        Command::Decode(path) => {
            let dialog: Value = serde_json::from_reader(config.source.reader()?)?;
            match codec::decode_designer_path_to_array_path(&dialog, path) {
                Some(decoded) => println!("{decoded}"),
                None => println!("null"),
            }
        }
        Command::Get(focus) => {
            let project = Project::from_reader(config.source.reader()?)?;
            let dialogs = project.dialog_collection();
            let focus = FocusPath::parse(focus);
            match get_dialog_data(&dialogs, &focus.dialog_id, &focus.subpath) {
                DialogData::NoSelection => println!("\"\""),
                DialogData::Found(value) => println!("{}", serde_json::to_string_pretty(value)?),
                DialogData::Missing => println!("null"),
            }
        }
        Command::CrossTrain => {
            let project = Project::from_reader(config.source.reader()?)?;
            let cross_train = create_cross_train_config(&project.dialog_infos(), &project.lu_files, &project.options);
            if config.report {
                report::print_cross_train(&cross_train, config.color);
            } else {
                println!("{}", serde_json::to_string_pretty(&cross_train)?);
            }
        }
        Command::Recognizers => {
            let project = Project::from_reader(config.source.reader()?)?;
            let recognizers = generate_project_recognizers(
                &project.dialog_infos(),
                &project.lu_files,
                &project.qna_files,
                &project.options,
                &project.recognizers,
            )?;
            println!("{}", serde_json::to_string_pretty(&recognizers)?);
        }
    }
    Ok(())
}

fn parse_args() -> Result<CliConfig, String> {
    let mut command: Option<String> = None;
    let mut positional: Vec<String> = Vec::new();
    let mut dialog: Option<Source> = None;
    let mut project: Option<Source> = None;
    let mut report = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("composer-core {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--report" => report = true,
            "--dialog" | "-d" => {
                let value = args.next().ok_or_else(|| "error: --dialog expects a value".to_string())?;
                dialog = Some(Source::parse(&value));
            }
            "--project" | "-p" => {
                let value = args.next().ok_or_else(|| "error: --project expects a value".to_string())?;
                project = Some(Source::parse(&value));
            }
            "--" => {
                positional.extend(args.by_ref());
                break;
            }
            _ if arg.starts_with("--dialog=") => dialog = Some(Source::parse(arg.trim_start_matches("--dialog="))),
            _ if arg.starts_with("--project=") => project = Some(Source::parse(arg.trim_start_matches("--project="))),
            _ if arg.starts_with('-') && arg != "-" => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ if command.is_none() => command = Some(arg),
            _ => positional.push(arg),
        }
    }

    let Some(name) = command else {
        return Err(format!("error: no command provided\n\n{}", help_text()));
    };

    let mut take_path = |what: &str| -> Result<String, String> {
        match positional.len() {
            0 => Err(format!("error: {name} expects a {what}")),
            1 => Ok(positional.remove(0)),
            _ => Err(format!("error: {name} takes a single {what}")),
        }
    };

    let command = match name.as_str() {
        "encode" => Command::Encode(take_path("path")?),
        "decode" => Command::Decode(take_path("path")?),
        "get" => Command::Get(take_path("focus path")?),
        "cross-train" => Command::CrossTrain,
        "recognizers" => Command::Recognizers,
        other => return Err(format!("error: unknown command '{other}'\n\n{}", help_text())),
    };

    let source = match command {
        Command::Encode(_) | Command::Decode(_) => dialog.ok_or_else(|| format!("error: {name} requires --dialog"))?,
        _ => project.ok_or_else(|| format!("error: {name} requires --project"))?,
    };

    Ok(CliConfig { command, source, report, color })
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "composer-core {version}

Dialog path, cross-train and recognizer derivations.

Usage:
  composer-core encode --dialog <file> <path>
  composer-core decode --dialog <file> <path>
  composer-core get --project <file> <dialogId#subpath>
  composer-core cross-train --project <file> [--report]
  composer-core recognizers --project <file>

Options:
  -d, --dialog <file>        Dialog document (JSON). Use '-' for stdin.
  -p, --project <file>       Project bundle (JSON). Use '-' for stdin.
  --report                   Print a readable cross-train summary instead of JSON.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Logging goes to stderr; set RUST_LOG (default: warn).

Exit codes:
  0  Success.
  1  Runtime error (unreadable input, invalid project).
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}
