use std::fmt;
use std::io::{BufRead, Write};

use services::{RevealPolicy, TutorEngine};
use spell_core::Clock;
use wordbank::{CsvWordBank, WordBankSource};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidReveal { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidReveal { raw } => write!(f, "invalid --reveal value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct Args {
    words_path: String,
    reveal: RevealPolicy,
    advance_on_correct: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--words <csv_path>] [--reveal <policy>] [--no-advance]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --words <csv_path>   word bank CSV (columns: word,definition,origin,sentence,difficulty)");
    eprintln!("  --reveal <policy>    reveal spelling on a miss: never | immediate | after:N");
    eprintln!("  --no-advance         do not move to the next word after a correct attempt");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --words words.csv");
    eprintln!("  --reveal never");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  SPELL_WORDS_CSV, SPELL_REVEAL");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut words_path =
            std::env::var("SPELL_WORDS_CSV").unwrap_or_else(|_| "words.csv".into());
        let mut reveal = std::env::var("SPELL_REVEAL")
            .ok()
            .and_then(|value| value.parse::<RevealPolicy>().ok())
            .unwrap_or_default();
        let mut advance_on_correct = true;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--words" => {
                    words_path = require_value(args, "--words")?;
                }
                "--reveal" => {
                    let value = require_value(args, "--reveal")?;
                    reveal = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidReveal { raw: value })?;
                }
                "--no-advance" => {
                    advance_on_correct = false;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            words_path,
            reveal,
            advance_on_correct,
        })
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Load + validate the bank at startup. A bad file is fatal here; the
    // session itself never fails once the bank is in memory.
    let bank = CsvWordBank::new(&args.words_path).load().map_err(|e| {
        eprintln!("failed to load {}: {e}", args.words_path);
        e
    })?;

    let mut engine = TutorEngine::new(bank, Clock::default_clock())?
        .with_reveal_policy(args.reveal)
        .with_advance_on_correct(args.advance_on_correct);

    println!(
        "Type: start (or start quiz), then definition/origin/sentence, \
         type your spelling attempt, next, or stop."
    );

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        print!("You: ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF ends the session like an explicit stop.
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let reply = engine.respond(&line);
        println!("Tutor: {}", reply.text);
        if reply.ended {
            break;
        }
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
