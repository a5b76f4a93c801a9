// src/main.rs
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use pairgrid::{
    DEFAULT_PATH, ParseMode, SaveMode, StoreOptions, TokenKind, TransitionPair, catalog,
    pairs::{self, GridView, RecordFormat, Session},
};

#[derive(Parser, Debug)]
#[command(version, about = "Edit the allowed token-transition matrix", long_about = None)]
struct Args {
    /// Pairs file to read and write
    #[arg(short, long, default_value = DEFAULT_PATH)]
    file: PathBuf,

    /// Qualifier written in front of each token name
    #[arg(long, default_value = pairs::DEFAULT_QUALIFIER, value_parser = parse_qualifier)]
    qualifier: RecordFormat,

    /// Fail on malformed lines and unknown token names instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Save through a temp file and rename (pairs file and JSON export alike)
    #[arg(long)]
    atomic: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prints the matrix
    Show {
        /// Marks the row and column of one cell
        #[arg(long, num_args = 2, value_names = ["FROM", "TO"])]
        highlight: Option<Vec<TokenKind>>,
    },
    /// Lists allowed pairs
    List,
    /// Lists the token catalog
    Tokens,
    /// Allows a pair and saves
    Allow { from: TokenKind, to: TokenKind },
    /// Disallows a pair and saves
    Deny { from: TokenKind, to: TokenKind },
    /// Flips a pair and saves
    Toggle { from: TokenKind, to: TokenKind },
    /// Disallows every pair and saves
    Clear,
    /// Parses the file strictly and reports what it contains
    Check,
    /// Writes the matrix as JSON
    ExportJson { out: PathBuf },
    /// Replaces the matrix with a JSON export and saves
    ImportJson { input: PathBuf },
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn parse_qualifier(s: &str) -> Result<RecordFormat, pairgrid::PairsError> {
    RecordFormat::new(s)
}

fn run(args: Args) -> Result<()> {
    let options = StoreOptions::default()
        .with_path(&args.file)
        .with_format(args.qualifier)
        .with_parse_mode(if args.strict {
            ParseMode::Strict
        } else {
            ParseMode::Permissive
        })
        .with_save_mode(if args.atomic {
            SaveMode::Atomic
        } else {
            SaveMode::Truncate
        });

    match args.command {
        Commands::Check => check(options.with_parse_mode(ParseMode::Strict))?,
        Commands::Show { highlight } => {
            let hl = match highlight.as_deref() {
                Some(&[from, to]) => Some(TransitionPair::new(from, to)),
                Some(_) => bail!("--highlight takes exactly two token names"),
                None => None,
            };
            let session = open(options)?;
            print!("{}", GridView::new(session.set()).highlight(hl).render());
        }
        Commands::List => {
            for p in open(options)?.set().allowed() {
                println!("{p}");
            }
        }
        Commands::Tokens => {
            for k in catalog() {
                println!("{:>2}  {k}", k.index());
            }
        }
        Commands::Allow { from, to } => {
            let mut session = open(options)?;
            session.set_allowed(from, to, true);
            save(&mut session)?;
        }
        Commands::Deny { from, to } => {
            let mut session = open(options)?;
            session.set_allowed(from, to, false);
            save(&mut session)?;
        }
        Commands::Toggle { from, to } => {
            let mut session = open(options)?;
            let now = session.toggle(from, to);
            let state = if now { "allowed" } else { "denied" };
            println!("{} {state}", TransitionPair::new(from, to));
            save(&mut session)?;
        }
        Commands::Clear => {
            let mut session = open(options)?;
            session.clear();
            save(&mut session)?;
        }
        Commands::ExportJson { out } => {
            let session = open(options)?;
            pairs::save_json_with(&out, session.set(), session.options())
                .with_context(|| format!("exporting to {}", out.display()))?;
            println!(
                "exported {} allowed pairs to {}",
                session.set().count_allowed(),
                out.display()
            );
        }
        Commands::ImportJson { input } => {
            let bytes =
                std::fs::read(&input).with_context(|| format!("reading {}", input.display()))?;
            let imported = pairs::load_json_bytes(&bytes)
                .with_context(|| format!("parsing {}", input.display()))?;
            let mut session = open(options)?;
            session.clear();
            for p in imported.allowed() {
                session.set_allowed(p.from, p.to, true);
            }
            save(&mut session)?;
        }
    }

    Ok(())
}

fn open(options: StoreOptions) -> Result<Session> {
    let path = options.path.clone();
    Session::open(options).with_context(|| format!("loading {}", path.display()))
}

fn save(session: &mut Session) -> Result<()> {
    session
        .save()
        .with_context(|| format!("saving {}", session.options().path.display()))?;
    println!(
        "Allowed pairs saved to {} ({} pairs)",
        session.options().path.display(),
        session.set().count_allowed()
    );
    Ok(())
}

fn check(options: StoreOptions) -> Result<()> {
    match Session::open(options.clone()) {
        Ok(session) => {
            let r = session.last_report();
            println!(
                "{}: {} records, {} blank lines, {} allowed pairs",
                options.path.display(),
                r.accepted,
                r.blank,
                session.set().count_allowed()
            );
            Ok(())
        }
        Err(e) if e.is_record_error() => {
            log::warn!("strict check failed: {e}");
            Err(e).with_context(|| format!("checking {}", options.path.display()))
        }
        Err(e) => Err(e.into()),
    }
}
