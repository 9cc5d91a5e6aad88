//! Command-line interface for the Clite syntax analyzer.
//!
//! Reads a source file into memory, runs the [`CliteParser`] over it and
//! prints the parse tree, or a numbered error report with exit status 1.
//! The `lex`, `grammar` and `table` commands dump the intermediate data.
//!
//! Set `RUST_LOG=debug` for run statistics or `RUST_LOG=trace` for every
//! lexer match and engine step.
use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use clite::{CliteError, CliteParser, GRAMMAR, SLR_TABLE, tokenize};
use slr::{Step, TokenKind};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parses a source file and prints its parse tree
    Parse {
        /// Clite source file
        #[arg(short, long)]
        input: PathBuf,
        /// Grammar file, one production per line (default: bundled)
        #[arg(short, long)]
        grammar: Option<PathBuf>,
        /// SLR table in CSV form (default: bundled)
        #[arg(short, long)]
        table: Option<PathBuf>,
        /// Prints every shift, reduce and accept step
        #[arg(long)]
        trace: bool,
    },
    /// Prints the tokens of a source file
    Lex {
        /// Clite source file
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Prints the numbered productions of a grammar
    Grammar {
        /// Grammar file (default: bundled)
        #[arg(short, long)]
        grammar: Option<PathBuf>,
    },
    /// Prints the actions and gotos of an SLR table
    Table {
        /// SLR table in CSV form (default: bundled)
        #[arg(short, long)]
        table: Option<PathBuf>,
    },
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("can't open {path:?}"))
}

fn read_or(path: Option<&Path>, bundled: &'static str) -> Result<Cow<'static, str>> {
    Ok(match path {
        Some(path) => Cow::Owned(read(path)?),
        None => Cow::Borrowed(bundled),
    })
}

/// Prints the report of `err` and yields a failing exit code.
fn fail(err: CliteError) -> ExitCode {
    println!("{}", err.report());
    ExitCode::FAILURE
}

fn main() -> Result<ExitCode> {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Parse {
            input,
            grammar,
            table,
            trace,
        } => {
            let src = read(&input)?;
            let grammar = read_or(grammar.as_deref(), GRAMMAR)?;
            let table = read_or(table.as_deref(), SLR_TABLE)?;
            let parser = match CliteParser::from_sources(&grammar, &table) {
                Ok(parser) => parser,
                Err(err) => return Ok(fail(err)),
            };

            let result = if trace {
                let mut n = 0usize;
                parser.parse_traced(&src, &mut |step: &Step<'_, clite::TokenID>| {
                    n += 1;
                    println!(
                        "{n:>5}  [{}]  {} {:?}  {}",
                        step.render_stack(),
                        step.lookahead.symbol(),
                        step.lexeme,
                        step.action
                    );
                })
            } else {
                parser.parse(&src)
            };

            match result {
                Ok(tree) => {
                    println!("Input is syntactically correct!");
                    println!("Parse Tree:");
                    print!("{tree}");
                    log::info!("Tree: {} nodes, depth {}", tree.size(), tree.depth());
                }
                Err(err) => return Ok(fail(err)),
            }
        }

        Commands::Lex { input } => {
            let src = read(&input)?;
            match tokenize(&src) {
                Ok(tokens) => {
                    for t in tokens {
                        println!("{} {:?} {}", t.lexeme, t.token_id, t.token_id.code());
                    }
                }
                Err(err) => return Ok(fail(err.into())),
            }
        }

        Commands::Grammar { grammar } => {
            let text = read_or(grammar.as_deref(), GRAMMAR)?;
            match text.parse::<slr::Grammar<clite::TokenID>>() {
                Ok(grammar) => print!("{grammar}"),
                Err(err) => return Ok(fail(slr::LoadError::from(err).into())),
            }
        }

        Commands::Table { table } => {
            let text = read_or(table.as_deref(), SLR_TABLE)?;
            match text.parse::<slr::Table>() {
                Ok(table) => {
                    for (state, column, action) in table.actions() {
                        println!("({state}, {column}) -> {action}");
                    }
                    for (state, name, next) in table.gotos() {
                        println!("({state}, {name}) -> {next}");
                    }
                }
                Err(err) => return Ok(fail(slr::LoadError::from(err).into())),
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
