use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser as ClapParser, Subcommand};

use elmscene::interpreter::{DEFAULT_ROOT, Interpreter};
use elmscene::lexer::Lexer;
use elmscene::parser::Parser;
use elmscene::types::{TypeEnv, infer_program};

#[derive(ClapParser, Debug)]
#[command(name = "elmscene")]
#[command(about = "Evaluate and type-check Elm-style scene programs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a program and print the value of its root declaration
    Run {
        file: PathBuf,
        /// Declaration whose value is printed
        #[arg(long, default_value = DEFAULT_ROOT)]
        root: String,
        /// Type-check the program before evaluating it
        #[arg(long)]
        check: bool,
    },
    /// Print the inferred type of every top-level binding
    Check { file: PathBuf },
    /// Print the token stream of a source file
    Tokens { file: PathBuf },
    /// Evaluate expressions and declarations read from stdin
    Repl,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run { file, root, check } => {
            let source = read_source(&file)?;
            if check {
                type_check(&source)?;
            }
            let mut interpreter = Interpreter::with_root(root);
            let value = interpreter.compile(&source)?;
            println!("{value}");
        }
        Command::Check { file } => {
            let source = read_source(&file)?;
            let env = type_check(&source)?;
            let mut bindings: Vec<_> = env.iter().collect();
            bindings.sort_by(|a, b| a.0.cmp(b.0));
            for (name, scheme) in bindings {
                println!("{name} : {scheme}");
            }
        }
        Command::Tokens { file } => {
            let source = read_source(&file)?;
            for token in Lexer::new(&source)? {
                println!("{:<16} {}", token.describe(), token.raw());
            }
        }
        Command::Repl => repl()?,
    }

    Ok(())
}

fn read_source(file: &Path) -> anyhow::Result<String> {
    fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))
}

fn type_check(source: &str) -> anyhow::Result<TypeEnv> {
    let (nodes, parse_errors) = Parser::new(source)?.parse_all();
    for err in &parse_errors {
        eprintln!("{err}");
    }
    if !parse_errors.is_empty() {
        bail!("{} unit(s) failed to parse", parse_errors.len());
    }

    match infer_program(&nodes) {
        Ok(env) => Ok(env),
        Err(errors) => {
            for err in &errors {
                eprintln!("{err}");
            }
            bail!("{} unit(s) failed to type-check", errors.len());
        }
    }
}

fn repl() -> anyhow::Result<()> {
    let mut interpreter = Interpreter::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print!("> ");
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        if !line.trim().is_empty() {
            match interpreter.interpret(&line) {
                Ok(value) => println!("{value}"),
                Err(err) => eprintln!("{err}"),
            }
        }
        print!("> ");
        stdout.flush()?;
    }
    println!();

    Ok(())
}
