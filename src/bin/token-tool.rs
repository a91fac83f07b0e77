//! CLI tool for working with share tokens offline.
//!
//! Usage:
//!   token-tool encode --markup page.html --style page.css --script page.ts
//!   token-tool decode <token>
//!   token-tool assemble <token> -o preview.html
//!
//! `decode` prints the session fields; `assemble` emits the preview
//! document (with the script embedded as-is — transpilation happens in
//! the browser, not here).

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use playground_rs::{Session, StyleAugmentation, assemble, decode, encode};

#[derive(Parser)]
#[command(name = "token-tool", about = "Inspect and produce playground share tokens")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a session into a share token.
    Encode {
        /// HTML fragment file (defaults to the built-in sample).
        #[arg(long)]
        markup: Option<PathBuf>,
        /// CSS fragment file.
        #[arg(long)]
        style: Option<PathBuf>,
        /// Script source file.
        #[arg(long)]
        script: Option<PathBuf>,
        /// Baseline stylesheet to inject.
        #[arg(long, value_enum, default_value = "tailwind")]
        augmentation: AugmentationArg,
        /// Treat the script as TypeScript.
        #[arg(long)]
        typed: bool,
    },
    /// Decode a share token and print the session fields.
    Decode {
        /// Token text (the part after `?` in a share link).
        token: String,
    },
    /// Decode a share token and print the assembled preview document.
    Assemble {
        /// Token text (the part after `?` in a share link).
        token: String,
        /// Output file (default: stdout).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum AugmentationArg {
    None,
    Tailwind,
    Normalize,
}

impl From<AugmentationArg> for StyleAugmentation {
    fn from(arg: AugmentationArg) -> Self {
        match arg {
            AugmentationArg::None => StyleAugmentation::None,
            AugmentationArg::Tailwind => StyleAugmentation::Tailwind,
            AugmentationArg::Normalize => StyleAugmentation::Normalize,
        }
    }
}

fn read_source(path: Option<PathBuf>, fallback: String) -> String {
    match path {
        Some(path) => match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => fallback,
    }
}

fn decode_or_exit(token: &str) -> Session {
    match decode(token.trim().trim_start_matches('?')) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Encode {
            markup,
            style,
            script,
            augmentation,
            typed,
        } => {
            let defaults = Session::default();
            let session = Session {
                markup: read_source(markup, defaults.markup),
                style: read_source(style, defaults.style),
                script: read_source(script, defaults.script),
                style_augmentation: augmentation.into(),
                script_is_typed: typed,
            };
            println!("{}", encode(&session));
        }
        Command::Decode { token } => {
            let session = decode_or_exit(&token);
            println!("augmentation: {}", session.style_augmentation.name());
            println!("typed script: {}", session.script_is_typed);
            println!("--- markup ---\n{}", session.markup);
            println!("--- style ---\n{}", session.style);
            println!("--- script ---\n{}", session.script);
        }
        Command::Assemble { token, output } => {
            let session = decode_or_exit(&token);
            let doc = assemble(&session, &session.script);
            match output {
                Some(path) => {
                    if let Err(e) = fs::write(&path, &doc) {
                        eprintln!("Error writing '{}': {}", path.display(), e);
                        process::exit(1);
                    }
                    eprintln!("Wrote {}", path.display());
                }
                None => print!("{}", doc),
            }
        }
    }
}
