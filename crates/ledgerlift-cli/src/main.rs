mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use ledgerlift_core::model::DocumentKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ledgerlift",
    version,
    about = "Convert chargeback invoice and bank statement PDFs into record tables"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one or more PDFs of a given layout into export tables
    Convert {
        /// Document layout the input files follow
        #[arg(short, long, value_enum)]
        kind: Kind,

        /// Input PDF files
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write one CSV file per table into this directory
        #[arg(short = 'd', long = "out-dir", value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Preview format on stdout when no --out-dir is given: table or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Dump the raw text lines extracted from a PDF, page by page
    Extract {
        /// Path to PDF file
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Invoice,
    Statement,
    Sales,
}

impl From<Kind> for DocumentKind {
    fn from(kind: Kind) -> DocumentKind {
        match kind {
            Kind::Invoice => DocumentKind::Invoice,
            Kind::Statement => DocumentKind::Statement,
            Kind::Sales => DocumentKind::Sales,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            kind,
            files,
            out_dir,
            output,
        } => commands::convert::run(kind.into(), &files, out_dir, &output),
        Commands::Extract { file } => commands::extract::run(&file),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
