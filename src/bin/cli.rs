//! selectsmith command line
//!
//! Probes local HTML files for the selectors of a table of contents and a chapter page, or
//! resolves a selector against a file to check what it matches.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use selectsmith::probe::{ConsoleChooser, Page, Probe};
use selectsmith::{Document, DomTree, ProbeOptions, SelectorChain, SynthesisOptions};
use std::io::{stdin, stdout};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "selectsmith")]
#[command(version)]
#[command(about = "Derive stable CSS selectors from sample pages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interactively pick headings, links and content and print their selectors as JSON
    Probe {
        /// Table of contents page
        #[arg(value_name = "TOC")]
        toc: PathBuf,

        /// Chapter page
        #[arg(value_name = "CHAPTER")]
        chapter: Option<PathBuf>,

        /// Deepest heading level offered as a candidate (1-6)
        #[arg(long, env = "SELECTSMITH_MAX_HEADING_LEVEL", default_value = "6")]
        max_heading_level: u8,

        /// Match content excerpts case-sensitively
        #[arg(long)]
        case_sensitive: bool,

        /// Skip re-resolving synthesized selectors
        #[arg(long)]
        no_verify: bool,
    },

    /// Print the text of every element a selector matches
    Resolve {
        /// HTML file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Selector to evaluate
        #[arg(value_name = "SELECTOR")]
        selector: String,
    },
}

fn load(path: &Path) -> Result<DomTree> {
    let html = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let tree = DomTree::from_html(&html);
    log::info!("Loaded {} elements from {}", tree.len(), path.display());
    Ok(tree)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Probe {
            toc,
            chapter,
            max_heading_level,
            case_sensitive,
            no_verify,
        } => {
            let options = ProbeOptions::new()
                .max_heading_level(max_heading_level)
                .case_insensitive(!case_sensitive)
                .synthesis(SynthesisOptions::new().verify(!no_verify));

            let toc = load(&toc)?;
            let chapter = chapter.as_deref().map(load).transpose()?;

            let chooser = ConsoleChooser::new(stdin().lock(), stdout());
            let mut probe = Probe::new(chooser, options);
            let chapter_page = chapter.as_ref().map(Page::whole);
            let report = probe
                .run(&Page::whole(&toc), chapter_page.as_ref())
                .context("Probe aborted")?;

            println!("{}", report.to_json()?);
        }
        Command::Resolve { file, selector } => {
            let tree = load(&file)?;
            let chain: SelectorChain = selector.parse()?;

            let matches = chain.resolve(&tree, tree.root());
            eprintln!("{} match(es) for '{}'", matches.len(), chain);
            for node in matches {
                println!("{}\t{}", tree.describe(node), tree.text(node));
            }
        }
    }

    Ok(())
}
