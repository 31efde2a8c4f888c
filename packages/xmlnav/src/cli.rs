//! Command-line interface for xmlnav.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;

use crate::config::{LoadOptions, NameMatching};
use crate::error::Result;
use crate::navigator::Navigator;
use crate::types::NodeHandle;

/// Exit code when a command ran but found nothing.
pub const EXIT_NOT_FOUND: i32 = 1;

/// xmlnav - Query elements, text and attributes of an XML file.
#[derive(Parser)]
#[command(name = "xmlnav")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// XML file to load
    pub file: PathBuf,

    /// YAML file with load options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Truncate returned text to this many bytes
    #[arg(long)]
    pub max_text_len: Option<usize>,

    /// Match names with their namespace prefix (e.g. "ns:item")
    #[arg(long)]
    pub qualified_names: bool,

    /// Accept documents with a DTD
    #[arg(long)]
    pub allow_dtd: bool,

    /// Trim whitespace around element text
    #[arg(long)]
    pub trim: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count children named NAME under the element at PATH.
    Count {
        /// Slash-separated path from the root ("." for the root itself)
        path: String,
        name: String,
    },

    /// Print the text of the element at PATH.
    Contents { path: String },

    /// Print an attribute of the element at PATH.
    Attribute { path: String, name: String },

    /// List the children named NAME under the element at PATH.
    List { path: String, name: String },
}

impl Cli {
    /// Load options from `--config`, overridden by the individual flags.
    pub fn load_options(&self) -> Result<LoadOptions> {
        let mut options = match &self.config {
            Some(path) => LoadOptions::from_yaml_file(path)?,
            None => LoadOptions::default(),
        };
        if let Some(len) = self.max_text_len {
            options.max_text_len = Some(len);
        }
        if self.qualified_names {
            options.name_matching = NameMatching::Qualified;
        }
        if self.allow_dtd {
            options.allow_dtd = true;
        }
        if self.trim {
            options.trim_text = true;
        }
        Ok(options)
    }
}

/// Run the CLI, returning the process exit code.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    execute(&cli, &mut stdout.lock())
}

/// Execute a parsed command, writing results to `out`.
pub fn execute(cli: &Cli, out: &mut dyn Write) -> Result<i32> {
    let options = cli.load_options()?;
    let mut nav = Navigator::new();
    let (doc, root) = nav.load(&cli.file, &options)?;

    let code = match &cli.command {
        Commands::Count { path, name } => match resolve(&nav, root, path)? {
            Some(scope) => {
                writeln!(out, "{}", nav.count(scope, name)?)?;
                0
            }
            None => EXIT_NOT_FOUND,
        },
        Commands::Contents { path } => match resolve(&nav, root, path)? {
            Some(node) => {
                let text = nav.contents(node)?;
                writeln!(out, "{text}")?;
                if text.truncated {
                    warn_truncated(&nav, node)?;
                }
                0
            }
            None => EXIT_NOT_FOUND,
        },
        Commands::Attribute { path, name } => match resolve(&nav, root, path)? {
            Some(node) => match nav.attribute(node, name)? {
                Some(value) => {
                    writeln!(out, "{value}")?;
                    if value.truncated {
                        warn_truncated(&nav, node)?;
                    }
                    0
                }
                None => {
                    eprintln!(
                        "{} no attribute {} on <{}>",
                        style("Not found:").yellow().bold(),
                        style(name).cyan(),
                        nav.name(node)?
                    );
                    EXIT_NOT_FOUND
                }
            },
            None => EXIT_NOT_FOUND,
        },
        Commands::List { path, name } => match resolve(&nav, root, path)? {
            Some(scope) => {
                for (i, node) in nav.find_all(scope, name)?.into_iter().enumerate() {
                    writeln!(
                        out,
                        "{}\t{}\t{}",
                        style(i).cyan(),
                        nav.name(node)?,
                        nav.contents(node)?
                    )?;
                }
                0
            }
            None => EXIT_NOT_FOUND,
        },
    };

    nav.unload(doc)?;
    Ok(code)
}

fn resolve(nav: &Navigator, root: NodeHandle, path: &str) -> Result<Option<NodeHandle>> {
    let node = nav.find_path(root, path)?;
    if node.is_none() {
        eprintln!(
            "{} no element at path {}",
            style("Not found:").yellow().bold(),
            style(path).cyan()
        );
    }
    Ok(node)
}

fn warn_truncated(nav: &Navigator, node: NodeHandle) -> Result<()> {
    eprintln!(
        "{} output of <{}> was truncated",
        style("Warning:").yellow().bold(),
        nav.name(node)?
    );
    Ok(())
}
