use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use edm_types::Path;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(
    name = "edm",
    about = "Election document index: look up elements by @id and @type",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format [default: from config, else text]
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Config file [default: ./edm.toml when present]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Namespace prefixing declared type names, e.g. CVR or ElectionResults
    #[arg(long, global = true)]
    pub namespace: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List every element identifier
    Ids(DocumentArgs),
    /// List declared types with element counts
    Types(TypesArgs),
    /// Show the element with an identifier
    Get(GetArgs),
    /// List the elements of a type
    Find(FindArgs),
    /// Show where the element with an identifier lives
    Locate(LocateArgs),
    /// Remove the element with an identifier and write the document
    Remove(RemoveArgs),
    /// Move the element with an identifier to another path
    Move(MoveArgs),
}

#[derive(Args)]
pub struct DocumentArgs {
    /// JSON document to index
    pub file: PathBuf,
}

#[derive(Args)]
pub struct TypesArgs {
    pub file: PathBuf,
    /// Drop the namespace prefix from type names
    #[arg(long)]
    pub bare: bool,
}

#[derive(Args)]
pub struct GetArgs {
    pub file: PathBuf,
    pub id: String,
    /// Fail when no element has the identifier
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct FindArgs {
    pub file: PathBuf,
    /// Type name, bare (`GpUnit`) or qualified (`CVR.GpUnit`)
    pub type_name: String,
    /// Fail when no element has the type
    #[arg(long)]
    pub strict: bool,
    /// Print only the number of matches
    #[arg(short, long)]
    pub count: bool,
}

#[derive(Args)]
pub struct LocateArgs {
    pub file: PathBuf,
    pub id: String,
}

#[derive(Args)]
pub struct RemoveArgs {
    pub file: PathBuf,
    pub id: String,
    /// Write the edited document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct MoveArgs {
    pub file: PathBuf,
    pub id: String,
    /// Destination, e.g. `/gp_unit/0`; resolved after the element is removed
    #[arg(value_parser = parse_path)]
    pub to: Path,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Parse `/gp_unit/0/name` into a document path. Numeric segments are
/// sequence positions; `/` alone is the root.
pub fn parse_path(text: &str) -> Result<Path, String> {
    let rest = text
        .strip_prefix('/')
        .ok_or_else(|| format!("path must start with '/': {text}"))?;
    let mut path = Path::root();
    for segment in rest.split('/').filter(|s| !s.is_empty()) {
        path = match segment.parse::<usize>() {
            Ok(i) => path.index(i),
            Err(_) => path.field(segment),
        };
    }
    Ok(path)
}
