//! Interactive CLI for the B-tree.
//!
//! Usage:
//!   btree_cli [--degree <t>] [--duplicates allow|ignore] [--underflow tolerate|repair]
//!             [--config <file.json>] [--export <file.json>]
//!
//! Reads the keys to insert, the key to search for and the key to delete from
//! stdin, one line each, and prints the tree before and after the deletion.
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::exit;

use btree_core::{BTree, BTreeConfig, DuplicatePolicy, Result, Session, UnderflowPolicy};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "btree_cli", version, about = "Interactive in-memory B-tree")]
struct Cli {
    #[arg(long, value_name = "T", help = "Minimum degree of the tree [default: 3]")]
    degree: Option<usize>,

    #[arg(long, value_enum, help = "What to do when inserting a key that is already present")]
    duplicates: Option<DuplicatesArg>,

    #[arg(long, value_enum, help = "How deletion treats nodes left below t - 1 keys")]
    underflow: Option<UnderflowArg>,

    #[arg(long, value_name = "FILE", help = "JSON tree configuration; flags override it")]
    config: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Write the final tree as JSON")]
    export: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DuplicatesArg {
    Allow,
    Ignore,
}

impl From<DuplicatesArg> for DuplicatePolicy {
    fn from(arg: DuplicatesArg) -> Self {
        match arg {
            DuplicatesArg::Allow => DuplicatePolicy::Allow,
            DuplicatesArg::Ignore => DuplicatePolicy::Ignore,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum UnderflowArg {
    Tolerate,
    Repair,
}

impl From<UnderflowArg> for UnderflowPolicy {
    fn from(arg: UnderflowArg) -> Self {
        match arg {
            UnderflowArg::Tolerate => UnderflowPolicy::Tolerate,
            UnderflowArg::Repair => UnderflowPolicy::Repair,
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "btree_cli=info,btree_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        tracing::error!("session failed: {e}");
        eprintln!("ERROR: {}", e);
        exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    tracing::info!(
        min_degree = config.min_degree,
        duplicates = ?config.duplicates,
        underflow = ?config.underflow,
        "starting session"
    );

    let tree = BTree::with_config(config)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(tree, stdin.lock(), stdout.lock());
    let report = session.run()?;
    tracing::info!(?report, "session finished");

    if let Some(path) = &cli.export {
        export_tree(session.tree(), path)?;
        tracing::info!("exported tree to {}", path.display());
    }
    Ok(())
}

/// Start from the config file (or defaults) and apply flag overrides
fn load_config(cli: &Cli) -> Result<BTreeConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            serde_json::from_str::<BTreeConfig>(&text)?
        }
        None => BTreeConfig::default(),
    };

    if let Some(degree) = cli.degree {
        config.min_degree = degree;
    }
    if let Some(duplicates) = cli.duplicates {
        config.duplicates = duplicates.into();
    }
    if let Some(underflow) = cli.underflow {
        config.underflow = underflow.into();
    }
    config.validate()?;
    Ok(config)
}

fn export_tree(tree: &BTree, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&tree.export())?;
    fs::write(path, json)?;
    Ok(())
}
