//! Stubber - layered settings store
//!
//! Usage:
//!   stubber get editor.tabSize                  # Resolve a section
//!   stubber set editor.tabSize 4 --target global
//!   stubber show                                # Print the snapshot
//!   stubber verify expected.json                # Compare against a snapshot

mod paths;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stubber_core::configuration::snapshot::{
    parse_plain_json_str, parse_plain_toml_str, to_json_string,
};
use stubber_core::configuration::{
    Branch, ConfigurationTarget, Node, ScopedConfigurationView, SharedConfiguration,
    load_snapshot, nested_has, save_snapshot, split_section,
};
use stubber_core::stub::ConfigurationStub;
use stubber_core::types::ConfigurationScope;

#[derive(Parser)]
#[command(name = "stubber")]
#[command(about = "Layered settings store", long_about = None)]
struct Cli {
    /// Snapshot file to operate on
    #[arg(long, short, global = true, env = "STUBBER_SNAPSHOT")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value a section resolves to
    Get {
        section: String,
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Print whether a section is defined in any scope
    Has {
        section: String,
        #[command(flatten)]
        view: ViewArgs,
    },

    /// Write a value into one scope
    Set {
        section: String,
        /// JSON value; anything that is not valid JSON is stored as a string
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[command(flatten)]
        view: ViewArgs,
        /// Scope to write (defaults to workspace-folder)
        #[arg(long)]
        target: Option<TargetArg>,
        /// Write into the language overlay of --language
        #[arg(long)]
        override_in_language: bool,
    },

    /// Merge a plain JSON or TOML settings file into one scope
    Import {
        path: PathBuf,
        /// Scope to write (defaults to workspace-folder)
        #[arg(long)]
        target: Option<TargetArg>,
    },

    /// Print the whole snapshot
    Show {
        /// Print the snapshot fingerprint instead
        #[arg(long)]
        fingerprint: bool,
    },

    /// Fail unless the snapshot equals an expected snapshot
    Verify { expected: PathBuf },
}

#[derive(Args)]
struct ViewArgs {
    /// Section the path is relative to
    #[arg(long, default_value = "")]
    prefix: String,
    /// Language identifier to bind the view to
    #[arg(long)]
    language: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum TargetArg {
    Global,
    Workspace,
    WorkspaceFolder,
    /// Legacy shorthand for global
    True,
    /// Legacy shorthand for workspace
    False,
}

impl From<TargetArg> for ConfigurationTarget {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Global => ConfigurationScope::Global.into(),
            TargetArg::Workspace => ConfigurationScope::Workspace.into(),
            TargetArg::WorkspaceFolder => ConfigurationScope::WorkspaceFolder.into(),
            TargetArg::True => true.into(),
            TargetArg::False => false.into(),
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stubber=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let snapshot_path = match cli.file {
        Some(path) => path,
        None => paths::default_snapshot_path()?,
    };

    run_cli(cli.command, &snapshot_path)
}

fn run_cli(command: Commands, snapshot_path: &Path) -> Result<()> {
    let shared = SharedConfiguration::new(load_snapshot(snapshot_path).with_context(|| {
        format!("Failed to load snapshot: {}", snapshot_path.display())
    })?);

    match command {
        Commands::Get { section, view } => run_get(&open_view(&shared, &view), &section),
        Commands::Has { section, view } => {
            println!("{}", open_view(&shared, &view).has(&section));
            Ok(())
        }
        Commands::Set {
            section,
            value,
            view,
            target,
            override_in_language,
        } => {
            let node = parse_value(&value);
            open_view(&shared, &view)
                .update(&section, node, target_of(target), override_in_language)
                .with_context(|| format!("Failed to update '{}'", section))?;
            save(&shared, snapshot_path)
        }
        Commands::Import { path, target } => {
            run_import(&shared, &path, target_of(target))?;
            save(&shared, snapshot_path)
        }
        Commands::Show { fingerprint } => {
            let snapshot = shared.snapshot();
            if fingerprint {
                println!("{}", snapshot.fingerprint()?);
            } else {
                println!("{}", to_json_string(&snapshot)?);
            }
            Ok(())
        }
        Commands::Verify { expected } => {
            let expected_cfg = load_snapshot(&expected).with_context(|| {
                format!("Failed to load expected snapshot: {}", expected.display())
            })?;
            ConfigurationStub::new(None, Some(expected_cfg)).verify(&shared)?;
            println!("Snapshot matches {}", expected.display());
            Ok(())
        }
    }
}

fn open_view(shared: &SharedConfiguration, args: &ViewArgs) -> ScopedConfigurationView {
    shared.scoped(&args.prefix, args.language.as_deref())
}

fn target_of(target: Option<TargetArg>) -> ConfigurationTarget {
    target.map_or(ConfigurationTarget::Unspecified, ConfigurationTarget::from)
}

fn run_get(view: &ScopedConfigurationView, section: &str) -> Result<()> {
    let Some(node) = view.get(section) else {
        anyhow::bail!("'{}' not found", section);
    };
    println!("{}", serde_json::to_string_pretty(&node.to_value())?);
    Ok(())
}

fn run_import(shared: &SharedConfiguration, path: &Path, target: ConfigurationTarget) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    let is_toml = path.extension().is_some_and(|ext| ext == "toml");
    let settings = if is_toml {
        parse_plain_toml_str(&content)
    } else {
        parse_plain_json_str(&content)
    }
    .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;

    let scope = target.resolve();
    let mut written = 0usize;
    for (section, node) in settings_leaves(settings) {
        let is_empty_table = node.as_branch().is_some_and(|branch| branch.is_empty());
        if is_empty_table && section_in_scope(shared, scope, &section) {
            continue;
        }
        shared
            .with_mut(|cfg| cfg.update(&section, node, target, false, None))
            .with_context(|| format!("Failed to import '{}'", section))?;
        written += 1;
    }
    tracing::info!(path = %path.display(), %scope, written, "settings imported");
    Ok(())
}

/// Flatten a settings document into `(dotted section, node)` pairs, one per
/// leaf. Empty tables are kept as their own entry.
fn settings_leaves(settings: Branch) -> Vec<(String, Node)> {
    fn walk(prefix: &str, branch: Branch, out: &mut Vec<(String, Node)>) {
        for (key, node) in branch {
            let section = if prefix.is_empty() {
                key
            } else {
                format!("{prefix}.{key}")
            };
            match node {
                Node::Branch(child) if !child.is_empty() => walk(&section, child, out),
                other => out.push((section, other)),
            }
        }
    }

    let mut out = Vec::new();
    walk("", settings, &mut out);
    out
}

fn section_in_scope(shared: &SharedConfiguration, scope: ConfigurationScope, section: &str) -> bool {
    shared.with(|cfg| {
        cfg.store(scope)
            .is_some_and(|store| nested_has(store, &split_section(section)))
    })
}

fn parse_value(raw: &str) -> Node {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => Node::from_plain(value),
        Err(_) => Node::from(raw),
    }
}

fn save(shared: &SharedConfiguration, snapshot_path: &Path) -> Result<()> {
    save_snapshot(snapshot_path, &shared.snapshot())
        .with_context(|| format!("Failed to save snapshot: {}", snapshot_path.display()))
}
