//! Command-line interface for font-select.
//!
//! The binary is a headless host for the widget: it lists the font catalog
//! or replays a scripted interaction and prints the outcome.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use font_select_config::{Config, Layout, LogLevel};
use font_select_fonts::{
    Catalog, FontAccess, LoadError, PermissionHost, RawFontRecord, load_catalog,
};
use font_select_keybindings::parse_key_sequence;

use crate::widget::{FontSelect, LoadStatus, RenderState};

/// font-select - pick an installed font family and variation
#[derive(Parser, Debug)]
#[command(name = "font-select")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Read font records from a JSON fixture instead of the system
    #[arg(long, global = true, value_name = "FILE")]
    pub fixture: Option<PathBuf>,

    /// Config file (default: ~/.config/font-select/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long, global = true, value_name = "LEVEL", value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print every family with its variations
    List {
        /// Only families containing this text (case-insensitive)
        #[arg(long)]
        family: Option<String>,
    },
    /// Run a scripted interaction against the widget
    Pick {
        /// Text typed into the input
        #[arg(long)]
        query: Option<String>,

        /// Comma-separated key codes pressed after typing, e.g. "Down,Down,Enter"
        #[arg(long, value_name = "KEYS")]
        keys: Option<String>,

        /// Preview list layout: flat or drill-down
        #[arg(long, value_parser = parse_layout)]
        layout: Option<Layout>,
    },
}

fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    LogLevel::from_name(s).ok_or_else(|| format!("unknown log level '{s}'"))
}

fn parse_layout(s: &str) -> Result<Layout, String> {
    Layout::from_name(s).ok_or_else(|| format!("unknown layout '{s}'"))
}

/// Load the config named on the command line, or the default one.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Config::load(),
    }
}

/// Read a JSON array of `{family, fullName, postscriptName}` records.
pub fn load_fixture(path: &Path) -> anyhow::Result<Vec<RawFontRecord>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fixture {}", path.display()))?;
    let records: Vec<RawFontRecord> = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid fixture {}", path.display()))?;
    log::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Run one subcommand against `host`, writing the report to `out`.
pub async fn execute<H, W>(
    command: &Commands,
    host: &H,
    config: &Config,
    out: &mut W,
) -> anyhow::Result<()>
where
    H: FontAccess + PermissionHost,
    W: Write,
{
    match command {
        Commands::List { family } => {
            let catalog = match load_catalog(host, None).await {
                Ok(catalog) => catalog,
                Err(e) if e.is_degrade() => {
                    writeln!(out, "Font enumeration unavailable: {e}")?;
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };
            write_catalog(&catalog, family.as_deref(), out)
        }
        Commands::Pick {
            query,
            keys,
            layout,
        } => {
            let mut config = config.clone();
            if let Some(layout) = layout {
                config.layout = *layout;
            }
            let keys = parse_key_sequence(keys.as_deref().unwrap_or(""))?;

            let mut widget = FontSelect::new(&config);
            widget.initialize(host).await?;
            if let LoadStatus::Degraded(e) = widget.status() {
                writeln!(out, "Font selection unavailable: {e}")?;
                return Ok(());
            }

            widget.focus();
            if let Some(query) = query {
                widget.input(query.as_str());
            }
            for key in keys {
                let handled = widget.key_down(key);
                log::debug!("key {:?} handled={}", key, handled);
            }
            write_render_state(&widget.render_state(), out)?;

            widget.blur();
            match widget.committed() {
                Some(committed) => writeln!(
                    out,
                    "committed: {} ({})",
                    committed.family, committed.variation_full_name
                )?,
                None => writeln!(out, "committed: none")?,
            }
            writeln!(out, "value: {:?}", widget.value())?;
            Ok(())
        }
    }
}

fn write_catalog<W: Write>(
    catalog: &Catalog,
    family_filter: Option<&str>,
    out: &mut W,
) -> anyhow::Result<()> {
    let needle = family_filter.map(str::to_lowercase);
    let mut shown = 0;
    for group in catalog.groups() {
        if let Some(needle) = &needle
            && !group.family_name().to_lowercase().contains(needle)
        {
            continue;
        }
        shown += 1;
        writeln!(out, "{}", group.family_name())?;
        for variant in group.variants() {
            writeln!(
                out,
                "  {:<20} {} ({})",
                variant.variation_label(),
                variant.full_name(),
                variant.postscript_name()
            )?;
        }
    }
    writeln!(out, "{shown} of {} families", catalog.len())?;
    Ok(())
}

fn write_render_state<W: Write>(state: &RenderState, out: &mut W) -> anyhow::Result<()> {
    writeln!(
        out,
        "open: {}  highlighted: {}  input: {:?}",
        state.is_open,
        state.highlighted_index_i32(),
        state.input_text
    )?;
    for entry in &state.entries {
        let marker = if entry.highlighted { '>' } else { ' ' };
        let selected = if entry.selected { " *" } else { "" };
        writeln!(out, "{marker} {}{selected}", entry.text)?;
    }
    Ok(())
}

/// Map a widget load error into the process exit code.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<LoadError>() {
        Some(LoadError::Platform(_)) => 2,
        _ => 1,
    }
}
