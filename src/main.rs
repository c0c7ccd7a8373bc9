//! Chatmark - inspect how chat messages parse.
//!
//! # Usage
//!
//! ```bash
//! chatmark message.md
//! echo '**hi** <@123>' | chatmark --compact
//! chatmark --search smi --limit 5
//! ```

use std::borrow::Cow;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as _;

use chatmark::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use chatmark::document::{Parser, document_text, plain_text};
use chatmark::emoji::{CustomEmojiTable, EmojiIndex};
use chatmark::perf;

const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Parse chat markdown and print the document tree
#[derive(clap::Parser, Debug)]
#[command(name = "chatmark", version, about, long_about = None)]
struct Cli {
    /// Message file to parse (`-` or omitted reads stdin)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Run only the inline phase
    #[arg(long)]
    inline: bool,

    /// Print plain text instead of JSON
    #[arg(long)]
    plain: bool,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,

    /// Emoji dataset to use instead of the bundled one
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// JSON array of guild custom emoji
    #[arg(long, value_name = "PATH")]
    custom_emojis: Option<PathBuf>,

    /// Search emoji names instead of parsing
    #[arg(long, value_name = "QUERY")]
    search: Option<String>,

    /// Maximum number of search results
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Print timing of catalog load and parse to stderr
    #[arg(long)]
    perf: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn load_index(path: Option<&Path>) -> Result<Cow<'static, EmojiIndex>> {
    let Some(path) = path else {
        return Ok(Cow::Borrowed(EmojiIndex::bundled()));
    };
    let _scope = perf::scope("emoji.index.load_file");
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read emoji catalog {}", path.display()))?;
    let index = EmojiIndex::from_json(&json)
        .with_context(|| format!("Invalid emoji catalog {}", path.display()))?;
    Ok(Cow::Owned(index))
}

fn load_custom_emojis(path: Option<&Path>) -> Result<CustomEmojiTable> {
    let Some(path) = path else {
        return Ok(CustomEmojiTable::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read custom emojis {}", path.display()))?;
    CustomEmojiTable::from_json(&json)
        .with_context(|| format!("Invalid custom emojis {}", path.display()))
}

fn read_message(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut message = String::new();
            std::io::stdin()
                .read_to_string(&mut message)
                .context("Failed to read stdin")?;
            Ok(message)
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    tracing::trace!(?effective, "effective flags");

    perf::set_enabled(effective.perf);

    let index = load_index(effective.catalog.as_deref())?;

    if let Some(query) = &cli.search {
        let limit = effective.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        let matches = index.search(query, limit);
        if effective.plain {
            for m in &matches {
                println!("{} :{}:", m.surrogates, m.name);
            }
        } else {
            println!("{}", to_json(&matches, effective.compact)?);
        }
        return Ok(());
    }

    let custom = load_custom_emojis(effective.custom_emojis.as_deref())?;
    let message = read_message(cli.file.as_deref())?;
    let parser = Parser::new(&custom, &*index);

    let _scope = perf::scope("message.parse");
    let output = if cli.inline {
        let nodes = parser.parse_inline(&message);
        if effective.plain {
            plain_text(&nodes)
        } else {
            to_json(&nodes, effective.compact)?
        }
    } else {
        let nodes = parser.parse(&message);
        if effective.plain {
            document_text(&nodes)
        } else {
            to_json(&nodes, effective.compact)?
        }
    };
    println!("{output}");
    Ok(())
}
