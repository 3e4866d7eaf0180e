use std::{io::Write, num::NonZeroUsize, path::PathBuf};

use clap::{CommandFactory, Parser};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::{
    dictionary::{build_trie, DictionarySource, EmbeddedDictionary, FileDictionary},
    error::UsageError,
};

/// Prefix completion over a dictionary of plain words.
#[derive(Parser, Debug)]
#[command(
    name = "autocomplete",
    about = "Prints every dictionary word that starts with each given prefix."
)]
pub struct CompleteArgs {
    /// Display version information
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Specify the path to a dictionary file. Can be used alone or with
    /// '--union' to combine dictionaries.
    #[arg(short, long, value_name = "filename")]
    pub dictionary: Option<PathBuf>,

    /// Combine the specified dictionary with the built-in dictionary.
    #[arg(short, long)]
    pub union: bool,

    /// Use this file as the built-in dictionary instead of the embedded one.
    #[arg(long, value_name = "filename", env = "AUTOCOMPLETE_DEFAULT_DICTIONARY")]
    pub default_dictionary: Option<PathBuf>,

    /// Print at most this many candidates per prefix.
    #[arg(short, long, value_name = "N")]
    pub limit: Option<NonZeroUsize>,

    /// Print one JSON object per prefix instead of text. A prefix without
    /// candidates prints an empty list on stdout rather than a notice on stderr.
    #[arg(long)]
    pub json: bool,

    /// Write logs to this file.
    #[arg(long, value_name = "path")]
    pub log_file: Option<PathBuf>,

    #[arg(name = "PREFIX")]
    pub prefixes: Vec<String>,
}

impl CompleteArgs {
    pub fn validate(&self) -> Result<(), UsageError> {
        if self.union && self.dictionary.is_none() {
            return Err(UsageError::UnionWithoutDictionary);
        }
        if self.prefixes.is_empty() {
            return Err(UsageError::MissingInput);
        }
        Ok(())
    }

    /// Dictionaries to load, in order.
    pub fn sources(&self) -> Vec<Box<dyn DictionarySource>> {
        let default: Box<dyn DictionarySource> = match &self.default_dictionary {
            Some(path) => Box::new(FileDictionary::new(path)),
            None => Box::new(EmbeddedDictionary),
        };

        match &self.dictionary {
            None => vec![default],
            Some(path) if self.union => vec![default, Box::new(FileDictionary::new(path))],
            Some(path) => vec![Box::new(FileDictionary::new(path))],
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    LoadFailed,
    Usage,
}

impl Status {
    pub fn code(self) -> u8 {
        match self {
            Status::Success => 0,
            Status::LoadFailed => 1,
            Status::Usage => 2,
        }
    }
}

#[derive(Debug, Serialize)]
struct Completion<'a> {
    prefix: &'a str,
    candidates: &'a [String],
}

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

fn write_help(err: &mut impl Write) -> std::io::Result<()> {
    let mut command = CompleteArgs::command();
    writeln!(err, "{}", command.render_help())
}

pub async fn execute_completion(
    args: &CompleteArgs,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<Status> {
    if args.version {
        writeln!(out, "{}", version())?;
        return Ok(Status::Success);
    }

    if let Err(usage) = args.validate() {
        debug!("Usage error: {:?}", usage);
        writeln!(err, "{}", usage)?;
        write_help(err)?;
        return Ok(Status::Usage);
    }

    let trie = match build_trie(&args.sources()).await {
        Ok(trie) => trie,
        Err(e) => {
            error!("Failed to load dictionary: {}", e);
            writeln!(err, "Error: {}", e)?;
            return Ok(Status::LoadFailed);
        }
    };
    info!("Dictionary ready with {} words", trie.len());

    for prefix in &args.prefixes {
        let mut candidates = trie.words_with_prefix(prefix);
        debug!("{} candidates for '{}'", candidates.len(), prefix);
        if let Some(limit) = args.limit {
            candidates.truncate(limit.get());
        }

        if args.json {
            let completion = Completion {
                prefix,
                candidates: &candidates,
            };
            writeln!(out, "{}", serde_json::to_string(&completion)?)?;
        } else if candidates.is_empty() {
            writeln!(
                err,
                "No auto-completion candidates found for '{}'. Please try a different search term.",
                prefix
            )?;
        } else {
            writeln!(
                out,
                "Auto-completion results for '{}': {}",
                prefix,
                candidates.join(", ")
            )?;
        }
    }

    Ok(Status::Success)
}
