use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TrieError {
    #[error("'{word}' contains '{ch}', only the letters a-z can be stored")]
    InvalidCharacter { word: String, ch: char },
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Error reading resource: {source_name}")]
    Io {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Invalid line {line_number} in {source_name}: \"{line}\". Each line must contain exactly one word and words must contain only letters."
    )]
    InvalidLine {
        source_name: String,
        line_number: usize,
        line: String,
    },

    #[error("{}", .0)]
    Trie(#[from] TrieError),
}

/// Misuse of the command line that is caught after clap has parsed it.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsageError {
    #[error("Error: Missing <input> parameter")]
    MissingInput,

    #[error("Error: '--union' requires '--dictionary' option")]
    UnionWithoutDictionary,
}
