use std::{io::ErrorKind, path::PathBuf};

use tokio::{
    io::{AsyncBufReadExt, BufReader},
    time::Instant,
};
use tracing::{debug, info};

use crate::{error::LoadError, trie::PrefixTrie};

/// Built-in word list, one lowercase word per line.
pub const DEFAULT_DICTIONARY: &str = include_str!("../dictionaries/words_alpha.txt");

const DEFAULT_DICTIONARY_NAME: &str = "words_alpha.txt";

/// A newline-delimited word list that can populate a [`PrefixTrie`].
#[async_trait::async_trait]
pub trait DictionarySource: Send + Sync {
    /// Name used in log lines and error messages.
    fn name(&self) -> String;

    /// Reads and validates the whole source, returning its words lowercased.
    async fn read_words(&self) -> Result<Vec<String>, LoadError>;

    /// Inserts every word of the source into `trie`. Nothing is inserted
    /// unless the whole source is valid.
    async fn load_into(&self, trie: &mut PrefixTrie) -> Result<usize, LoadError> {
        let start = Instant::now();
        let words = self.read_words().await?;
        for word in &words {
            trie.insert(word)?;
        }
        debug!(
            "Loading {} took {} ms",
            self.name(),
            start.elapsed().as_millis()
        );
        info!("Loaded {} words from {}", words.len(), self.name());
        Ok(words.len())
    }
}

/// The dictionary compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedDictionary;

#[async_trait::async_trait]
impl DictionarySource for EmbeddedDictionary {
    fn name(&self) -> String {
        DEFAULT_DICTIONARY_NAME.to_string()
    }

    async fn read_words(&self) -> Result<Vec<String>, LoadError> {
        parse_words(&self.name(), DEFAULT_DICTIONARY.lines())
    }
}

/// A dictionary read from the filesystem.
#[derive(Debug, Clone)]
pub struct FileDictionary {
    path: PathBuf,
}

impl FileDictionary {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl DictionarySource for FileDictionary {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_words(&self) -> Result<Vec<String>, LoadError> {
        let io_error = |source: std::io::Error| LoadError::Io {
            source_name: self.name(),
            source,
        };

        let file = match tokio::fs::File::open(&self.path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LoadError::NotFound(self.path.clone()))
            }
            Err(e) => return Err(io_error(e)),
        };

        let mut lines = BufReader::new(file).lines();
        let mut words = Vec::new();
        let mut line_number = 0;
        while let Some(line) = lines.next_line().await.map_err(io_error)? {
            line_number += 1;
            if let Some(word) = parse_line(&self.name(), line_number, &line)? {
                words.push(word);
            }
        }
        Ok(words)
    }
}

/// Validates and lowercases every line of an in-memory word list.
pub fn parse_words<'a>(
    source_name: &str,
    lines: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<String>, LoadError> {
    let mut words = Vec::new();
    for (index, line) in lines.into_iter().enumerate() {
        if let Some(word) = parse_line(source_name, index + 1, line)? {
            words.push(word);
        }
    }
    Ok(words)
}

/// Blank lines yield `None`. Any other line must be a single run of ASCII
/// letters.
fn parse_line(
    source_name: &str,
    line_number: usize,
    line: &str,
) -> Result<Option<String>, LoadError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if !line.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(LoadError::InvalidLine {
            source_name: source_name.to_string(),
            line_number,
            line: line.to_string(),
        });
    }
    Ok(Some(line.to_ascii_lowercase()))
}

/// Builds one trie from `sources`, loaded in order.
pub async fn build_trie(sources: &[Box<dyn DictionarySource>]) -> Result<PrefixTrie, LoadError> {
    let mut trie = PrefixTrie::new();
    for source in sources {
        source.load_into(&mut trie).await?;
    }
    Ok(trie)
}
