// password corpus: an immutable snapshot of known weak passwords, loaded
// once before scoring and shared read-only (typically behind an Arc)

use std::path::Path;

use tracing::debug;

/// the embedded default password list
const DEFAULT_PASSWORDS: &str = include_str!("../config/passwords.txt");

#[derive(Debug, Clone)]
pub struct Corpus {
    entries: Vec<Box<[char]>>,
}

impl Corpus {
    /// build a corpus from individual entries, in order.
    /// blank entries are skipped; a corpus with no entries is rejected.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries: Vec<Box<[char]>> = entries
            .into_iter()
            .filter(|e| !e.as_ref().is_empty())
            .map(|e| e.as_ref().chars().collect())
            .collect();

        if entries.is_empty() {
            return Err("password corpus is empty".to_string());
        }
        Ok(Self { entries })
    }

    /// one entry per line; a trailing carriage return is stripped
    pub fn from_lines(text: &str) -> Result<Self, String> {
        Self::from_entries(text.lines().map(|line| line.trim_end_matches('\r')))
    }

    /// the password list compiled into the binary
    pub fn embedded() -> Result<Self, String> {
        let corpus = Self::from_lines(DEFAULT_PASSWORDS)?;
        debug!(entries = corpus.len(), "loaded embedded password corpus");
        Ok(corpus)
    }

    /// read a newline-separated password list from disk
    pub fn load(path: &Path) -> Result<Self, String> {
        let bytes = std::fs::read(path)
            .map_err(|e| format!("failed to read corpus {}: {}", path.display(), e))?;
        let text = String::from_utf8_lossy(&bytes);
        let corpus = Self::from_lines(&text)
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        debug!(
            path = %path.display(),
            entries = corpus.len(),
            "loaded password corpus"
        );
        Ok(corpus)
    }

    pub fn entries(&self) -> &[Box<[char]>] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<String> {
        self.entries.get(index).map(|e| e.iter().collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
