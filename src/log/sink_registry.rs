use std::{
    collections::HashMap,
    fmt,
    sync::{PoisonError, RwLock, RwLockReadGuard},
};

use rand::{RngCore, rngs::OsRng};

use crate::log::{line_writer::LineWriter, log_level::LogLevel};

/// Bytes of OS randomness behind every token (160 bits).
const TOKEN_BYTES: usize = 20;

/// Opaque handle for a registered sink, returned by `add_sink`.
///
/// The text form is a lowercase hex string; it carries no meaning and is
/// only good for handing back to `remove_sink`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SinkToken(String);

impl SinkToken {
    fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        SinkToken(hex)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SinkToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SinkToken {
    fn from(token: String) -> Self {
        SinkToken(token)
    }
}

impl AsRef<str> for SinkToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A secondary destination with its own threshold.
pub struct SinkEntry {
    pub level: LogLevel,
    pub writer: LineWriter,
}

impl SinkEntry {
    pub fn new(writer: LineWriter, level: LogLevel) -> Self {
        Self { level, writer }
    }
}

/// Token-keyed set of secondary sinks.
///
/// Fan-out holds the read lock for a whole pass; inserts and removals take
/// the write lock, so the map is never mutated while being iterated.
#[derive(Default)]
pub struct SinkRegistry {
    entries: RwLock<HashMap<SinkToken, SinkEntry>>,
}

impl SinkRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `entry` under a fresh token.
    ///
    /// Tokens are drawn until one is not in use, so a live entry is never
    /// overwritten.
    pub fn insert(&self, entry: SinkEntry) -> SinkToken {
        self.insert_with(entry, SinkToken::generate)
    }

    /// Like [`insert`](Self::insert), drawing tokens from `next`.
    pub(crate) fn insert_with(
        &self,
        entry: SinkEntry,
        mut next: impl FnMut() -> SinkToken,
    ) -> SinkToken {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let mut token = next();
        while entries.contains_key(&token) {
            token = next();
        }
        entries.insert(token.clone(), entry);
        token
    }

    /// Removes the entry for `token`. Returns `false` if there was none.
    pub fn remove(&self, token: &SinkToken) -> bool {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token)
            .is_some()
    }

    /// Removes every listed token under a single write lock. Tokens already
    /// gone are skipped. Returns how many entries were removed.
    pub fn remove_all(&self, tokens: &[SinkToken]) -> usize {
        if tokens.is_empty() {
            return 0;
        }
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        tokens
            .iter()
            .filter(|token| entries.remove(*token).is_some())
            .count()
    }

    /// Read access for a fan-out pass. Writers block until the guard drops.
    pub fn read(&self) -> RwLockReadGuard<'_, HashMap<SinkToken, SinkEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn contains(&self, token: &SinkToken) -> bool {
        self.read().contains_key(token)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::log::{log_flags::LogFlags, noop_log_sink::NoopLogSink};
    use std::{collections::HashSet, sync::Arc};

    fn entry(level: LogLevel) -> SinkEntry {
        SinkEntry::new(
            LineWriter::new(Arc::new(NoopLogSink), "", LogFlags::STD),
            level,
        )
    }

    #[test]
    fn tokens_are_160_bit_hex() {
        let token = SinkToken::generate();
        assert_eq!(token.as_str().len(), TOKEN_BYTES * 2);
        assert!(
            token
                .as_str()
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        );
    }

    #[test]
    fn tokens_do_not_repeat() {
        let tokens: HashSet<SinkToken> = (0..1_000).map(|_| SinkToken::generate()).collect();
        assert_eq!(tokens.len(), 1_000);
    }

    #[test]
    fn colliding_token_is_redrawn() {
        let registry = SinkRegistry::new();
        let taken = SinkToken::from("aa".to_owned());
        let first = registry.insert_with(entry(LogLevel::ERROR), || taken.clone());
        assert_eq!(first, taken);

        let mut draws = vec!["bb", "aa", "aa"];
        let second = registry.insert_with(entry(LogLevel::ALL), || {
            SinkToken::from(draws.pop().unwrap_or("zz").to_owned())
        });

        assert_eq!(second.as_str(), "bb");
        assert!(draws.is_empty());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.read()[&taken].level, LogLevel::ERROR);
        assert_eq!(registry.read()[&second].level, LogLevel::ALL);
    }

    #[test]
    fn insert_then_remove_is_idempotent() {
        let registry = SinkRegistry::new();
        let keep = registry.insert(entry(LogLevel::ALL));
        let token = registry.insert(entry(LogLevel::ERROR));
        assert_ne!(keep, token);
        assert_eq!(registry.len(), 2);

        assert!(registry.remove(&token));
        assert_eq!(registry.len(), 1);
        assert!(!registry.remove(&token));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&keep));
    }

    #[test]
    fn remove_all_skips_missing_tokens() {
        let registry = SinkRegistry::new();
        let a = registry.insert(entry(LogLevel::ALL));
        let b = registry.insert(entry(LogLevel::ALL));
        let c = registry.insert(entry(LogLevel::ALL));
        registry.remove(&b);

        assert_eq!(registry.remove_all(&[a.clone(), b.clone()]), 1);
        assert!(!registry.contains(&a));
        assert!(registry.contains(&c));
        assert_eq!(registry.remove_all(&[]), 0);
    }

    #[test]
    fn unknown_token_is_a_no_op() {
        let registry = SinkRegistry::new();
        registry.insert(entry(LogLevel::ALL));
        assert!(!registry.remove(&SinkToken::from("not-a-token".to_owned())));
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }
}
