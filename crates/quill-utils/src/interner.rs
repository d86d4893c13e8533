use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Key of an interned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StrKey(usize);

impl fmt::Display for StrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'s{}", self.0)
    }
}

/// Key of an interned path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PathKey(usize);

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'p{}", self.0)
    }
}

/// Stores each unique string exactly once and hands out stable keys.
///
/// Keys are plain indices, so lookup by key is a slice access. Interning an
/// already-known string returns the existing key.
#[derive(Debug, Clone, Default)]
pub struct StrInterner {
    values: Vec<String>,
    map: HashMap<String, usize>,
}

impl StrInterner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern<'a>(&mut self, value: impl Into<Cow<'a, str>>) -> StrKey {
        let value = value.into();

        if let Some(&idx) = self.map.get(value.as_ref()) {
            return StrKey(idx);
        }

        let owned = value.into_owned();
        let idx = self.values.len();
        self.map.insert(owned.clone(), idx);
        self.values.push(owned);

        StrKey(idx)
    }

    pub fn get(&self, key: StrKey) -> Option<&str> {
        self.values.get(key.0).map(String::as_str)
    }

    pub fn lookup(&self, value: &str) -> Option<StrKey> {
        self.map.get(value).copied().map(StrKey)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

impl Index<StrKey> for StrInterner {
    type Output = str;

    fn index(&self, key: StrKey) -> &Self::Output {
        &self.values[key.0]
    }
}

/// Interner for output-file paths, mirroring [`StrInterner`].
#[derive(Debug, Clone, Default)]
pub struct PathInterner {
    values: Vec<Utf8PathBuf>,
    map: HashMap<Utf8PathBuf, usize>,
}

impl PathInterner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, value: impl AsRef<Utf8Path>) -> PathKey {
        let value = value.as_ref();

        if let Some(&idx) = self.map.get(value) {
            return PathKey(idx);
        }

        let owned = value.to_path_buf();
        let idx = self.values.len();
        self.map.insert(owned.clone(), idx);
        self.values.push(owned);

        PathKey(idx)
    }

    pub fn get(&self, key: PathKey) -> Option<&Utf8Path> {
        self.values.get(key.0).map(Utf8PathBuf::as_path)
    }

    pub fn lookup(&self, value: &Utf8Path) -> Option<PathKey> {
        self.map.get(value).copied().map(PathKey)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Index<PathKey> for PathInterner {
    type Output = Utf8Path;

    fn index(&self, key: PathKey) -> &Self::Output {
        &self.values[key.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_idempotent() {
        let mut interner = StrInterner::new();

        let a = interner.intern("hello");
        let b = interner.intern(String::from("world"));
        let c = interner.intern("hello");

        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(&interner[a], "hello");
        assert_eq!(interner.lookup("world"), Some(b));
        assert_eq!(interner.lookup("missing"), None);
    }

    #[test]
    fn paths_share_keys() {
        let mut interner = PathInterner::new();

        let a = interner.intern("models/user.thrift");
        let b = interner.intern("models/user.thrift");

        assert_eq!(a, b);
        assert_eq!(interner.len(), 1);
        assert_eq!(&interner[a], Utf8Path::new("models/user.thrift"));
    }
}
