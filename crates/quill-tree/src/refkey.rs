use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

static GENERATOR: AtomicU32 = AtomicU32::new(0);

/// An opaque forward-reference handle.
///
/// A refkey is minted independently of any declaration; at most one symbol
/// binds to it during a generation job. Binding happens when a declaration
/// supplies the refkey at creation time, so references can be written before
/// their target exists anywhere in the tree. A refkey that never binds is
/// reported when something tries to render it, not when it is created.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Refkey(u32);

impl Refkey {
    pub fn new() -> Self {
        Self(GENERATOR.fetch_add(1, Ordering::Relaxed))
    }

    pub fn id(&self) -> u32 {
        self.0
    }
}

impl Default for Refkey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Refkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Refkey({})", self.0)
    }
}

impl fmt::Display for Refkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'r{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_distinct() {
        let a = Refkey::new();
        let b = Refkey::new();

        assert_ne!(a, b);
        assert_eq!(a, a);
    }
}
