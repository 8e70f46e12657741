//! Encoding lookup by name.

use alloc::vec::Vec;

use crate::encoding::Encoding;
use crate::encodings::{ASCII, UTF_8, UTF_16LE, UTF_32LE};

/// A name → encoding table.
///
/// The core does not own registration: callers decide which encodings
/// exist and under which names. [`Registry::with_builtin`] seeds the table
/// with the crate's own encodings for convenience. Lookup is
/// ASCII-case-insensitive; registering a name twice replaces the earlier
/// entry.
///
/// ```
/// use charmodem::{Encoding, Registry};
///
/// let registry = Registry::with_builtin();
/// let utf8 = registry.lookup("UTF-8").unwrap();
/// assert_eq!(utf8.name(), "utf-8");
/// assert!(registry.lookup("ebcdic").is_none());
/// ```
#[derive(Default)]
pub struct Registry {
    entries: Vec<&'static dyn Encoding>,
}

impl Registry {
    /// An empty table.
    #[must_use]
    pub const fn new() -> Self {
        Registry {
            entries: Vec::new(),
        }
    }

    /// A table holding the built-in encodings.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Registry::new();
        registry.register(&ASCII);
        registry.register(&UTF_8);
        registry.register(&UTF_16LE);
        registry.register(&UTF_32LE);
        registry
    }

    /// Adds an encoding, replacing any entry with the same name.
    pub fn register(&mut self, encoding: &'static dyn Encoding) {
        match self
            .entries
            .iter_mut()
            .find(|e| e.name().eq_ignore_ascii_case(encoding.name()))
        {
            Some(slot) => *slot = encoding,
            None => self.entries.push(encoding),
        }
    }

    /// Finds an encoding by name, ignoring ASCII case.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&'static dyn Encoding> {
        self.entries
            .iter()
            .copied()
            .find(|e| e.name().eq_ignore_ascii_case(name))
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name())
    }
}
