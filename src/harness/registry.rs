//! Named transpose functions to evaluate side by side.

use crate::blocked::{SUBMIT_DESC, transpose_submit};
use crate::matrix::Operands;
use crate::matrix::transpose::{TRANS_DESC, trans};

/// Signature every registered transpose shares.
pub type TransposeFn = fn(&mut dyn Operands);

#[derive(Debug, Clone)]
pub struct Registered {
    pub description: String,
    pub func: TransposeFn,
}

/// Ordered, append-only list of strategies for one evaluation run.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<Registered>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, func: TransposeFn, description: impl Into<String>) {
        self.entries.push(Registered {
            description: description.into(),
            func,
        });
    }

    /// First entry registered under `description`.
    pub fn find(&self, description: &str) -> Option<&Registered> {
        self.entries.iter().find(|e| e.description == description)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Registered> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Registered;
    type IntoIter = std::slice::Iter<'a, Registered>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Register the tuned submission, then the row-wise baseline.
pub fn register_functions(registry: &mut Registry) {
    registry.register(transpose_submit, SUBMIT_DESC);
    registry.register(trans, TRANS_DESC);
}
