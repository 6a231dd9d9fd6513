//! Resource name corpus shared by both workloads
//!
//! The standard corpus is two naming families, `a01.smi`..`a99.smi` followed
//! by `t01.smi`..`t99.smi`. Generation order is part of the contract: paired
//! mode walks it front to back.

use rand::Rng;
use std::sync::Arc;

/// Ordered, immutable list of resource names
///
/// Cloning is cheap; clones share the same backing slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    names: Arc<[String]>,
}

impl Corpus {
    /// The 198-entry corpus the harness ships with
    pub fn standard() -> Self {
        Self::generate(
            crate::defaults::CORPUS_PREFIXES,
            crate::defaults::CORPUS_MAX_INDEX,
            crate::defaults::CORPUS_SUFFIX,
        )
    }

    /// `{prefix}{n:02}{suffix}` for every prefix in order, n in `1..=max_index`
    pub fn generate(prefixes: &[&str], max_index: u32, suffix: &str) -> Self {
        let names: Vec<String> = prefixes
            .iter()
            .flat_map(|prefix| {
                (1..=max_index).map(move |n| format!("{}{:02}{}", prefix, n, suffix))
            })
            .collect();
        Self { names: names.into() }
    }

    /// Wrap an explicit list, keeping its order
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        Self { names: names.into() }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Names in generation order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    /// Uniform pick with replacement; `None` only for an empty corpus
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<&str> {
        if self.names.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.names.len());
        self.get(index)
    }
}

impl Default for Corpus {
    fn default() -> Self {
        Self::standard()
    }
}
