// Copyright (c) 2025 - Cowboy AI, Inc.
//! Static catalog and result sets
//!
//! A [`Catalog`] is an immutable, ordered list of entries created once at
//! startup. Filtering never re-sorts: a [`ResultSet`] is always a
//! subsequence of the catalog it came from.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Technology names shown by the search screen, in display order
const TECHNOLOGIES: [&str; 28] = [
    "Angular",
    "React",
    "React Native",
    "Vue",
    "Svelte",
    "Next.js",
    "TypeScript",
    "JavaScript",
    "RxJS",
    "NgModule",
    "Observable",
    "Promise",
    "EventEmitter",
    "Subject",
    "BehaviorSubject",
    "Component",
    "Service",
    "Pipe",
    "Directive",
    "Module",
    "Dependency Injection",
    "Data Binding",
    "Lifecycle Hooks",
    "HttpClient",
    "Router",
    "Forms",
    "Zone.js",
    "Change Detection",
];

/// Ordered, immutable reference data
///
/// Cloning shares the underlying entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Arc<[String]>,
}

impl Catalog {
    /// Create a catalog from entries in display order
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    /// The built-in technology catalog
    pub fn technologies() -> Self {
        Self::new(TECHNOLOGIES)
    }

    /// Entries in display order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive substring filter
    ///
    /// An empty or whitespace-only term matches everything. Otherwise the
    /// term is matched as typed (surrounding spaces included), ignoring case.
    pub fn filter(&self, term: &str) -> ResultSet {
        if term.trim().is_empty() {
            return ResultSet(self.entries.to_vec());
        }

        let needle = term.to_lowercase();
        ResultSet(
            self.entries
                .iter()
                .filter(|entry| entry.to_lowercase().contains(&needle))
                .cloned()
                .collect(),
        )
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::technologies()
    }
}

/// Catalog entries matching a settled term, in catalog order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet(Vec<String>);

impl ResultSet {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Whether every entry appears in `catalog`, in the same relative order
    pub fn is_subsequence_of(&self, catalog: &Catalog) -> bool {
        let mut remaining = catalog.entries().iter();
        self.0
            .iter()
            .all(|entry| remaining.any(|candidate| candidate == entry))
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
