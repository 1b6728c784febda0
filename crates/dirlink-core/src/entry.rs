//! Directory entry representation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One directory object returned by a search.
///
/// Entries are delivered incrementally through the search entry handler
/// while the search future is still pending; they are not the future's own
/// success value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    dn: String,
    attributes: HashMap<String, Vec<String>>,
}

impl Entry {
    /// Creates an entry with the given name and no attributes.
    #[must_use]
    pub fn new(dn: impl Into<String>) -> Self {
        Self {
            dn: dn.into(),
            attributes: HashMap::new(),
        }
    }

    /// Adds an attribute with the given values.
    #[must_use]
    pub fn with_attribute<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.attributes
            .entry(name.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Returns the distinguished name of the entry.
    #[must_use]
    pub fn dn(&self) -> &str {
        &self.dn
    }

    /// Returns the first value of the attribute if present.
    #[must_use]
    pub fn first(&self, attribute: &str) -> Option<&str> {
        self.attributes
            .get(attribute)
            .and_then(|values| values.first().map(String::as_str))
    }

    /// Returns all values for the attribute.
    #[must_use]
    pub fn values(&self, attribute: &str) -> Option<&[String]> {
        self.attributes.get(attribute).map(Vec::as_slice)
    }

    /// Returns true if the entry carries the attribute.
    #[must_use]
    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.attributes.contains_key(attribute)
    }

    /// Iterates over the attribute names of the entry.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }
}
