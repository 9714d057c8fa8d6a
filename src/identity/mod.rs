//! Collapsing author emails into logical contributors.
//!
//! A mapping file is a JSON object from a logical name to the list of email
//! addresses that belong to it. Declaration order is kept, so an email listed
//! under several names always resolves to the first one.

use crate::error::{GraderError, Result};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Vec<String>)>,
}

impl Mapping {
    pub fn load(path: &Path) -> Result<Self> {
        let load_error = |reason: String| GraderError::MappingLoad {
            path: path.to_path_buf(),
            reason,
        };

        let text = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        let mapping = Self::from_json(&text).map_err(|e| load_error(e.to_string()))?;

        debug!(
            "Loaded mapping with {} logical names from {}",
            mapping.len(),
            path.display()
        );
        Ok(mapping)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First logical name whose alias list contains `email`.
    pub fn lookup(&self, email: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, emails)| emails.iter().any(|e| e == email))
            .map(|(name, _)| name.as_str())
    }

    fn insert(&mut self, name: String, emails: Vec<String>) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => {
                warn!("Logical name {:?} is declared twice, keeping the last list", name);
                entry.1 = emails;
            }
            None => self.entries.push((name, emails)),
        }
    }
}

impl<'de> Deserialize<'de> for Mapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = Mapping;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping names to lists of email addresses")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Mapping, A::Error> {
                let mut mapping = Mapping::default();
                while let Some((name, emails)) = access.next_entry::<String, Vec<String>>()? {
                    mapping.insert(name, emails);
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}

/// Turns an author email into the key commits are grouped under.
#[derive(Debug, Default)]
pub struct IdentityResolver {
    mapping: Option<Mapping>,
}

impl IdentityResolver {
    pub fn new(mapping: Option<Mapping>) -> Self {
        Self {
            mapping: mapping.filter(|m| !m.is_empty()),
        }
    }

    /// True when a non-empty mapping is in effect.
    pub fn is_mapped(&self) -> bool {
        self.mapping.is_some()
    }

    /// The mapped logical name, or the email itself when unmapped.
    pub fn resolve<'a>(&'a self, email: &'a str) -> &'a str {
        self.mapping
            .as_ref()
            .and_then(|m| m.lookup(email))
            .unwrap_or(email)
    }
}
