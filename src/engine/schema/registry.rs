use std::collections::HashMap;

use serde_json::Value;

use crate::domain::error::RegistryError;
use crate::engine::schema::{SchemaInfo, analyze, basename};

/// Registered schema documents plus their derived ordering info.
///
/// Documents are keyed by the basename of their `$id`, so data files may
/// reference the same schema through any relative path. All registration
/// must complete before formatting starts; reads never mutate.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    documents: HashMap<String, Value>,
    infos: HashMap<String, SchemaInfo>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one schema document under the basename of its `$id`.
    ///
    /// Re-registering the same basename replaces the prior entry. The
    /// document's `SchemaInfo` is derived immediately, against the registry
    /// contents at this point, so schemas that others reference should be
    /// registered first.
    pub fn add_schema(&mut self, document: Value) -> Result<(), RegistryError> {
        let name = match document.get("$id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => basename(id).to_string(),
            _ => return Err(RegistryError::MissingIdentifier),
        };
        self.documents.insert(name.clone(), document.clone());
        let info = analyze::parse_schema(&document, self);
        self.infos.insert(name, info);
        Ok(())
    }

    /// Raw document registered under `name`.
    pub fn document(&self, name: &str) -> Option<&Value> {
        self.documents.get(name)
    }

    /// Derived ordering info for the document registered under `name`.
    pub fn info(&self, name: &str) -> Option<&SchemaInfo> {
        self.infos.get(name)
    }

    /// Resolve a `path#/pointer` ref string to a registered schema fragment.
    ///
    /// The path part matches by basename; the optional fragment navigates
    /// successive key lookups from the resolved document. Anything that does
    /// not land on a JSON object resolves to `None`.
    pub fn resolve_ref(&self, reference: &str) -> Option<&Value> {
        let (path, fragment) = match reference.split_once('#') {
            Some((path, fragment)) => (path, Some(fragment)),
            None => (reference, None),
        };
        let mut target = self.documents.get(basename(path))?;
        if let Some(fragment) = fragment {
            for segment in fragment.split('/').filter(|segment| !segment.is_empty()) {
                target = target.as_object()?.get(segment)?;
            }
        }
        target.is_object().then_some(target)
    }
}
