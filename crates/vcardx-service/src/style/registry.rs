use std::collections::BTreeMap;

use super::{FlatStyle, Style};
use crate::error::{ServiceError, ServiceResult};

/// Name-keyed set of styles injected into a transcoder.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    styles: BTreeMap<String, Box<dyn Style>>,
}

impl StyleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Returns a registry holding the built-in `flat` style.
    #[must_use]
    pub fn with_builtin(include_unmapped: bool) -> Self {
        let mut styles = BTreeMap::new();
        let flat: Box<dyn Style> = Box::new(FlatStyle::new(include_unmapped));
        styles.insert(flat.name().to_string(), flat);
        Self { styles }
    }

    /// ## Summary
    /// Adds a style under its own name.
    ///
    /// ## Errors
    /// Returns `DuplicateStyle` if the name is already taken.
    pub fn register(&mut self, style: Box<dyn Style>) -> ServiceResult<()> {
        let name = style.name().to_string();
        if self.styles.contains_key(&name) {
            return Err(ServiceError::DuplicateStyle(name));
        }
        tracing::debug!(style = %name, "Registered style");
        self.styles.insert(name, style);
        Ok(())
    }

    /// ## Errors
    /// Returns `UnknownStyle` if no style has that name.
    pub fn get(&self, name: &str) -> ServiceResult<&dyn Style> {
        self.styles
            .get(name)
            .map(|style| &**style)
            .ok_or_else(|| ServiceError::UnknownStyle(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }
}
