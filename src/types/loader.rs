use super::{LoadContext, TypeDefinition, TypeDescription};
use crate::sync::Arc;
use std::collections::BTreeMap;

/// A set of type definitions loaded under one [`LoadContext`].
///
/// The cache never talks to a loader; hosts use it to mint handles.
pub struct TypeLoader {
    context: LoadContext,
    types: BTreeMap<String, Arc<TypeDefinition>>,
}

impl TypeLoader {
    pub fn new(definitions: impl IntoIterator<Item = TypeDefinition>) -> Self {
        Self {
            context: LoadContext::fresh(),
            types: definitions
                .into_iter()
                .map(|d| (d.type_name(), Arc::new(d)))
                .collect(),
        }
    }

    pub fn context(&self) -> LoadContext {
        self.context
    }

    pub fn load(&self, type_name: &str) -> Option<TypeDescription> {
        self.types
            .get(type_name)
            .map(|d| TypeDescription::new(self.context, d.clone()))
    }

    pub fn types(&self) -> Vec<TypeDescription> {
        self.types
            .values()
            .map(|d| TypeDescription::new(self.context, d.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Loads the same definitions again under a fresh context.
    pub fn reload(&self) -> Self {
        Self {
            context: LoadContext::fresh(),
            types: self
                .types
                .iter()
                .map(|(name, d)| (name.clone(), Arc::new(TypeDefinition::clone(d))))
                .collect(),
        }
    }
}
