use super::FieldMapBuilder;
use crate::{
    error::IntrospectionError,
    types::{members::FieldDescription, TypeDescription},
};
use std::collections::HashMap;
use tracing::trace;

/// The public fields of one type, indexed by name.
#[derive(Debug)]
pub struct ClassFieldMap {
    ty: TypeDescription,
    fields: HashMap<String, FieldDescription>,
}

impl ClassFieldMap {
    pub fn new(ty: TypeDescription) -> Result<Self, IntrospectionError> {
        let Some(definition) = ty.try_definition() else {
            return Err(IntrospectionError::InvalidArgument(
                "cannot build a field map for a null type",
            ));
        };
        if !definition.public {
            return Err(IntrospectionError::not_introspectable(
                ty.type_name(),
                "type is not public",
            ));
        }

        let fields: HashMap<_, _> = definition
            .fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.public)
            .map(|(index, f)| (f.name.clone(), FieldDescription::new(ty.clone(), index)))
            .collect();
        trace!(
            "Built field map for {}: {} public fields",
            ty.type_name(),
            fields.len()
        );

        Ok(Self { ty, fields })
    }

    pub fn type_description(&self) -> &TypeDescription {
        &self.ty
    }

    pub fn find_field(&self, name: &str) -> Option<&FieldDescription> {
        self.fields.get(name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ClassFieldMapBuilder;

impl FieldMapBuilder<TypeDescription> for ClassFieldMapBuilder {
    type Map = ClassFieldMap;

    fn build_field_map(&self, ty: &TypeDescription) -> Result<ClassFieldMap, IntrospectionError> {
        ClassFieldMap::new(ty.clone())
    }
}
