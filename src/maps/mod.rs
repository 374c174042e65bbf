//! Method and field maps, and the builders the cache calls on insertion.
use crate::{
    conversion::ConversionHandler,
    error::IntrospectionError,
    sync::Arc,
    types::TypeHandle,
};

mod class_map;
mod field_map;

pub use class_map::{ClassMap, ClassMapBuilder};
pub use field_map::{ClassFieldMap, ClassFieldMapBuilder};

pub trait MethodMapBuilder<T: TypeHandle>: Send + Sync {
    type Map: Send + Sync + 'static;

    fn build_method_map(
        &self,
        ty: &T,
        conversions: &Arc<dyn ConversionHandler>,
    ) -> Result<Self::Map, IntrospectionError>;
}

pub trait FieldMapBuilder<T: TypeHandle>: Send + Sync {
    type Map: Send + Sync + 'static;

    fn build_field_map(&self, ty: &T) -> Result<Self::Map, IntrospectionError>;
}
