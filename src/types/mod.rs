//! Type handles and the loading contexts that produce them.
//!
//! A [`TypeDescription`] is only equal to another one if both were produced by the
//! same [`LoadContext`] from the same definition. Reloading a definition yields a
//! handle with the same [`type_name`](TypeHandle::type_name) that is nevertheless a
//! different identity.
use crate::sync::{Arc, AtomicU64, Ordering};
use std::{
    fmt::{Debug, Formatter},
    hash::{Hash, Hasher},
    num::NonZeroU64,
};

pub mod definition;
pub mod loader;
pub mod members;

pub use definition::{FieldDefinition, MethodDefinition, TypeDefinition};
pub use loader::TypeLoader;

/// An opaque handle identifying one loaded type.
pub trait TypeHandle: Clone + Eq + Hash + Send + Sync + 'static {
    fn is_null(&self) -> bool;

    /// The loader-independent qualified name.
    fn type_name(&self) -> String;
}

static NEXT_CONTEXT: AtomicU64 = AtomicU64::new(1);

#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadContext(Option<NonZeroU64>);

impl LoadContext {
    pub const NULL: Self = Self(None);

    pub fn fresh() -> Self {
        Self(NonZeroU64::new(NEXT_CONTEXT.fetch_add(1, Ordering::Relaxed)))
    }

    pub const fn is_null(&self) -> bool {
        self.0.is_none()
    }

    pub fn id(&self) -> u64 {
        self.0.map_or(0, NonZeroU64::get)
    }
}

impl Debug for LoadContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            None => write!(f, "LoadContext(NULL)"),
            Some(id) => write!(f, "LoadContext(#{id})"),
        }
    }
}

#[derive(Clone)]
pub struct TypeDescription {
    pub context: LoadContext,
    definition: Option<Arc<TypeDefinition>>,
}

impl TypeDescription {
    pub const NULL: Self = Self {
        context: LoadContext::NULL,
        definition: None,
    };

    pub fn new(context: LoadContext, definition: Arc<TypeDefinition>) -> Self {
        Self {
            context,
            definition: Some(definition),
        }
    }

    pub fn try_definition(&self) -> Option<&TypeDefinition> {
        self.definition.as_deref()
    }

    pub fn definition(&self) -> &TypeDefinition {
        match &self.definition {
            Some(d) => d,
            None => {
                panic!("Attempted to access definition of a null or uninitialized TypeDescription")
            }
        }
    }

    pub fn is_null(&self) -> bool {
        self.definition.is_none()
    }

    pub fn type_name(&self) -> String {
        match &self.definition {
            None => "UNRESOLVED_TYPE_DEF".to_string(),
            Some(d) => d.type_name(),
        }
    }

    fn definition_ptr(&self) -> *const TypeDefinition {
        self.definition
            .as_ref()
            .map_or(std::ptr::null(), Arc::as_ptr)
    }
}

impl TypeHandle for TypeDescription {
    fn is_null(&self) -> bool {
        TypeDescription::is_null(self)
    }

    fn type_name(&self) -> String {
        TypeDescription::type_name(self)
    }
}

impl Debug for TypeDescription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.definition {
            None => write!(f, "NULL"),
            Some(d) => write!(f, "{} @ {:?}", d.type_name(), self.context),
        }
    }
}

impl PartialEq for TypeDescription {
    fn eq(&self, other: &Self) -> bool {
        self.context == other.context && std::ptr::eq(self.definition_ptr(), other.definition_ptr())
    }
}

impl Eq for TypeDescription {}

impl Hash for TypeDescription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.context.hash(state);
        self.definition_ptr().hash(state);
    }
}
