use crate::types::{FieldDefinition, MethodDefinition, TypeDescription};
use enum_dispatch::enum_dispatch;
use std::{
    fmt::{Debug, Formatter},
    hash::{Hash, Hasher},
};

#[enum_dispatch]
pub trait Member {
    fn name(&self) -> &str;
    fn is_public(&self) -> bool;
    fn is_static(&self) -> bool;
    fn signature(&self) -> String;
}

#[enum_dispatch(Member)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberDescription {
    MethodDescription,
    FieldDescription,
}

#[derive(Clone)]
pub struct MethodDescription {
    pub parent: TypeDescription,
    index: usize,
}

impl MethodDescription {
    /// `index` must be a valid position in the parent's method table.
    pub(crate) fn new(parent: TypeDescription, index: usize) -> Self {
        Self { parent, index }
    }

    /// `None` if `parent` is null or has no method at `index`.
    pub fn try_new(parent: TypeDescription, index: usize) -> Option<Self> {
        let count = parent.try_definition()?.methods.len();
        (index < count).then(|| Self::new(parent, index))
    }

    pub fn method(&self) -> &MethodDefinition {
        &self.parent.definition().methods[self.index]
    }

    pub fn parameters(&self) -> &[String] {
        &self.method().parameters
    }
}

impl Member for MethodDescription {
    fn name(&self) -> &str {
        &self.method().name
    }

    fn is_public(&self) -> bool {
        self.method().public
    }

    fn is_static(&self) -> bool {
        self.method().static_member
    }

    fn signature(&self) -> String {
        let m = self.method();
        let mut params = m.parameters.join(", ");
        if m.varargs {
            params.push_str("...");
        }
        format!(
            "{}{} {}::{}({})",
            if m.static_member { "static " } else { "" },
            m.return_type,
            self.parent.type_name(),
            m.name,
            params
        )
    }
}

impl Debug for MethodDescription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.signature())
    }
}

impl PartialEq for MethodDescription {
    fn eq(&self, other: &Self) -> bool {
        self.parent == other.parent && self.index == other.index
    }
}

impl Eq for MethodDescription {}

impl Hash for MethodDescription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parent.hash(state);
        self.index.hash(state);
    }
}

#[derive(Clone)]
pub struct FieldDescription {
    pub parent: TypeDescription,
    index: usize,
}

impl FieldDescription {
    /// `index` must be a valid position in the parent's field table.
    pub(crate) fn new(parent: TypeDescription, index: usize) -> Self {
        Self { parent, index }
    }

    /// `None` if `parent` is null or has no field at `index`.
    pub fn try_new(parent: TypeDescription, index: usize) -> Option<Self> {
        let count = parent.try_definition()?.fields.len();
        (index < count).then(|| Self::new(parent, index))
    }

    pub fn field(&self) -> &FieldDefinition {
        &self.parent.definition().fields[self.index]
    }
}

impl Member for FieldDescription {
    fn name(&self) -> &str {
        &self.field().name
    }

    fn is_public(&self) -> bool {
        self.field().public
    }

    fn is_static(&self) -> bool {
        self.field().static_member
    }

    fn signature(&self) -> String {
        let field = self.field();
        format!(
            "{}{} {}::{}",
            if field.static_member { "static " } else { "" },
            field.field_type,
            self.parent.type_name(),
            field.name
        )
    }
}

impl Debug for FieldDescription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.signature())
    }
}

impl PartialEq for FieldDescription {
    fn eq(&self, other: &Self) -> bool {
        self.parent == other.parent && self.index == other.index
    }
}

impl Eq for FieldDescription {}

impl Hash for FieldDescription {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parent.hash(state);
        self.index.hash(state);
    }
}
