use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_return_type() -> String {
    "void".to_string()
}

/// Metadata describing one type, as handed over by the host engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    #[serde(default)]
    pub namespace: Option<String>,
    pub name: String,
    #[serde(default = "default_true")]
    pub public: bool,
    #[serde(default)]
    pub methods: Vec<MethodDefinition>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl TypeDefinition {
    pub fn new(namespace: Option<&str>, name: &str) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
            public: true,
            methods: vec![],
            fields: vec![],
        }
    }

    pub fn with_method(mut self, method: MethodDefinition) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    pub fn type_name(&self) -> String {
        match self.namespace.as_deref() {
            None | Some("") => self.name.clone(),
            Some(ns) => format!("{ns}.{}", self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDefinition {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default = "default_return_type")]
    pub return_type: String,
    #[serde(default = "default_true")]
    pub public: bool,
    #[serde(default)]
    pub static_member: bool,
    /// The last parameter is an array that also accepts its elements inline.
    #[serde(default)]
    pub varargs: bool,
}

impl MethodDefinition {
    pub fn new(name: &str, parameters: &[&str], return_type: &str) -> Self {
        Self {
            name: name.to_string(),
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
            return_type: return_type.to_string(),
            public: true,
            static_member: false,
            varargs: false,
        }
    }

    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    pub fn varargs(mut self) -> Self {
        self.varargs = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default = "default_true")]
    pub public: bool,
    #[serde(default)]
    pub static_member: bool,
}

impl FieldDefinition {
    pub fn new(name: &str, field_type: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: field_type.to_string(),
            public: true,
            static_member: false,
        }
    }

    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }
}
