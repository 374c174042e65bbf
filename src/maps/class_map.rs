use super::MethodMapBuilder;
use crate::{
    conversion::ConversionHandler,
    error::IntrospectionError,
    sync::Arc,
    types::{members::MethodDescription, MethodDefinition, TypeDescription},
};
use dashmap::DashMap;
use std::{
    collections::HashMap,
    fmt::{Debug, Formatter},
};
use tracing::trace;

/// The public methods of one type, indexed by name.
pub struct ClassMap {
    ty: TypeDescription,
    methods: HashMap<String, Vec<MethodDescription>>,
    conversions: Arc<dyn ConversionHandler>,
    /// (name, argument types) -> resolved overload
    resolved: DashMap<(String, Vec<String>), Option<MethodDescription>>,
}

impl ClassMap {
    pub fn new(
        ty: TypeDescription,
        conversions: Arc<dyn ConversionHandler>,
    ) -> Result<Self, IntrospectionError> {
        let Some(definition) = ty.try_definition() else {
            return Err(IntrospectionError::InvalidArgument(
                "cannot build a class map for a null type",
            ));
        };
        if !definition.public {
            return Err(IntrospectionError::not_introspectable(
                ty.type_name(),
                "type is not public",
            ));
        }

        let mut methods: HashMap<String, Vec<MethodDescription>> = HashMap::new();
        for (index, m) in definition.methods.iter().enumerate() {
            if m.public {
                methods
                    .entry(m.name.clone())
                    .or_default()
                    .push(MethodDescription::new(ty.clone(), index));
            }
        }
        trace!(
            "Built class map for {}: {} public method names",
            ty.type_name(),
            methods.len()
        );

        Ok(Self {
            ty,
            methods,
            conversions,
            resolved: DashMap::new(),
        })
    }

    pub fn type_description(&self) -> &TypeDescription {
        &self.ty
    }

    pub fn conversion_handler(&self) -> &Arc<dyn ConversionHandler> {
        &self.conversions
    }

    pub fn methods(&self, name: &str) -> &[MethodDescription] {
        self.methods.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn method_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.methods.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Picks the overload of `name` that best matches `args`.
    ///
    /// Successful resolutions, including misses, are memoised per argument list.
    pub fn find_method(
        &self,
        name: &str,
        args: &[&str],
    ) -> Result<Option<MethodDescription>, IntrospectionError> {
        let key = (
            name.to_string(),
            args.iter().map(|a| a.to_string()).collect::<Vec<_>>(),
        );
        if let Some(cached) = self.resolved.get(&key) {
            return Ok(cached.clone());
        }

        let result = self.resolve(name, args)?;
        self.resolved.insert(key, result.clone());
        Ok(result)
    }

    fn resolve(
        &self,
        name: &str,
        args: &[&str],
    ) -> Result<Option<MethodDescription>, IntrospectionError> {
        let applicable: Vec<&MethodDescription> = self
            .methods(name)
            .iter()
            .filter(|m| self.is_applicable(m.method(), args))
            .collect();

        match applicable.as_slice() {
            [] => return Ok(None),
            [only] => return Ok(Some((*only).clone())),
            _ => {}
        }

        if let Some(exact) = applicable.iter().find(|m| {
            let method = m.method();
            !method.varargs
                && method
                    .parameters
                    .iter()
                    .map(String::as_str)
                    .eq(args.iter().copied())
        }) {
            return Ok(Some((*exact).clone()));
        }

        let maximal: Vec<&MethodDescription> = applicable
            .iter()
            .filter(|c| {
                !applicable.iter().any(|d| {
                    self.more_specific(d.method(), c.method())
                        && !self.more_specific(c.method(), d.method())
                })
            })
            .copied()
            .collect();

        match maximal.as_slice() {
            [best] => Ok(Some((*best).clone())),
            _ => Err(IntrospectionError::AmbiguousMethod {
                name: format!("{}::{}", self.ty.type_name(), name),
                args: args.join(", "),
            }),
        }
    }

    fn is_applicable(&self, method: &MethodDefinition, args: &[&str]) -> bool {
        let params = &method.parameters;
        let convertible = |formal: &str, actual: &str, varargs: bool| {
            self.conversions
                .is_explicitly_convertible(formal, actual, varargs)
        };

        if !method.varargs || params.is_empty() {
            return params.len() == args.len()
                && params.iter().zip(args).all(|(f, a)| convertible(f.as_str(), *a, false));
        }

        let fixed = params.len() - 1;
        if args.len() < fixed
            || !params[..fixed]
                .iter()
                .zip(args)
                .all(|(f, a)| convertible(f.as_str(), *a, false))
        {
            return false;
        }

        let last = params[fixed].as_str();
        let rest = &args[fixed..];
        (rest.len() == 1 && convertible(last, rest[0], false))
            || rest.iter().all(|a| convertible(last, *a, true))
    }

    /// Whether every parameter of `a` could be passed where `b` declares one.
    fn more_specific(&self, a: &MethodDefinition, b: &MethodDefinition) -> bool {
        if a.varargs != b.varargs {
            return !a.varargs;
        }
        a.parameters.len() == b.parameters.len()
            && a.parameters.iter().zip(&b.parameters).all(|(pa, pb)| {
                self.conversions.is_explicitly_convertible(pb, pa, false)
            })
    }
}

impl Debug for ClassMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassMap")
            .field("type", &self.ty)
            .field("methods", &self.method_names())
            .finish()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ClassMapBuilder;

impl MethodMapBuilder<TypeDescription> for ClassMapBuilder {
    type Map = ClassMap;

    fn build_method_map(
        &self,
        ty: &TypeDescription,
        conversions: &Arc<dyn ConversionHandler>,
    ) -> Result<ClassMap, IntrospectionError> {
        ClassMap::new(ty.clone(), conversions.clone())
    }
}
