//! Argument conversion rules consulted during overload resolution.
//!
//! The cache never calls the handler itself. It keeps exactly one instance and
//! passes it to every method map it builds.

/// Decides whether an argument of type `actual` may be passed where `formal` is
/// declared.
pub trait ConversionHandler: Send + Sync {
    /// `possible_varargs` is set when `formal` is the trailing parameter of a
    /// varargs method, in which case an array formal also accepts its element type.
    fn is_explicitly_convertible(&self, formal: &str, actual: &str, possible_varargs: bool)
        -> bool;
}

const OBJECT_TYPES: &[&str] = &["object", "System.Object"];
const STRING_TYPES: &[&str] = &["string", "System.String"];
const NUMERIC_WIDENING: &[&str] = &["i8", "i16", "i32", "i64", "f32", "f64"];

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultConversionHandler;

impl DefaultConversionHandler {
    fn widens(formal: &str, actual: &str) -> bool {
        if actual == "u8" {
            return NUMERIC_WIDENING[1..].contains(&formal) || formal == "u8";
        }
        match (
            NUMERIC_WIDENING.iter().position(|t| *t == formal),
            NUMERIC_WIDENING.iter().position(|t| *t == actual),
        ) {
            (Some(f), Some(a)) => f >= a,
            _ => false,
        }
    }
}

impl ConversionHandler for DefaultConversionHandler {
    fn is_explicitly_convertible(
        &self,
        formal: &str,
        actual: &str,
        possible_varargs: bool,
    ) -> bool {
        if formal == actual || OBJECT_TYPES.contains(&formal) || STRING_TYPES.contains(&formal) {
            return true;
        }
        if Self::widens(formal, actual) {
            return true;
        }
        if possible_varargs {
            if let Some(element) = formal.strip_suffix("[]") {
                return self.is_explicitly_convertible(element, actual, false);
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_and_object() {
        let h = DefaultConversionHandler;
        assert!(h.is_explicitly_convertible("App.Widget", "App.Widget", false));
        assert!(h.is_explicitly_convertible("object", "App.Widget", false));
        assert!(h.is_explicitly_convertible("System.Object", "i32", false));
        assert!(!h.is_explicitly_convertible("App.Widget", "App.Gadget", false));
    }

    #[test]
    fn test_numeric_widening() {
        let h = DefaultConversionHandler;
        assert!(h.is_explicitly_convertible("i64", "i32", false));
        assert!(h.is_explicitly_convertible("f64", "i8", false));
        assert!(h.is_explicitly_convertible("i16", "u8", false));
        assert!(!h.is_explicitly_convertible("i32", "i64", false));
        assert!(!h.is_explicitly_convertible("i8", "u8", false));
    }

    #[test]
    fn test_string_accepts_anything() {
        let h = DefaultConversionHandler;
        assert!(h.is_explicitly_convertible("string", "f64", false));
    }

    #[test]
    fn test_varargs_element() {
        let h = DefaultConversionHandler;
        assert!(h.is_explicitly_convertible("i64[]", "i32", true));
        assert!(!h.is_explicitly_convertible("i64[]", "i32", false));
        assert!(h.is_explicitly_convertible("i64[]", "i64[]", false));
    }
}
