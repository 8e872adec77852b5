//! Model of annotations attached to mixin methods
//!
//! The preview does not parse annotations from class files; whatever read the
//! mixin class hands them over in this already-structured form. The accessors
//! here mirror how the injection annotations are actually shaped: a `method`
//! attribute that is a string or a list of strings, an `at` attribute that is
//! a nested `@At`-style annotation carrying a sub-kind (`value`), a `target`
//! reference, and an `ordinal`, and an optional nested `slice`.

/// Value of one annotation attribute
#[derive(Clone, PartialEq, Debug)]
pub enum AnnotationValue {
    Int(i32),
    Str(String),
    List(Vec<AnnotationValue>),
    Nested(Annotation),
}

/// An annotation: a descriptor plus named attribute values
#[derive(Clone, PartialEq, Debug)]
pub struct Annotation {
    /// Type descriptor of the annotation, eg.
    /// `Lorg/spongepowered/asm/mixin/injection/ModifyVariable;`
    pub descriptor: String,

    /// Attribute values, in declaration order
    pub values: Vec<(String, AnnotationValue)>,
}

impl Annotation {
    pub fn new(descriptor: impl Into<String>) -> Annotation {
        Annotation {
            descriptor: descriptor.into(),
            values: vec![],
        }
    }

    /// Builder-style attribute setter
    pub fn with(mut self, name: impl Into<String>, value: AnnotationValue) -> Annotation {
        self.values.push((name.into(), value));
        self
    }

    /// Raw attribute lookup
    pub fn get(&self, name: &str) -> Option<&AnnotationValue> {
        self.values
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value)
    }

    /// Integer attribute
    pub fn int(&self, name: &str) -> Option<i32> {
        match self.get(name) {
            Some(AnnotationValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    /// String-list attribute; a scalar string promotes to a one-element list
    pub fn str_list(&self, name: &str) -> Vec<&str> {
        match self.get(name) {
            Some(AnnotationValue::Str(value)) => vec![value.as_str()],
            Some(AnnotationValue::List(values)) => values
                .iter()
                .filter_map(|value| match value {
                    AnnotationValue::Str(value) => Some(value.as_str()),
                    _ => None,
                })
                .collect(),
            _ => vec![],
        }
    }

    /// Nested annotation attribute
    pub fn nested(&self, name: &str) -> Option<&Annotation> {
        match self.get(name) {
            Some(AnnotationValue::Nested(annotation)) => Some(annotation),
            _ => None,
        }
    }

    /// Anchor sub-kind of the nested `at` annotation (eg. `STORE`, `RETURN`)
    pub fn at_kind(&self) -> Option<&str> {
        match self.nested("at")?.get("value") {
            Some(AnnotationValue::Str(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Instruction-target reference of the nested `at` annotation
    pub fn at_target(&self) -> Option<&str> {
        match self.nested("at")?.get("target") {
            Some(AnnotationValue::Str(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Zero-based occurrence selector; absent or negative means "unset"
    pub fn ordinal(&self) -> Option<u32> {
        match self.int("ordinal") {
            Some(value) if value >= 0 => Some(value as u32),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_method_attribute_promotes_to_list() {
        let annotation = Annotation::new("LModifyConstant;")
            .with("method", AnnotationValue::Str(String::from("update")));
        assert_eq!(annotation.str_list("method"), vec!["update"]);
    }

    #[test]
    fn list_method_attribute_keeps_order() {
        let annotation = Annotation::new("LModifyConstant;").with(
            "method",
            AnnotationValue::List(vec![
                AnnotationValue::Str(String::from("update")),
                AnnotationValue::Str(String::from("tick")),
            ]),
        );
        assert_eq!(annotation.str_list("method"), vec!["update", "tick"]);
    }

    #[test]
    fn at_accessors_read_the_nested_annotation() {
        let at = Annotation::new("LAt;")
            .with("value", AnnotationValue::Str(String::from("STORE")))
            .with(
                "target",
                AnnotationValue::Str(String::from("La/B;c(I)V")),
            );
        let annotation =
            Annotation::new("LModifyVariable;").with("at", AnnotationValue::Nested(at));

        assert_eq!(annotation.at_kind(), Some("STORE"));
        assert_eq!(annotation.at_target(), Some("La/B;c(I)V"));
    }

    #[test]
    fn negative_ordinal_is_unset() {
        let annotation = Annotation::new("LModifyVariable;").with("ordinal", AnnotationValue::Int(-1));
        assert_eq!(annotation.ordinal(), None);

        let annotation = Annotation::new("LModifyVariable;").with("ordinal", AnnotationValue::Int(2));
        assert_eq!(annotation.ordinal(), Some(2));
    }
}
