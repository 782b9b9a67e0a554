//! The type model: primitives, named (class/interface) types, and arrays.

use juno_util::Symbol;
use juno_util::Span;

/// One of the language's built-in primitive types, plus the two sentinels
/// (`null`, `error`) that behave like types during checking but never
/// appear in a declared signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Int,
    Double,
    Bool,
    String,
    Void,
    /// The type of the `null` literal: equivalent to any reference type.
    Null,
    /// Poison value: equivalent to everything, to suppress cascades.
    Error,
}

/// A reference to a class or interface by name, carrying a mutable flag:
/// `type_declared` starts `true` and is cleared by the checker the first
/// time the name fails to resolve, so later uses of the same unresolved name
/// stay quiet (the error-suppression rule).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedType {
    pub name: Symbol,
    pub span: Span,
    pub type_declared: bool,
}

impl NamedType {
    pub fn new(name: Symbol, span: Span) -> Self {
        Self { name, span, type_declared: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Primitive(Primitive),
    Named(NamedType),
    Array(Box<Type>),
}

impl Type {
    pub const INT: Type = Type::Primitive(Primitive::Int);
    pub const DOUBLE: Type = Type::Primitive(Primitive::Double);
    pub const BOOL: Type = Type::Primitive(Primitive::Bool);
    pub const STRING: Type = Type::Primitive(Primitive::String);
    pub const VOID: Type = Type::Primitive(Primitive::Void);
    pub const NULL: Type = Type::Primitive(Primitive::Null);
    pub const ERROR: Type = Type::Primitive(Primitive::Error);

    pub fn named(name: Symbol, span: Span) -> Type {
        Type::Named(NamedType::new(name, span))
    }

    pub fn array(elem: Type) -> Type {
        Type::Array(Box::new(elem))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Primitive(Primitive::Error))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Primitive(Primitive::Int) | Type::Primitive(Primitive::Double))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array(_))
    }

    pub fn as_named(&self) -> Option<&NamedType> {
        match self {
            Type::Named(n) => Some(n),
            _ => None,
        }
    }

    /// Whether a value of type `self` can be used where `want` is expected
    /// (subtype-on-the-left). `extends_of` reports the `NamedType` a class
    /// declaration's `extends` clause names, if any — supplied by the caller
    /// (`juno-sem::lookup`) since resolving
    /// a name to its declaration requires the program's scope/decl arenas,
    /// which this module doesn't know about.
    pub fn equivalent(&self, want: &Type, extends_of: &impl Fn(Symbol) -> Option<Symbol>) -> bool {
        if self.is_error() || want.is_error() {
            return true;
        }
        match (self, want) {
            (Type::Primitive(Primitive::Null), Type::Named(_) | Type::Array(_)) => true,
            (Type::Named(_) | Type::Array(_), Type::Primitive(Primitive::Null)) => true,
            (Type::Primitive(a), Type::Primitive(b)) => a == b,
            (Type::Array(a), Type::Array(b)) => a.equivalent(b, extends_of),
            (Type::Named(a), Type::Named(b)) => {
                if a.name == b.name {
                    return true;
                }
                // Walk `a`'s `extends` chain looking for `b`, rather than
                // treating any two named types as unconditionally equivalent.
                let mut current = Some(a.name);
                let mut guard = 0usize;
                while let Some(name) = current {
                    if guard > 10_000 {
                        // Inheritance cycles are reported separately by the
                        // checker; this is just a backstop so a buggy/cyclic
                        // program can't hang type-checking.
                        return false;
                    }
                    guard += 1;
                    let parent = extends_of(name);
                    if parent == Some(b.name) {
                        return true;
                    }
                    if parent == Some(name) {
                        return false;
                    }
                    current = parent;
                }
                false
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Primitive(Primitive::Int) => write!(f, "int"),
            Type::Primitive(Primitive::Double) => write!(f, "double"),
            Type::Primitive(Primitive::Bool) => write!(f, "bool"),
            Type::Primitive(Primitive::String) => write!(f, "string"),
            Type::Primitive(Primitive::Void) => write!(f, "void"),
            Type::Primitive(Primitive::Null) => write!(f, "null"),
            Type::Primitive(Primitive::Error) => write!(f, "error"),
            Type::Named(n) => write!(f, "{}", n.name),
            Type::Array(elem) => write!(f, "{elem}[]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_parents(_: Symbol) -> Option<Symbol> {
        None
    }

    #[test]
    fn primitives_equivalent_to_same_kind() {
        assert!(Type::INT.equivalent(&Type::INT, &no_parents));
        assert!(!Type::INT.equivalent(&Type::DOUBLE, &no_parents));
    }

    #[test]
    fn error_is_equivalent_to_everything() {
        assert!(Type::ERROR.equivalent(&Type::INT, &no_parents));
        assert!(Type::BOOL.equivalent(&Type::ERROR, &no_parents));
    }

    #[test]
    fn null_is_equivalent_to_reference_types() {
        let class_t = Type::named(Symbol::intern("Pizza"), Span::DUMMY);
        assert!(Type::NULL.equivalent(&class_t, &no_parents));
        assert!(Type::NULL.equivalent(&Type::array(Type::INT), &no_parents));
        assert!(!Type::NULL.equivalent(&Type::INT, &no_parents));
    }

    #[test]
    fn arrays_equivalent_by_element_type() {
        assert!(Type::array(Type::INT).equivalent(&Type::array(Type::INT), &no_parents));
        assert!(!Type::array(Type::INT).equivalent(&Type::array(Type::DOUBLE), &no_parents));
    }

    #[test]
    fn named_types_equivalent_to_themselves() {
        let a = Type::named(Symbol::intern("Animal"), Span::DUMMY);
        assert!(a.equivalent(&a, &no_parents));
    }

    #[test]
    fn subtype_on_the_left_walks_extends_chain() {
        let dog = Symbol::intern("Dog_test_subtype");
        let animal = Symbol::intern("Animal_test_subtype");
        let parents = |s: Symbol| if s == dog { Some(animal) } else { None };

        let dog_t = Type::named(dog, Span::DUMMY);
        let animal_t = Type::named(animal, Span::DUMMY);
        assert!(dog_t.equivalent(&animal_t, &parents));
        assert!(!animal_t.equivalent(&dog_t, &parents), "supertype is not assignable to subtype");
    }

    #[test]
    fn unrelated_named_types_are_not_equivalent() {
        let cat = Symbol::intern("Cat_test_subtype");
        let dog = Symbol::intern("Dog_test_subtype_2");
        assert!(!Type::named(cat, Span::DUMMY).equivalent(&Type::named(dog, Span::DUMMY), &no_parents));
    }

    #[test]
    fn named_type_starts_with_type_declared_true() {
        let t = NamedType::new(Symbol::intern("Foo"), Span::DUMMY);
        assert!(t.type_declared);
    }

    #[test]
    fn display_formats_arrays_and_named_types() {
        assert_eq!(Type::array(Type::INT).to_string(), "int[]");
        let c = Type::named(Symbol::intern("Pizza_test_display"), Span::DUMMY);
        assert_eq!(c.to_string(), "Pizza_test_display");
    }
}
