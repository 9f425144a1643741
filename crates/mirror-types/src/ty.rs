use serde::{Deserialize, Serialize};

use crate::error::{Result, TypeError};
use crate::store::{DeclId, TypeParamId};

/// The eight primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 8] = [
        PrimitiveType::Boolean,
        PrimitiveType::Byte,
        PrimitiveType::Short,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Char,
        PrimitiveType::Float,
        PrimitiveType::Double,
    ];

    /// The Java keyword for this kind.
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Char => "char",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }
}

/// A wildcard type argument. At most one bound is present by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WildcardBound {
    Unbounded,
    Extends(Box<Type>),
    Super(Box<Type>),
}

impl WildcardBound {
    pub fn extends_bound(&self) -> Option<&Type> {
        match self {
            WildcardBound::Extends(b) => Some(b),
            _ => None,
        }
    }

    pub fn super_bound(&self) -> Option<&Type> {
        match self {
            WildcardBound::Super(b) => Some(b),
            _ => None,
        }
    }
}

/// A nominal reference to a class or interface declaration, with the actual
/// type arguments applied to it and, for nested types, the enclosing
/// instantiation.
///
/// `enclosing` is `Type::None` for top-level references; `args` is empty for
/// raw and non-generic references.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeclaredType {
    pub enclosing: Box<Type>,
    pub decl: DeclId,
    pub args: Vec<Type>,
}

/// A type expression.
///
/// Values are immutable and compare structurally; a type variable compares by
/// the identity of its parameter, which is what tells a fresh capture
/// variable apart from the prototypical variable of the same parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Primitive(PrimitiveType),
    Void,
    None,
    Null,
    Array(Box<Type>),
    Declared(DeclaredType),
    TypeVar(TypeParamId),
    Wildcard(WildcardBound),
    Intersection(Vec<Type>),
}

impl Type {
    /// A top-level declared type.
    pub fn class(decl: DeclId, args: Vec<Type>) -> Type {
        Type::Declared(DeclaredType {
            enclosing: Box::new(Type::None),
            decl,
            args,
        })
    }

    /// A member declared type with an explicit enclosing instantiation.
    pub fn member(enclosing: Type, decl: DeclId, args: Vec<Type>) -> Type {
        Type::Declared(DeclaredType {
            enclosing: Box::new(enclosing),
            decl,
            args,
        })
    }

    pub fn array(component: Type) -> Type {
        Type::Array(Box::new(component))
    }

    pub fn int() -> Type {
        Type::Primitive(PrimitiveType::Int)
    }

    /// A wildcard from optional bounds. Fails when both bounds are supplied.
    pub fn wildcard(extends_bound: Option<Type>, super_bound: Option<Type>) -> Result<Type> {
        match (extends_bound, super_bound) {
            (Option::None, Option::None) => Ok(Type::Wildcard(WildcardBound::Unbounded)),
            (Some(b), Option::None) => Ok(Type::Wildcard(WildcardBound::Extends(Box::new(b)))),
            (Option::None, Some(b)) => Ok(Type::Wildcard(WildcardBound::Super(Box::new(b)))),
            (Some(_), Some(_)) => Err(TypeError::InvalidArgument(
                "a wildcard has at most one of an extends bound and a super bound".to_string(),
            )),
        }
    }

    /// An intersection type. Fails when `bounds` is empty.
    pub fn intersection(bounds: Vec<Type>) -> Result<Type> {
        if bounds.is_empty() {
            return Err(TypeError::InvalidArgument(
                "an intersection type needs at least one bound".to_string(),
            ));
        }
        Ok(Type::Intersection(bounds))
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Type::Wildcard(_))
    }

    /// Whether this is a reference form: array, declared, type variable,
    /// null, or intersection.
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Type::Array(_)
                | Type::Declared(_)
                | Type::TypeVar(_)
                | Type::Null
                | Type::Intersection(_)
        )
    }

    pub fn as_declared(&self) -> Option<&DeclaredType> {
        match self {
            Type::Declared(d) => Some(d),
            _ => None,
        }
    }
}
