#![forbid(unsafe_code)]

//! The JVM generic-signature grammar (JVMS §4.7.9.1), restricted to the
//! class and field productions: everything a class declaration needs to
//! describe its type parameters, superclass, and superinterfaces.

mod error;
mod signature;

pub use crate::error::{Error, Result};
pub use crate::signature::{
    parse_class_signature, parse_field_signature, BaseType, ClassSignature, ClassTypeSignature,
    FormalTypeParameter, NestedSegment, TypeArgument, TypeSignature,
};
