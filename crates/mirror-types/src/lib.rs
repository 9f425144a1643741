#![forbid(unsafe_code)]

//! A model of Java's generic type system: the reference-type algebra of
//! JLS §4 (subtyping, containment, erasure, supertype projection) and the
//! capture conversion of JLS §5.1.10, over an immutable declaration graph
//! supplied through [`DeclProvider`] or built directly in a [`TypeStore`].

mod capture;
mod erasure;
mod error;
mod format;
mod loader;
mod store;
mod subst;
mod subtype;
mod supertype;
mod ty;

pub use crate::capture::TyContext;
pub use crate::erasure::erasure;
pub use crate::error::{Result, TypeError};
pub use crate::format::format_type;
pub use crate::loader::{ChainProvider, DeclProvider, DeclSource, StoreLoader, TypeVarScope};
pub use crate::store::{
    boxed_decl, boxed_type, prototype, unboxed_type, CaptureOrigin, DeclId, DeclKind, TypeDecl,
    TypeEnv, TypeParamDef, TypeParamId, TypeStore, WellKnown,
};
pub use crate::subst::{substitute, SubstMap};
pub use crate::subtype::{contains, is_same_type, is_subtype};
pub use crate::supertype::instantiate_supertype;
pub use crate::ty::{DeclaredType, PrimitiveType, Type, WildcardBound};
