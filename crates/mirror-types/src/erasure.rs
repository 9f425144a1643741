use crate::store::TypeEnv;
use crate::ty::{DeclaredType, Type};

/// The erasure of a type (JLS §4.6): type arguments dropped, type variables
/// erased to their leftmost upper bound, intersections to their first bound.
pub fn erasure(env: &dyn TypeEnv, ty: &Type) -> Type {
    match ty {
        Type::Primitive(_) | Type::Void | Type::None | Type::Null | Type::Wildcard(_) => {
            ty.clone()
        }
        Type::Array(component) => Type::Array(Box::new(erasure(env, component))),
        Type::Declared(d) => {
            let enclosing = match &*d.enclosing {
                Type::None => Type::None,
                other => erasure(env, other),
            };
            Type::Declared(DeclaredType {
                enclosing: Box::new(enclosing),
                decl: d.decl,
                args: Vec::new(),
            })
        }
        Type::TypeVar(id) => erasure(env, &env.upper_bound_ty(*id)),
        Type::Intersection(bounds) => match bounds.first() {
            Some(first) => erasure(env, first),
            None => Type::class(env.well_known().object, Vec::new()),
        },
    }
}
