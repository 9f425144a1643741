use std::collections::HashMap;

use crate::store::TypeParamId;
use crate::ty::{DeclaredType, Type, WildcardBound};

/// A substitution from formal type parameters to actual types.
pub type SubstMap = HashMap<TypeParamId, Type>;

/// Rewrites `ty`, replacing every type variable whose parameter is a key of
/// `map` with the mapped type.
///
/// Unmapped variables are kept verbatim; a variable's bounds are never
/// unfolded, which is what keeps substitution terminating on recursively
/// bounded parameters. Capture variables carry bounds that were rewritten
/// once, when the variable was frozen, so replacing the variable node is all
/// there is to do here.
pub fn substitute(ty: &Type, map: &SubstMap) -> Type {
    if map.is_empty() {
        return ty.clone();
    }
    match ty {
        Type::TypeVar(id) => map.get(id).cloned().unwrap_or_else(|| ty.clone()),
        Type::Array(component) => Type::Array(Box::new(substitute(component, map))),
        Type::Declared(d) => Type::Declared(DeclaredType {
            enclosing: Box::new(substitute(&d.enclosing, map)),
            decl: d.decl,
            args: d.args.iter().map(|a| substitute(a, map)).collect(),
        }),
        Type::Wildcard(w) => Type::Wildcard(match w {
            WildcardBound::Unbounded => WildcardBound::Unbounded,
            WildcardBound::Extends(b) => WildcardBound::Extends(Box::new(substitute(b, map))),
            WildcardBound::Super(b) => WildcardBound::Super(Box::new(substitute(b, map))),
        }),
        Type::Intersection(bounds) => {
            Type::Intersection(bounds.iter().map(|b| substitute(b, map)).collect())
        }
        Type::Primitive(_) | Type::Void | Type::None | Type::Null => ty.clone(),
    }
}

/// Pairs formal parameters with actual arguments, positionally.
pub(crate) fn param_map(params: &[TypeParamId], args: &[Type]) -> SubstMap {
    params
        .iter()
        .zip(args.iter())
        .map(|(&p, a)| (p, a.clone()))
        .collect()
}
