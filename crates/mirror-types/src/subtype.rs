use crate::capture::TyContext;
use crate::store::TypeEnv;
use crate::supertype::instantiate_supertype;
use crate::ty::{DeclaredType, PrimitiveType, Type, WildcardBound};

/// Structural sameness. Wildcards are type arguments, not types: a wildcard
/// operand always answers `false`.
pub fn is_same_type(t1: &Type, t2: &Type) -> bool {
    if t1.is_wildcard() || t2.is_wildcard() {
        return false;
    }
    t1 == t2
}

/// The primitive widening lattice (JLS §4.10.1). `char` widens to the
/// integral and floating kinds from `int` up, but not to `short` or `byte`.
fn widens_to(from: PrimitiveType, to: PrimitiveType) -> bool {
    use PrimitiveType::*;
    if from == to {
        return true;
    }
    matches!(
        (from, to),
        (Byte, Short | Int | Long | Float | Double)
            | (Short, Int | Long | Float | Double)
            | (Char, Int | Long | Float | Double)
            | (Int, Long | Float | Double)
            | (Long, Float | Double)
            | (Float, Double)
    )
}

/// The containment relation on type arguments (JLS §4.5.1): does the
/// argument `outer` contain the argument `inner`?
pub fn contains(env: &dyn TypeEnv, outer: &Type, inner: &Type) -> bool {
    match (outer, inner) {
        (Type::Wildcard(o), Type::Wildcard(i)) => match (o, i) {
            (WildcardBound::Extends(t), WildcardBound::Extends(s)) => is_subtype(env, s, t),
            (WildcardBound::Unbounded, WildcardBound::Extends(_)) => true,
            (WildcardBound::Super(t), WildcardBound::Super(s)) => is_subtype(env, t, s),
            (WildcardBound::Unbounded, WildcardBound::Super(_)) => true,
            (WildcardBound::Extends(t), WildcardBound::Super(_)) => is_object(env, t),
            (WildcardBound::Unbounded, WildcardBound::Unbounded) => true,
            (WildcardBound::Extends(t), WildcardBound::Unbounded) => is_object(env, t),
            (WildcardBound::Super(_), _) => false,
        },
        (Type::Wildcard(o), t) => match o {
            WildcardBound::Extends(b) => is_subtype(env, t, b),
            WildcardBound::Super(b) => is_subtype(env, b, t),
            WildcardBound::Unbounded => true,
        },
        (_, Type::Wildcard(_)) => false,
        (t1, t2) => is_same_type(t1, t2),
    }
}

fn is_object(env: &dyn TypeEnv, ty: &Type) -> bool {
    matches!(ty, Type::Declared(d)
        if d.decl == env.well_known().object && d.args.is_empty() && *d.enclosing == Type::None)
}

/// Is `t1` a subtype of `t2`?
///
/// Dispatches on the form of the supertype after a sameness short-circuit
/// (which is what makes the relation reflexive for type variables and
/// intersections). A declared left operand with wildcard arguments is
/// replaced by its capture conversion before its arguments are compared.
pub fn is_subtype(env: &dyn TypeEnv, t1: &Type, t2: &Type) -> bool {
    if is_same_type(t1, t2) {
        return true;
    }
    match t2 {
        Type::Primitive(p2) => match t1 {
            Type::Primitive(p1) => widens_to(*p1, *p2),
            _ => false,
        },
        Type::Array(c2) => match t1 {
            Type::Null => true,
            Type::Array(c1) => is_subtype(env, c1, c2),
            _ => false,
        },
        Type::Declared(d2) => match t1 {
            Type::Null => true,
            Type::Declared(d1) => {
                if d1.args.iter().any(Type::is_wildcard) {
                    let mut ctx = TyContext::new(env);
                    let Type::Declared(captured) = ctx.capture_conversion(t1) else {
                        return false;
                    };
                    declared_subtype(&ctx, &captured, d2)
                } else {
                    declared_subtype(env, d1, d2)
                }
            }
            Type::Array(_) => {
                let wk = env.well_known();
                d2.decl == wk.object || d2.decl == wk.cloneable || d2.decl == wk.serializable
            }
            Type::TypeVar(v) => is_subtype(env, &env.upper_bound_ty(*v), t2),
            Type::Intersection(bounds) => bounds.iter().any(|b| is_subtype(env, b, t2)),
            _ => false,
        },
        Type::TypeVar(v2) => match t1 {
            Type::Null => true,
            _ => is_same_type(&env.lower_bound_ty(*v2), t1),
        },
        // An intersection supertype holds only under sameness, already
        // checked above; likewise Null, Void, and None.
        _ => false,
    }
}

fn declared_subtype(env: &dyn TypeEnv, d1: &DeclaredType, d2: &DeclaredType) -> bool {
    let Some(projected) = instantiate_supertype(env, &Type::Declared(d1.clone()), d2.decl)
    else {
        return false;
    };
    if projected.is_empty() && !d2.args.is_empty() {
        // A raw view of the target is not a subtype of a parameterized
        // invocation.
        return false;
    }
    d2.args
        .iter()
        .zip(projected.iter())
        .all(|(arg, proj)| contains(env, arg, proj))
}
