use std::collections::{HashMap, HashSet, VecDeque};

use crate::store::{DeclId, DeclKind, TypeDecl, TypeEnv};
use crate::subst::{param_map, substitute};
use crate::ty::{DeclaredType, Type};

/// The direct supertypes of a declaration, as written: the superclass (when
/// declared) followed by the superinterfaces. An interface with no explicit
/// superinterfaces reports `Object` as its sole direct supertype
/// (JLS §4.10.2).
pub(crate) fn direct_supertypes(env: &dyn TypeEnv, decl: &TypeDecl) -> Vec<DeclaredType> {
    let mut out = Vec::new();
    if let Some(Type::Declared(d)) = &decl.super_class {
        out.push(d.clone());
    }
    for iface in &decl.interfaces {
        if let Type::Declared(d) = iface {
            out.push(d.clone());
        }
    }
    if out.is_empty() && matches!(decl.kind, DeclKind::Interface | DeclKind::Annotation) {
        out.push(DeclaredType {
            enclosing: Box::new(Type::None),
            decl: env.well_known().object,
            args: Vec::new(),
        });
    }
    out
}

/// Projects the actual type arguments that `target`'s formal parameters take
/// on when `sub` is viewed as an instance of `target`.
///
/// Returns `None` when `sub` is not a declared type or no inheritance path
/// exists. A generic `target` reached only through a raw step may project to
/// type-variable placeholders (the raw declaration's own formals, as written
/// in its extends clause), and a path ending at a raw type projects to an
/// empty argument list.
pub fn instantiate_supertype(
    env: &dyn TypeEnv,
    sub: &Type,
    target: DeclId,
) -> Option<Vec<Type>> {
    let Type::Declared(start) = sub else {
        return None;
    };
    let edges = shortest_path(env, start.decl, target)?;
    if env.decl(target)?.type_params.is_empty() {
        return Some(Vec::new());
    }

    let mut current = start.clone();
    for edge in edges {
        let decl = env.decl(current.decl)?;
        if current.args.is_empty() && !decl.type_params.is_empty() {
            // Raw step: take the extends clause as written, leaving the raw
            // declaration's formal variables in place.
            current = edge;
        } else {
            let map = param_map(&decl.type_params, &current.args);
            let Type::Declared(next) = substitute(&Type::Declared(edge), &map) else {
                return None;
            };
            current = next;
        }
    }
    Some(current.args)
}

/// Breadth-first search for the shortest inheritance path from `from` to
/// `to`, returned as the sequence of supertype references to follow. Ties
/// break on the order of the direct-supertype lists, so re-runs are stable.
fn shortest_path(env: &dyn TypeEnv, from: DeclId, to: DeclId) -> Option<Vec<DeclaredType>> {
    if from == to {
        return Some(Vec::new());
    }

    let mut queue = VecDeque::new();
    let mut visited = HashSet::new();
    let mut parent: HashMap<DeclId, (DeclId, DeclaredType)> = HashMap::new();

    queue.push_back(from);
    visited.insert(from);

    while let Some(cur) = queue.pop_front() {
        let Some(decl) = env.decl(cur) else {
            continue;
        };
        for edge in direct_supertypes(env, decl) {
            let next = edge.decl;
            if !visited.insert(next) {
                continue;
            }
            parent.insert(next, (cur, edge));
            if next == to {
                let mut path = Vec::new();
                let mut at = to;
                while at != from {
                    let (prev, edge) = parent.remove(&at)?;
                    path.push(edge);
                    at = prev;
                }
                path.reverse();
                return Some(path);
            }
            queue.push_back(next);
        }
    }
    None
}
