use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use mirror_types::{
    erasure, prototype, Type, TypeEnv, TypeStore, WildcardBound,
};

use pretty_assertions::assert_eq;

#[test]
fn erasure_drops_type_arguments_at_every_depth() {
    let env = TypeStore::with_minimal_jdk();
    let list = env.decl_id("java.util.List").unwrap();
    let string = env.well_known().string;

    let nested_array = Type::array(Type::array(Type::class(
        list,
        vec![Type::class(string, vec![])],
    )));
    assert_eq!(
        erasure(&env, &nested_array),
        Type::array(Type::array(Type::class(list, vec![])))
    );
}

#[test]
fn erasure_of_a_type_variable_takes_the_leftmost_bound() {
    let mut env = TypeStore::with_minimal_jdk();
    let list = env.decl_id("java.util.List").unwrap();
    let serializable = env.well_known().serializable;

    // T extends List & Serializable erases to List.
    let t = env.add_type_param(
        "T",
        vec![
            Type::class(list, vec![]),
            Type::class(serializable, vec![]),
        ],
    );
    assert_eq!(erasure(&env, &Type::TypeVar(t)), Type::class(list, vec![]));

    // A recursively bounded variable erases through its bound's raw form.
    let enum_ = env.well_known().enum_;
    let e = env.decl(enum_).unwrap().type_params[0];
    assert_eq!(erasure(&env, &Type::TypeVar(e)), Type::class(enum_, vec![]));
}

#[test]
fn erasure_of_intersections_and_leaves() {
    let env = TypeStore::with_minimal_jdk();
    let wk = *env.well_known();
    let list = env.decl_id("java.util.List").unwrap();

    let intersection = Type::Intersection(vec![
        Type::class(list, vec![Type::class(wk.string, vec![])]),
        Type::class(wk.serializable, vec![]),
    ]);
    assert_eq!(erasure(&env, &intersection), Type::class(list, vec![]));

    for ty in [
        Type::int(),
        Type::Void,
        Type::None,
        Type::Null,
        Type::Wildcard(WildcardBound::Extends(Box::new(Type::class(
            wk.number,
            vec![],
        )))),
    ] {
        assert_eq!(erasure(&env, &ty), ty);
    }
}

#[test]
fn erasure_keeps_the_enclosing_chain_erased() {
    let env = TypeStore::with_minimal_jdk();
    let map = env.decl_id("java.util.Map").unwrap();
    let entry = env.decl_id("java.util.Map$Entry").unwrap();
    let string = Type::class(env.well_known().string, vec![]);

    let member = Type::member(
        Type::class(map, vec![string.clone(), string.clone()]),
        entry,
        vec![string.clone(), string],
    );
    assert_eq!(
        erasure(&env, &member),
        Type::member(Type::class(map, vec![]), entry, vec![])
    );
}

#[test]
fn erasure_is_idempotent() {
    let env = TypeStore::with_minimal_jdk();
    let wk = *env.well_known();
    let list = env.decl_id("java.util.List").unwrap();
    let e = env.decl(list).unwrap().type_params[0];

    let universe = [
        Type::class(list, vec![Type::class(wk.string, vec![])]),
        Type::class(list, vec![Type::Wildcard(WildcardBound::Unbounded)]),
        prototype(&env, list).unwrap(),
        Type::TypeVar(e),
        Type::array(Type::class(wk.integer, vec![])),
        Type::Intersection(vec![
            Type::class(wk.cloneable, vec![]),
            Type::class(wk.serializable, vec![]),
        ]),
        Type::int(),
        Type::Null,
    ];
    for ty in &universe {
        let once = erasure(&env, ty);
        assert_eq!(erasure(&env, &once), once);
    }
}

#[test]
fn equal_constructions_are_equal_and_hash_alike() {
    fn hash_of(ty: &Type) -> u64 {
        let mut hasher = DefaultHasher::new();
        ty.hash(&mut hasher);
        hasher.finish()
    }

    let env = TypeStore::with_minimal_jdk();
    let list = env.decl_id("java.util.List").unwrap();
    let string = env.well_known().string;

    let make = || {
        Type::array(Type::class(
            list,
            vec![Type::Wildcard(WildcardBound::Extends(Box::new(
                Type::class(string, vec![]),
            )))],
        ))
    };
    let a = make();
    let b = make();
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));

    let c = Type::array(Type::class(
        list,
        vec![Type::Wildcard(WildcardBound::Unbounded)],
    ));
    assert_ne!(a, c);
}
