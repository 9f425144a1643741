use mirror_types::{
    boxed_type, is_subtype, prototype, unboxed_type, DeclKind, PrimitiveType, Type, TypeDecl,
    TypeEnv, TypeError, TypeParamDef, TypeStore,
};

use pretty_assertions::assert_eq;

#[test]
fn intern_decl_is_idempotent() {
    let mut store = TypeStore::new();
    let first = store.intern_decl("com.example.Foo");
    let second = store.intern_decl("com.example.Foo");
    assert_eq!(first, second);
    assert!(store.decl(first).is_none());
}

#[test]
fn define_decl_fills_the_interned_placeholder() {
    let mut store = TypeStore::new();
    let object_ty = Type::class(store.well_known().object, vec![]);

    let id = store.intern_decl("com.example.Foo");
    let t = store.add_type_param("T", vec![object_ty.clone()]);
    store.define_decl(
        id,
        TypeDecl {
            name: "com.example.Foo".to_string(),
            kind: DeclKind::Class,
            type_params: vec![t],
            super_class: Some(object_ty),
            interfaces: vec![],
            enclosing: None,
        },
    );

    assert_eq!(store.decl_id("com.example.Foo"), Some(id));
    let decl = store.decl(id).expect("declaration should be defined");
    assert_eq!(decl.type_params, vec![t]);
    assert_eq!(decl.simple_name(), "Foo");
    assert_eq!(prototype(&store, id), Some(Type::class(id, vec![Type::TypeVar(t)])));
}

#[test]
fn declarations_can_be_amended_in_place() {
    let mut store = TypeStore::with_minimal_jdk();
    let list = store.decl_id("java.util.List").unwrap();
    let cloneable = store.well_known().cloneable;

    store
        .decl_mut(list)
        .expect("List should be defined")
        .interfaces
        .push(Type::class(cloneable, vec![]));

    let string = Type::class(store.well_known().string, vec![]);
    let list_string = Type::class(list, vec![string]);
    assert!(is_subtype(
        &store,
        &list_string,
        &Type::class(cloneable, vec![])
    ));
    assert!(list_string.is_reference());
    assert_eq!(list_string.as_declared().map(|d| d.decl), Some(list));
}

#[test]
fn lookup_decl_falls_back_to_java_lang() {
    let store = TypeStore::with_minimal_jdk();
    assert_eq!(store.lookup_decl("Object"), Some(store.well_known().object));
    assert_eq!(store.lookup_decl("Integer"), Some(store.well_known().integer));
    assert_eq!(
        store.lookup_decl("java.util.List"),
        store.decl_id("java.util.List")
    );
    assert_eq!(store.lookup_decl("List"), None);
    assert_eq!(store.lookup_decl("com.example.Nope"), None);
}

#[test]
fn type_parameter_bounds_freeze_exactly_once() {
    let mut store = TypeStore::new();
    let object_ty = Type::class(store.well_known().object, vec![]);

    let id = store.reserve_type_param("T");
    // Unfrozen: the Option accessor is empty and the checked one errors.
    assert!(store.type_param(id).is_none());
    assert!(matches!(
        store.require_type_param(id),
        Err(TypeError::IllegalState(_))
    ));

    store
        .define_type_param(id, TypeParamDef::new("T", vec![object_ty.clone()]))
        .unwrap();
    assert_eq!(store.require_type_param(id).unwrap().name, "T");
    assert_eq!(
        store.type_param(id).unwrap().upper_bounds,
        vec![object_ty.clone()]
    );

    // Freezing twice is an error, whichever way the first freeze happened.
    assert!(matches!(
        store.define_type_param(id, TypeParamDef::new("T", vec![object_ty.clone()])),
        Err(TypeError::IllegalState(_))
    ));
    let added = store.add_type_param("U", vec![object_ty.clone()]);
    assert!(matches!(
        store.define_type_param(added, TypeParamDef::new("U", vec![object_ty])),
        Err(TypeError::IllegalState(_))
    ));
}

#[test]
fn foreign_type_parameter_ids_are_rejected() {
    let mut small = TypeStore::new();
    let mut big = TypeStore::new();
    let object_ty = Type::class(big.well_known().object, vec![]);
    // Push `big` past `small`'s watermark, then hand its id to `small`.
    let mut foreign = big.add_type_param("A", vec![object_ty.clone()]);
    for _ in 0..4 {
        foreign = big.add_type_param("A", vec![object_ty.clone()]);
    }
    assert!(matches!(
        small.define_type_param(foreign, TypeParamDef::new("A", vec![object_ty])),
        Err(TypeError::InvalidArgument(_))
    ));
}

#[test]
fn boxing_table_round_trips_the_eight_kinds() {
    let env = TypeStore::new();
    for p in PrimitiveType::ALL {
        let boxed = boxed_type(&env, p);
        assert_eq!(unboxed_type(&env, &boxed), Ok(p));
        // Every boxed class is a reference type below Object.
        assert!(is_subtype(
            &env,
            &boxed,
            &Type::class(env.well_known().object, vec![])
        ));
    }
    assert_eq!(
        unboxed_type(&env, &boxed_type(&env, PrimitiveType::Int)),
        Ok(PrimitiveType::Int)
    );
}

#[test]
fn unboxed_type_rejects_everything_else() {
    let env = TypeStore::new();
    for ty in [
        Type::class(env.well_known().string, vec![]),
        Type::class(env.well_known().number, vec![]),
        Type::int(),
        Type::Null,
        Type::array(boxed_type(&env, PrimitiveType::Int)),
    ] {
        assert!(matches!(
            unboxed_type(&env, &ty),
            Err(TypeError::InvalidArgument(_))
        ));
    }
}

#[test]
fn checked_constructors_reject_malformed_forms() {
    let env = TypeStore::new();
    let object_ty = Type::class(env.well_known().object, vec![]);

    assert!(matches!(
        Type::intersection(vec![]),
        Err(TypeError::InvalidArgument(_))
    ));
    assert_eq!(
        Type::intersection(vec![object_ty.clone()]),
        Ok(Type::Intersection(vec![object_ty.clone()]))
    );

    assert!(matches!(
        Type::wildcard(Some(object_ty.clone()), Some(object_ty.clone())),
        Err(TypeError::InvalidArgument(_))
    ));
    assert_eq!(
        Type::wildcard(None, None),
        Ok(Type::Wildcard(mirror_types::WildcardBound::Unbounded))
    );
    assert!(Type::wildcard(Some(object_ty), None).is_ok());
}

#[test]
fn minimal_jdk_interfaces_are_subtypes_of_object() {
    let env = TypeStore::with_minimal_jdk();
    let object = Type::class(env.well_known().object, vec![]);

    let list = env.decl_id("java.util.List").expect("List must exist");
    let string = env.well_known().string;
    let list_string = Type::class(list, vec![Type::class(string, vec![])]);
    assert!(is_subtype(&env, &list_string, &object));

    let cloneable = Type::class(env.well_known().cloneable, vec![]);
    assert!(is_subtype(&env, &cloneable, &object));
}

#[test]
fn prototypes_invoke_declarations_on_their_own_parameters() {
    let env = TypeStore::with_minimal_jdk();
    let map = env.decl_id("java.util.Map").unwrap();
    let params = env.decl(map).unwrap().type_params.clone();

    let proto = prototype(&env, map).unwrap();
    let Type::Declared(d) = &proto else {
        panic!("expected declared prototype");
    };
    assert_eq!(
        d.args,
        params.iter().map(|&p| Type::TypeVar(p)).collect::<Vec<_>>()
    );

    // The prototypical invocation is a subtype of its own wildcard form.
    let any = Type::class(
        map,
        vec![
            Type::Wildcard(mirror_types::WildcardBound::Unbounded),
            Type::Wildcard(mirror_types::WildcardBound::Unbounded),
        ],
    );
    assert!(is_subtype(&env, &proto, &any));
}
