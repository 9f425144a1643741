use mirror_types::{contains, is_same_type, Type, TypeEnv, TypeStore, WildcardBound};

fn extends(ty: Type) -> Type {
    Type::Wildcard(WildcardBound::Extends(Box::new(ty)))
}

fn super_(ty: Type) -> Type {
    Type::Wildcard(WildcardBound::Super(Box::new(ty)))
}

fn unbounded() -> Type {
    Type::Wildcard(WildcardBound::Unbounded)
}

#[test]
fn extends_wildcards_contain_covariantly() {
    let env = TypeStore::new();
    let number = Type::class(env.well_known().number, vec![]);
    let integer = Type::class(env.well_known().integer, vec![]);

    assert!(contains(&env, &extends(number.clone()), &extends(integer.clone())));
    assert!(!contains(&env, &extends(integer), &extends(number)));
}

#[test]
fn super_wildcards_contain_contravariantly() {
    let env = TypeStore::new();
    let number = Type::class(env.well_known().number, vec![]);
    let integer = Type::class(env.well_known().integer, vec![]);

    // `? super Integer` contains `? super Number` because Integer <: Number.
    assert!(contains(&env, &super_(integer.clone()), &super_(number.clone())));
    assert!(!contains(&env, &super_(number), &super_(integer)));
}

#[test]
fn unbounded_wildcards_contain_everything() {
    let env = TypeStore::new();
    let string = Type::class(env.well_known().string, vec![]);

    assert!(contains(&env, &unbounded(), &extends(string.clone())));
    assert!(contains(&env, &unbounded(), &super_(string.clone())));
    assert!(contains(&env, &unbounded(), &unbounded()));
    assert!(contains(&env, &unbounded(), &string));
}

#[test]
fn extends_object_is_equivalent_to_unbounded() {
    let env = TypeStore::new();
    let object = Type::class(env.well_known().object, vec![]);
    let number = Type::class(env.well_known().number, vec![]);
    let string = Type::class(env.well_known().string, vec![]);

    assert!(contains(&env, &extends(object.clone()), &super_(string)));
    assert!(contains(&env, &extends(object.clone()), &unbounded()));
    assert!(contains(&env, &extends(object), &extends(number.clone())));

    // A narrower extends bound contains neither.
    assert!(!contains(&env, &extends(number.clone()), &super_(Type::class(env.well_known().integer, vec![]))));
    assert!(!contains(&env, &extends(number), &unbounded()));
}

#[test]
fn super_wildcards_do_not_contain_upper_bounded_arguments() {
    let env = TypeStore::new();
    let number = Type::class(env.well_known().number, vec![]);
    let integer = Type::class(env.well_known().integer, vec![]);

    assert!(!contains(&env, &super_(number.clone()), &extends(integer)));
    assert!(!contains(&env, &super_(number), &unbounded()));
}

#[test]
fn wildcards_contain_concrete_arguments_through_their_bound() {
    let env = TypeStore::new();
    let number = Type::class(env.well_known().number, vec![]);
    let integer = Type::class(env.well_known().integer, vec![]);
    let object = Type::class(env.well_known().object, vec![]);

    assert!(contains(&env, &extends(number.clone()), &integer));
    assert!(!contains(&env, &extends(integer.clone()), &number));

    assert!(contains(&env, &super_(number.clone()), &object));
    assert!(!contains(&env, &super_(number.clone()), &integer));

    // A concrete argument never contains a wildcard.
    assert!(!contains(&env, &integer, &extends(number.clone())));
    assert!(!contains(&env, &integer, &super_(number)));
    assert!(!contains(&env, &integer, &unbounded()));
}

#[test]
fn concrete_arguments_contain_by_sameness_only() {
    let env = TypeStore::new();
    let number = Type::class(env.well_known().number, vec![]);
    let integer = Type::class(env.well_known().integer, vec![]);

    assert!(contains(&env, &integer, &integer));
    assert!(!contains(&env, &number, &integer));
    assert!(!contains(&env, &integer, &number));
}

#[test]
fn wildcard_accessors_expose_at_most_one_bound() {
    let env = TypeStore::new();
    let number = Type::class(env.well_known().number, vec![]);

    let Type::Wildcard(ext) = extends(number.clone()) else {
        unreachable!();
    };
    assert_eq!(ext.extends_bound(), Some(&number));
    assert_eq!(ext.super_bound(), None);

    let Type::Wildcard(sup) = super_(number.clone()) else {
        unreachable!();
    };
    assert_eq!(sup.extends_bound(), None);
    assert_eq!(sup.super_bound(), Some(&number));

    let Type::Wildcard(any) = unbounded() else {
        unreachable!();
    };
    assert_eq!(any.extends_bound(), None);
    assert_eq!(any.super_bound(), None);
}

#[test]
fn wildcards_are_never_the_same_type() {
    let u1 = unbounded();
    let u2 = unbounded();
    assert!(!is_same_type(&u1, &u2));
    assert!(!is_same_type(&u1, &Type::Null));

    // Nested wildcards are arguments, not operands; sameness there is
    // structural.
    let env = TypeStore::with_minimal_jdk();
    let list = env.decl_id("java.util.List").unwrap();
    let a = Type::class(list, vec![unbounded()]);
    let b = Type::class(list, vec![unbounded()]);
    assert!(is_same_type(&a, &b));
}
