use ctxscope::{
    compose_context_scopes, create_context_scope, ContextError, ScopeFactory, ScopedConsumer,
    ScopedProvider, Tree,
};

struct Family {
    provider: ScopedProvider<u32>,
    consumer: ScopedConsumer<u32>,
    factory: ScopeFactory,
}

fn family(name: &'static str) -> Family {
    let (ctx, factory) = create_context_scope(name, &[]).unwrap();
    let (provider, consumer) = ctx.create_context::<u32>(name, None);
    Family {
        provider,
        consumer,
        factory,
    }
}

#[test]
fn composition_is_associative() {
    let a = family("A");
    let b = family("B");
    let c = family("C");

    let left = compose_context_scopes(&[
        compose_context_scopes(&[a.factory.clone(), b.factory.clone()]).unwrap(),
        c.factory.clone(),
    ])
    .unwrap();
    let right = compose_context_scopes(&[
        a.factory.clone(),
        compose_context_scopes(&[b.factory.clone(), c.factory.clone()]).unwrap(),
    ])
    .unwrap();
    let flat =
        compose_context_scopes(&[a.factory.clone(), b.factory.clone(), c.factory.clone()])
            .unwrap();

    let tree = Tree::new();
    let scopes = [
        left.resolve(&tree, None),
        right.resolve(&tree, None),
        flat.resolve(&tree, None),
    ];

    for scope in &scopes {
        assert_eq!(scope.family_names(), vec!["A", "B", "C"]);
    }

    // Same mapping, not just the same names: a value published through one
    // grouping's scope is observed through every other grouping's scope.
    for fam in [&a, &b, &c] {
        fam.provider.provide(&tree, Some(&scopes[0]), 5, |tree| {
            for scope in &scopes[1..] {
                assert_eq!(
                    *fam.consumer.resolve(tree, "Probe", Some(scope)).unwrap(),
                    5
                );
            }
        });
    }

    assert_eq!(left.scope_name(), "A");
    assert_eq!(right.scope_name(), "A");
}

#[test]
fn base_identity_survives_recomposition() {
    let a = family("A");
    let b = family("B");
    let inner = compose_context_scopes(&[a.factory.clone(), b.factory.clone()]).unwrap();
    let outer = compose_context_scopes(&[inner, family("C").factory]).unwrap();
    assert_eq!(outer.scope_name(), "A");
}

#[test]
fn dependency_chains_resolve_through_one_scope_value() {
    // C depends on B, B depends on A: one scope value from C's factory
    // pins the whole chain.
    let a = family("A");
    let (b_ctx, b_factory) = create_context_scope("B", &[a.factory.clone()]).unwrap();
    let (b_provider, b_consumer) = b_ctx.create_context::<u32>("B", None);
    let (c_ctx, c_factory) = create_context_scope("C", &[b_factory]).unwrap();
    let (c_provider, c_consumer) = c_ctx.create_context::<u32>("C", None);

    let tree = Tree::new();
    let scope = c_factory.resolve(&tree, None);
    assert_eq!(scope.family_names(), vec!["A", "B", "C"]);

    c_provider.provide(&tree, Some(&scope), 3, |tree| {
        b_provider.provide(tree, Some(&scope), 2, |tree| {
            a.provider.provide(tree, Some(&scope), 1, |tree| {
                assert_eq!(*a.consumer.resolve(tree, "Probe", Some(&scope)).unwrap(), 1);
                assert_eq!(*b_consumer.resolve(tree, "Probe", Some(&scope)).unwrap(), 2);
                assert_eq!(*c_consumer.resolve(tree, "Probe", Some(&scope)).unwrap(), 3);
            });
        });
    });
}

#[test]
fn same_name_from_different_registries_is_rejected() {
    let first = family("Opener");
    let second = family("Opener");
    let err = compose_context_scopes(&[first.factory, second.factory]).unwrap_err();
    assert!(matches!(
        err,
        ContextError::AmbiguousScope { scope: "Opener" }
    ));

    // The same defect surfaces when the clash comes in through deps.
    let third = family("Opener");
    assert!(create_context_scope("Opener", &[third.factory]).is_err());
}

#[test]
fn factory_output_is_stable_within_a_pass_and_fresh_across_passes() {
    let a = family("A");
    let composed = compose_context_scopes(&[a.factory.clone(), family("B").factory]).unwrap();

    let tree = Tree::new();
    let first = composed.resolve(&tree, None);
    let second = composed.resolve(&tree, None);
    assert!(ctxscope::Scope::ptr_eq(&first, &second));

    let next_pass = Tree::new();
    let third = composed.resolve(&next_pass, None);
    assert!(!ctxscope::Scope::ptr_eq(&first, &third));

    // Across passes the mapping still addresses the same cells.
    a.provider.provide(&next_pass, Some(&third), 9, |tree| {
        assert_eq!(*a.consumer.resolve(tree, "Probe", Some(&first)).unwrap(), 9);
    });
}
