use proptest::prelude::*;
use ctxscope::{create_context, create_context_scope, Scope, Tree};
use ctxscope_widgets::scoped_opener::{opener_scope, ScopedOpener, ScopedOpenerTrigger};

proptest! {
    // Two roots of the same family with no shared scope value never observe
    // each other's state, whatever the press sequence.
    #[test]
    fn sibling_roots_never_share_state(presses in prop::collection::vec(any::<bool>(), 0..32)) {
        let left = ScopedOpener::new();
        let right = ScopedOpener::new();
        let mut expect_left = false;
        let mut expect_right = false;

        for press_left in presses {
            let tree = Tree::new();
            left.render(&tree, None, |tree| {
                if press_left {
                    ScopedOpenerTrigger::press(tree, None).unwrap();
                }
            });
            right.render(&tree, None, |tree| {
                if !press_left {
                    ScopedOpenerTrigger::press(tree, None).unwrap();
                }
            });

            if press_left {
                expect_left = !expect_left;
            } else {
                expect_right = !expect_right;
            }
            prop_assert_eq!(left.is_open(), expect_left);
            prop_assert_eq!(right.is_open(), expect_right);
        }
    }

    // Nested roots: every press lands on the innermost enclosing root only.
    #[test]
    fn presses_land_on_the_innermost_root(depth in 1usize..6, presses in 1usize..8) {
        let roots: Vec<ScopedOpener> = (0..depth).map(|_| ScopedOpener::new()).collect();

        for _ in 0..presses {
            let tree = Tree::new();
            fn descend(roots: &[ScopedOpener], tree: &Tree) {
                match roots.split_first() {
                    Some((root, rest)) => {
                        root.render(tree, None, |tree| descend(rest, tree));
                    }
                    None => ScopedOpenerTrigger::press(tree, None).unwrap(),
                }
            }
            descend(&roots, &tree);
        }

        for (i, root) in roots.iter().enumerate() {
            if i + 1 == depth {
                prop_assert_eq!(root.is_open(), presses % 2 == 1);
            } else {
                prop_assert!(!root.is_open());
            }
        }
    }

    // A resolver with no enclosing provider yields exactly the declared
    // default, or an error when none was declared.
    #[test]
    fn default_fallback_is_exact(default in proptest::option::of(any::<u32>())) {
        let (_provider, consumer) = create_context::<u32>("Probe", default);
        let tree = Tree::new();
        match default {
            Some(expected) => {
                prop_assert_eq!(*consumer.resolve(&tree, "ProbeReader").unwrap(), expected);
            }
            None => prop_assert!(consumer.resolve(&tree, "ProbeReader").is_err()),
        }
    }

    // Factory output is referentially stable within a pass for any chain of
    // re-resolutions of the same input.
    #[test]
    fn factory_resolution_is_idempotent_per_pass(rounds in 1usize..10) {
        let tree = Tree::new();
        let first = opener_scope().resolve(&tree, None);
        for _ in 0..rounds {
            let again = opener_scope().resolve(&tree, None);
            prop_assert!(Scope::ptr_eq(&first, &again));
            let derived = opener_scope().resolve(&tree, Some(&first));
            let derived_again = opener_scope().resolve(&tree, Some(&first));
            prop_assert!(Scope::ptr_eq(&derived, &derived_again));
        }
    }

    // Isolation holds for families of any width: k slots, publishes on two
    // independent root instances, no cross-talk.
    #[test]
    fn wide_families_stay_isolated(k in 1usize..6, values in prop::collection::vec(any::<u32>(), 1..6)) {
        let (ctx, factory) = create_context_scope("Wide", &[]).unwrap();
        let slots: Vec<_> = (0..k).map(|_| ctx.create_context::<u32>("Wide", None)).collect();

        let tree = Tree::new();
        let scope_a = factory.resolve(&tree, None);

        for value in values {
            // A pinned root publishes `value`, a nested independent root
            // publishes `value + 1`; each resolver sees only its own.
            for (provider, consumer) in &slots {
                provider.provide(&tree, Some(&scope_a), value, |tree| {
                    provider.provide(tree, None, value.wrapping_add(1), |tree| {
                        let base = *consumer.resolve(tree, "WideReader", None).unwrap();
                        prop_assert_eq!(base, value.wrapping_add(1));
                        let pinned =
                            *consumer.resolve(tree, "WideReader", Some(&scope_a)).unwrap();
                        prop_assert_eq!(pinned, value);
                        Ok(())
                    })
                })?;
            }
        }
    }
}
