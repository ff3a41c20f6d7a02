//! Per-thread seed contexts.
//!
//! Each thread owns one [`SeedContext`]: a [`SeedStack`] plus the bit source
//! it drives. Nothing is shared between threads, so two tests running in
//! parallel never observe each other's sequence or seed history.
//!
//! The free functions in this module are the seed control surface used by
//! test lifecycle hooks: [`current_seed`], [`set_current_seed`] and
//! [`revert_to_previous_seed`].

use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::bit_source::{RandomBitSource, StdBitSource};
use crate::clock::{Clock, SystemClock};
use crate::config::SeedConfig;
use crate::seed::{Seed, SeedStack};

/// A seed stack and the bit source it keeps in sync.
///
/// The stack and the source live in separate cells, so the current seed can
/// be read while the source is lent out to a running draw.
pub struct SeedContext {
    seeds: RefCell<SeedStack>,
    source: RefCell<Box<dyn RandomBitSource>>,
}

impl SeedContext {
    /// Creates a context rooted at `root`, reseeding `source` to it.
    #[must_use]
    pub fn new(root: Seed, mut source: Box<dyn RandomBitSource>) -> Self {
        source.reseed(root);
        tracing::debug!(seed = root, "initialized seed context");
        Self {
            seeds: RefCell::new(SeedStack::new(root)),
            source: RefCell::new(source),
        }
    }

    /// Creates a context backed by [`StdBitSource`] whose root comes from
    /// `config`, or from `clock` when no seed is configured.
    #[must_use]
    pub fn from_config(config: &SeedConfig, clock: &dyn Clock) -> Self {
        let root = config.resolve_root(clock);
        Self::new(root, Box::new(StdBitSource::new(root)))
    }

    /// The seed currently driving the bit source.
    #[must_use]
    pub fn current_seed(&self) -> Seed {
        self.seeds.borrow().current()
    }

    /// Number of seeds on the stack, including the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.seeds.borrow().depth()
    }

    /// Enters a nested scope driven by `seed`.
    ///
    /// Returns `false` and leaves the stack untouched while the bit source is
    /// lent out to a running draw, since it could not be reseeded.
    pub fn push_seed(&self, seed: Seed) -> bool {
        let Ok(mut source) = self.source.try_borrow_mut() else {
            tracing::warn!(seed, "bit source is busy drawing; ignoring seed push");
            return false;
        };
        let mut seeds = self.seeds.borrow_mut();
        seeds.push(seed);
        source.reseed(seed);
        tracing::debug!(seed, depth = seeds.depth(), "pushed seed");
        true
    }

    /// Leaves the innermost scope and reseeds to the restored seed.
    ///
    /// With only the root left this does nothing; the root is never
    /// discarded. Nothing changes either while the bit source is lent out.
    pub fn pop_seed(&self) -> Option<Seed> {
        let Ok(mut source) = self.source.try_borrow_mut() else {
            tracing::warn!(
                seed = self.current_seed(),
                "bit source is busy drawing; ignoring seed pop"
            );
            return None;
        };
        let mut seeds = self.seeds.borrow_mut();
        if let Some(seed) = seeds.pop() {
            source.reseed(seed);
            tracing::debug!(seed, depth = seeds.depth(), "restored seed");
            Some(seed)
        } else {
            tracing::warn!(
                seed = seeds.root(),
                "pop requested with only the root seed left; ignoring"
            );
            None
        }
    }

    /// Runs `f` against the bit source driven by the current seed.
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly from inside `f`.
    pub fn with_source<R>(&self, f: impl FnOnce(&mut dyn RandomBitSource) -> R) -> R {
        let mut source = self.source.borrow_mut();
        f(source.as_mut())
    }
}

impl fmt::Debug for SeedContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedContext")
            .field("seeds", &self.seeds)
            .finish_non_exhaustive()
    }
}

thread_local! {
    static CONTEXT: RefCell<Option<Rc<SeedContext>>> = const { RefCell::new(None) };
}

/// This thread's context, created on first use.
fn context() -> Rc<SeedContext> {
    CONTEXT.with(|slot| {
        let mut slot = slot.borrow_mut();
        let context = slot.get_or_insert_with(|| {
            Rc::new(SeedContext::from_config(&SeedConfig::from_env(), &SystemClock))
        });
        Rc::clone(context)
    })
}

/// Runs `f` against this thread's context, creating it on first use.
///
/// A new context takes its root seed from [`SeedConfig::from_env`], falling
/// back to the wall clock.
pub fn with_context<R>(f: impl FnOnce(&SeedContext) -> R) -> R {
    f(&context())
}

/// Runs `f` against this thread's bit source.
///
/// # Panics
///
/// Panics if called re-entrantly from inside `f`.
pub fn with_source<R>(f: impl FnOnce(&mut dyn RandomBitSource) -> R) -> R {
    context().with_source(f)
}

/// Replaces this thread's context, returning the previous one if any.
///
/// A draw already running keeps the context it started with.
pub fn install(context: SeedContext) -> Option<Rc<SeedContext>> {
    CONTEXT.with(|slot| slot.borrow_mut().replace(Rc::new(context)))
}

/// The seed currently in effect on this thread. Safe to call from inside a
/// running generator.
#[must_use]
pub fn current_seed() -> Seed {
    with_context(SeedContext::current_seed)
}

/// Pushes `seed` for this thread and reseeds its bit source.
///
/// Inside a running draw the push is ignored with a warning.
pub fn set_current_seed(seed: Seed) {
    with_context(|context| context.push_seed(seed));
}

/// Pops this thread's innermost seed. A no-op at the root and inside a
/// running draw.
pub fn revert_to_previous_seed() {
    with_context(|context| {
        context.pop_seed();
    });
}

/// Pushes a seed for as long as the guard lives.
///
/// The guard is tied to the thread that created it. A scope entered while the
/// bit source is busy pushes nothing and pops nothing.
#[derive(Debug)]
#[must_use = "the seed is popped as soon as the scope is dropped"]
pub struct SeedScope {
    seed: Seed,
    pushed: bool,
    _thread_bound: PhantomData<*const ()>,
}

impl SeedScope {
    /// Pushes `seed` onto this thread's stack.
    pub fn enter(seed: Seed) -> Self {
        let pushed = with_context(|context| context.push_seed(seed));
        Self {
            seed,
            pushed,
            _thread_bound: PhantomData,
        }
    }

    /// The seed this scope pushed.
    #[must_use]
    pub fn seed(&self) -> Seed {
        self.seed
    }
}

impl Drop for SeedScope {
    fn drop(&mut self) {
        if !self.pushed {
            return;
        }
        // Thread teardown must not turn a pop into a second panic.
        let _ = CONTEXT.try_with(|slot| {
            if let Ok(slot) = slot.try_borrow() {
                if let Some(context) = slot.as_ref() {
                    context.pop_seed();
                }
            }
        });
    }
}

/// Runs `f` with `seed` pushed, restoring the previous seed afterwards.
pub fn with_seed<R>(seed: Seed, f: impl FnOnce() -> R) -> R {
    let _scope = SeedScope::enter(seed);
    f()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random_values::RandomValues;

    fn draws(count: usize) -> Vec<i64> {
        with_source(|source| (0..count).map(|_| source.long(0, 1_000_000).unwrap()).collect())
    }

    fn install_root(root: Seed) {
        install(SeedContext::new(root, Box::new(StdBitSource::new(0))));
    }

    // --- SeedContext ---

    #[test]
    fn test_new_context_reseeds_source_to_root() {
        let context = SeedContext::new(17, Box::new(StdBitSource::new(0)));
        let mut reference = StdBitSource::new(17);
        assert_eq!(context.with_source(|s| s.next_u64()), reference.next_u64());
        assert_eq!(context.current_seed(), 17);
    }

    #[test]
    fn test_push_and_pop_reseed() {
        let context = SeedContext::new(1, Box::new(StdBitSource::new(1)));
        assert!(context.push_seed(2));
        let mut two = StdBitSource::new(2);
        assert_eq!(context.with_source(|s| s.next_u64()), two.next_u64());

        assert_eq!(context.pop_seed(), Some(1));
        let mut one = StdBitSource::new(1);
        assert_eq!(context.with_source(|s| s.next_u64()), one.next_u64());
    }

    #[test]
    fn test_pop_at_root_keeps_root() {
        let context = SeedContext::new(3, Box::new(StdBitSource::new(3)));
        assert_eq!(context.pop_seed(), None);
        assert_eq!(context.current_seed(), 3);
        assert_eq!(context.depth(), 1);
    }

    #[test]
    fn test_seed_changes_are_ignored_while_source_is_busy() {
        let context = SeedContext::new(4, Box::new(StdBitSource::new(4)));
        assert!(context.push_seed(5));
        context.with_source(|_| {
            assert_eq!(context.current_seed(), 5);
            assert!(!context.push_seed(6));
            assert_eq!(context.pop_seed(), None);
        });
        assert_eq!(context.current_seed(), 5);
        assert_eq!(context.depth(), 2);
    }

    #[test]
    fn test_debug_shows_seeds() {
        let context = SeedContext::new(3, Box::new(StdBitSource::new(3)));
        assert!(format!("{context:?}").contains("SeedContext"));
    }

    // --- thread-local surface ---

    #[test]
    fn test_set_and_revert_current_seed() {
        install_root(100);
        set_current_seed(5);
        assert_eq!(current_seed(), 5);
        set_current_seed(6);
        revert_to_previous_seed();
        assert_eq!(current_seed(), 5);
        revert_to_previous_seed();
        revert_to_previous_seed();
        assert_eq!(current_seed(), 100);
    }

    #[test]
    fn test_context_is_created_lazily() {
        // No install: first access creates a context with some root seed.
        let root = current_seed();
        revert_to_previous_seed();
        assert_eq!(current_seed(), root);
    }

    #[test]
    fn test_same_seed_replays_same_values() {
        install_root(0);
        let first = with_seed(99, || draws(10));
        let second = with_seed(99, || draws(10));
        assert_eq!(first, second);
    }

    #[test]
    fn test_scope_pops_on_drop() {
        install_root(8);
        {
            let scope = SeedScope::enter(9);
            assert_eq!(scope.seed(), 9);
            assert_eq!(current_seed(), 9);
        }
        assert_eq!(current_seed(), 8);
    }

    #[test]
    fn test_nested_scopes_restore_outer_sequence() {
        install_root(0);
        let expected = with_seed(11, || draws(4));
        let actual = with_seed(11, || {
            let _ = with_seed(12, || draws(3));
            draws(4)
        });
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_seed_control_surface_works_during_a_draw() {
        install_root(30);
        let seen = with_seed(31, || {
            with_source(|_| {
                let inside = current_seed();
                set_current_seed(32);
                revert_to_previous_seed();
                let scope = SeedScope::enter(33);
                drop(scope);
                (inside, current_seed())
            })
        });
        assert_eq!(seen, (31, 31));
        assert_eq!(current_seed(), 30);
    }

    #[test]
    fn test_install_returns_previous_context() {
        install_root(40);
        let previous = install(SeedContext::new(41, Box::new(StdBitSource::new(41))));
        assert_eq!(previous.map(|context| context.current_seed()), Some(40));
        assert_eq!(current_seed(), 41);
    }

    #[test]
    fn test_threads_are_isolated() {
        let left = std::thread::spawn(|| {
            install_root(1);
            with_seed(42, || draws(8))
        });
        let right = std::thread::spawn(|| {
            install_root(2);
            let _noise = with_seed(7, || draws(100));
            with_seed(42, || draws(8))
        });
        assert_eq!(left.join().unwrap(), right.join().unwrap());
    }
}
