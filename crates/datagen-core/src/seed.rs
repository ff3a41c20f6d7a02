//! Seeds and nestable seed stacks.

/// A value that fully determines a bit source's future output.
pub type Seed = i64;

/// A stack of seeds that is never empty.
///
/// The bottom entry is the root seed; [`SeedStack::pop`] refuses to remove
/// it, so the stack always has a usable current seed even when pops outnumber
/// pushes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedStack {
    seeds: Vec<Seed>,
}

impl SeedStack {
    /// Creates a stack holding only `root`.
    #[must_use]
    pub fn new(root: Seed) -> Self {
        Self { seeds: vec![root] }
    }

    /// The top seed.
    #[must_use]
    pub fn current(&self) -> Seed {
        // `seeds` is never empty: `new` inserts the root and `pop` keeps it.
        self.seeds[self.seeds.len() - 1]
    }

    /// The bottom seed.
    #[must_use]
    pub fn root(&self) -> Seed {
        self.seeds[0]
    }

    /// Number of seeds, including the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.seeds.len()
    }

    /// Pushes `seed` on top of the stack.
    pub fn push(&mut self, seed: Seed) {
        self.seeds.push(seed);
    }

    /// Removes the top seed and returns the new current seed.
    ///
    /// Returns `None` without changing anything when only the root remains.
    pub fn pop(&mut self) -> Option<Seed> {
        if self.seeds.len() > 1 {
            self.seeds.pop();
            Some(self.current())
        } else {
            None
        }
    }
}
