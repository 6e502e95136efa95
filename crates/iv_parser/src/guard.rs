//! Nesting limit for `)get`.

use std::cell::Cell;
use std::rc::Rc;

/// Deepest allowed chain of nested `)get` files.
pub const MAX_DEPTH: usize = 10;

/// Bounded depth counter. Clones share the same counter.
#[derive(Clone, Debug)]
pub struct RecursionGuard {
    depth: Rc<Cell<usize>>,
    limit: usize,
}

impl Default for RecursionGuard {
    fn default() -> Self {
        Self::new(MAX_DEPTH)
    }
}

impl RecursionGuard {
    pub fn new(limit: usize) -> Self {
        Self {
            depth: Rc::new(Cell::new(0)),
            limit,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Take one level. Returns `None`, leaving the counter untouched, when that
    /// would go past the limit. The level is given back when the lease drops.
    pub fn enter(&self) -> Option<DepthLease> {
        let next = self.depth.get() + 1;
        if next > self.limit {
            return None;
        }
        self.depth.set(next);
        Some(DepthLease {
            depth: Rc::clone(&self.depth),
            level: next,
        })
    }
}

/// One level of nesting, released on drop.
#[derive(Debug)]
pub struct DepthLease {
    depth: Rc<Cell<usize>>,
    level: usize,
}

impl DepthLease {
    /// Depth this lease was taken at (1 for the outermost file).
    pub fn level(&self) -> usize {
        self.level
    }
}

impl Drop for DepthLease {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leases_stack_up_to_the_limit() {
        let guard = RecursionGuard::new(3);
        let a = guard.enter().unwrap();
        let b = guard.enter().unwrap();
        let c = guard.enter().unwrap();
        assert_eq!((a.level(), b.level(), c.level()), (1, 2, 3));
        assert!(guard.enter().is_none());
        assert_eq!(guard.depth(), guard.limit());
        drop(c);
        assert_eq!(guard.depth(), 2);
        let again = guard.enter().unwrap();
        assert_eq!(again.level(), 3);
        drop((a, b, again));
        assert_eq!(guard.depth(), 0);
    }

    #[test]
    fn release_on_unwind() {
        let guard = RecursionGuard::default();
        let g = guard.clone();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _lease = g.enter().unwrap();
            panic!("boom");
        }));
        assert!(res.is_err());
        assert_eq!(guard.depth(), 0);
    }

    #[test]
    fn independent_guards_do_not_share() {
        let a = RecursionGuard::default();
        let b = RecursionGuard::default();
        assert_eq!(b.limit(), MAX_DEPTH);
        let _l = a.enter().unwrap();
        assert_eq!(a.depth(), 1);
        assert_eq!(b.depth(), 0);
    }
}
