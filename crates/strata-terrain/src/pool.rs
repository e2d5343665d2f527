//! Thread-confined object pools.
//!
//! A [`Pool`] hands out reusable instances through a [`PoolGuard`] that puts
//! the instance back when dropped, on every exit path including unwinding.
//! Pools are never shared across threads (`Pool` is `!Sync`), so the hot
//! per-column path takes no locks. [`with_cell`] is the scoped form used by
//! the sampling code: the borrowed cell cannot outlive the closure, so a
//! pooled cell escaping its call is a compile error.

use std::cell::RefCell;
use std::ops::{Deref, DerefMut};

use crate::cell::Cell;

/// Cells retained per thread.
pub const CELL_POOL_CAPACITY: usize = 32;

/// Types that can be returned to a pool and handed out again.
pub trait Reset {
    /// Clear all state so the next user sees a fresh instance.
    fn reset(&mut self);
}

impl Reset for Cell {
    fn reset(&mut self) {
        Cell::reset(self);
    }
}

impl<T> Reset for Vec<T> {
    fn reset(&mut self) {
        self.clear();
    }
}

/// Bounded free list of reusable instances.
pub struct Pool<T> {
    free: RefCell<Vec<T>>,
    capacity: usize,
}

impl<T: Reset + Default> Pool<T> {
    /// Create a pool retaining at most `capacity` released instances.
    pub const fn new(capacity: usize) -> Self {
        Self {
            free: RefCell::new(Vec::new()),
            capacity,
        }
    }

    /// Take an instance, creating one if the free list is empty.
    pub fn acquire(&self) -> PoolGuard<'_, T> {
        let item = self.free.borrow_mut().pop().unwrap_or_default();
        PoolGuard {
            pool: self,
            item: Some(item),
        }
    }

    /// Number of released instances waiting for reuse.
    pub fn available(&self) -> usize {
        self.free.borrow().len()
    }

    /// Maximum number of retained instances.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn release(&self, mut item: T) {
        item.reset();
        let mut free = self.free.borrow_mut();
        if free.len() < self.capacity {
            free.push(item);
        }
    }
}

/// Exclusive use of one pooled instance. Returns it to the pool on drop.
pub struct PoolGuard<'a, T: Reset + Default> {
    pool: &'a Pool<T>,
    item: Option<T>,
}

impl<T: Reset + Default> Deref for PoolGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match &self.item {
            Some(item) => item,
            None => unreachable!("pool guard accessed after release"),
        }
    }
}

impl<T: Reset + Default> DerefMut for PoolGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        match &mut self.item {
            Some(item) => item,
            None => unreachable!("pool guard accessed after release"),
        }
    }
}

impl<T: Reset + Default> Drop for PoolGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(item) = self.item.take() {
            self.pool.release(item);
        }
    }
}

thread_local! {
    static CELLS: Pool<Cell> = const { Pool::new(CELL_POOL_CAPACITY) };
}

/// Run `f` with a reset cell from this thread's pool.
pub fn with_cell<R>(f: impl FnOnce(&mut Cell) -> R) -> R {
    CELLS.with(|pool| {
        let mut cell = pool.acquire();
        f(&mut cell)
    })
}

/// Released cells currently held by this thread's pool.
pub fn cells_available() -> usize {
    CELLS.with(Pool::available)
}
