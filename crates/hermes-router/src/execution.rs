//! Per-request execution records and their free list.

use crate::params::PathParams;
use hermes_core::Handler;
use hermes_middleware::Middleware;
use parking_lot::Mutex;
use std::sync::Arc;

/// The result of one routing-tree lookup.
///
/// A lookup fills the record with everything dispatch needs: the selected
/// handler, the middleware gathered from root to leaf, the decoded path
/// parameters, the nearest subtree not-found fallback seen on the way down
/// and the canonical pattern of the terminal node.
///
/// Records are recycled through an [`ExecutionPool`]; a record never
/// outlives the request it was acquired for.
#[derive(Default)]
pub struct RouteExecution {
    /// The handler selected at the terminal node, if any.
    pub handler: Option<Arc<dyn Handler>>,
    /// The deepest `NOT_FOUND` handler crossed during descent.
    pub not_found: Option<Arc<dyn Handler>>,
    /// Middleware to run before the handler, in execution order.
    pub middleware: Vec<Arc<dyn Middleware>>,
    /// Decoded path parameters.
    pub params: PathParams,
    /// Canonical pattern of the terminal node (`/` for the root).
    pub pattern: Option<Arc<str>>,
}

impl RouteExecution {
    /// Clears every field, keeping allocations for reuse.
    pub fn reset(&mut self) {
        self.handler = None;
        self.not_found = None;
        self.middleware.clear();
        self.params.clear();
        self.pattern = None;
    }
}

/// A free list of [`RouteExecution`] records.
///
/// Acquire always returns a cleared record; release clears before putting
/// the record back. The lock is held only for the pop or push, never across
/// a lookup or dispatch.
#[derive(Default)]
pub struct ExecutionPool {
    free: Mutex<Vec<Box<RouteExecution>>>,
}

impl ExecutionPool {
    /// Creates an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a cleared record from the pool, allocating if it is empty.
    #[must_use]
    pub fn acquire(&self) -> Box<RouteExecution> {
        self.free
            .lock()
            .pop()
            .unwrap_or_else(|| Box::new(RouteExecution::default()))
    }

    /// Returns a record to the pool after clearing it.
    pub fn release(&self, mut execution: Box<RouteExecution>) {
        execution.reset();
        self.free.lock().push(execution);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_core::{Request, Response, ResponseExt};
    use http::StatusCode;

    #[test]
    fn test_acquire_from_empty_pool() {
        let pool = ExecutionPool::new();
        let execution = pool.acquire();
        assert!(execution.handler.is_none());
        assert!(execution.middleware.is_empty());
        assert!(execution.params.is_empty());
    }

    #[test]
    fn test_release_clears_record() {
        let pool = ExecutionPool::new();
        let mut execution = pool.acquire();

        execution.handler = Some(Arc::new(|_req: Request| async {
            Response::empty(StatusCode::OK)
        }));
        execution.params.push("id", "42");
        execution.pattern = Some(Arc::from("/users/:id"));
        pool.release(execution);

        let recycled = pool.acquire();
        assert!(recycled.handler.is_none());
        assert!(recycled.params.is_empty());
        assert!(recycled.pattern.is_none());
    }

    #[test]
    fn test_concurrent_acquire_release() {
        let pool = Arc::new(ExecutionPool::new());
        let mut handles = Vec::new();

        for _ in 0..8 {
            let pool = Arc::clone(&pool);
            handles.push(std::thread::spawn(move || {
                for _ in 0..1000 {
                    let mut execution = pool.acquire();
                    assert!(execution.params.is_empty());
                    execution.params.push("k", "v");
                    pool.release(execution);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
