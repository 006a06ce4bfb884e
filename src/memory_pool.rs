// In: src/memory_pool.rs

//! The allocator abstraction consumed by the allocating bitmap kernels.
//!
//! A `MemoryPool` hands out zero-initialised `arrow::buffer::MutableBuffer`s. The
//! kernels fill them and freeze them into shared, reference-counted `Buffer`s, so
//! the lifetime of a result is the longest of its holders.
//!
//! Pool exhaustion is the only runtime failure of the whole engine. It surfaces as
//! `BitmapError::AllocationFailure` and is never retried.

use arrow::buffer::MutableBuffer;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::BitmapError;

//==================================================================================
// 1. The Pool Trait
//==================================================================================

/// Supplies buffers to the allocating range operations.
pub trait MemoryPool: Send + Sync {
    /// Allocates a zero-initialised buffer of exactly `n_bytes` bytes.
    fn allocate(&self, n_bytes: usize) -> Result<MutableBuffer, BitmapError>;

    /// Total bytes handed out by this pool so far.
    fn bytes_allocated(&self) -> usize;
}

/// Reserves fallibly so a refused request comes back as an error rather than
/// aborting the process.
fn allocate_zeroed(n_bytes: usize) -> Result<MutableBuffer, BitmapError> {
    let mut bytes: Vec<u8> = Vec::new();
    bytes
        .try_reserve_exact(n_bytes)
        .map_err(|e| BitmapError::allocation(n_bytes, e.to_string()))?;
    bytes.resize(n_bytes, 0);
    Ok(MutableBuffer::from(bytes))
}

//==================================================================================
// 2. Pool Implementations
//==================================================================================

/// Unbounded pool backed by the global allocator.
#[derive(Debug, Default)]
pub struct SystemMemoryPool {
    allocated: AtomicUsize,
}

impl SystemMemoryPool {
    pub const fn new() -> Self {
        Self {
            allocated: AtomicUsize::new(0),
        }
    }
}

impl MemoryPool for SystemMemoryPool {
    fn allocate(&self, n_bytes: usize) -> Result<MutableBuffer, BitmapError> {
        let buffer = allocate_zeroed(n_bytes)?;
        self.allocated.fetch_add(n_bytes, Ordering::Relaxed);
        log::debug!("system pool: allocated {} bytes", n_bytes);
        Ok(buffer)
    }

    fn bytes_allocated(&self) -> usize {
        self.allocated.load(Ordering::Relaxed)
    }
}

static DEFAULT_POOL: SystemMemoryPool = SystemMemoryPool::new();

/// The process-wide default pool.
pub fn default_memory_pool() -> &'static SystemMemoryPool {
    &DEFAULT_POOL
}

/// A pool with a fixed lifetime budget of `capacity` bytes.
///
/// Every successful allocation is charged against the budget and never refunded;
/// a request that would overrun it fails without allocating anything.
#[derive(Debug)]
pub struct BudgetedMemoryPool {
    capacity: usize,
    allocated: AtomicUsize,
}

impl BudgetedMemoryPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            allocated: AtomicUsize::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes still available to future requests.
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.bytes_allocated())
    }
}

impl MemoryPool for BudgetedMemoryPool {
    fn allocate(&self, n_bytes: usize) -> Result<MutableBuffer, BitmapError> {
        let capacity = self.capacity;
        let reserved = self
            .allocated
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                current.checked_add(n_bytes).filter(|&total| total <= capacity)
            });

        if let Err(current) = reserved {
            log::warn!(
                "budgeted pool exhausted: requested {} bytes, {} of {} already allocated",
                n_bytes,
                current,
                capacity
            );
            return Err(BitmapError::allocation(
                n_bytes,
                format!(
                    "pool budget exhausted ({} of {} bytes in use)",
                    current, capacity
                ),
            ));
        }

        match allocate_zeroed(n_bytes) {
            Ok(buffer) => {
                log::debug!("budgeted pool: allocated {} bytes", n_bytes);
                Ok(buffer)
            }
            Err(e) => {
                self.allocated.fetch_sub(n_bytes, Ordering::SeqCst);
                Err(e)
            }
        }
    }

    fn bytes_allocated(&self) -> usize {
        self.allocated.load(Ordering::SeqCst)
    }
}

//==================================================================================
// 3. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_pool_zeroes_and_tracks() {
        let pool = SystemMemoryPool::new();
        let buffer = pool.allocate(17).unwrap();
        assert_eq!(buffer.len(), 17);
        assert!(buffer.as_slice().iter().all(|&b| b == 0));
        pool.allocate(3).unwrap();
        assert_eq!(pool.bytes_allocated(), 20);
    }

    #[test]
    fn test_system_pool_rejects_impossible_size() {
        let pool = SystemMemoryPool::new();
        let result = pool.allocate(usize::MAX);
        assert!(matches!(
            result,
            Err(BitmapError::AllocationFailure { requested, .. }) if requested == usize::MAX
        ));
        assert_eq!(pool.bytes_allocated(), 0);
    }

    #[test]
    fn test_system_pool_reports_refused_allocation() {
        let pool = SystemMemoryPool::new();
        let result = pool.allocate(1 << 60);
        assert!(matches!(
            result,
            Err(BitmapError::AllocationFailure { requested, .. }) if requested == 1 << 60
        ));
        assert_eq!(pool.bytes_allocated(), 0);
    }

    #[test]
    fn test_budgeted_pool_exhaustion() {
        let pool = BudgetedMemoryPool::new(10);
        pool.allocate(6).unwrap();
        assert_eq!(pool.remaining(), 4);

        let err = pool.allocate(5).unwrap_err();
        assert!(matches!(err, BitmapError::AllocationFailure { requested: 5, .. }));
        // A failed request is not charged.
        assert_eq!(pool.bytes_allocated(), 6);

        pool.allocate(4).unwrap();
        assert_eq!(pool.remaining(), 0);
        assert!(pool.allocate(1).is_err());
        // Zero-byte requests always fit.
        assert_eq!(pool.allocate(0).unwrap().len(), 0);
    }
}
