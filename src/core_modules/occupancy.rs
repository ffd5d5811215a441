// THEORY:
// An `OccupancyMask` answers one question for the current pass: "has this pixel
// already been attributed to a blob?" It is a boolean grid with the same dimensions
// as the frame and never outlives the pass that created it.
//
// Where the mask storage comes from is a separate concern. A `MaskAllocator` hands
// out cleared storage and takes it back when the pass is over. `HeapAllocator`
// reserves fresh memory every time; `PooledAllocator` recycles released buffers so a
// steady stream of same-sized frames stops allocating after the first pass.

use crate::error::TrackerError;

/// Supplies and reclaims storage for occupancy masks.
pub trait MaskAllocator {
    /// Returns `cells` cleared (all-false) cells.
    fn allocate(&mut self, cells: usize) -> Result<Vec<bool>, TrackerError>;

    /// Takes back storage from a mask that is no longer needed.
    fn release(&mut self, storage: Vec<bool>);
}

fn reserve_cleared(cells: usize) -> Result<Vec<bool>, TrackerError> {
    let mut storage = Vec::new();
    storage
        .try_reserve_exact(cells)
        .map_err(|_| TrackerError::MaskAllocation { cells })?;
    storage.resize(cells, false);
    Ok(storage)
}

/// Allocates every mask from the global heap.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapAllocator;

impl MaskAllocator for HeapAllocator {
    fn allocate(&mut self, cells: usize) -> Result<Vec<bool>, TrackerError> {
        reserve_cleared(cells)
    }

    fn release(&mut self, storage: Vec<bool>) {
        drop(storage);
    }
}

const DEFAULT_POOL_SIZE: usize = 4;

/// Keeps released mask buffers around and hands them back cleared.
#[derive(Debug)]
pub struct PooledAllocator {
    pool: Vec<Vec<bool>>,
    capacity: usize,
}

impl Default for PooledAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_SIZE)
    }
}

impl PooledAllocator {
    pub fn new(capacity: usize) -> Self {
        Self {
            pool: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of buffers currently waiting for reuse.
    pub fn available(&self) -> usize {
        self.pool.len()
    }
}

impl MaskAllocator for PooledAllocator {
    fn allocate(&mut self, cells: usize) -> Result<Vec<bool>, TrackerError> {
        match self.pool.iter().position(|buffer| buffer.capacity() >= cells) {
            Some(index) => {
                let mut storage = self.pool.swap_remove(index);
                storage.clear();
                storage.resize(cells, false);
                Ok(storage)
            }
            None => reserve_cleared(cells),
        }
    }

    fn release(&mut self, storage: Vec<bool>) {
        if self.pool.len() < self.capacity {
            self.pool.push(storage);
        }
    }
}

/// A per-pass boolean grid marking pixels already claimed by a blob.
#[derive(Debug, Clone)]
pub struct OccupancyMask {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl OccupancyMask {
    /// Creates an all-false mask on the heap.
    pub fn new(width: usize, height: usize) -> Result<Self, TrackerError> {
        Self::with_allocator(width, height, &mut HeapAllocator)
    }

    pub fn with_allocator<A: MaskAllocator + ?Sized>(
        width: usize,
        height: usize,
        allocator: &mut A,
    ) -> Result<Self, TrackerError> {
        let cells = allocator.allocate(width * height)?;
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Hands the storage back to the allocator it should be recycled by.
    pub fn release<A: MaskAllocator + ?Sized>(self, allocator: &mut A) {
        allocator.release(self.cells);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "mask cell ({x}, {y}) is outside the {}x{} mask",
            self.width,
            self.height
        );
        y * self.width + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        let index = self.index(x, y);
        self.cells[index] = value;
    }

    /// Marks every cell of the inclusive rectangle `[x0, x1] x [y0, y1]`.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize) {
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.set(x, y, true);
            }
        }
    }

    /// Number of claimed cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }
}
