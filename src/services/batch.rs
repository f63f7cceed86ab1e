use crate::models::UpsertPoint;

/// Points waiting to be flushed to the vector store.
#[derive(Debug)]
pub struct Batch {
    points: Vec<UpsertPoint>,
    capacity: usize,
    first_row: Option<usize>,
}

impl Batch {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: Vec::with_capacity(capacity),
            capacity,
            first_row: None,
        }
    }

    /// Add a point built from input row `row`. Returns true once the batch is full.
    pub fn push(&mut self, row: usize, point: UpsertPoint) -> bool {
        self.first_row.get_or_insert(row);
        self.points.push(point);
        self.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.points.len() >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Input row of the first point in the batch.
    pub fn first_row(&self) -> Option<usize> {
        self.first_row
    }

    /// Drain the batch, leaving it empty.
    pub fn take(&mut self) -> Vec<UpsertPoint> {
        self.first_row = None;
        std::mem::replace(&mut self.points, Vec::with_capacity(self.capacity))
    }
}
