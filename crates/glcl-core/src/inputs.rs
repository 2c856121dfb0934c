//! Inputs from the host to the plot widget.

use thiserror::Error;

/// A 2D point as laid out in GPU memory: two packed `f32`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    #[error("dataset must contain at least one point")]
    Empty,
}

/// Ordered, immutable point sequence fixed at widget construction.
///
/// Only the x coordinates feed the kernel; y is recomputed on the GPU every
/// frame.
#[derive(Debug, Clone, PartialEq)]
pub struct InputDataset {
    points: Box<[Point]>,
}

impl InputDataset {
    /// Build a dataset from any sequence of points. Fails on an empty input.
    pub fn new<I, P>(points: I) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        let points: Box<[Point]> = points.into_iter().map(Into::into).collect();
        if points.is_empty() {
            return Err(DatasetError::Empty);
        }
        Ok(Self { points })
    }

    /// `count` points with x evenly spaced over [-1, 1] and y = 0.
    ///
    /// A single point sits at x = -1.
    pub fn linspace(count: usize) -> Result<Self, DatasetError> {
        let step = if count > 1 {
            2.0 / (count - 1) as f64
        } else {
            0.0
        };
        Self::new((0..count).map(|i| Point::new((-1.0 + step * i as f64) as f32, 0.0)))
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of points; always at least one.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Size of the dataset in bytes once uploaded.
    pub fn byte_len(&self) -> usize {
        self.points.len() * std::mem::size_of::<Point>()
    }
}
