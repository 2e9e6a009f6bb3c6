use crate::FlowError;

/// Per-pixel motion vectors, row-major, in pixels per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowField {
    width: usize,
    height: usize,
    dx: Vec<f32>,
    dy: Vec<f32>,
}

impl FlowField {
    pub fn new(width: usize, height: usize, dx: Vec<f32>, dy: Vec<f32>) -> Result<Self, FlowError> {
        let expected = width * height;
        if dx.len() != expected || dy.len() != expected {
            return Err(FlowError::Shape(format!(
                "{width}x{height} field needs {expected} vectors, got dx={} dy={}",
                dx.len(),
                dy.len()
            )));
        }
        Ok(Self {
            width,
            height,
            dx,
            dy,
        })
    }

    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            dx: vec![0.0; width * height],
            dy: vec![0.0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dx(&self) -> &[f32] {
        &self.dx
    }

    pub fn dy(&self) -> &[f32] {
        &self.dy
    }

    /// Motion vector at column `x`, row `y`.
    pub fn at(&self, x: usize, y: usize) -> Option<(f32, f32)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = y * self.width + x;
        Some((self.dx[i], self.dy[i]))
    }

    pub fn magnitudes(&self) -> impl Iterator<Item = f32> + '_ {
        self.dx.iter().zip(&self.dy).map(|(x, y)| x.hypot(*y))
    }
}
