use crate::luma::luminance;
use crate::{FlowError, FlowEstimator, FlowField};
use smoke_base::Tensor;
use smoke_image::frame_dims;

/// Smoothness and iteration settings for [`HornSchunck`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HornSchunckConfig {
    alpha: f32,
    iterations: usize,
}

impl Default for HornSchunckConfig {
    fn default() -> Self {
        Self {
            alpha: 15.0,
            iterations: 64,
        }
    }
}

impl HornSchunckConfig {
    /// Set the smoothness weight. Larger values give smoother fields.
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the number of Jacobi iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

/// Horn–Schunck global dense optical flow on frame luminance.
#[derive(Clone, Debug, Default)]
pub struct HornSchunck {
    config: HornSchunckConfig,
}

impl HornSchunck {
    pub fn new(config: HornSchunckConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HornSchunckConfig {
        &self.config
    }
}

struct Gradients {
    ex: Vec<f32>,
    ey: Vec<f32>,
    et: Vec<f32>,
}

// Spatial and temporal derivatives averaged over the 2x2x2 cube at each
// pixel. Indices past the last row/column are clamped.
fn gradients(i1: &[f32], i2: &[f32], width: usize, height: usize) -> Gradients {
    let n = width * height;
    let mut ex = Vec::with_capacity(n);
    let mut ey = Vec::with_capacity(n);
    let mut et = Vec::with_capacity(n);

    let at = |img: &[f32], y: usize, x: usize| img[y * width + x];
    for y in 0..height {
        let y1 = (y + 1).min(height - 1);
        for x in 0..width {
            let x1 = (x + 1).min(width - 1);
            let (p00, p01, p10, p11) = (at(i1, y, x), at(i1, y, x1), at(i1, y1, x), at(i1, y1, x1));
            let (n00, n01, n10, n11) = (at(i2, y, x), at(i2, y, x1), at(i2, y1, x), at(i2, y1, x1));

            ex.push(0.25 * ((p01 - p00) + (p11 - p10) + (n01 - n00) + (n11 - n10)));
            ey.push(0.25 * ((p10 - p00) + (p11 - p01) + (n10 - n00) + (n11 - n01)));
            et.push(0.25 * ((n00 - p00) + (n10 - p10) + (n01 - p01) + (n11 - p11)));
        }
    }

    Gradients { ex, ey, et }
}

// Weighted neighborhood mean: 1/6 for edge neighbors, 1/12 for corners.
fn local_average(field: &[f32], width: usize, height: usize, x: usize, y: usize) -> f32 {
    let xm = x.saturating_sub(1);
    let xp = (x + 1).min(width - 1);
    let ym = y.saturating_sub(1);
    let yp = (y + 1).min(height - 1);
    let f = |yy: usize, xx: usize| field[yy * width + xx];

    (f(y, xm) + f(y, xp) + f(ym, x) + f(yp, x)) / 6.0
        + (f(ym, xm) + f(ym, xp) + f(yp, xm) + f(yp, xp)) / 12.0
}

impl FlowEstimator for HornSchunck {
    fn estimate(&self, prev: &Tensor<u8>, next: &Tensor<u8>) -> Result<FlowField, FlowError> {
        let (height, width) = frame_dims(prev)?;
        if next.shape != prev.shape {
            return Err(FlowError::Shape(format!(
                "frame sizes differ: {:?} vs {:?}",
                prev.shape, next.shape
            )));
        }
        if width == 0 || height == 0 {
            return Ok(FlowField::zeros(width, height));
        }

        let i1 = luminance(prev);
        let i2 = luminance(next);
        let Gradients { ex, ey, et } = gradients(&i1, &i2, width, height);

        let alpha2 = self.config.alpha * self.config.alpha;
        let n = width * height;
        let mut u = vec![0.0f32; n];
        let mut v = vec![0.0f32; n];
        let mut u_next = vec![0.0f32; n];
        let mut v_next = vec![0.0f32; n];

        for _ in 0..self.config.iterations {
            for y in 0..height {
                for x in 0..width {
                    let i = y * width + x;
                    let u_avg = local_average(&u, width, height, x, y);
                    let v_avg = local_average(&v, width, height, x, y);
                    let t = (ex[i] * u_avg + ey[i] * v_avg + et[i])
                        / (alpha2 + ex[i] * ex[i] + ey[i] * ey[i]);
                    u_next[i] = u_avg - ex[i] * t;
                    v_next[i] = v_avg - ey[i] * t;
                }
            }
            std::mem::swap(&mut u, &mut u_next);
            std::mem::swap(&mut v, &mut v_next);
        }

        FlowField::new(width, height, u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradients_of_horizontal_ramp() {
        // 3x2 ramp shifted right by one pixel between frames
        let i1 = vec![0.0, 10.0, 20.0, 0.0, 10.0, 20.0];
        let i2 = vec![-10.0, 0.0, 10.0, -10.0, 0.0, 10.0];
        let g = gradients(&i1, &i2, 3, 2);
        assert_eq!(g.ex[0], 10.0);
        assert_eq!(g.ey[0], 0.0);
        assert_eq!(g.et[0], -10.0);
        // last column is clamped, so no x gradient there
        assert_eq!(g.ex[2], 0.0);
    }

    #[test]
    fn test_local_average_of_constant_field() {
        let field = vec![2.0f32; 9];
        assert!((local_average(&field, 3, 3, 1, 1) - 2.0).abs() < 1e-6);
        assert!((local_average(&field, 3, 3, 0, 0) - 2.0).abs() < 1e-6);
    }
}
