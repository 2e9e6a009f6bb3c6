use crate::luma::luminance;
use crate::{FlowError, FlowEstimator, FlowField};
use opencv::core::{CV_8UC1, Mat, Scalar, Vec2f};
use opencv::prelude::*;
use opencv::video;
use smoke_base::Tensor;
use smoke_image::frame_dims;

/// Pyramid and polynomial-expansion settings for [`FarnebackEstimator`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FarnebackConfig {
    pyr_scale: f64,
    levels: i32,
    win_size: i32,
    iterations: i32,
    poly_n: i32,
    poly_sigma: f64,
}

impl Default for FarnebackConfig {
    fn default() -> Self {
        Self {
            pyr_scale: 0.5,
            levels: 3,
            win_size: 15,
            iterations: 3,
            poly_n: 5,
            poly_sigma: 1.2,
        }
    }
}

impl FarnebackConfig {
    /// Scale between pyramid levels, below 1.
    pub fn with_pyr_scale(mut self, pyr_scale: f64) -> Self {
        self.pyr_scale = pyr_scale;
        self
    }

    pub fn with_levels(mut self, levels: i32) -> Self {
        self.levels = levels;
        self
    }

    /// Averaging window size. Larger windows are more robust to noise and
    /// blur fine motion.
    pub fn with_win_size(mut self, win_size: i32) -> Self {
        self.win_size = win_size;
        self
    }

    pub fn with_iterations(mut self, iterations: i32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Pixel neighborhood for the polynomial expansion, usually 5 or 7.
    pub fn with_poly_n(mut self, poly_n: i32) -> Self {
        self.poly_n = poly_n;
        self
    }

    pub fn with_poly_sigma(mut self, poly_sigma: f64) -> Self {
        self.poly_sigma = poly_sigma;
        self
    }

    // Getters
    pub fn pyr_scale(&self) -> f64 {
        self.pyr_scale
    }

    pub fn levels(&self) -> i32 {
        self.levels
    }

    pub fn win_size(&self) -> i32 {
        self.win_size
    }

    pub fn iterations(&self) -> i32 {
        self.iterations
    }

    pub fn poly_n(&self) -> i32 {
        self.poly_n
    }

    pub fn poly_sigma(&self) -> f64 {
        self.poly_sigma
    }
}

/// Dense Farneback optical flow computed by OpenCV on frame luminance.
#[derive(Clone, Debug, Default)]
pub struct FarnebackEstimator {
    config: FarnebackConfig,
}

impl FarnebackEstimator {
    pub fn new(config: FarnebackConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FarnebackConfig {
        &self.config
    }
}

fn gray_mat(frame: &Tensor<u8>, width: usize, height: usize) -> Result<Mat, FlowError> {
    let mut mat =
        Mat::new_rows_cols_with_default(height as i32, width as i32, CV_8UC1, Scalar::all(0.0))?;
    let bytes = mat.data_bytes_mut()?;
    for (dst, luma) in bytes.iter_mut().zip(luminance(frame)) {
        *dst = luma.round().clamp(0.0, 255.0) as u8;
    }
    Ok(mat)
}

impl FlowEstimator for FarnebackEstimator {
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

        let prev_mat = gray_mat(prev, width, height)?;
        let next_mat = gray_mat(next, width, height)?;
        let mut flow = Mat::default();
        let c = &self.config;
        video::calc_optical_flow_farneback(
            &prev_mat,
            &next_mat,
            &mut flow,
            c.pyr_scale,
            c.levels,
            c.win_size,
            c.iterations,
            c.poly_n,
            c.poly_sigma,
            video::OPTFLOW_FARNEBACK_GAUSSIAN,
        )?;

        let mut dx = Vec::with_capacity(width * height);
        let mut dy = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let vector = flow.at_2d::<Vec2f>(y as i32, x as i32)?;
                dx.push(vector[0]);
                dy.push(vector[1]);
            }
        }
        FlowField::new(width, height, dx, dy)
    }
}
