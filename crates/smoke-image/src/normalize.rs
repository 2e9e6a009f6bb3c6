use smoke_base::Tensor;

/// Map pixel values from [0, 255] to [-1, 1].
pub fn normalize(frame: &Tensor<u8>) -> Tensor<f32> {
    frame.map(|&v| (v as f32 / 255.0) * 2.0 - 1.0)
}

/// Inverse of [`normalize`], rounding and clamping back to bytes.
pub fn denormalize(frame: &Tensor<f32>) -> Tensor<u8> {
    frame.map(|&v| (((v + 1.0) / 2.0) * 255.0).round().clamp(0.0, 255.0) as u8)
}
