use smoke_base::Tensor;

// BT.601 luma of an `[H, W, 3]` frame, row-major.
pub(crate) fn luminance(frame: &Tensor<u8>) -> Vec<f32> {
    frame
        .data
        .chunks_exact(3)
        .map(|px| 0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32)
        .collect()
}
