use crate::{FlowError, FlowField};
use smoke_base::Tensor;
use smoke_image::{CHANNELS, hsv_to_rgb};

/// Render a flow field as an `[H, W, 3]` RGB frame.
///
/// Hue encodes direction (0° = +x, counterclockwise in image coordinates
/// via `atan2(dy, dx)`), saturation is full, and value is the magnitude
/// min-max normalized over the field. A field with no magnitude spread
/// renders black.
pub fn flow_to_rgb(field: &FlowField) -> Result<Tensor<u8>, FlowError> {
    let (min, max) = field
        .magnitudes()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), m| {
            (lo.min(m), hi.max(m))
        });
    let range = max - min;

    let mut data = Vec::with_capacity(field.width() * field.height() * CHANNELS);
    for ((dx, dy), magnitude) in field.dx().iter().zip(field.dy()).zip(field.magnitudes()) {
        let value = if range > f32::EPSILON {
            (magnitude - min) / range
        } else {
            0.0
        };
        let hue = dy.atan2(*dx).to_degrees();
        data.extend_from_slice(&hsv_to_rgb(hue, 1.0, value));
    }

    Ok(Tensor::new(
        vec![field.height(), field.width(), CHANNELS],
        data,
    )?)
}
