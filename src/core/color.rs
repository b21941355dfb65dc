use nalgebra::Vector3;

/// Bytes per pixel in a BGRA32 buffer.
pub const BYTES_PER_PIXEL: usize = 4;

/// Converts a shaded channel value (0..255 domain, may overshoot) to a byte.
///
/// Values above 255 saturate. `as u8` already saturates negatives and NaN to 0,
/// so the byte can never wrap.
#[inline(always)]
pub fn to_channel(value: f32) -> u8 {
    value.min(255.0) as u8
}

/// Packs an RGB color into BGRA byte order with a fully opaque alpha.
#[inline]
pub fn to_bgra(color: Vector3<f32>) -> [u8; 4] {
    [
        to_channel(color.z),
        to_channel(color.y),
        to_channel(color.x),
        255,
    ]
}
