//! 24-bit RGB color helpers.
//!
//! Raw composition, decomposition and blending never touch the gamma table;
//! only colors produced from hue/saturation/value are gamma corrected, which is
//! what keeps perceived brightness roughly linear across the animations.

use crate::constants::{GAMMA, HUE_DEGREES};
use crate::utils::clamp;
use glam::{DVec3, IVec3};
use std::fmt;
use std::sync::OnceLock;

/// Packed `0xRRGGBB` pixel value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0);

    /// Red, green and blue bytes.
    #[inline]
    pub fn rgb(self) -> (u8, u8, u8) {
        let (r, g, b) = decompose(self);
        (r as u8, g as u8, b as u8)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0xFF_FFFF)
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color(value & 0xFF_FFFF)
    }
}

/// Pack three channel values into a color. Each input is masked to its low byte.
#[inline]
pub fn compose(red: i32, green: i32, blue: i32) -> Color {
    let r = (red & 0xFF) as u32;
    let g = (green & 0xFF) as u32;
    let b = (blue & 0xFF) as u32;
    Color((r << 16) | (g << 8) | b)
}

/// Split a color into its `(red, green, blue)` channel values.
#[inline]
pub fn decompose(color: Color) -> (i32, i32, i32) {
    let c = color.0;
    (
        ((c >> 16) & 0xFF) as i32,
        ((c >> 8) & 0xFF) as i32,
        (c & 0xFF) as i32,
    )
}

#[inline]
fn channels(color: Color) -> DVec3 {
    let (r, g, b) = decompose(color);
    DVec3::new(r as f64, g as f64, b as f64)
}

/// Blend `c0` towards `c1` in proportion to `x` within `x0..x1`.
///
/// Each channel is interpolated on its own, truncated, then clamped to
/// `0..=255`, so extrapolating with `x` outside the range saturates instead of
/// bleeding into the neighbouring channel.
pub fn lerp_color(x: f64, x0: f64, x1: f64, c0: Color, c1: Color) -> Color {
    let t = (x - x0) / (x1 - x0);
    let mixed = channels(c0).lerp(channels(c1), t).as_ivec3();
    let mixed = mixed.clamp(IVec3::ZERO, IVec3::splat(255));
    compose(mixed.x, mixed.y, mixed.z)
}

/// Gamma correction lookup, `table[i] = round((i / 255) ^ 2.8 * 255)`.
pub fn gamma_table() -> &'static [u8; 256] {
    static TABLE: OnceLock<[u8; 256]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            let linear = (i as f64 / 255.0).powf(GAMMA);
            *slot = (linear * 255.0 + 0.5) as u8;
        }
        table
    })
}

/// Convert hue (degrees), saturation and value (`0..=1`) into a gamma
/// corrected color.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Color {
    let s = clamp(s, 0.0, 1.0);
    let v = clamp(v, 0.0, 1.0);
    let rgb = if s == 0.0 {
        DVec3::splat(v)
    } else {
        let h = h.rem_euclid(HUE_DEGREES) / 60.0;
        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match sector as i32 {
            0 => DVec3::new(v, t, p),
            1 => DVec3::new(q, v, p),
            2 => DVec3::new(p, v, t),
            3 => DVec3::new(p, q, v),
            4 => DVec3::new(t, p, v),
            _ => DVec3::new(v, p, q),
        }
    };
    let gamma = gamma_table();
    let idx = (rgb * 255.0).as_ivec3().clamp(IVec3::ZERO, IVec3::splat(255));
    compose(
        gamma[idx.x as usize] as i32,
        gamma[idx.y as usize] as i32,
        gamma[idx.z as usize] as i32,
    )
}
