//! Color types and color-space conversions
//!
//! [`Rgba`] is the interchange type: every parsed CSS color ends up here, and
//! every generated color leaves through [`Rgba::to_hex`] or [`Rgba::to_css`].
//! [`Hsl`] is used for shade generation, [`Lab`] for perceptual interpolation.

// =============================================================================
// sRGB
// =============================================================================

/// An 8-bit sRGB color with a floating point alpha channel in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (0.0 = transparent, 1.0 = opaque)
    pub a: f64,
}

impl Rgba {
    /// Opaque white
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    /// Opaque black
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    /// Fully transparent black
    pub const TRANSPARENT: Rgba = Rgba::rgba(0, 0, 0, 0.0);

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color with an explicit alpha
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from a packed `0xRRGGBB` value
    pub const fn from_hex_u32(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Return the same color with a different alpha, clamped to `[0, 1]`
    ///
    /// NaN is treated as fully transparent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.a = clamp_unit(alpha);
        self
    }

    /// Whether the alpha channel is fully opaque
    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Lower-case `#rrggbb`, ignoring alpha
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// `rgba(r, g, b, a)` notation, always including the alpha channel
    pub fn to_rgba_string(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, format_alpha(self.a))
    }

    /// Shortest faithful CSS form: hex when opaque, `rgba()` otherwise
    pub fn to_css(&self) -> String {
        if self.is_opaque() {
            self.to_hex()
        } else {
            self.to_rgba_string()
        }
    }

    fn unit_channels(&self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }

    fn from_unit_channels(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            r: unit_to_byte(r),
            g: unit_to_byte(g),
            b: unit_to_byte(b),
            a,
        }
    }

    // =========================================================================
    // HSL
    // =========================================================================

    /// Convert to HSL
    pub fn to_hsl(&self) -> Hsl {
        let (r, g, b) = self.unit_channels();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (max + min) / 2.0;

        if (max - min).abs() < f64::EPSILON {
            return Hsl::new(0.0, 0.0, lightness * 100.0);
        }

        let delta = max - min;
        let saturation = if lightness > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };

        let hue = if max == r {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        Hsl::new(hue * 60.0, saturation * 100.0, lightness * 100.0)
    }

    /// Build a color from HSL components and an alpha
    pub fn from_hsl(hsl: Hsl, alpha: f64) -> Self {
        let h = hsl.h.rem_euclid(360.0);
        let s = (hsl.s / 100.0).clamp(0.0, 1.0);
        let l = (hsl.l / 100.0).clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let sector = h / 60.0;
        let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
        let m = l - chroma / 2.0;

        let (r, g, b) = match sector as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        Self::from_unit_channels(r + m, g + m, b + m, clamp_unit(alpha))
    }

    // =========================================================================
    // CIE L*a*b*
    // =========================================================================

    /// Convert to CIE L*a*b* (D65 white point)
    pub fn to_lab(&self) -> Lab {
        let (r, g, b) = self.unit_channels();
        let (r, g, b) = (srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b));

        let x = 0.4124564 * r + 0.3575761 * g + 0.1804375 * b;
        let y = 0.2126729 * r + 0.7151522 * g + 0.0721750 * b;
        let z = 0.0193339 * r + 0.1191920 * g + 0.9503041 * b;

        let fx = lab_f(x / WHITE_X);
        let fy = lab_f(y / WHITE_Y);
        let fz = lab_f(z / WHITE_Z);

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// Build an opaque color from CIE L*a*b*, clamping out-of-gamut values
    pub fn from_lab(lab: Lab) -> Self {
        let fy = (lab.l + 16.0) / 116.0;
        let fx = fy + lab.a / 500.0;
        let fz = fy - lab.b / 200.0;

        let xr = lab_f_inv(fx);
        let yr = if lab.l > LAB_KAPPA * LAB_EPSILON {
            fy.powi(3)
        } else {
            lab.l / LAB_KAPPA
        };
        let zr = lab_f_inv(fz);

        let (x, y, z) = (xr * WHITE_X, yr * WHITE_Y, zr * WHITE_Z);

        let r = 3.2404542 * x - 1.5371385 * y - 0.4985314 * z;
        let g = -0.9692660 * x + 1.8760108 * y + 0.0415560 * z;
        let b = 0.0556434 * x - 0.2040259 * y + 1.0572252 * z;

        Self::from_unit_channels(
            linear_to_srgb(r),
            linear_to_srgb(g),
            linear_to_srgb(b),
            1.0,
        )
    }
}

// =============================================================================
// HSL
// =============================================================================

/// Hue/saturation/lightness with hue in degrees and the rest in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees, `[0, 360)`
    pub h: f64,
    /// Saturation in percent, `[0, 100]`
    pub s: f64,
    /// Lightness in percent, `[0, 100]`
    pub l: f64,
}

impl Hsl {
    /// Create an HSL triple
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

// =============================================================================
// Lab
// =============================================================================

/// CIE L*a*b* color; `l` is perceptual lightness in `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    /// Perceptual lightness
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Lab {
    /// Linear interpolation between two Lab colors
    pub fn lerp(from: &Lab, to: &Lab, t: f64) -> Lab {
        Lab {
            l: from.l + (to.l - from.l) * t,
            a: from.a + (to.a - from.a) * t,
            b: from.b + (to.b - from.b) * t,
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

const WHITE_X: f64 = 0.95047;
const WHITE_Y: f64 = 1.0;
const WHITE_Z: f64 = 1.08883;
const LAB_EPSILON: f64 = 216.0 / 24389.0;
const LAB_KAPPA: f64 = 24389.0 / 27.0;

fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        (LAB_KAPPA * t + 16.0) / 116.0
    }
}

fn lab_f_inv(f: f64) -> f64 {
    let cubed = f.powi(3);
    if cubed > LAB_EPSILON {
        cubed
    } else {
        (116.0 * f - 16.0) / LAB_KAPPA
    }
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> f64 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn unit_to_byte(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Format an alpha value with at most three decimals and no trailing zeros
pub(crate) fn format_alpha(alpha: f64) -> String {
    let fixed = format!("{:.3}", clamp_unit(alpha));
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}
