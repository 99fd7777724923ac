use crate::foundation::error::{DoofioError, DoofioResult};

pub use kurbo::{Point, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Fps {
    pub fn new(num: u32, den: u32) -> DoofioResult<Self> {
        if den == 0 {
            return Err(DoofioError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(DoofioError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Timestamp of `frame` on the simulated clock, rounded down to whole milliseconds.
    pub fn frame_to_ms(self, frame: FrameIndex) -> u64 {
        let num = u128::from(frame.0) * 1000 * u128::from(self.den);
        (num / u128::from(self.num)) as u64
    }

    pub fn ms_to_frames_ceil(self, ms: u64) -> u64 {
        let num = u128::from(ms) * u128::from(self.num);
        let den = 1000 * u128::from(self.den);
        num.div_ceil(den) as u64
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}

/// Size of the drawing surface in pixels, following the host viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Straight (non-premultiplied) RGBA8 color. Serialized as a `#rrggbb[aa]` string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> DoofioResult<Self> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| DoofioError::validation(format!("color '{s}' must start with '#'")))?;
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return Err(DoofioError::validation(format!(
                "color '{s}' must be #rrggbb or #rrggbbaa"
            )));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| DoofioError::validation(format!("color '{s}' is not valid hex")))
        };
        Ok(Self {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
            a: if hex.len() == 8 { byte(6)? } else { 255 },
        })
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Alpha from a unit opacity, truncated the same way a CSS hex suffix is built.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).floor() as u8;
        self.with_alpha(a)
    }

    pub fn to_premul(self) -> [u8; 4] {
        let a = u16::from(self.a);
        let premul = |c: u8| -> u8 { (((u16::from(c) * a) + 127) / 255) as u8 };
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = DoofioError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgba8> for String {
    fn from(value: Rgba8) -> Self {
        value.to_hex()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
