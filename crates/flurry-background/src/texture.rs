//! Decoded texture for the liquid plane.

use crate::color::Rgb;

/// Largest edge kept after decoding. The plane is sampled at terminal
/// resolution so anything larger is wasted memory.
pub const MAX_TEXTURE_EDGE: u32 = 256;

/// RGB texture sampled with wrapping coordinates.
#[derive(Debug, Clone)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Texture {
    /// Build a texture from row-major pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty);
        }
        if pixels.len() != width as usize * height as usize {
            return Err(TextureError::Size {
                expected: width as usize * height as usize,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Decode an encoded image (PNG, JPEG or WebP), downscaling large ones.
    pub fn decode(bytes: &[u8]) -> Result<Self, TextureError> {
        let image = image::load_from_memory(bytes)?;
        let image = if image.width() > MAX_TEXTURE_EDGE || image.height() > MAX_TEXTURE_EDGE {
            image.thumbnail(MAX_TEXTURE_EDGE, MAX_TEXTURE_EDGE)
        } else {
            image
        };
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = rgb
            .pixels()
            .map(|p| Rgb::from_u8(p[0], p[1], p[2]))
            .collect();
        Self::from_pixels(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Nearest-neighbour sample at normalized `(u, v)`; both axes wrap.
    pub fn sample(&self, u: f32, v: f32) -> Rgb {
        let x = (u.rem_euclid(1.0) * self.width as f32) as u32;
        let y = (v.rem_euclid(1.0) * self.height as f32) as u32;
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Errors raised while fetching or decoding a texture.
#[derive(Debug)]
pub enum TextureError {
    Fetch(String),
    Io(std::io::Error),
    Decode(image::ImageError),
    Empty,
    Size { expected: usize, actual: usize },
}

impl From<image::ImageError> for TextureError {
    fn from(err: image::ImageError) -> Self {
        Self::Decode(err)
    }
}

impl From<std::io::Error> for TextureError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl std::fmt::Display for TextureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch(msg) => write!(f, "texture fetch failed: {msg}"),
            Self::Io(err) => write!(f, "texture read failed: {err}"),
            Self::Decode(err) => write!(f, "texture decode failed: {err}"),
            Self::Empty => write!(f, "texture has no pixels"),
            Self::Size { expected, actual } => {
                write!(f, "texture expected {expected} pixels, got {actual}")
            }
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Decode(err) => Some(err),
            _ => None,
        }
    }
}
