//! Pixel surface and its lifecycle manager.

use log::{debug, warn};
use thiserror::Error;

use crate::types::Rgb;

/// One RGBA8 pixel, straight (not premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const TRANSPARENT: Pixel = Pixel {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Composite over an opaque backdrop.
    pub fn over(&self, backdrop: Rgb) -> Rgb {
        let a = self.a as u32;
        let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * (255 - a) + 127) / 255) as u8;
        Rgb::new(
            mix(self.r, backdrop.r),
            mix(self.g, backdrop.g),
            mix(self.b, backdrop.b),
        )
    }
}

/// Pixel-addressable 2D drawing surface sized to the viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    width: u16,
    height: u16,
    pixels: Vec<Pixel>,
}

impl PixelSurface {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![Pixel::TRANSPARENT; len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Resize the surface, clearing it.
    ///
    /// Returns `false` (and keeps the content) when the size is unchanged.
    /// The underlying allocation is reused when shrinking.
    pub fn resize(&mut self, width: u16, height: u16) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.pixels.clear();
        self.pixels.resize(len, Pixel::TRANSPARENT);
        true
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Pixel::TRANSPARENT);
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Pixel> {
        self.idx(x as i32, y as i32).map(|i| self.pixels[i])
    }

    /// Source-over blend of `rgb` at opacity `alpha` into one pixel.
    /// Out-of-bounds writes are dropped.
    #[inline]
    pub fn blend(&mut self, x: i32, y: i32, rgb: Rgb, alpha: f32) {
        let Some(i) = self.idx(x, y) else {
            return;
        };
        let sa = alpha.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let dst = self.pixels[i];
        let da = dst.a as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        let ch = |s: u8, d: u8| {
            let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };
        self.pixels[i] = Pixel {
            r: ch(rgb.r, dst.r),
            g: ch(rgb.g, dst.g),
            b: ch(rgb.b, dst.b),
            a: (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        };
    }

    /// Number of pixels with any coverage.
    pub fn painted_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.a > 0).count()
    }

    /// Copy another surface of the same size without reallocating.
    pub fn copy_from(&mut self, other: &PixelSurface) {
        self.resize(other.width, other.height);
        self.pixels.copy_from_slice(&other.pixels);
    }
}

/// Why a drawing surface could not be obtained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The environment provides no drawing surface.
    #[error("drawing surface unavailable: {0}")]
    Unavailable(String),

    /// The requested size exceeds what the provider can back.
    #[error("surface {width}x{height} exceeds the {max}px limit")]
    TooLarge { width: u16, height: u16, max: u16 },
}

/// Source of drawing surfaces (a window, a terminal, an offscreen buffer).
pub trait SurfaceProvider {
    fn acquire(&mut self, width: u16, height: u16) -> Result<PixelSurface, SurfaceError>;

    /// Largest width or height a surface from this provider may take, at
    /// acquisition and on every later resize.
    fn max_dimension(&self) -> u16 {
        u16::MAX
    }
}

/// Offscreen provider backed by heap memory.
#[derive(Debug, Clone, Copy)]
pub struct HeapSurfaceProvider {
    max_dimension: u16,
}

impl HeapSurfaceProvider {
    pub fn new(max_dimension: u16) -> Self {
        Self { max_dimension }
    }
}

impl Default for HeapSurfaceProvider {
    fn default() -> Self {
        Self::new(8192)
    }
}

impl SurfaceProvider for HeapSurfaceProvider {
    fn acquire(&mut self, width: u16, height: u16) -> Result<PixelSurface, SurfaceError> {
        if width > self.max_dimension || height > self.max_dimension {
            return Err(SurfaceError::TooLarge {
                width,
                height,
                max: self.max_dimension,
            });
        }
        Ok(PixelSurface::new(width, height))
    }

    fn max_dimension(&self) -> u16 {
        self.max_dimension
    }
}

/// Owns the overlay's drawing surface.
///
/// Acquisition is attempted once per lifecycle. A failure is logged once and
/// remembered, so a host that keeps asking every frame does not turn into a
/// retry storm; [`SurfaceManager::release`] resets that.
#[derive(Debug)]
pub struct SurfaceManager<P> {
    provider: P,
    surface: Option<PixelSurface>,
    failed: bool,
    oversized: bool,
    resize_count: u64,
}

impl<P: SurfaceProvider> SurfaceManager<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            surface: None,
            failed: false,
            oversized: false,
            resize_count: 0,
        }
    }

    /// Make sure a surface exists. Returns whether one is available.
    pub fn acquire(&mut self, width: u16, height: u16) -> bool {
        if self.surface.is_some() {
            return true;
        }
        if self.failed {
            return false;
        }
        match self.provider.acquire(width, height) {
            Ok(surface) => {
                debug!("acquired {}x{} overlay surface", width, height);
                self.surface = Some(surface);
                true
            }
            Err(e) => {
                warn!("overlay disabled: {}", e);
                self.failed = true;
                false
            }
        }
    }

    /// Drop the surface and forget any earlier acquisition failure.
    pub fn release(&mut self) {
        self.surface = None;
        self.reset_failure();
    }

    /// Allow one more acquisition attempt after a failure. Keeps any surface.
    pub fn reset_failure(&mut self) {
        if self.failed {
            debug!("overlay surface acquisition will be retried");
            self.failed = false;
        }
    }

    /// Whether `width` x `height` is within the provider's limit.
    pub fn fits(&self, width: u16, height: u16) -> bool {
        let max = self.provider.max_dimension();
        width <= max && height <= max
    }

    pub fn is_available(&self) -> bool {
        self.surface.is_some()
    }

    /// Resize to the target when it differs. Returns whether a resize happened.
    ///
    /// A target over the provider's limit leaves the surface as it is; the
    /// first such refusal is logged.
    pub fn ensure_size(&mut self, width: u16, height: u16) -> bool {
        if !self.fits(width, height) {
            if !self.oversized {
                warn!(
                    "overlay surface not resized: {}",
                    SurfaceError::TooLarge {
                        width,
                        height,
                        max: self.provider.max_dimension(),
                    }
                );
                self.oversized = true;
            }
            return false;
        }
        self.oversized = false;
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        if !surface.resize(width, height) {
            return false;
        }
        self.resize_count += 1;
        debug!("overlay surface resized to {}x{}", width, height);
        true
    }

    pub fn clear(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.clear();
        }
    }

    pub fn surface(&self) -> Option<&PixelSurface> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut PixelSurface> {
        self.surface.as_mut()
    }

    pub fn resize_count(&self) -> u64 {
        self.resize_count
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}
