use crate::foundation::core::Bitmap;
use crate::foundation::math::clamp_byte;

const LUMA_R: f64 = 0.34;
const LUMA_G: f64 = 0.5;
const LUMA_B: f64 = 0.16;

/// Magnitudes above this are stored as a hard edge (255).
const HARD_EDGE: f64 = 128.0;

/// Single-channel luminance grid derived from a bitmap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Luminance {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Luminance {
    /// Luminance of every pixel, stored as a clamped byte.
    pub fn from_bitmap(bitmap: &Bitmap) -> Self {
        let data = bitmap
            .pixels()
            .map(|p| {
                let [r, g, b, _] = p.0;
                clamp_byte(LUMA_R * f64::from(r) + LUMA_G * f64::from(g) + LUMA_B * f64::from(b))
            })
            .collect();
        Self {
            width: bitmap.width(),
            height: bitmap.height(),
            data,
        }
    }

    /// Grid width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Luminance at `(x, y)`; reads outside the grid return white.
    pub fn get(&self, x: i64, y: i64) -> u8 {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return 255;
        }
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Raw row-major bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mean luminance over the cell `[x, x+w) x [y, y+h)`, clipped to the grid. Empty cells
    /// read as white.
    pub fn cell_mean(&self, x: u32, y: u32, w: u32, h: u32) -> f64 {
        if x >= self.width || y >= self.height || w == 0 || h == 0 {
            return 255.0;
        }
        grid_mean(&self.data, self.width, self.height, (x, y, w, h))
    }
}

fn grid_mean(data: &[u8], width: u32, height: u32, (x, y, w, h): (u32, u32, u32, u32)) -> f64 {
    let x1 = x.saturating_add(w).min(width);
    let y1 = y.saturating_add(h).min(height);
    if x >= x1 || y >= y1 {
        return 0.0;
    }
    let mut sum = 0u64;
    for yy in y..y1 {
        let row = (yy as usize) * (width as usize);
        sum += data[row + x as usize..row + x1 as usize]
            .iter()
            .map(|&v| u64::from(v))
            .sum::<u64>();
    }
    let count = u64::from(x1 - x) * u64::from(y1 - y);
    sum as f64 / count as f64
}

/// Sobel gradient magnitude grid.
///
/// The outer one-pixel border is never written by the detector and is always 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeMap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl EdgeMap {
    /// Grid width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Edge intensity at `(x, y)`; reads outside the grid return 0.
    pub fn get(&self, x: i64, y: i64) -> u8 {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return 0;
        }
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Raw row-major bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mean edge intensity over the cell `[x, x+w) x [y, y+h)`, clipped to the grid.
    ///
    /// Empty cells have mean 0.
    pub fn cell_mean(&self, x: u32, y: u32, w: u32, h: u32) -> f64 {
        grid_mean(&self.data, self.width, self.height, (x, y, w, h))
    }

    /// Number of pixels whose intensity exceeds `threshold`.
    pub fn count_above(&self, threshold: u8) -> usize {
        self.data.iter().filter(|&&v| v > threshold).count()
    }
}

/// Luminance + Sobel magnitude of `bitmap`, scaled by `sensitivity`.
pub fn detect_edges(bitmap: &Bitmap, sensitivity: f64) -> EdgeMap {
    detect_edges_from_luma(&Luminance::from_bitmap(bitmap), sensitivity)
}

/// Sobel magnitude over a precomputed luminance grid.
#[tracing::instrument(skip(luma), fields(width = luma.width, height = luma.height))]
pub fn detect_edges_from_luma(luma: &Luminance, sensitivity: f64) -> EdgeMap {
    let (w, h) = (luma.width as usize, luma.height as usize);
    let mut data = vec![0u8; w * h];
    let sensitivity = if sensitivity.is_finite() {
        sensitivity
    } else {
        0.0
    };

    if w >= 3 && h >= 3 {
        let l = |x: usize, y: usize| -> f64 { f64::from(luma.data[y * w + x]) };
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let gx = -l(x - 1, y - 1) - 2.0 * l(x - 1, y) - l(x - 1, y + 1)
                    + l(x + 1, y - 1)
                    + 2.0 * l(x + 1, y)
                    + l(x + 1, y + 1);
                let gy = -l(x - 1, y - 1) - 2.0 * l(x, y - 1) - l(x + 1, y - 1)
                    + l(x - 1, y + 1)
                    + 2.0 * l(x, y + 1)
                    + l(x + 1, y + 1);
                let magnitude = (gx * gx + gy * gy).sqrt() * sensitivity;
                data[y * w + x] = if magnitude > HARD_EDGE {
                    255
                } else {
                    clamp_byte(magnitude)
                };
            }
        }
    }

    EdgeMap {
        width: luma.width,
        height: luma.height,
        data,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/edges/detect.rs"]
mod tests;
