//! Frame abstraction for drawing primitives
//!
//! Provides a simple, safe API for pixel buffer operations instead of
//! direct buffer indexing scattered throughout rendering code.

use std::collections::HashMap;

use fontdue::{Font, Metrics};

use crate::model::Rect;

/// Glyph cache key: (character, font_size as bits)
pub type GlyphCacheKey = (char, u32);
pub type GlyphCache = HashMap<GlyphCacheKey, (Metrics, Vec<u8>)>;

/// Glyph sizes vary continuously with zoom; past this many entries the
/// cache is dropped and rebuilt
const GLYPH_CACHE_LIMIT: usize = 4096;

const OPAQUE: u32 = 0xFF00_0000;

/// Linear interpolation between two ARGB colors, `t` in `[0, 1]`
#[inline]
pub fn mix_colors(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let channel = |shift: u32| {
        let ca = ((a >> shift) & 0xFF) as f32;
        let cb = ((b >> shift) & 0xFF) as f32;
        ((ca + (cb - ca) * t).round() as u32) << shift
    };
    channel(24) | channel(16) | channel(8) | channel(0)
}

/// Alpha of an ARGB color in `[0, 1]`
#[inline]
fn alpha_of(color: u32) -> f32 {
    (color >> 24) as f32 / 255.0
}

/// Clipping rectangle in pixel coordinates (inclusive start, exclusive end).
#[derive(Clone, Copy, Debug)]
struct ClipRect {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

/// Pixel span of a rectangle after clipping: (x0, y0, x1, y1)
type Span = (usize, usize, usize, usize);

/// A frame buffer wrapper providing safe drawing primitives.
///
/// All coordinates are in physical pixels. Out-of-bounds operations are
/// safely clipped.
pub struct Frame<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
    clip: Option<ClipRect>,
}

impl<'a> Frame<'a> {
    /// Create a new frame from a mutable pixel buffer
    ///
    /// If the buffer is smaller than width*height, dimensions are adjusted
    /// to match the actual buffer size to prevent out-of-bounds access.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let expected_size = width * height;
        let actual_size = buffer.len();

        let (width, height) = if actual_size < expected_size && width > 0 {
            (width, actual_size / width)
        } else {
            (width, height)
        };

        Self {
            buffer,
            width,
            height,
            clip: None,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Constrain all subsequent drawing to `rect`
    pub fn set_clip(&mut self, rect: Rect) {
        let x0 = (rect.x.max(0.0) as usize).min(self.width);
        let y0 = (rect.y.max(0.0) as usize).min(self.height);
        let x1 = (rect.right().max(0.0) as usize).min(self.width);
        let y1 = (rect.bottom().max(0.0) as usize).min(self.height);
        self.clip = Some(ClipRect { x0, y0, x1, y1 });
    }

    pub fn clear_clip(&mut self) {
        self.clip = None;
    }

    #[inline]
    fn max_x(&self) -> usize {
        self.clip.map_or(self.width, |c| c.x1)
    }

    #[inline]
    fn max_y(&self) -> usize {
        self.clip.map_or(self.height, |c| c.y1)
    }

    #[inline]
    fn min_x(&self) -> usize {
        self.clip.map_or(0, |c| c.x0)
    }

    #[inline]
    fn min_y(&self) -> usize {
        self.clip.map_or(0, |c| c.y0)
    }

    /// Clip a rectangle to the frame and the clip rect
    fn span(&self, rect: Rect) -> Span {
        let x0 = (rect.x.max(0.0).round() as usize).max(self.min_x());
        let y0 = (rect.y.max(0.0).round() as usize).max(self.min_y());
        let x1 = (rect.right().max(0.0).round() as usize).min(self.max_x());
        let y1 = (rect.bottom().max(0.0).round() as usize).min(self.max_y());
        (x0, y0, x1.max(x0), y1.max(y0))
    }

    /// Clear the entire buffer with a solid color
    #[inline]
    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    /// Fill a rectangle, blending when the color is translucent
    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        if color < 0x0100_0000 {
            return;
        }
        let (x0, y0, x1, y1) = self.span(rect);
        let alpha = alpha_of(color);
        for y in y0..y1 {
            let row = y * self.width;
            let pixels = &mut self.buffer[row + x0..row + x1];
            if color >= OPAQUE {
                pixels.fill(color);
            } else {
                for px in pixels {
                    *px = mix_colors(*px, color, alpha) | OPAQUE;
                }
            }
        }
    }

    /// 1px-wide outline (`thickness` px) inside `rect`
    pub fn stroke_rect(&mut self, rect: Rect, thickness: f64, color: u32) {
        let t = thickness.max(1.0);
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, t), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - t, rect.width, t), color);
        self.fill_rect(Rect::new(rect.x, rect.y + t, t, rect.height - 2.0 * t), color);
        self.fill_rect(
            Rect::new(rect.right() - t, rect.y + t, t, rect.height - 2.0 * t),
            color,
        );
    }

    /// Dashed outline: `dash` px on, `dash` px off
    pub fn dashed_rect(&mut self, rect: Rect, thickness: f64, dash: f64, color: u32) {
        let t = thickness.max(1.0);
        let dash = dash.max(1.0);

        let mut x = rect.x;
        while x < rect.right() {
            let w = dash.min(rect.right() - x);
            self.fill_rect(Rect::new(x, rect.y, w, t), color);
            self.fill_rect(Rect::new(x, rect.bottom() - t, w, t), color);
            x += dash * 2.0;
        }
        let mut y = rect.y;
        while y < rect.bottom() {
            let h = dash.min(rect.bottom() - y);
            self.fill_rect(Rect::new(rect.x, y, t, h), color);
            self.fill_rect(Rect::new(rect.right() - t, y, t, h), color);
            y += dash * 2.0;
        }
    }

    /// Fill with a top-to-bottom gradient
    pub fn vertical_gradient(&mut self, rect: Rect, top: u32, bottom: u32) {
        let (x0, y0, x1, y1) = self.span(rect);
        let height = rect.height.max(1.0);
        for y in y0..y1 {
            let t = ((y as f64 + 0.5 - rect.y) / height) as f32;
            let color = mix_colors(top, bottom, t) | OPAQUE;
            let row = y * self.width;
            self.buffer[row + x0..row + x1].fill(color);
        }
    }

    /// Fill with a gradient running from the top-left to the bottom-right corner
    pub fn diagonal_gradient(&mut self, rect: Rect, start: u32, end: u32) {
        let (x0, y0, x1, y1) = self.span(rect);
        let extent = (rect.width + rect.height).max(1.0);
        for y in y0..y1 {
            let dy = y as f64 + 0.5 - rect.y;
            let row = y * self.width;
            for x in x0..x1 {
                let dx = x as f64 + 0.5 - rect.x;
                let t = ((dx + dy) / extent) as f32;
                self.buffer[row + x] = mix_colors(start, end, t) | OPAQUE;
            }
        }
    }

    #[cfg(test)]
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        if x < self.width && y < self.height {
            self.buffer[y * self.width + x]
        } else {
            0
        }
    }

    /// Composite one glyph coverage sample, honouring the clip rect
    fn blend_pixel(&mut self, x: usize, y: usize, color: u32) {
        let inside = (self.min_x()..self.max_x()).contains(&x)
            && (self.min_y()..self.max_y()).contains(&y);
        if !inside || color < 0x0100_0000 {
            return;
        }
        let px = &mut self.buffer[y * self.width + x];
        *px = mix_colors(*px, color, alpha_of(color)) | OPAQUE;
    }

    /// Dim the entire frame (modal backdrop). `color` carries the alpha.
    pub fn dim(&mut self, color: u32) {
        if color < 0x0100_0000 {
            return;
        }
        let alpha = alpha_of(color);
        for px in self.buffer.iter_mut() {
            *px = mix_colors(*px, color, alpha) | OPAQUE;
        }
    }

    /// Draw a filled rectangle with a 1px border
    pub fn draw_bordered_rect(&mut self, rect: Rect, fill_color: u32, border_color: u32) {
        self.fill_rect(rect, fill_color);
        self.stroke_rect(rect, 1.0, border_color | OPAQUE);
    }
}

/// Text rendering context wrapping the font and glyph cache.
///
/// Without a font every draw is a no-op and measurements are zero, so the
/// canvas still renders on systems with no usable font file.
pub struct TextPainter<'a> {
    font: Option<&'a Font>,
    glyph_cache: &'a mut GlyphCache,
}

impl<'a> TextPainter<'a> {
    pub fn new(font: Option<&'a Font>, glyph_cache: &'a mut GlyphCache) -> Self {
        if glyph_cache.len() > GLYPH_CACHE_LIMIT {
            glyph_cache.clear();
        }
        Self { font, glyph_cache }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Ascent of the font at `size` px
    pub fn ascent(&self, size: f32) -> f32 {
        self.font
            .and_then(|f| f.horizontal_line_metrics(size))
            .map(|m| m.ascent)
            .unwrap_or(size * 0.8)
    }

    fn glyph(&mut self, font: &Font, ch: char, size: f32) -> &(Metrics, Vec<u8>) {
        self.glyph_cache
            .entry((ch, size.to_bits()))
            .or_insert_with(|| font.rasterize(ch, size))
    }

    /// Measure text width in pixels
    pub fn measure_width(&mut self, text: &str, size: f32) -> f32 {
        let Some(font) = self.font else {
            return 0.0;
        };
        text.chars()
            .map(|ch| self.glyph(font, ch, size).0.advance_width)
            .sum()
    }

    /// Draw text with its top-left corner at (`x`, `y`)
    pub fn draw(&mut self, frame: &mut Frame, x: f64, y: f64, text: &str, size: f32, color: u32) {
        let Some(font) = self.font else {
            return;
        };
        let mut current_x = x as f32;
        let baseline = y as f32 + self.ascent(size);

        for ch in text.chars() {
            let (metrics, bitmap) = self.glyph(font, ch, size);
            let glyph_top = baseline - metrics.height as f32 - metrics.ymin as f32;

            for bitmap_y in 0..metrics.height {
                for bitmap_x in 0..metrics.width {
                    let alpha = bitmap[bitmap_y * metrics.width + bitmap_x];
                    if alpha == 0 {
                        continue;
                    }
                    let px = current_x as isize + bitmap_x as isize + metrics.xmin as isize;
                    let py = (glyph_top + bitmap_y as f32) as isize;
                    if px < 0 || py < 0 {
                        continue;
                    }
                    let glyph_color = (color & 0x00FF_FFFF)
                        | ((alpha as u32 * ((color >> 24) & 0xFF) / 255) << 24);
                    frame.blend_pixel(px as usize, py as usize, glyph_color);
                }
            }

            current_x += metrics.advance_width;
        }
    }

    /// Draw text centered inside `rect`
    pub fn draw_centered(&mut self, frame: &mut Frame, rect: Rect, text: &str, size: f32, color: u32) {
        if self.font.is_none() {
            return;
        }
        let width = self.measure_width(text, size) as f64;
        let x = rect.x + (rect.width - width) / 2.0;
        let y = rect.y + (rect.height - size as f64) / 2.0;
        self.draw(frame, x, y, text, size, color);
    }

    /// Longest prefix of `text` that fits in `max_width`, with an ellipsis
    /// when truncated
    pub fn elide(&mut self, text: &str, size: f32, max_width: f32) -> String {
        if self.measure_width(text, size) <= max_width {
            return text.to_string();
        }
        let ellipsis = self.measure_width("…", size);
        let mut width = 0.0;
        let mut out = String::new();
        for ch in text.chars() {
            let advance = self.measure_width(ch.encode_utf8(&mut [0; 4]), size);
            if width + advance + ellipsis > max_width {
                break;
            }
            width += advance;
            out.push(ch);
        }
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_fill_rect() {
        let mut buffer = vec![0u32; 100 * 100];
        let mut frame = Frame::new(&mut buffer, 100, 100);

        frame.fill_rect(Rect::new(10.0, 10.0, 20.0, 20.0), 0xFFFF0000);

        assert_eq!(frame.get_pixel(15, 15), 0xFFFF0000);
        assert_eq!(frame.get_pixel(5, 5), 0);
    }

    #[test]
    fn test_frame_blend_pixel() {
        let mut buffer = vec![0xFFFFFFFF_u32; 10 * 10];
        let mut frame = Frame::new(&mut buffer, 10, 10);

        // 50% black over white
        frame.blend_pixel(5, 5, 0x80000000);

        let r = (frame.get_pixel(5, 5) >> 16) & 0xFF;
        assert!(r > 100 && r < 160, "R channel: {}", r);
    }

    #[test]
    fn test_frame_out_of_bounds() {
        let mut buffer = vec![0u32; 10 * 10];
        let mut frame = Frame::new(&mut buffer, 10, 10);

        frame.blend_pixel(100, 100, 0x80FFFFFF);
        frame.fill_rect(Rect::new(-50.0, -50.0, 20.0, 20.0), 0xFFFFFFFF);
        assert_eq!(frame.get_pixel(100, 100), 0);
        assert_eq!(frame.get_pixel(0, 0), 0);
    }

    #[test]
    fn test_frame_with_clip_restricts_fill_rect() {
        let mut buffer = vec![0u32; 100 * 100];
        let mut frame = Frame::new(&mut buffer, 100, 100);
        frame.set_clip(Rect::new(10.0, 10.0, 30.0, 30.0));

        frame.fill_rect(Rect::new(0.0, 0.0, 100.0, 100.0), 0xFFFF0000);

        assert_eq!(frame.get_pixel(10, 10), 0xFFFF0000);
        assert_eq!(frame.get_pixel(39, 39), 0xFFFF0000);
        assert_eq!(frame.get_pixel(40, 40), 0);
        assert_eq!(frame.get_pixel(5, 5), 0);
    }

    #[test]
    fn test_translucent_fill_and_dim_stay_opaque() {
        let mut buffer = vec![0xFFFFFFFF_u32; 4 * 4];
        let mut frame = Frame::new(&mut buffer, 4, 4);

        frame.fill_rect(Rect::new(0.0, 0.0, 2.0, 4.0), 0x80000000);
        frame.dim(0x00000000);
        assert_eq!(frame.get_pixel(3, 0), 0xFFFFFFFF);

        frame.dim(0x40000000);
        let left = frame.get_pixel(0, 0);
        let right = frame.get_pixel(3, 0);
        assert_eq!(left >> 24, 0xFF);
        assert!((left & 0xFF) < (right & 0xFF) && (right & 0xFF) < 0xFF);
    }

    #[test]
    fn test_vertical_gradient_runs_top_to_bottom() {
        let mut buffer = vec![0u32; 10 * 10];
        let mut frame = Frame::new(&mut buffer, 10, 10);
        frame.vertical_gradient(Rect::new(0.0, 0.0, 10.0, 10.0), 0xFF000000, 0xFFFFFFFF);

        let top = frame.get_pixel(5, 0) & 0xFF;
        let bottom = frame.get_pixel(5, 9) & 0xFF;
        assert!(top < bottom);
        assert_eq!(frame.get_pixel(0, 4), frame.get_pixel(9, 4));
    }

    #[test]
    fn test_diagonal_gradient_runs_corner_to_corner() {
        let mut buffer = vec![0u32; 10 * 10];
        let mut frame = Frame::new(&mut buffer, 10, 10);
        frame.diagonal_gradient(Rect::new(0.0, 0.0, 10.0, 10.0), 0xFF000000, 0xFFFFFFFF);

        assert!((frame.get_pixel(0, 0) & 0xFF) < (frame.get_pixel(9, 9) & 0xFF));
        // Anti-diagonal pixels share a value
        assert_eq!(frame.get_pixel(9, 0), frame.get_pixel(0, 9));
    }

    #[test]
    fn test_dashed_rect_leaves_gaps() {
        let mut buffer = vec![0u32; 20 * 20];
        let mut frame = Frame::new(&mut buffer, 20, 20);
        frame.dashed_rect(Rect::new(0.0, 0.0, 20.0, 20.0), 1.0, 3.0, 0xFFFFFFFF);

        assert_eq!(frame.get_pixel(1, 0), 0xFFFFFFFF);
        assert_eq!(frame.get_pixel(4, 0), 0);
        assert_eq!(frame.get_pixel(10, 10), 0);
    }

    #[test]
    fn test_mix_colors_endpoints() {
        assert_eq!(mix_colors(0xFF102030, 0xFF405060, 0.0), 0xFF102030);
        assert_eq!(mix_colors(0xFF102030, 0xFF405060, 1.0), 0xFF405060);
    }

    #[test]
    fn test_text_painter_without_font_is_noop() {
        let mut cache = GlyphCache::new();
        let mut painter = TextPainter::new(None, &mut cache);
        let mut buffer = vec![0u32; 10 * 10];
        let mut frame = Frame::new(&mut buffer, 10, 10);

        painter.draw(&mut frame, 0.0, 0.0, "A-1", 12.0, 0xFFFFFFFF);
        assert_eq!(painter.measure_width("A-1", 12.0), 0.0);
        assert!(buffer.iter().all(|&px| px == 0));
    }
}
