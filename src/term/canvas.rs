//! Canvas and style types for terminal rendering.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Minimal per-glyph styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(16, 16, 20),
            bold: false,
            dim: false,
        }
    }
}

/// A single styled character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Default for Glyph {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: Style::default(),
        }
    }
}

/// 2D buffer of styled characters. Writes outside the bounds are clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            glyphs: vec![Glyph::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Glyph> {
        self.idx(x, y).map(|i| self.glyphs[i])
    }

    pub fn put_char(&mut self, x: i32, y: i32, ch: char, style: Style) {
        if let Some(i) = self.idx(x, y) {
            self.glyphs[i] = Glyph { ch, style };
        }
    }

    pub fn put_str(&mut self, x: i32, y: i32, s: &str, style: Style) {
        let mut cx = x;
        for ch in s.chars() {
            self.put_char(cx, y, ch, style);
            cx += 1;
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, ch: char, style: Style) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x + dx, y + dy, ch, style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_outside_bounds_are_clipped() {
        let mut canvas = Canvas::new(4, 2);
        let style = Style::default();

        canvas.put_char(-1, 0, 'x', style);
        canvas.put_char(4, 0, 'x', style);
        canvas.put_char(0, 2, 'x', style);
        canvas.put_str(2, 1, "abcd", style);

        assert_eq!(canvas.get(2, 1).map(|g| g.ch), Some('a'));
        assert_eq!(canvas.get(3, 1).map(|g| g.ch), Some('b'));
        // Everything else untouched.
        assert_eq!(canvas.get(0, 0).map(|g| g.ch), Some(' '));
        assert_eq!(canvas.get(4, 0), None);
    }

    #[test]
    fn test_fill_rect_covers_exact_area() {
        let mut canvas = Canvas::new(5, 5);
        let style = Style::default();
        canvas.fill_rect(1, 1, 2, 3, '#', style);

        for y in 0..5 {
            for x in 0..5 {
                let expected = if (1..3).contains(&x) && (1..4).contains(&y) {
                    '#'
                } else {
                    ' '
                };
                assert_eq!(canvas.get(x, y).map(|g| g.ch), Some(expected));
            }
        }
    }
}
