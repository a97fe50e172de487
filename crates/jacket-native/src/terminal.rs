use jacket_core::{decompose, Color, Error, LightSink};
use std::io::{self, Write};

/// Light strip drawn as one row of 24-bit color cells, redrawn in place on
/// every `show`.
pub struct TerminalStrip {
    pixels: Vec<Color>,
    brightness: u8,
    line: String,
}

impl TerminalStrip {
    pub fn new(count: usize, brightness: u8) -> Self {
        Self {
            pixels: vec![Color::BLACK; count],
            brightness,
            line: String::new(),
        }
    }

    fn scale(&self, channel: i32) -> u32 {
        channel as u32 * self.brightness as u32 / 255
    }

    fn render_line(&mut self) {
        use std::fmt::Write as _;
        let mut line = std::mem::take(&mut self.line);
        line.clear();
        line.push('\r');
        for &color in &self.pixels {
            let (r, g, b) = decompose(color);
            let _ = write!(
                line,
                "\x1b[48;2;{};{};{}m  ",
                self.scale(r),
                self.scale(g),
                self.scale(b)
            );
        }
        line.push_str("\x1b[0m");
        self.line = line;
    }
}

impl LightSink for TerminalStrip {
    fn len(&self) -> usize {
        self.pixels.len()
    }

    fn set_pixel(&mut self, index: usize, color: Color) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    fn show(&mut self) -> jacket_core::Result<()> {
        self.render_line();
        let mut out = io::stdout().lock();
        out.write_all(self.line.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| Error::Light(e.to_string()))
    }
}
