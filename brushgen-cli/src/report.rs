/// Coloured status output for the terminal
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;

use brushgen_core::ParsedBrush;

/// Writes status lines, optionally coloured
pub struct Reporter {
    colored: bool,
}

impl Reporter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    pub fn success<W: Write>(&self, writer: &mut W, message: &str) -> std::io::Result<()> {
        self.line(writer, Color::Green, message)
    }

    pub fn failure<W: Write>(&self, writer: &mut W, message: &str) -> std::io::Result<()> {
        self.line(writer, Color::Red, message)
    }

    pub fn plain<W: Write>(&self, writer: &mut W, message: &str) -> std::io::Result<()> {
        writer.queue(Print(message))?;
        writer.queue(Print('\n'))?;
        writer.flush()
    }

    fn line<W: Write>(&self, writer: &mut W, color: Color, message: &str) -> std::io::Result<()> {
        if self.colored {
            writer.queue(SetForegroundColor(color))?;
            writer.queue(Print(message))?;
            writer.queue(ResetColor)?;
        } else {
            writer.queue(Print(message))?;
        }
        writer.queue(Print('\n'))?;
        writer.flush()
    }
}

/// One-line description of a parsed brush
pub fn brush_summary(index: usize, brush: &ParsedBrush) -> String {
    let bounds = match brush.bounds() {
        Some((min, max)) => format!(
            "({} {} {}) .. ({} {} {})",
            min.x, min.y, min.z, max.x, max.y, max.z
        ),
        None => "empty".to_string(),
    };

    format!(
        "brush {}: {} faces, bounds {}, textures {}",
        index,
        brush.faces.len(),
        bounds,
        brush.textures().join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_reporter_has_no_escapes() {
        let mut out = Vec::new();
        Reporter::new(false).success(&mut out, "done").expect("write");
        assert_eq!(String::from_utf8(out).expect("utf8"), "done\n");
    }

    #[test]
    fn test_colored_reporter_wraps_message() {
        let mut out = Vec::new();
        Reporter::new(true).failure(&mut out, "boom").expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with('\u{1b}'));
        assert!(text.contains("boom"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_empty_brush_summary() {
        let brush = ParsedBrush { faces: Vec::new() };
        assert_eq!(brush_summary(3, &brush), "brush 3: 0 faces, bounds empty, textures ");
    }
}
