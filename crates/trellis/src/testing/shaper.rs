//! A monospace reference implementation of the shaper contract.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::text::{
    ShapeOptions, ShapedLine, TextAlign, TextPosition, TextPositions, TextShaper, lines,
    next_indent_position,
};

/// A [`TextShaper`] where every column is `advance` pixels wide.
///
/// Grapheme clusters advance by their terminal column width, tabs advance to
/// the next tab stop, and soft wrapping breaks at grapheme boundaries. Good
/// enough to exercise text widgets deterministically without a font stack.
#[derive(Debug, Clone, Copy)]
pub struct MonoShaper {
    /// Pixel width of one column.
    pub advance: f64,
}

impl MonoShaper {
    /// A shaper with `advance` pixels per column.
    pub fn new(advance: f64) -> Self {
        MonoShaper { advance }
    }

    /// Advance width of one grapheme starting at `x` pixels into the line.
    fn step(&self, grapheme: &str, x: f64, options: &ShapeOptions) -> f64 {
        if grapheme == "\t" {
            next_indent_position(x, options.tab_width)
        } else {
            x + self.advance * grapheme.width() as f64
        }
    }

    /// Pixels from the line start to `upto` bytes into `visible`.
    fn advance_to(&self, visible: &str, upto: usize, options: &ShapeOptions) -> f64 {
        let mut x = 0.0;
        for (i, g) in visible.grapheme_indices(true) {
            if i >= upto {
                break;
            }
            x = self.step(g, x, options);
        }
        x
    }

    /// Shape `text` into aligned lines.
    fn layout(&self, text: &str, options: &ShapeOptions) -> Vec<ShapedLine> {
        let mut shaped = Vec::new();
        for (offset, raw) in lines(text) {
            let terminator = terminator_len(raw);
            let visible = &raw[..raw.len() - terminator];

            let mut seg_start = 0;
            let mut x = 0.0;
            for (i, g) in visible.grapheme_indices(true) {
                let mut end = self.step(g, x, options);
                if let Some(wrap) = options.wrap_width {
                    if end > wrap && i > seg_start {
                        shaped.push(segment(offset, seg_start, i, 0, x));
                        seg_start = i;
                        end = self.step(g, 0.0, options);
                    }
                }
                x = end;
            }
            shaped.push(segment(offset, seg_start, visible.len(), terminator, x));
        }

        let reference = options.wrap_width.unwrap_or_else(|| {
            shaped.iter().map(|l| l.width).fold(0.0, f64::max)
        });
        for (index, line) in shaped.iter_mut().enumerate() {
            line.x = match options.align {
                TextAlign::Start => 0.0,
                TextAlign::Center => (reference - line.width) / 2.0,
                TextAlign::End => reference - line.width,
            };
            line.top = index as f64 * options.line_height;
            line.bottom = line.top + options.line_height;
        }
        shaped
    }

    /// Visible byte span of a shaped line (terminator excluded).
    fn visible_span<'t>(text: &'t str, line: &ShapedLine) -> (usize, &'t str) {
        let slice = &text[line.byte_start..line.byte_end];
        let visible = &slice[..slice.len() - terminator_len(slice)];
        (line.byte_start + visible.len(), visible)
    }
}

/// An unaligned shaped line; `x`, `top` and `bottom` are filled in later.
fn segment(offset: usize, start: usize, end: usize, terminator: usize, width: f64) -> ShapedLine {
    ShapedLine {
        byte_start: offset + start,
        byte_end: offset + end + terminator,
        x: 0.0,
        top: 0.0,
        bottom: 0.0,
        width,
    }
}

/// Byte length of the line terminator at the end of `line`, if any.
fn terminator_len(line: &str) -> usize {
    if line.ends_with("\r\n") {
        return 2;
    }
    match line.chars().next_back() {
        Some(c @ ('\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}')) => {
            c.len_utf8()
        }
        _ => 0,
    }
}

impl TextShaper for MonoShaper {
    fn shape(&self, text: &str, options: &ShapeOptions) -> Vec<ShapedLine> {
        self.layout(text, options)
    }

    fn byte_index_at(&self, text: &str, options: &ShapeOptions, x: f64, y: f64) -> usize {
        let shaped = self.layout(text, options);
        let line = shaped
            .iter()
            .find(|l| y < l.bottom)
            .or_else(|| shaped.last());
        let Some(line) = line else {
            return 0;
        };

        let (vis_end, visible) = Self::visible_span(text, line);
        let local = x - line.x;
        let mut cur = 0.0;
        for (i, g) in visible.grapheme_indices(true) {
            let end = self.step(g, cur, options);
            if local < end {
                return line.byte_start + i;
            }
            cur = end;
        }
        vis_end
    }

    fn positions(&self, text: &str, options: &ShapeOptions, byte_index: usize) -> TextPositions {
        let shaped = self.layout(text, options);
        let byte_index = byte_index.min(text.len());

        // A soft-wrap boundary belongs to both lines: the end of the upper
        // line and the start of the lower one.
        for (i, line) in shaped.iter().enumerate() {
            let (vis_end, _) = Self::visible_span(text, line);
            if byte_index == line.byte_end
                && vis_end == line.byte_end
                && i + 1 < shaped.len()
                && shaped[i + 1].byte_start == byte_index
            {
                let next = &shaped[i + 1];
                return TextPositions {
                    primary: TextPosition {
                        x: line.x + line.width,
                        top: line.top,
                        bottom: line.bottom,
                    },
                    secondary: Some(TextPosition {
                        x: next.x,
                        top: next.top,
                        bottom: next.bottom,
                    }),
                };
            }
        }

        let line = shaped
            .iter()
            .find(|l| byte_index < l.byte_end)
            .or_else(|| shaped.last());
        let position = match line {
            Some(line) => {
                let (vis_end, visible) = Self::visible_span(text, line);
                let upto = byte_index.min(vis_end).saturating_sub(line.byte_start);
                TextPosition {
                    x: line.x + self.advance_to(visible, upto, options),
                    top: line.top,
                    bottom: line.bottom,
                }
            }
            None => TextPosition {
                x: 0.0,
                top: 0.0,
                bottom: options.line_height,
            },
        };
        TextPositions {
            primary: position,
            secondary: None,
        }
    }

    fn measure(&self, text: &str, options: &ShapeOptions) -> (f64, f64) {
        let shaped = self.layout(text, options);
        let width = shaped.iter().map(|l| l.width).fold(0.0, f64::max);
        (width, shaped.len() as f64 * options.line_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ShapeOptions {
        ShapeOptions {
            face: "mono".to_string(),
            line_height: 16.0,
            wrap_width: None,
            tab_width: 40.0,
            align: TextAlign::Start,
        }
    }

    #[test]
    fn hard_lines_shape_one_to_one() {
        let shaper = MonoShaper::new(10.0);
        let shaped = shaper.shape("ab\ncde", &options());
        assert_eq!(shaped.len(), 2);
        assert_eq!((shaped[0].byte_start, shaped[0].byte_end), (0, 3));
        assert_eq!(shaped[0].width, 20.0);
        assert_eq!((shaped[1].byte_start, shaped[1].byte_end), (3, 6));
        assert_eq!(shaped[1].width, 30.0);
        assert_eq!(shaped[1].top, 16.0);
        assert_eq!(shaped[1].bottom, 32.0);
    }

    #[test]
    fn soft_wrap_breaks_at_graphemes() {
        let shaper = MonoShaper::new(10.0);
        let mut opts = options();
        opts.wrap_width = Some(25.0);
        let shaped = shaper.shape("abcde", &opts);
        // Two columns fit in 25px; the third overflows.
        assert_eq!(shaped.len(), 3);
        assert_eq!((shaped[0].byte_start, shaped[0].byte_end), (0, 2));
        assert_eq!((shaped[1].byte_start, shaped[1].byte_end), (2, 4));
        assert_eq!((shaped[2].byte_start, shaped[2].byte_end), (4, 5));
        assert_eq!(shaped[2].width, 10.0);
    }

    #[test]
    fn tabs_advance_to_the_next_stop() {
        let shaper = MonoShaper::new(10.0);
        let shaped = shaper.shape("a\tb", &options());
        // 'a' ends at 10, tab jumps to 40, 'b' ends at 50.
        assert_eq!(shaped[0].width, 50.0);

        let index = shaper.byte_index_at("a\tb", &options(), 45.0, 0.0);
        assert_eq!(index, 2);
    }

    #[test]
    fn byte_index_clamps_into_the_text() {
        let shaper = MonoShaper::new(10.0);
        let text = "ab\ncd";
        assert_eq!(shaper.byte_index_at(text, &options(), -5.0, -100.0), 0);
        assert_eq!(shaper.byte_index_at(text, &options(), 14.0, 8.0), 1);
        // Past the end of the first line: after 'b', before the break.
        assert_eq!(shaper.byte_index_at(text, &options(), 99.0, 8.0), 2);
        assert_eq!(shaper.byte_index_at(text, &options(), 99.0, 999.0), 5);
    }

    #[test]
    fn soft_wrap_boundary_has_two_positions() {
        let shaper = MonoShaper::new(10.0);
        let mut opts = options();
        opts.wrap_width = Some(20.0);
        let positions = shaper.positions("abcd", &opts, 2);
        assert_eq!(positions.primary.x, 20.0);
        assert_eq!(positions.primary.top, 0.0);
        let secondary = positions.secondary.unwrap();
        assert_eq!(secondary.x, 0.0);
        assert_eq!(secondary.top, 16.0);
    }

    #[test]
    fn hard_break_boundary_has_one_position() {
        let shaper = MonoShaper::new(10.0);
        let positions = shaper.positions("ab\ncd", &options(), 3);
        assert_eq!(positions.primary.top, 16.0);
        assert_eq!(positions.primary.x, 0.0);
        assert!(positions.secondary.is_none());
    }

    #[test]
    fn centered_lines_share_an_axis() {
        let shaper = MonoShaper::new(10.0);
        let mut opts = options();
        opts.align = TextAlign::Center;
        let shaped = shaper.shape("a\nabc", &opts);
        // Reference width is the widest line, 30px.
        assert_eq!(shaped[0].x, 10.0);
        assert_eq!(shaped[1].x, 0.0);
    }

    #[test]
    fn measure_reports_extent() {
        let shaper = MonoShaper::new(10.0);
        let (w, h) = shaper.measure("ab\ncde\n", &options());
        assert_eq!(w, 30.0);
        // Two text lines plus the empty final line.
        assert_eq!(h, 48.0);

        let (w, h) = shaper.measure("", &options());
        assert_eq!(w, 0.0);
        assert_eq!(h, 16.0);
    }

    #[test]
    fn wide_graphemes_take_two_columns() {
        let shaper = MonoShaper::new(10.0);
        let shaped = shaper.shape("a\u{754C}b", &options());
        assert_eq!(shaped[0].width, 40.0);
    }
}
