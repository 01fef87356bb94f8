//! Text plumbing: line splitting, tab stops, and the shaper contract.
//!
//! The host does not render text itself. Text widgets talk to a
//! [`TextShaper`] the application registers; the host only needs the
//! line-splitting and indent rules here, which both sides must agree on.

/// Split `text` into lines, yielding `(byte_offset, line)` where the line
/// includes its terminator.
///
/// Recognized breaks: LF, VT, FF, CR (with CRLF as a single two-byte break),
/// NEL (U+0085), LS (U+2028), and PS (U+2029). A trailing break, or an empty
/// input, yields one extra empty final line.
pub fn lines(text: &str) -> Lines<'_> {
    Lines {
        text,
        offset: 0,
        done: false,
    }
}

/// Iterator returned by [`lines`].
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    /// Full input text.
    text: &'a str,
    /// Byte offset where the next line starts.
    offset: usize,
    /// Set once the final line has been yielded.
    done: bool,
}

impl<'a> Iterator for Lines<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<(usize, &'a str)> {
        if self.done {
            return None;
        }
        let start = self.offset;
        let rest = &self.text[start..];
        for (i, c) in rest.char_indices() {
            if let Some(len) = break_len(rest, i, c) {
                let end = i + len;
                self.offset = start + end;
                return Some((start, &rest[..end]));
            }
        }
        self.done = true;
        Some((start, rest))
    }
}

/// Byte length of the line break starting at `rest[i..]`, if `c` opens one.
fn break_len(rest: &str, i: usize, c: char) -> Option<usize> {
    match c {
        '\n' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}' => Some(c.len_utf8()),
        '\r' => {
            if rest[i + 1..].starts_with('\n') {
                Some(2)
            } else {
                Some(1)
            }
        }
        _ => None,
    }
}

/// The next tab stop after `x` for stops every `unit` pixels.
///
/// An `x` exactly on a stop advances to the following stop. A non-positive
/// `unit` returns `x` unchanged.
pub fn next_indent_position(x: f64, unit: f64) -> f64 {
    if unit <= 0.0 {
        return x;
    }
    ((x / unit).floor() + 1.0) * unit
}

/// Horizontal alignment of shaped text within its wrap width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Align to the leading edge.
    #[default]
    Start,
    /// Center each line.
    Center,
    /// Align to the trailing edge.
    End,
}

/// Parameters a shaper needs to lay text out.
#[derive(Debug, Clone)]
pub struct ShapeOptions {
    /// Face identifier, meaningful to the shaper.
    pub face: String,
    /// Line height in pixels.
    pub line_height: f64,
    /// Soft-wrap width in pixels; `None` disables wrapping.
    pub wrap_width: Option<f64>,
    /// Distance between tab stops in pixels.
    pub tab_width: f64,
    /// Horizontal alignment.
    pub align: TextAlign,
}

/// One laid-out line of shaped text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapedLine {
    /// Byte range start of the line in the source text.
    pub byte_start: usize,
    /// Byte range end, exclusive, including any terminator.
    pub byte_end: usize,
    /// Left edge of the line.
    pub x: f64,
    /// Top of the line.
    pub top: f64,
    /// Bottom of the line.
    pub bottom: f64,
    /// Advance width of the line.
    pub width: f64,
}

/// Caret geometry for one byte index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPosition {
    /// Horizontal caret position.
    pub x: f64,
    /// Top of the caret.
    pub top: f64,
    /// Bottom of the caret.
    pub bottom: f64,
}

/// One or two caret positions for a byte index. The second is present only
/// at a soft-wrap boundary, where the index maps to both the end of one
/// line and the start of the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPositions {
    /// Position on the line owning the index.
    pub primary: TextPosition,
    /// Position at the start of the following line, at soft wraps.
    pub secondary: Option<TextPosition>,
}

/// Contract between the host and its text engine.
pub trait TextShaper {
    /// Lay `text` out under `options`.
    fn shape(&self, text: &str, options: &ShapeOptions) -> Vec<ShapedLine>;

    /// Byte index of the glyph at `(x, y)`, clamped into the text.
    fn byte_index_at(&self, text: &str, options: &ShapeOptions, x: f64, y: f64) -> usize;

    /// Caret positions for `byte_index`.
    fn positions(&self, text: &str, options: &ShapeOptions, byte_index: usize) -> TextPositions;

    /// Maximum line width and total height of `text` under `options`.
    fn measure(&self, text: &str, options: &ShapeOptions) -> (f64, f64);
}
