//! Grid layout with lazily sized, repeating rows.

use geom::Rect;

use super::{Sizing, distribute};

/// How one grid row is sized.
pub enum RowSizing {
    /// The same spec on every repetition of the row list.
    Uniform(Sizing),
    /// Compute the spec from the absolute row index. Data-driven lists use
    /// this to size each record without declaring every row up front.
    Lazy(Box<dyn Fn(usize) -> Sizing>),
}

impl RowSizing {
    /// A lazy row spec from a closure.
    pub fn lazy(f: impl Fn(usize) -> Sizing + 'static) -> Self {
        Self::Lazy(Box::new(f))
    }
}

impl From<Sizing> for RowSizing {
    fn from(sizing: Sizing) -> Self {
        Self::Uniform(sizing)
    }
}

impl std::fmt::Debug for RowSizing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uniform(sizing) => f.debug_tuple("Uniform").field(sizing).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

/// A column/row grid.
///
/// Cell geometry is pure arithmetic over the declared specs, so there is
/// nothing to memoize. Row indexes are unbounded: past the declared list the
/// rows repeat, and each repetition re-asks the lazy specs with the absolute
/// row index and distributes flexible rows against the full container height
/// again.
#[derive(Debug, Default)]
pub struct Grid {
    /// Column specs, left to right. Empty means one flexible column.
    widths: Vec<Sizing>,
    /// Row specs, top to bottom. Empty means one flexible row.
    heights: Vec<RowSizing>,
    /// Pixels between adjacent columns.
    column_gap: i32,
    /// Pixels between adjacent rows, including across repetitions.
    row_gap: i32,
}

impl Grid {
    /// A grid with a single flexible cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column specs.
    #[must_use]
    pub fn widths(mut self, widths: impl IntoIterator<Item = Sizing>) -> Self {
        self.widths = widths.into_iter().collect();
        self
    }

    /// Set the row specs.
    #[must_use]
    pub fn heights(mut self, heights: impl IntoIterator<Item = impl Into<RowSizing>>) -> Self {
        self.heights = heights.into_iter().map(Into::into).collect();
        self
    }

    /// Set the pixels between adjacent columns.
    #[must_use]
    pub fn column_gap(mut self, gap: i32) -> Self {
        self.column_gap = gap;
        self
    }

    /// Set the pixels between adjacent rows.
    #[must_use]
    pub fn row_gap(mut self, gap: i32) -> Self {
        self.row_gap = gap;
        self
    }

    /// Bounds of the cell at `column`/`row` when the grid occupies `bounds`.
    ///
    /// Empty for a column past the declared list. Rows repeat instead: row
    /// indexes past the list wrap into the next repetition, stacked below
    /// the previous one.
    pub fn cell_bounds(&self, bounds: Rect, column: usize, row: usize) -> Rect {
        let widths = self.column_pixels(bounds);
        if column >= widths.len() {
            return Rect::EMPTY;
        }
        let x = bounds.min.x
            + widths[..column]
                .iter()
                .map(|w| w + self.column_gap)
                .sum::<i32>();

        let per_loop = self.heights.len().max(1);
        let loop_index = row / per_loop;
        let index_in_loop = row % per_loop;
        let mut y = bounds.min.y;
        for earlier in 0..loop_index {
            let heights = self.row_pixels(bounds, earlier);
            y += heights.iter().sum::<i32>() + self.row_gap * per_loop as i32;
        }
        let heights = self.row_pixels(bounds, loop_index);
        y += heights[..index_in_loop]
            .iter()
            .map(|h| h + self.row_gap)
            .sum::<i32>();

        Rect::new(x, y, x + widths[column], y + heights[index_in_loop])
    }

    /// Pixel widths of every column.
    fn column_pixels(&self, bounds: Rect) -> Vec<i32> {
        if self.widths.is_empty() {
            return vec![bounds.width()];
        }
        span_pixels(&self.widths, bounds.width(), self.column_gap)
    }

    /// Pixel heights of the rows in one repetition of the row list.
    fn row_pixels(&self, bounds: Rect, loop_index: usize) -> Vec<i32> {
        if self.heights.is_empty() {
            return vec![bounds.height()];
        }
        let per_loop = self.heights.len();
        let specs: Vec<Sizing> = self
            .heights
            .iter()
            .enumerate()
            .map(|(index, spec)| match spec {
                RowSizing::Uniform(sizing) => *sizing,
                RowSizing::Lazy(f) => f(loop_index * per_loop + index),
            })
            .collect();
        span_pixels(&specs, bounds.height(), self.row_gap)
    }
}

/// Resolve a span list against `total` pixels. Intrinsic spans collapse to
/// zero: a grid has no occupant to measure.
fn span_pixels(specs: &[Sizing], total: i32, gap: i32) -> Vec<i32> {
    let mut sizes = vec![0i32; specs.len()];
    let mut flex_slots = Vec::new();
    let mut weights = Vec::new();
    let mut available = total - gap * (specs.len().saturating_sub(1) as i32);
    for (index, spec) in specs.iter().enumerate() {
        match spec {
            Sizing::Fixed(px) => sizes[index] = (*px).max(0),
            Sizing::Intrinsic => {}
            Sizing::Flex(weight) => {
                flex_slots.push(index);
                weights.push(*weight);
            }
        }
        available -= sizes[index];
    }
    for (slot, share) in flex_slots.into_iter().zip(distribute(available, &weights)) {
        sizes[slot] = share;
    }
    sizes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_and_flex_columns() {
        let grid = Grid::new()
            .widths([Sizing::Fixed(30), Sizing::Flex(1), Sizing::Flex(1)])
            .heights([Sizing::Flex(1)]);
        let bounds = Rect::new(0, 0, 100, 100);
        assert_eq!(grid.cell_bounds(bounds, 0, 0), Rect::new(0, 0, 30, 100));
        assert_eq!(grid.cell_bounds(bounds, 1, 0), Rect::new(30, 0, 65, 100));
        assert_eq!(grid.cell_bounds(bounds, 2, 0), Rect::new(65, 0, 100, 100));
        assert_eq!(grid.cell_bounds(bounds, 3, 0), Rect::EMPTY);
    }

    #[test]
    fn empty_specs_mean_one_flexible_cell() {
        let grid = Grid::new();
        let bounds = Rect::new(10, 20, 110, 220);
        assert_eq!(grid.cell_bounds(bounds, 0, 0), bounds);
        assert_eq!(grid.cell_bounds(bounds, 1, 0), Rect::EMPTY);
    }

    #[test]
    fn gaps_separate_cells() {
        let grid = Grid::new()
            .widths([Sizing::Flex(1), Sizing::Flex(1)])
            .heights([Sizing::Fixed(10), Sizing::Fixed(10)])
            .column_gap(4)
            .row_gap(2);
        let bounds = Rect::new(0, 0, 104, 100);
        assert_eq!(grid.cell_bounds(bounds, 0, 0), Rect::new(0, 0, 50, 10));
        assert_eq!(grid.cell_bounds(bounds, 1, 0), Rect::new(54, 0, 104, 10));
        assert_eq!(grid.cell_bounds(bounds, 0, 1), Rect::new(0, 12, 50, 22));
    }

    #[test]
    fn rows_repeat_past_the_declared_list() {
        let grid = Grid::new()
            .widths([Sizing::Flex(1)])
            .heights([Sizing::Fixed(20), Sizing::Fixed(30)]);
        let bounds = Rect::new(0, 0, 10, 100);
        // First repetition.
        assert_eq!(grid.cell_bounds(bounds, 0, 0), Rect::new(0, 0, 10, 20));
        assert_eq!(grid.cell_bounds(bounds, 0, 1), Rect::new(0, 20, 10, 50));
        // Second repetition stacks below the first.
        assert_eq!(grid.cell_bounds(bounds, 0, 2), Rect::new(0, 50, 10, 70));
        assert_eq!(grid.cell_bounds(bounds, 0, 3), Rect::new(0, 70, 10, 100));
    }

    #[test]
    fn lazy_rows_see_the_absolute_index() {
        let grid = Grid::new()
            .widths([Sizing::Flex(1)])
            .heights([RowSizing::lazy(|row| Sizing::Fixed(10 + row as i32))]);
        let bounds = Rect::new(0, 0, 10, 1000);
        assert_eq!(grid.cell_bounds(bounds, 0, 0), Rect::new(0, 0, 10, 10));
        assert_eq!(grid.cell_bounds(bounds, 0, 1), Rect::new(0, 10, 10, 21));
        assert_eq!(grid.cell_bounds(bounds, 0, 2), Rect::new(0, 21, 10, 33));
    }

    #[test]
    fn flexible_rows_distribute_per_repetition() {
        // One fixed and one flexible row; the flexible row absorbs the rest
        // of the container height in every repetition.
        let grid = Grid::new()
            .widths([Sizing::Flex(1)])
            .heights([Sizing::Fixed(10).into(), RowSizing::Uniform(Sizing::Flex(1))]);
        let bounds = Rect::new(0, 0, 10, 50);
        assert_eq!(grid.cell_bounds(bounds, 0, 0), Rect::new(0, 0, 10, 10));
        assert_eq!(grid.cell_bounds(bounds, 0, 1), Rect::new(0, 10, 10, 50));
        // The next repetition starts below and repeats the distribution.
        assert_eq!(grid.cell_bounds(bounds, 0, 2), Rect::new(0, 50, 10, 60));
        assert_eq!(grid.cell_bounds(bounds, 0, 3), Rect::new(0, 60, 10, 100));
    }
}
