use crate::models::Rect;

/// Near-square grid, filled row by row. Trailing cells in the last row and
/// column absorb the rounding remainders.
pub fn arrange(rect: Rect, count: usize) -> Vec<Rect> {
    let cols = (count as f64).sqrt().ceil() as i32;
    let rows = (count as i32 + cols - 1) / cols;
    let cell_w = rect.w / cols;
    let cell_h = rect.h / rows;
    (0..count as i32)
        .map(|i| {
            let col = i % cols;
            let row = i / cols;
            let w = if col == cols - 1 { rect.w - cell_w * (cols - 1) } else { cell_w };
            let h = if row == rows - 1 { rect.h - cell_h * (rows - 1) } else { cell_h };
            Rect::new(rect.x + col * cell_w, rect.y + row * cell_h, w, h)
        })
        .collect()
}
