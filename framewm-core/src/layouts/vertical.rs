use crate::models::Rect;

/// Full width for everyone, the frame height split among them. The last
/// client absorbs the rounding remainder.
pub fn arrange(rect: Rect, count: usize) -> Vec<Rect> {
    let count = count as i32;
    let height = rect.h / count;
    (0..count)
        .map(|i| {
            let h = if i == count - 1 { rect.h - height * (count - 1) } else { height };
            Rect::new(rect.x, rect.y + i * height, rect.w, h)
        })
        .collect()
}
