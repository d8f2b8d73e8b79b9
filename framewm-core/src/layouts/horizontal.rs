use crate::models::Rect;

/// Full height for everyone, the frame width split among them. The last
/// client absorbs the rounding remainder.
pub fn arrange(rect: Rect, count: usize) -> Vec<Rect> {
    let count = count as i32;
    let width = rect.w / count;
    (0..count)
        .map(|i| {
            let w = if i == count - 1 { rect.w - width * (count - 1) } else { width };
            Rect::new(rect.x + i * width, rect.y, w, rect.h)
        })
        .collect()
}
