/// Normalised reading position of a scroll container.
///
/// Returns `None` when there is nothing to scroll (content no taller than the
/// viewport) or the measurements are not finite; callers keep their previous
/// progress in that case.
pub fn scroll_progress(scroll_top: f32, scroll_height: f32, client_height: f32) -> Option<f32> {
    if !(scroll_top.is_finite() && scroll_height.is_finite() && client_height.is_finite()) {
        return None;
    }

    let range = scroll_height - client_height;
    if range <= 0.0 {
        return None;
    }

    Some((scroll_top / range).clamp(0.0, 1.0))
}
