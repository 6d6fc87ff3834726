/// First visible row of a list so that `cursor` stays within `height` rows.
pub fn scroll_offset(cursor: usize, height: usize) -> usize {
    if height == 0 || cursor < height {
        0
    } else {
        cursor + 1 - height
    }
}
