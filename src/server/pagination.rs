pub const QUESTIONS_PER_PAGE: usize = 10;

/// Slice of `items` for a 1-indexed `page`, clipped to the available range.
/// A page past the end yields an empty slice; callers decide what that means.
pub fn paginate<T>(items: &[T], page: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(QUESTIONS_PER_PAGE);
    if start >= items.len() {
        return &[];
    }
    let end = (start + QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}
