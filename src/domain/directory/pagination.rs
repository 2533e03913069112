//! Result paging and transport-safe message splitting.

/// Resources shown per results page.
pub const PAGE_SIZE: usize = 3;

/// Longest body a single outbound SMS may carry (concatenated segments).
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 1600;

/// Returns the window for `page` and whether more items follow it.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> (&[T], bool) {
    let start = page.saturating_mul(page_size);
    let end = start.saturating_add(page_size);
    if start >= items.len() {
        (&[], false)
    } else if end >= items.len() {
        (&items[start..], false)
    } else {
        (&items[start..end], true)
    }
}

/// Splits `text` into chunks of at most `max_len` characters on line
/// boundaries. A single line longer than `max_len` is kept whole, and
/// chunks holding only blank lines are dropped.
pub fn split_message(text: &str, max_len: usize) -> Vec<String> {
    if text.chars().count() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut pending: Vec<&str> = Vec::new();
    let mut pending_len = 0;

    for line in text.split('\n') {
        let line_len = line.chars().count();
        if !pending.is_empty() && pending_len + 1 + line_len >= max_len {
            flush(&mut chunks, &mut pending);
            pending_len = 0;
        }
        if !pending.is_empty() {
            pending_len += 1;
        }
        pending_len += line_len;
        pending.push(line);
    }
    flush(&mut chunks, &mut pending);
    chunks
}

fn flush(chunks: &mut Vec<String>, pending: &mut Vec<&str>) {
    if pending.iter().any(|line| !line.trim().is_empty()) {
        chunks.push(pending.join("\n"));
    }
    pending.clear();
}
