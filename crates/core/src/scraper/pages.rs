//! Page arithmetic for the listing pass.

use std::ops::Range;

use crate::catalog::PAGE_LIMIT;

/// Movies left to fetch when starting at `start_page` instead of page 1.
pub fn remaining_count(movie_count: i64, start_page: u32) -> i64 {
    movie_count - i64::from(start_page.saturating_sub(1)) * i64::from(PAGE_LIMIT)
}

/// Exclusive upper page bound: `floor(count / limit) + 1`, raised to 2 when
/// it would be 1 so that small result sets still visit page 1.
pub fn page_count(remaining: i64) -> u32 {
    let limit = i64::from(PAGE_LIMIT);
    let count = u32::try_from(remaining.max(0) / limit + 1).unwrap_or(u32::MAX);
    if count == 1 {
        2
    } else {
        count
    }
}

/// Pages visited for a run: `start_page .. page_count(remaining)`.
pub fn page_range(start_page: u32, remaining: i64) -> Range<u32> {
    start_page..page_count(remaining)
}
