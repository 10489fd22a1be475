//! Maps a `(limit, offset)` window onto the site's fixed-size result pages.
//!
//! Remote pages are numbered from 1. Page 1 is what the unpaged probe request
//! returns, so it is never requested a second time.

use std::ops::RangeInclusive;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePlan {
    /// 0-based index of the page holding `offset`.
    pub starting_page: usize,
    /// Position of `offset` inside that page.
    pub start_offset: usize,
    first_page: usize,
    last_page: usize,
    limit: usize,
}

impl PagePlan {
    pub fn new(total_amount: usize, page_size: usize, limit: usize, offset: usize) -> Self {
        if page_size == 0 {
            return Self::empty(0, 0);
        }

        let starting_page = offset / page_size;
        let start_offset = offset % page_size;
        let last_page = total_amount.div_ceil(page_size);

        if total_amount == 0 || limit == 0 || starting_page >= last_page {
            return Self::empty(starting_page, start_offset);
        }

        Self {
            starting_page,
            start_offset,
            first_page: starting_page + 1,
            last_page,
            limit,
        }
    }

    fn empty(starting_page: usize, start_offset: usize) -> Self {
        Self {
            starting_page,
            start_offset,
            first_page: 1,
            last_page: 0,
            limit: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first_page > self.last_page
    }

    /// Remote page numbers to visit, ascending.
    pub fn pages(&self) -> RangeInclusive<usize> {
        self.first_page..=self.last_page
    }

    /// Whether the visit starts on the probe page.
    pub fn starts_on_probe_page(&self) -> bool {
        !self.is_empty() && self.first_page == 1
    }

    pub fn is_done(&self, accepted: usize) -> bool {
        accepted >= self.limit
    }

    /// Whether row `position` of remote page `page` belongs to the window,
    /// given how many rows were accepted before it.
    pub fn accepts(&self, page: usize, position: usize, accepted: usize) -> bool {
        if self.is_done(accepted) || !self.pages().contains(&page) {
            return false;
        }
        page != self.first_page || position >= self.start_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accepted_rows(plan: &PagePlan, page_size: usize) -> Vec<(usize, usize)> {
        let mut accepted = Vec::new();
        for page in plan.pages() {
            for position in 0..page_size {
                if plan.accepts(page, position, accepted.len()) {
                    accepted.push((page, position));
                }
            }
        }
        accepted
    }

    #[test]
    fn offset_into_second_page_continues_into_third() {
        let plan = PagePlan::new(50, 24, 10, 30);

        assert_eq!(plan.starting_page, 1);
        assert_eq!(plan.start_offset, 6);
        assert_eq!(plan.pages(), 2..=3);
        assert!(!plan.starts_on_probe_page());

        let rows = accepted_rows(&plan, 24);
        assert_eq!(rows.len(), 10);
        assert_eq!(rows.first(), Some(&(2, 6)));
        assert_eq!(rows.last(), Some(&(2, 15)));
    }

    #[test]
    fn window_spilling_over_page_boundary() {
        let plan = PagePlan::new(50, 24, 10, 40);
        let rows = accepted_rows(&plan, 24);

        assert_eq!(plan.pages(), 2..=3);
        assert_eq!(&rows[..2], &[(2, 16), (2, 17)]);
        assert_eq!(rows[8], (3, 0));
        assert_eq!(rows.len(), 10);
    }

    #[test]
    fn zero_offset_starts_on_probe_page() {
        let plan = PagePlan::new(50, 24, 5, 0);
        assert!(plan.starts_on_probe_page());
        assert_eq!(plan.pages(), 1..=3);
        assert_eq!(
            accepted_rows(&plan, 24),
            (0..5).map(|p| (1, p)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn offset_within_first_page_skips_leading_rows() {
        let plan = PagePlan::new(50, 24, 3, 4);
        assert!(plan.starts_on_probe_page());
        assert_eq!(accepted_rows(&plan, 24), vec![(1, 4), (1, 5), (1, 6)]);
    }

    #[test]
    fn intra_page_offset_only_applies_to_first_visited_page() {
        let plan = PagePlan::new(100, 10, 20, 25);
        assert!(plan.accepts(4, 0, 5));
        assert!(!plan.accepts(3, 4, 0));
        assert!(plan.accepts(3, 5, 0));
    }

    #[test]
    fn no_results_is_an_empty_plan() {
        let plan = PagePlan::new(0, 24, 10, 0);
        assert!(plan.is_empty());
        assert_eq!(plan.pages().count(), 0);
    }

    #[test]
    fn zero_limit_accepts_nothing() {
        let plan = PagePlan::new(50, 24, 0, 0);
        assert!(plan.is_empty());
        assert!(!plan.accepts(1, 0, 0));
    }

    #[test]
    fn zero_page_size_is_an_empty_plan() {
        let plan = PagePlan::new(50, 0, 10, 0);
        assert!(plan.is_empty());
    }

    #[test]
    fn offset_past_the_end_is_an_empty_plan() {
        let plan = PagePlan::new(50, 24, 10, 72);
        assert_eq!(plan.starting_page, 3);
        assert!(plan.is_empty());
    }

    #[test]
    fn starting_page_and_offset_follow_integer_division() {
        for page_size in 1..=30 {
            for offset in 0..100 {
                let plan = PagePlan::new(1000, page_size, 1, offset);
                assert_eq!(plan.starting_page, offset / page_size);
                assert_eq!(plan.start_offset, offset % page_size);
                assert!(plan.pages().all(|page| page > plan.starting_page));
            }
        }
    }
}
