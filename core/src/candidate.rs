//! Paginated candidate list with cursor navigation.
//!
//! The cursor is an absolute index into the whole list; the current page is
//! derived from it (`cursor / page_size`). Moving the cursor across a page
//! boundary turns the page.

use std::ops::Range;

/// Default number of candidates shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A paginated list of candidate strings.
///
/// Invariant: when the list is non-empty, `cursor < len()`; when it is empty,
/// `cursor == 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateList {
    /// All available candidates, in prediction order
    candidates: Vec<String>,

    /// Number of candidates per page
    page_size: usize,

    /// Absolute index of the highlighted candidate
    cursor: usize,
}

impl CandidateList {
    /// Create a new empty candidate list.
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Create a candidate list with specified page size.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            candidates: Vec::new(),
            page_size: page_size.max(1), // Ensure at least 1
            cursor: 0,
        }
    }

    /// Get the page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replace the candidates and go back to the first one.
    pub fn set_candidates(&mut self, candidates: Vec<String>) {
        self.candidates = candidates;
        self.cursor = 0;
    }

    /// Get all candidates.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Get the total number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Get the total number of pages.
    pub fn num_pages(&self) -> usize {
        self.candidates.len().div_ceil(self.page_size)
    }

    /// Get the current page index (0-based).
    pub fn current_page(&self) -> usize {
        self.cursor / self.page_size
    }

    /// Absolute index of the highlighted candidate.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the highlighted candidate within the current page.
    pub fn page_cursor(&self) -> usize {
        self.cursor % self.page_size
    }

    fn current_page_range(&self) -> Range<usize> {
        let start = self.current_page() * self.page_size;
        let end = (start + self.page_size).min(self.candidates.len());
        start..end
    }

    /// Get the candidates for the current page.
    pub fn current_page_candidates(&self) -> &[String] {
        if self.candidates.is_empty() {
            return &[];
        }
        &self.candidates[self.current_page_range()]
    }

    /// Get the currently highlighted candidate.
    pub fn selected_candidate(&self) -> Option<&str> {
        self.candidates.get(self.cursor).map(String::as_str)
    }

    /// Candidate at `slot` on the current page, if the page has that many.
    pub fn candidate_on_page(&self, slot: usize) -> Option<&str> {
        self.current_page_candidates().get(slot).map(String::as_str)
    }

    /// Move the cursor one candidate back.
    /// Returns true if the page changed.
    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let page = self.current_page();
        self.cursor -= 1;
        page != self.current_page()
    }

    /// Move the cursor one candidate forward.
    /// Returns true if the page changed.
    pub fn move_right(&mut self) -> bool {
        if self.cursor + 1 >= self.candidates.len() {
            return false;
        }
        let page = self.current_page();
        self.cursor += 1;
        page != self.current_page()
    }

    /// Move to the previous page, keeping the page-relative slot.
    /// Returns true if the page changed.
    pub fn page_up(&mut self) -> bool {
        if self.current_page() == 0 {
            return false;
        }
        self.cursor -= self.page_size;
        true
    }

    /// Move to the next page, clamping to the last candidate on a short page.
    /// Returns true if the page changed.
    pub fn page_down(&mut self) -> bool {
        if self.current_page() + 1 >= self.num_pages() {
            return false;
        }
        self.cursor = (self.cursor + self.page_size).min(self.candidates.len() - 1);
        true
    }

    /// Clear the candidate list.
    pub fn clear(&mut self) {
        self.candidates.clear();
        self.cursor = 0;
    }
}

impl Default for CandidateList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(n: usize) -> CandidateList {
        let mut list = CandidateList::with_page_size(10);
        list.set_candidates((0..n).map(|i| format!("c{i}")).collect());
        list
    }

    #[test]
    fn test_empty_list() {
        let list = CandidateList::new();
        assert_eq!(list.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(list.num_pages(), 0);
        assert!(list.current_page_candidates().is_empty());
        assert_eq!(list.selected_candidate(), None);
    }

    #[test]
    fn test_page_size_at_least_one() {
        assert_eq!(CandidateList::with_page_size(0).page_size(), 1);
    }

    #[test]
    fn test_right_turns_page_at_boundary() {
        let mut list = list(12);
        for _ in 0..9 {
            assert!(!list.move_right());
        }
        assert_eq!(list.cursor(), 9);
        assert_eq!(list.current_page(), 0);

        assert!(list.move_right());
        assert_eq!(list.current_page(), 1);
        assert_eq!(list.page_cursor(), 0);
        assert_eq!(list.current_page_candidates(), ["c10", "c11"]);
    }

    #[test]
    fn test_right_stops_at_last() {
        let mut list = list(3);
        list.move_right();
        list.move_right();
        assert!(!list.move_right());
        assert_eq!(list.cursor(), 2);
    }

    #[test]
    fn test_left_turns_back_to_last_slot() {
        let mut list = list(12);
        for _ in 0..10 {
            list.move_right();
        }
        assert!(list.move_left());
        assert_eq!(list.current_page(), 0);
        assert_eq!(list.page_cursor(), 9);
        assert!(!CandidateList::new().move_left());
    }

    #[test]
    fn test_page_down_clamps_on_short_page() {
        let mut list = list(12);
        for _ in 0..5 {
            list.move_right();
        }
        assert!(list.page_down());
        assert_eq!(list.cursor(), 11);
        assert!(!list.page_down());

        assert!(list.page_up());
        assert_eq!(list.cursor(), 1);
        assert!(!list.page_up());
    }

    #[test]
    fn test_candidate_on_page() {
        let mut list = list(12);
        assert_eq!(list.candidate_on_page(9), Some("c9"));
        list.page_down();
        assert_eq!(list.candidate_on_page(1), Some("c11"));
        assert_eq!(list.candidate_on_page(2), None);
        assert_eq!(list.candidate_on_page(9), None);
    }

    #[test]
    fn test_set_candidates_resets_cursor() {
        let mut list = list(12);
        list.page_down();
        list.set_candidates(vec!["x".into()]);
        assert_eq!(list.cursor(), 0);
        assert_eq!(list.selected_candidate(), Some("x"));
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.cursor(), 0);
    }
}
