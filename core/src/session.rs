//! IME session state.
//!
//! The `ImeSession` groups the per-session UI state (composition buffer and
//! candidate list) that changes with every key event. It is separate from the
//! shared dictionary: the index provides the words, the session tracks what
//! the user is currently composing.

use crate::candidate::CandidateList;
use crate::context::TextServiceHost;
use crate::input_buffer::InputBuffer;

#[derive(Debug, Clone, Default)]
pub struct ImeSession {
    /// Uncommitted script text
    input_buffer: InputBuffer,

    /// Latest prediction result with paging state
    candidates: CandidateList,
}

impl ImeSession {
    /// Create a new empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with specified candidate page size.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            input_buffer: InputBuffer::new(),
            candidates: CandidateList::with_page_size(page_size),
        }
    }

    pub fn input_buffer(&self) -> &InputBuffer {
        &self.input_buffer
    }

    pub fn input_buffer_mut(&mut self) -> &mut InputBuffer {
        &mut self.input_buffer
    }

    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    pub fn candidates_mut(&mut self) -> &mut CandidateList {
        &mut self.candidates
    }

    /// Composing means there is buffered text or an open candidate list.
    pub fn is_composing(&self) -> bool {
        !self.input_buffer.is_empty() || !self.candidates.is_empty()
    }

    /// Clear all session state.
    pub fn clear(&mut self) {
        self.input_buffer.clear();
        self.candidates.clear();
    }

    /// Push the composition text and cursor to the host.
    pub fn sync_composition<H: TextServiceHost + ?Sized>(&self, host: &mut H) {
        host.set_composition_text(self.input_buffer.text());
        host.set_composition_cursor(self.input_buffer.cursor());
    }

    /// Push the visible candidate page, highlight and page indicator to the
    /// host. An empty list hides the window.
    pub fn sync_candidates<H: TextServiceHost + ?Sized>(&self, host: &mut H) {
        let list = &self.candidates;
        host.set_candidate_list(list.current_page_candidates());
        host.set_candidate_cursor(list.page_cursor());
        host.set_candidates_visible(!list.is_empty());

        if list.num_pages() > 1 {
            let indicator = format!("{}/{}", list.current_page() + 1, list.num_pages());
            host.set_auxiliary_text(&indicator);
        } else {
            host.set_auxiliary_text("");
        }
    }

    /// Sync everything the host displays.
    pub fn sync_to_host<H: TextServiceHost + ?Sized>(&self, host: &mut H) {
        self.sync_composition(host);
        self.sync_candidates(host);
    }
}
