//! Property tests over random key sequences.

use std::sync::Arc;

use libtibetan::{vk, ImeEngine, KeyEvent, ModifierState, PredictionIndex, WordSource};
use proptest::prelude::*;

fn index() -> Arc<PredictionIndex> {
    let mut index = PredictionIndex::new();
    for word in [
        "\u{0f40}",
        "\u{0f40}\u{0f74}",
        "\u{0f40}\u{0f74}\u{0f53}",
        "\u{0f66}\u{0f90}",
        "\u{0f66}\u{0f90}\u{0f74}",
        "\u{0f60}",
        "\u{0f56}\u{0f7c}\u{0f51}",
    ] {
        index.insert(WordSource::Words, word);
    }
    index.insert(WordSource::Extensions, "\u{0f40}\u{0f0b}");
    Arc::new(index)
}

fn key_strategy() -> impl Strategy<Value = KeyEvent> {
    prop_oneof![
        6 => proptest::sample::select("csuandbomMk1230 ,.;".chars().collect::<Vec<_>>())
            .prop_map(|ch| KeyEvent::from_ascii(ch).unwrap()),
        1 => proptest::sample::select(vec![vk::LEFT, vk::RIGHT, vk::UP, vk::DOWN, vk::BACK, vk::ESCAPE, vk::RETURN])
            .prop_map(KeyEvent::special),
        1 => proptest::sample::select("iqm".chars().collect::<Vec<_>>())
            .prop_map(|ch| KeyEvent::from_ascii(ch).unwrap().with_alt_ctrl_shift()),
    ]
}

proptest! {
    #[test]
    fn modifier_is_one_shot(keys in proptest::collection::vec(key_strategy(), 1..40)) {
        let mut ime = ImeEngine::new(index());
        ime.on_activate();

        for event in &keys {
            let before = ime.modifier_state();
            ime.on_key(event);

            let arms = before == ModifierState::Inactive
                && event.base_char() == Some('m')
                && !event.modifiers.ctrl()
                && !event.modifiers.alt();
            if arms {
                prop_assert!(ime.modifier_state().is_pending());
            } else if event.is_printable_char() {
                prop_assert_eq!(ime.modifier_state(), ModifierState::Inactive);
            }
        }
    }

    #[test]
    fn candidate_cursor_stays_in_range(keys in proptest::collection::vec(key_strategy(), 1..40)) {
        let mut ime = ImeEngine::new(index());
        ime.on_activate();

        for event in &keys {
            if ime.should_intercept(event) {
                ime.on_key(event);
            }
            let list = ime.session().candidates();
            if list.is_empty() {
                prop_assert_eq!(list.cursor(), 0);
                prop_assert!(!ime.context().candidates_visible);
            } else {
                prop_assert!(list.cursor() < list.len());
                prop_assert!(ime.context().candidate_cursor < ime.context().candidates.len());
                prop_assert!(!ime.session().input_buffer().is_empty());
            }
            if ime.context().has_commit() {
                prop_assert!(!ime.is_composing());
            }
        }
    }
}
