use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, Modifiers};

/// Current input state for a single window.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,

    pub focused: bool,

    /// Keys currently held.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies an event to the held state and records the transition in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Release events are not delivered to unfocused windows.
                    for key in self.keys_down.drain() {
                        frame.keys_released.insert(key);
                    }
                }
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                ..
            } => {
                self.modifiers = *modifiers;

                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }
        }

        frame.push_event(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState, repeat: bool) -> InputEvent {
        InputEvent::Key {
            key,
            state,
            modifiers: Modifiers::default(),
            code: 0,
            repeat,
        }
    }

    #[test]
    fn press_marks_key_down_once() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::ArrowUp, KeyState::Pressed, false));
        assert!(state.key_down(Key::ArrowUp));
        assert!(frame.key_pressed(Key::ArrowUp));

        frame.clear();
        state.apply_event(&mut frame, key(Key::ArrowUp, KeyState::Pressed, true));
        assert!(state.key_down(Key::ArrowUp));
        assert!(!frame.key_pressed(Key::ArrowUp));
        assert_eq!(frame.events.len(), 1);
    }

    #[test]
    fn release_clears_key() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::ArrowDown, KeyState::Pressed, false));
        state.apply_event(&mut frame, key(Key::ArrowDown, KeyState::Released, false));

        assert!(!state.key_down(Key::ArrowDown));
        assert!(frame.key_released(Key::ArrowDown));
    }

    #[test]
    fn focus_loss_releases_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::ArrowUp, KeyState::Pressed, false));
        frame.clear();
        state.apply_event(&mut frame, InputEvent::Focused(false));

        assert!(state.keys_down.is_empty());
        assert!(frame.key_released(Key::ArrowUp));
    }

    #[test]
    fn pressed_digit_ignores_repeats_and_releases() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Digit2, KeyState::Released, false));
        state.apply_event(&mut frame, key(Key::Digit3, KeyState::Pressed, true));
        assert_eq!(frame.pressed_digit(), None);

        state.apply_event(&mut frame, key(Key::Digit4, KeyState::Pressed, false));
        assert_eq!(frame.pressed_digit(), Some(4));
    }

    #[test]
    fn digit_keys_display_as_numbers() {
        assert_eq!(Key::Digit7.to_string(), "7");
        assert_eq!(Key::Escape.to_string(), "Escape");
    }
}
