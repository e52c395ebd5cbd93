//! Interaction state transition table.

use mindtype_types::InteractionState;

/// Idle time after which a flush reports `ShortPause`.
pub const SHORT_PAUSE_THRESHOLD_MS: u64 = 300;
/// Idle time after which a flush reports `LongPause`.
pub const LONG_PAUSE_THRESHOLD_MS: u64 = 2000;

const _: () = assert!(SHORT_PAUSE_THRESHOLD_MS < LONG_PAUSE_THRESHOLD_MS);

/// Input to the state machine, after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stimulus {
    Typing,
    /// Caret or selection change. `held` is true for a non-empty range.
    Selection { held: bool },
    /// Host reports input stopped. Only moves the idle clock.
    Pause,
    Blur,
    /// Time-driven re-evaluation. `blur_reported` is true while the last
    /// accepted event was a blur.
    Tick {
        idle_ms: u64,
        selection_held: bool,
        blur_reported: bool,
    },
}

/// Compute the next state. First matching rule wins.
pub fn transition(current: InteractionState, stimulus: Stimulus) -> InteractionState {
    use InteractionState::*;

    match stimulus {
        Stimulus::Typing => Typing,
        Stimulus::Selection { held: true } => SelectionActive,
        Stimulus::Selection { held: false } | Stimulus::Pause => current,
        Stimulus::Blur => Blurred,
        Stimulus::Tick {
            blur_reported: true,
            ..
        } => Blurred,
        Stimulus::Tick {
            idle_ms,
            selection_held,
            ..
        } => match current {
            SelectionActive if selection_held => SelectionActive,
            _ => classify_idle(idle_ms),
        },
    }
}

fn classify_idle(idle_ms: u64) -> InteractionState {
    if idle_ms >= LONG_PAUSE_THRESHOLD_MS {
        InteractionState::LongPause
    } else if idle_ms >= SHORT_PAUSE_THRESHOLD_MS {
        InteractionState::ShortPause
    } else {
        InteractionState::Typing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use InteractionState::*;

    const ALL: [InteractionState; 5] = [Typing, ShortPause, LongPause, SelectionActive, Blurred];

    fn tick(idle_ms: u64) -> Stimulus {
        Stimulus::Tick {
            idle_ms,
            selection_held: false,
            blur_reported: false,
        }
    }

    #[test]
    fn test_typing_always_wins() {
        for state in ALL {
            assert_eq!(transition(state, Stimulus::Typing), Typing);
        }
    }

    #[test]
    fn test_blur_always_blurs() {
        for state in ALL {
            assert_eq!(transition(state, Stimulus::Blur), Blurred);
        }
    }

    #[test]
    fn test_pause_signal_does_not_change_state() {
        for state in ALL {
            assert_eq!(transition(state, Stimulus::Pause), state);
        }
    }

    #[test]
    fn test_selection() {
        for state in ALL {
            assert_eq!(transition(state, Stimulus::Selection { held: true }), SelectionActive);
            assert_eq!(transition(state, Stimulus::Selection { held: false }), state);
        }
    }

    #[test]
    fn test_tick_thresholds() {
        for state in [Typing, ShortPause, LongPause] {
            assert_eq!(transition(state, tick(0)), Typing);
            assert_eq!(transition(state, tick(SHORT_PAUSE_THRESHOLD_MS - 1)), Typing);
            assert_eq!(transition(state, tick(SHORT_PAUSE_THRESHOLD_MS)), ShortPause);
            assert_eq!(transition(state, tick(LONG_PAUSE_THRESHOLD_MS - 1)), ShortPause);
            assert_eq!(transition(state, tick(LONG_PAUSE_THRESHOLD_MS)), LongPause);
        }
    }

    #[test]
    fn test_tick_keeps_reported_blur() {
        for idle in [0, SHORT_PAUSE_THRESHOLD_MS, LONG_PAUSE_THRESHOLD_MS * 10] {
            let blurred = Stimulus::Tick {
                idle_ms: idle,
                selection_held: false,
                blur_reported: true,
            };
            assert_eq!(transition(Blurred, blurred), Blurred);
        }
    }

    #[test]
    fn test_tick_leaves_rest_state_without_reported_blur() {
        assert_eq!(transition(Blurred, tick(0)), Typing);
        assert_eq!(transition(Blurred, tick(SHORT_PAUSE_THRESHOLD_MS)), ShortPause);
        assert_eq!(transition(Blurred, tick(LONG_PAUSE_THRESHOLD_MS)), LongPause);
    }

    #[test]
    fn test_tick_with_held_selection() {
        let held = Stimulus::Tick {
            idle_ms: LONG_PAUSE_THRESHOLD_MS,
            selection_held: true,
            blur_reported: false,
        };
        assert_eq!(transition(SelectionActive, held), SelectionActive);
        // Collapsed selection falls back to idle classification.
        assert_eq!(transition(SelectionActive, tick(LONG_PAUSE_THRESHOLD_MS)), LongPause);
        assert_eq!(transition(SelectionActive, tick(10)), Typing);
    }
}
