use std::{collections::HashMap, time::Duration};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use sparkfall_engine::{InputEvent, Key};

/// How long a key counts as held after its first press when the terminal
/// cannot report releases. Covers the OS delay before auto-repeat starts,
/// which ranges from roughly 250 ms to 660 ms.
pub(crate) const EMULATED_INITIAL_TIMEOUT: Duration = Duration::from_millis(700);

/// How long a key counts as held after an auto-repeat press.
pub(crate) const EMULATED_REPEAT_TIMEOUT: Duration = Duration::from_millis(150);

pub(crate) fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Rotate,
        KeyCode::Down => Key::SoftDrop,
        KeyCode::Char('q') | KeyCode::Esc => Key::Quit,
        _ => Key::Other,
    }
}

fn is_interrupt(event: &KeyEvent) -> bool {
    event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL)
}

const HOLDABLE_KEYS: [Key; 3] = [Key::Left, Key::Right, Key::SoftDrop];

fn is_holdable(key: Key) -> bool {
    HOLDABLE_KEYS.contains(&key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReleaseMode {
    /// The terminal reports press, repeat and release separately.
    Native,
    /// Only presses arrive; a held key shows up as repeated presses.
    Emulated { initial: Duration, repeat: Duration },
}

/// A key held under emulated release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Hold {
    /// Time since the last press of the key.
    age: Duration,
    /// Whether auto-repeat presses have arrived since the first press.
    repeating: bool,
}

impl Hold {
    const fn first_press() -> Self {
        Self {
            age: Duration::ZERO,
            repeating: false,
        }
    }

    const fn repeat_press() -> Self {
        Self {
            age: Duration::ZERO,
            repeating: true,
        }
    }

    fn is_expired(self, initial: Duration, repeat: Duration) -> bool {
        let timeout = if self.repeating { repeat } else { initial };
        self.age >= timeout
    }
}

/// Turns terminal events into engine input.
///
/// With native release reporting this is a plain translation that drops
/// auto-repeat. Otherwise held keys are tracked here: the first press is
/// forwarded, later presses of the same key only refresh it, and a release
/// is synthesized once no press has arrived for the timeout. The timeout is
/// long until the first auto-repeat press arrives and short afterwards, so
/// the silent gap before auto-repeat starts does not end a hold.
#[derive(Debug, Clone)]
pub(crate) struct KeyTracker {
    mode: ReleaseMode,
    held: HashMap<Key, Hold>,
}

impl KeyTracker {
    pub(crate) fn native() -> Self {
        Self {
            mode: ReleaseMode::Native,
            held: HashMap::new(),
        }
    }

    pub(crate) fn emulated(initial: Duration, repeat: Duration) -> Self {
        Self {
            mode: ReleaseMode::Emulated { initial, repeat },
            held: HashMap::new(),
        }
    }

    pub(crate) fn for_terminal(supports_key_release: bool) -> Self {
        if supports_key_release {
            Self::native()
        } else {
            Self::emulated(EMULATED_INITIAL_TIMEOUT, EMULATED_REPEAT_TIMEOUT)
        }
    }

    /// Translates one frame's worth of terminal events; `dt` is the frame's
    /// elapsed time.
    pub(crate) fn translate(&mut self, events: &[Event], dt: Duration) -> Vec<InputEvent> {
        for hold in self.held.values_mut() {
            hold.age = hold.age.saturating_add(dt);
        }

        let mut out = Vec::new();
        for event in events.iter().filter_map(Event::as_key_event) {
            if is_interrupt(&event) {
                out.push(InputEvent::CloseRequested);
                continue;
            }
            let key = map_key(event.code);
            match (self.mode, event.kind) {
                (_, KeyEventKind::Repeat) => {}
                (ReleaseMode::Native, KeyEventKind::Press) => out.push(InputEvent::Pressed(key)),
                (ReleaseMode::Native, KeyEventKind::Release) => {
                    out.push(InputEvent::Released(key));
                }
                (ReleaseMode::Emulated { .. }, KeyEventKind::Press) => {
                    if !is_holdable(key) {
                        out.push(InputEvent::Pressed(key));
                    } else if let Some(hold) = self.held.get_mut(&key) {
                        *hold = Hold::repeat_press();
                    } else {
                        self.held.insert(key, Hold::first_press());
                        out.push(InputEvent::Pressed(key));
                    }
                }
                (ReleaseMode::Emulated { .. }, KeyEventKind::Release) => {
                    if self.held.remove(&key).is_some() {
                        out.push(InputEvent::Released(key));
                    }
                }
            }
        }

        if let ReleaseMode::Emulated { initial, repeat } = self.mode {
            for key in HOLDABLE_KEYS {
                if self
                    .held
                    .get(&key)
                    .is_some_and(|hold| hold.is_expired(initial, repeat))
                {
                    self.held.remove(&key);
                    out.push(InputEvent::Released(key));
                }
            }
        }
        out
    }
}
