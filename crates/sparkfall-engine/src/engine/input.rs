/// Logical keys the game reacts to.
///
/// `Other` stands for any unbound key. It does nothing while playing but
/// still counts as "any key" on the game-over screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Rotate,
    SoftDrop,
    Quit,
    Other,
}

/// Discrete input delivered to [`GameLoop::tick`](super::GameLoop::tick).
///
/// Front ends must not forward auto-repeat presses; held keys are repeated
/// by the engine's own timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum InputEvent {
    Pressed(Key),
    Released(Key),
    /// The window or terminal asked to close.
    CloseRequested,
}

impl InputEvent {
    /// Whether this event ends the session.
    #[must_use]
    pub fn is_quit_request(self) -> bool {
        matches!(self, Self::CloseRequested | Self::Pressed(Key::Quit))
    }
}

/// Hold state of the keys that act continuously.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub soft_drop: bool,
}

impl HeldKeys {
    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn set(&mut self, key: Key, held: bool) {
        match key {
            Key::Left => self.left = held,
            Key::Right => self.right = held,
            Key::SoftDrop => self.soft_drop = held,
            Key::Rotate | Key::Quit | Key::Other => {}
        }
    }
}
