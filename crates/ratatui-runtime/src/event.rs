use crossterm::event::Event as CrosstermEvent;

/// Events produced by the frame clock.
#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum ClockEvent {
    /// The frame deadline has passed.
    Frame,
    /// Terminal events such as key input, mouse, and resize.
    Crossterm(CrosstermEvent),
}
