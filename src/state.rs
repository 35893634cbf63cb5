#[derive(Debug, PartialEq, Clone, Copy)]
pub enum FlashState {
    Idle,     // Nothing over the background, only the button
    Flashing, // Overlay is up until the pending reset fires
}
