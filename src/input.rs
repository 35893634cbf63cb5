use crate::interaction::InteractionEvent;

/// Raw input sampled once per frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameInput {
    pub over_button: bool,
    pub mouse_pressed: bool,
    pub mouse_released: bool,
    pub touching: bool,
    pub tab_pressed: bool,
    pub activate_key_pressed: bool, // Enter or Space
}

#[derive(Debug, Default, PartialEq)]
pub struct FrameOutcome {
    pub events: Vec<InteractionEvent>,
    pub activate: bool,
}

/// Turns per-frame input snapshots into button events and activations.
#[derive(Debug, Default)]
pub struct InputTracker {
    was_over: bool,
    was_touching: bool,
    touch_started_over: bool,
    press_started_over: bool,
    focused: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn update(&mut self, input: FrameInput) -> FrameOutcome {
        let mut out = FrameOutcome::default();

        if input.over_button != self.was_over {
            out.events.push(if input.over_button {
                InteractionEvent::PointerEnter
            } else {
                InteractionEvent::PointerLeave
            });
            self.was_over = input.over_button;
        }

        // Touches only count when they begin on the button
        if input.touching != self.was_touching {
            if input.touching {
                self.touch_started_over = input.over_button;
                if input.over_button {
                    out.events.push(InteractionEvent::TouchStart);
                }
            } else {
                if self.touch_started_over {
                    out.events.push(InteractionEvent::TouchEnd);
                }
                self.touch_started_over = false;
            }
            self.was_touching = input.touching;
        }

        if input.mouse_pressed {
            self.press_started_over = input.over_button;
            if input.over_button {
                out.events.push(InteractionEvent::PointerDown);
            } else if self.focused {
                self.focused = false;
                out.events.push(InteractionEvent::Blur);
            }
        }

        if input.mouse_released {
            if input.over_button {
                out.events.push(InteractionEvent::PointerUp);
                if self.press_started_over {
                    out.activate = true;
                }
            }
            self.press_started_over = false;
        }

        if input.tab_pressed {
            self.focused = !self.focused;
            out.events.push(if self.focused {
                InteractionEvent::Focus
            } else {
                InteractionEvent::Blur
            });
        }

        if input.activate_key_pressed && self.focused {
            out.activate = true;
        }

        out
    }
}
