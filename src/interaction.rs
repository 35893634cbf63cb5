// Cosmetic pointer/focus flags for the button. They only affect how it is drawn.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEvent {
    PointerEnter,
    PointerLeave,
    PointerDown,
    PointerUp,
    TouchStart,
    TouchEnd,
    Focus,
    Blur,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Interaction {
    pub hovered: bool,
    pub pressed: bool,
}

impl Interaction {
    pub fn apply(&mut self, event: InteractionEvent) {
        match event {
            InteractionEvent::PointerEnter | InteractionEvent::Focus => {
                self.hovered = true;
            }
            InteractionEvent::PointerDown => self.pressed = true,
            InteractionEvent::PointerUp => self.pressed = false,
            InteractionEvent::TouchStart => {
                self.hovered = true;
                self.pressed = true;
            }
            InteractionEvent::PointerLeave | InteractionEvent::TouchEnd | InteractionEvent::Blur => {
                self.hovered = false;
                self.pressed = false;
            }
        }
    }
}
