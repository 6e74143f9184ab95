use super::messages::Message;

/// Scroll direction of a mouse-wheel event, decoupled from the toolkit's
/// event accessors so bindings stay testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    Up,
    Down,
}

/// One wheel binding: (modifier set, direction) -> message.
pub struct WheelBinding {
    pub ctrl: bool,
    pub scroll: Scroll,
    pub action: Message,
}

/// The full wheel dispatch table. Plain wheel events are not bound here;
/// they fall through to the editor's own scrolling.
pub const WHEEL_BINDINGS: [WheelBinding; 2] = [
    WheelBinding {
        ctrl: true,
        scroll: Scroll::Up,
        action: Message::ZoomIn,
    },
    WheelBinding {
        ctrl: true,
        scroll: Scroll::Down,
        action: Message::ZoomOut,
    },
];

/// Look up a wheel event in the dispatch table.
pub fn dispatch_wheel(scroll: Scroll, ctrl: bool) -> Option<Message> {
    WHEEL_BINDINGS
        .iter()
        .find(|b| b.ctrl == ctrl && b.scroll == scroll)
        .map(|b| b.action.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_wheel_zooms() {
        assert_eq!(dispatch_wheel(Scroll::Up, true), Some(Message::ZoomIn));
        assert_eq!(dispatch_wheel(Scroll::Down, true), Some(Message::ZoomOut));
    }

    #[test]
    fn test_plain_wheel_falls_through() {
        assert_eq!(dispatch_wheel(Scroll::Up, false), None);
        assert_eq!(dispatch_wheel(Scroll::Down, false), None);
    }
}
