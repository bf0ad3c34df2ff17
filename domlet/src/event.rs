/// Pointer and scroll signals delivered to widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Pointer pressed.
    PointerDown {
        x: i32,
        y: i32,
        button: MouseButton,
    },
    /// Pointer moved (with or without a pressed button).
    PointerMove { x: i32, y: i32 },
    /// Pointer released.
    PointerUp { x: i32, y: i32 },
    /// Pointer entered `target`.
    PointerOver { target: Option<String> },
    /// Pointer left `target` for `related`.
    PointerOut {
        target: Option<String>,
        related: Option<String>,
    },
    /// The page scrolled.
    Scroll(ScrollSignal),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Where a widget's box sits relative to the viewport after a scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSignal {
    /// Bottom edge of the widget in viewport coordinates.
    pub bottom: i32,
    /// Height of the viewport.
    pub viewport_height: i32,
}

impl ScrollSignal {
    pub const fn new(bottom: i32, viewport_height: i32) -> Self {
        Self {
            bottom,
            viewport_height,
        }
    }

    /// The widget's bottom edge is inside the viewport.
    pub const fn bottom_visible(&self) -> bool {
        self.bottom < self.viewport_height
    }
}
