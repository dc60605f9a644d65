use std::sync::Mutex;

/// Viewport widths below this lock page scroll while the widget is open.
pub const MOBILE_BREAKPOINT: u32 = 768;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatbotState {
    pub open: bool,
    pub scroll_locked: bool,
}

#[derive(Debug)]
struct Inner {
    open: bool,
    viewport_width: u32,
}

/// Open/closed state for the chat widget, one logical instance per running
/// session. The scroll lock follows the open flag on narrow viewports and is
/// always released on close; wide viewports are never locked.
pub struct ChatbotVisibility {
    inner: Mutex<Inner>,
}

impl Default for ChatbotVisibility {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Inner {
                open: false,
                // Until a consumer reports a width, assume desktop.
                viewport_width: 1024,
            }),
        }
    }
}

impl ChatbotVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_open(&self, open: bool) {
        self.inner.lock().unwrap().open = open;
    }

    /// Resize events re-evaluate the lock: widening past the breakpoint
    /// releases it even while the widget stays open.
    pub fn set_viewport_width(&self, width: u32) {
        self.inner.lock().unwrap().viewport_width = width;
    }

    /// Close and release, for a consumer going away entirely.
    pub fn reset(&self) {
        self.set_open(false);
    }

    pub fn state(&self) -> ChatbotState {
        let inner = self.inner.lock().unwrap();
        ChatbotState {
            open: inner.open,
            scroll_locked: inner.open && inner.viewport_width < MOBILE_BREAKPOINT,
        }
    }
}
