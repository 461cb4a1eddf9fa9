//! Stable display colors per player handle.
//!
//! Colors are handed out from a fixed palette in first-seen order and wrap
//! once the palette is exhausted. A [`PlayerPalette`] belongs to one session
//! (a CLI run or a single HTTP request); nothing is shared process-wide.

use std::collections::HashMap;

/// Display palette, in allocation order.
pub const PLAYER_COLORS: [&str; 12] = [
    "#10b981", // emerald
    "#ef4444", // red
    "#3b82f6", // blue
    "#f59e0b", // amber
    "#8b5cf6", // violet
    "#ec4899", // pink
    "#14b8a6", // teal
    "#f97316", // orange
    "#06b6d4", // cyan
    "#84cc16", // lime
    "#a855f7", // purple
    "#0ea5e9", // sky
];

/// Handle to color assignments for one session.
#[derive(Debug, Clone, Default)]
pub struct PlayerPalette {
    assigned: HashMap<String, &'static str>,
    next_index: usize,
}

impl PlayerPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for `handle`, assigning the next palette entry on first sight.
    pub fn color(&mut self, handle: &str) -> &'static str {
        if let Some(color) = self.assigned.get(handle) {
            return *color;
        }

        let color = PLAYER_COLORS[self.next_index % PLAYER_COLORS.len()];
        self.assigned.insert(handle.to_string(), color);
        self.next_index += 1;
        color
    }

    /// Colors for several handles, assigned in list order.
    pub fn colors<S: AsRef<str>>(&mut self, handles: &[S]) -> HashMap<String, &'static str> {
        handles
            .iter()
            .map(|h| (h.as_ref().to_string(), self.color(h.as_ref())))
            .collect()
    }

    /// Color already given to `handle`, without assigning one.
    pub fn peek(&self, handle: &str) -> Option<&'static str> {
        self.assigned.get(handle).copied()
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    /// Forget every assignment and restart at the first color.
    pub fn reset(&mut self) {
        self.assigned.clear();
        self.next_index = 0;
    }
}
