//! Responsive layout choice and upload preview bookkeeping.

/// Viewports narrower than this get stacked cards instead of tables.
pub const WIDE_MEDIA_QUERY: &str = "(min-width: 768px)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    #[default]
    Table,
    Cards,
}

impl Layout {
    pub fn from_wide(is_wide: bool) -> Self {
        if is_wide { Self::Table } else { Self::Cards }
    }
}

/// Holds at most one preview resource. Replacing or clearing the slot drops
/// the previous value, which is where object URLs get revoked.
#[derive(Debug)]
pub struct PreviewSlot<P> {
    current: Option<P>,
}

impl<P> Default for PreviewSlot<P> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<P> PreviewSlot<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `preview`, releasing whatever was there.
    pub fn replace(&mut self, preview: P) {
        self.current = Some(preview);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn get(&self) -> Option<&P> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}
