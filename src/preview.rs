//! Debounced Previews
//!
//! Each keystroke in a preview input takes a new ticket from a `PreviewGate`.
//! After the debounce delay only the newest ticket may start a request, and
//! only the newest ticket may publish its result, so late responses for
//! superseded input are dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use gloo_timers::future::TimeoutFuture;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewTicket(u64);

/// Generation counter shared by an input's event handlers
#[derive(Debug, Clone, Default)]
pub struct PreviewGate {
    generation: Arc<AtomicU64>,
}

impl PreviewGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, superseding every earlier ticket
    pub fn begin(&self) -> PreviewTicket {
        PreviewTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: PreviewTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Drop any pending preview (e.g. the form was closed)
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

/// Wait `delay_ms`, then report whether `ticket` is still the newest one
pub async fn settle(gate: &PreviewGate, ticket: PreviewTicket, delay_ms: u32) -> bool {
    TimeoutFuture::new(delay_ms).await;
    gate.is_current(ticket)
}

/// Wallpaper form preview state. "Set" is enabled only once the image loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WallpaperPreview {
    #[default]
    Hidden,
    Loading,
    Ready,
    Failed,
}

impl WallpaperPreview {
    pub fn message(self) -> &'static str {
        match self {
            WallpaperPreview::Hidden => "",
            WallpaperPreview::Loading => "Loading preview...",
            WallpaperPreview::Ready => "Image looks good. Click Set to apply.",
            WallpaperPreview::Failed => "Failed to load image. Check the URL or try another image.",
        }
    }

    pub fn is_visible(self) -> bool {
        self != WallpaperPreview::Hidden
    }

    pub fn can_apply(self) -> bool {
        self == WallpaperPreview::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let gate = PreviewGate::new();
        let first = gate.begin();
        let second = gate.begin();

        assert!(!gate.is_current(first));
        assert!(gate.is_current(second));
    }

    #[test]
    fn test_clones_share_generation() {
        let gate = PreviewGate::new();
        let handler_copy = gate.clone();
        let ticket = gate.begin();
        handler_copy.begin();
        assert!(!gate.is_current(ticket));
    }

    #[test]
    fn test_invalidate_discards_pending_result() {
        let gate = PreviewGate::new();
        let ticket = gate.begin();
        gate.invalidate();
        assert!(!gate.is_current(ticket));
    }

    #[test]
    fn test_wallpaper_preview_states() {
        assert!(!WallpaperPreview::Hidden.is_visible());
        assert!(!WallpaperPreview::Loading.can_apply());
        assert!(WallpaperPreview::Ready.can_apply());
        assert!(!WallpaperPreview::Failed.can_apply());
        assert_eq!(WallpaperPreview::Loading.message(), "Loading preview...");
    }
}
