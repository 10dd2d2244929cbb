//! Single-active voice preview.
//!
//! At most one sample plays at a time. Each start hands out a fresh [`PreviewTicket`];
//! completion signals carrying an older ticket are ignored, so a late "ended" event or
//! fallback timer from a previous preview can never clear the marker of a newer one.

use crate::models::ModelProvider;
use crate::voices;
use std::time::Duration;
use thiserror::Error;

/// Clears the previewing marker if the audio never reports that it ended.
pub const PREVIEW_FALLBACK: Duration = Duration::from_secs(10);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PreviewTicket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewSignal {
    Ended(PreviewTicket),
    TimedOut(PreviewTicket),
    Failed(PreviewTicket),
}

impl PreviewSignal {
    pub fn ticket(&self) -> PreviewTicket {
        match self {
            PreviewSignal::Ended(t) | PreviewSignal::TimedOut(t) | PreviewSignal::Failed(t) => *t,
        }
    }
}

#[derive(Debug, Error)]
#[error("Error playing audio: {0}")]
pub struct PlaybackError(pub String);

/// Platform side of a preview: the audio element and the fallback timer.
///
/// `Timer` is a cancellation handle. Dropping it must cancel the pending timeout.
pub trait PreviewBackend {
    type Timer;

    /// Stops whatever is playing and rewinds it. Must be a no-op when idle.
    fn stop(&mut self);

    /// Starts playback of `url`. Asynchronous completion or failure is reported back
    /// through [`VoicePreview::handle`] with the same ticket.
    fn play(&mut self, url: &str, ticket: PreviewTicket) -> Result<(), PlaybackError>;

    fn start_timer(&mut self, after: Duration, ticket: PreviewTicket) -> Self::Timer;
}

struct ActivePreview<T> {
    voice_id: String,
    ticket: PreviewTicket,
    _fallback: T,
}

pub struct VoicePreview<B: PreviewBackend> {
    backend: B,
    active: Option<ActivePreview<B::Timer>>,
    next_ticket: u64,
}

impl<B: PreviewBackend> VoicePreview<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            active: None,
            next_ticket: 0,
        }
    }

    /// Voice id currently marked as previewing.
    pub fn previewing(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.voice_id.as_str())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Plays the sample for `voice_id`, replacing any running preview.
    ///
    /// Providers without inline samples are ignored and leave the current preview alone.
    pub fn start(&mut self, voice_id: &str, provider: ModelProvider) -> Option<PreviewTicket> {
        if !provider.supports_inline_preview() {
            return None;
        }

        self.stop();

        self.next_ticket += 1;
        let ticket = PreviewTicket(self.next_ticket);
        let url = voices::preview_url(voice_id);

        if let Err(e) = self.backend.play(&url, ticket) {
            tracing::error!("{}", e);
            return None;
        }

        let fallback = self.backend.start_timer(PREVIEW_FALLBACK, ticket);
        self.active = Some(ActivePreview {
            voice_id: voice_id.to_string(),
            ticket,
            _fallback: fallback,
        });
        Some(ticket)
    }

    /// Applies a completion signal. Returns whether the marker was cleared.
    pub fn handle(&mut self, signal: PreviewSignal) -> bool {
        let current = self.active.as_ref().map(|a| a.ticket);
        if current != Some(signal.ticket()) {
            return false;
        }
        if let PreviewSignal::Failed(_) = signal {
            tracing::warn!("Preview playback failed to start");
        }
        // Dropping the active entry cancels its fallback timer.
        self.active = None;
        true
    }

    /// Stops playback and clears the marker.
    pub fn stop(&mut self) {
        self.backend.stop();
        self.active = None;
    }
}
