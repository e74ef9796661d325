//! Load-gated entry transition.
//!
//! The overlay starts opaque; the loader indicator goes up when a batch
//! with pending fetches is activated. Load completion moves the overlay to
//! `FadingOut` and schedules three independent timers on the scene clock:
//! hide the loader indicator, begin the alpha fade, and request the
//! control panel. The panel timer is not chained to the fade.

use crate::constants::*;
use crate::timeline::{Ease, TimerId, Timeline, Tween};
use smallvec::SmallVec;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum OverlayState {
    HiddenBehindLoader,
    FadingOut,
    Transparent,
}

/// Delays of the entry transition, all measured in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionConfig {
    /// Wait after load completion before anything visible changes.
    pub hold_sec: f32,
    /// Extra wait after the hold before alpha starts moving.
    pub fade_delay_sec: f32,
    pub fade_duration_sec: f32,
    /// Measured from load completion, independent of the fade.
    pub panel_delay_sec: f32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            hold_sec: LOADER_HOLD_SEC,
            fade_delay_sec: FADE_DELAY_SEC,
            fade_duration_sec: FADE_DURATION_SEC,
            panel_delay_sec: PANEL_DELAY_SEC,
        }
    }
}

impl TransitionConfig {
    fn fade_start(&self) -> Duration {
        secs(self.hold_sec + self.fade_delay_sec)
    }
}

#[inline]
fn secs(s: f32) -> Duration {
    Duration::from_secs_f32(s.max(0.0))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TransitionTimer {
    HideLoader,
    BeginFade,
    RequestPanel,
}

/// Side effects the platform layer must carry out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionSignal {
    /// The DOM loading indicator should be shown.
    LoaderShown,
    LoaderHidden,
    FadeStarted,
    /// Time to construct the control panel.
    PanelDue,
    /// Alpha reached zero; the overlay no longer needs drawing.
    Transparent,
}

pub type Signals = SmallVec<[TransitionSignal; 4]>;

pub struct OverlayTransition {
    config: TransitionConfig,
    state: OverlayState,
    alpha: f32,
    loader_visible: bool,
    panel_due: bool,
    completed_at: Option<Duration>,
    timers: Timeline<TransitionTimer>,
    fade_timer: Option<TimerId>,
    panel_timer: Option<TimerId>,
    fade: Option<Tween>,
}

impl OverlayTransition {
    pub fn new(config: TransitionConfig) -> Self {
        Self {
            config,
            state: OverlayState::HiddenBehindLoader,
            alpha: 1.0,
            loader_visible: false,
            panel_due: false,
            completed_at: None,
            timers: Timeline::new(),
            fade_timer: None,
            panel_timer: None,
            fade: None,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    /// Current value of the overlay's alpha uniform.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn loader_visible(&self) -> bool {
        self.loader_visible
    }

    /// Whether the panel timer has fired.
    pub fn panel_due(&self) -> bool {
        self.panel_due
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// A batch of `items_total` fetches went out. The indicator stays up
    /// until the hold after completion, even if nothing ever resolves.
    pub fn on_loading_started(&mut self, items_total: u32) -> Signals {
        if items_total == 0 {
            return Signals::new();
        }
        self.show_loader()
    }

    /// Progress arrived while still loading: keep the indicator up.
    pub fn on_progress(&mut self) -> Signals {
        self.show_loader()
    }

    fn show_loader(&mut self) -> Signals {
        let mut out = Signals::new();
        if self.state == OverlayState::HiddenBehindLoader && !self.loader_visible {
            self.loader_visible = true;
            out.push(TransitionSignal::LoaderShown);
        }
        out
    }

    /// Entry point wired to the tracker's completion hook.
    pub fn on_load_complete(&mut self, now: Duration) {
        if self.state != OverlayState::HiddenBehindLoader {
            log::warn!("[overlay] load completion repeated in {:?}; ignored", self.state);
            return;
        }
        self.state = OverlayState::FadingOut;
        self.completed_at = Some(now);
        let c = self.config;
        self.timers
            .schedule(now + secs(c.hold_sec), TransitionTimer::HideLoader);
        self.fade_timer = Some(
            self.timers
                .schedule(now + c.fade_start(), TransitionTimer::BeginFade),
        );
        self.panel_timer = Some(
            self.timers
                .schedule(now + secs(c.panel_delay_sec), TransitionTimer::RequestPanel),
        );
        log::info!(
            "[overlay] fading out: hold {:.2}s, fade {:.2}s after {:.2}s, panel at {:.2}s",
            c.hold_sec,
            c.fade_duration_sec,
            c.fade_delay_sec,
            c.panel_delay_sec
        );
    }

    /// Advance timers and the fade to `now`.
    pub fn update(&mut self, now: Duration) -> Signals {
        let mut out = Signals::new();
        for timer in self.timers.advance(now) {
            log::debug!("[overlay] timer {:?} fired", timer);
            match timer {
                TransitionTimer::HideLoader => {
                    self.loader_visible = false;
                    out.push(TransitionSignal::LoaderHidden);
                }
                TransitionTimer::BeginFade => {
                    self.fade_timer = None;
                    // anchored to the scheduled start, not the frame that noticed it
                    let start = self
                        .completed_at
                        .map_or(now, |t| t + self.config.fade_start());
                    self.fade = Some(Tween {
                        from: 1.0,
                        to: 0.0,
                        start,
                        duration: secs(self.config.fade_duration_sec),
                        ease: Ease::QuadOut,
                    });
                    out.push(TransitionSignal::FadeStarted);
                }
                TransitionTimer::RequestPanel => {
                    self.panel_timer = None;
                    self.panel_due = true;
                    out.push(TransitionSignal::PanelDue);
                }
            }
        }
        if let Some(tween) = self.fade {
            self.alpha = tween.value_at(now);
            if tween.is_finished(now) && self.state == OverlayState::FadingOut {
                self.alpha = 0.0;
                self.fade = None;
                self.state = OverlayState::Transparent;
                log::info!("[overlay] transparent");
                out.push(TransitionSignal::Transparent);
            }
        }
        out
    }

    /// Cancel the fade timer only; the panel timer keeps running.
    pub fn cancel_fade(&mut self) -> bool {
        self.fade_timer
            .take()
            .map(|id| self.timers.cancel(id))
            .unwrap_or(false)
    }

    /// Cancel the panel timer only; the fade keeps running.
    pub fn cancel_panel(&mut self) -> bool {
        self.panel_timer
            .take()
            .map(|id| self.timers.cancel(id))
            .unwrap_or(false)
    }

    /// Drop every pending timer and freeze a running fade. Used on teardown.
    pub fn cancel_all(&mut self) {
        self.timers.cancel_all();
        self.fade_timer = None;
        self.panel_timer = None;
        self.fade = None;
    }
}

impl Default for OverlayTransition {
    fn default() -> Self {
        Self::new(TransitionConfig::default())
    }
}
