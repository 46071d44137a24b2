//! Lifecycle governor
//!
//! The loop's run state is one enum and every external notification goes
//! through [`transition`]. Side effects are returned as data so the host
//! applies them in one place.

use std::fmt;

/// Why the loop is paused
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PauseReason {
    /// Document hidden (tab in background, window minimised)
    Hidden,
    /// Window blurred while `pause_on_blur` is enabled
    Unfocused,
}

/// Run state of the frame loop
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    #[default]
    Running,
    Paused(PauseReason),
    /// GPU context lost; waiting for restoration
    ContextLost,
    /// Torn down; terminal
    Disposed,
}

impl LifecycleState {
    /// Stable kebab-case name exposed to the host
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Running => "running",
            LifecycleState::Paused(PauseReason::Hidden) => "paused-hidden",
            LifecycleState::Paused(PauseReason::Unfocused) => "paused-unfocused",
            LifecycleState::ContextLost => "context-lost",
            LifecycleState::Disposed => "disposed",
        }
    }

    /// Whether a freshly built renderer may be attached in this state
    #[inline]
    pub fn accepts_renderer(&self) -> bool {
        matches!(self, LifecycleState::Running | LifecycleState::Paused(_))
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// External notifications that can change the run state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    Hidden,
    Visible,
    FocusGained,
    FocusLost,
    ContextLost,
    ContextRestored,
    Dispose,
}

/// Side effects requested by a transition
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Effects {
    /// Revoke the pending frame request
    pub cancel_frame: bool,
    /// Request a frame
    pub schedule_frame: bool,
    /// Restart the delta clock, park the pointer, recompute the viewport
    pub reset_after_sleep: bool,
    /// Release GPU resources, listeners and the canvas
    pub release_resources: bool,
    /// Suppress the browser's default handling of the event
    pub prevent_default: bool,
}

impl Effects {
    const NONE: Effects = Effects {
        cancel_frame: false,
        schedule_frame: false,
        reset_after_sleep: false,
        release_resources: false,
        prevent_default: false,
    };

    fn cancel() -> Self {
        Self {
            cancel_frame: true,
            ..Self::NONE
        }
    }

    fn resume() -> Self {
        Self {
            schedule_frame: true,
            reset_after_sleep: true,
            ..Self::NONE
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// Inputs to the transition besides the state itself
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GovernorContext {
    /// Whether the document is currently hidden
    pub hidden: bool,
    pub pause_on_blur: bool,
}

/// The single transition function
pub fn transition(
    state: LifecycleState,
    event: LifecycleEvent,
    ctx: GovernorContext,
) -> (LifecycleState, Effects) {
    use LifecycleEvent as E;
    use LifecycleState as S;

    match (state, event) {
        (S::Disposed, _) => (S::Disposed, Effects::NONE),

        (_, E::Dispose) => (
            S::Disposed,
            Effects {
                cancel_frame: true,
                release_resources: true,
                ..Effects::NONE
            },
        ),

        (S::ContextLost, E::ContextLost) => (
            S::ContextLost,
            Effects {
                prevent_default: true,
                ..Effects::NONE
            },
        ),
        (_, E::ContextLost) => (
            S::ContextLost,
            Effects {
                cancel_frame: true,
                prevent_default: true,
                ..Effects::NONE
            },
        ),
        (S::ContextLost, E::ContextRestored) if ctx.hidden => {
            (S::Paused(PauseReason::Hidden), Effects::NONE)
        }
        (S::ContextLost, E::ContextRestored) => (S::Running, Effects::resume()),
        (S::ContextLost, _) => (S::ContextLost, Effects::NONE),
        (state, E::ContextRestored) => (state, Effects::NONE),

        (S::Running, E::Hidden) => (S::Paused(PauseReason::Hidden), Effects::cancel()),
        (S::Paused(PauseReason::Unfocused), E::Hidden) => {
            (S::Paused(PauseReason::Hidden), Effects::NONE)
        }
        (S::Paused(PauseReason::Hidden), E::Visible) => (S::Running, Effects::resume()),

        (S::Running, E::FocusGained) if !ctx.hidden => (
            S::Running,
            Effects {
                reset_after_sleep: true,
                ..Effects::NONE
            },
        ),
        (S::Paused(PauseReason::Unfocused), E::FocusGained) => (S::Running, Effects::resume()),
        (S::Running, E::FocusLost) if ctx.pause_on_blur => {
            (S::Paused(PauseReason::Unfocused), Effects::cancel())
        }

        (state, _) => (state, Effects::NONE),
    }
}

/// Lifecycle state plus the context the transitions depend on
#[derive(Clone, Debug, Default)]
pub struct Governor {
    state: LifecycleState,
    ctx: GovernorContext,
}

impl Governor {
    pub fn new(pause_on_blur: bool) -> Self {
        Self {
            state: LifecycleState::Running,
            ctx: GovernorContext {
                hidden: false,
                pause_on_blur,
            },
        }
    }

    /// Apply an event and return the effects the host must carry out
    pub fn handle(&mut self, event: LifecycleEvent) -> Effects {
        if self.state == LifecycleState::Disposed {
            return Effects::NONE;
        }
        match event {
            LifecycleEvent::Hidden => self.ctx.hidden = true,
            LifecycleEvent::Visible => self.ctx.hidden = false,
            _ => {}
        }

        let (next, effects) = transition(self.state, event, self.ctx);
        if next != self.state {
            log::info!("[governor] {} -> {} on {:?}", self.state, next, event);
            self.state = next;
        }
        effects
    }

    #[inline]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == LifecycleState::Running
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.state == LifecycleState::Disposed
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.ctx.hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HIDDEN: LifecycleState = LifecycleState::Paused(PauseReason::Hidden);
    const UNFOCUSED: LifecycleState = LifecycleState::Paused(PauseReason::Unfocused);

    #[test]
    fn test_hide_and_show() {
        let mut gov = Governor::new(false);
        let fx = gov.handle(LifecycleEvent::Hidden);
        assert_eq!(gov.state(), HIDDEN);
        assert!(fx.cancel_frame && !fx.schedule_frame);

        let fx = gov.handle(LifecycleEvent::Visible);
        assert!(gov.is_running());
        assert!(fx.schedule_frame && fx.reset_after_sleep);
    }

    #[test]
    fn test_redundant_visible_is_noop() {
        let mut gov = Governor::new(false);
        assert!(gov.handle(LifecycleEvent::Visible).is_empty());
        assert!(gov.is_running());
    }

    #[test]
    fn test_context_loss_and_restore() {
        let mut gov = Governor::new(false);
        let fx = gov.handle(LifecycleEvent::ContextLost);
        assert_eq!(gov.state(), LifecycleState::ContextLost);
        assert!(fx.cancel_frame && fx.prevent_default);

        // Visibility does not resume a lost context
        assert!(gov.handle(LifecycleEvent::Hidden).is_empty());
        assert!(gov.handle(LifecycleEvent::Visible).is_empty());
        assert_eq!(gov.state(), LifecycleState::ContextLost);

        let fx = gov.handle(LifecycleEvent::ContextRestored);
        assert!(gov.is_running());
        assert!(fx.schedule_frame && fx.reset_after_sleep);
    }

    #[test]
    fn test_restore_while_hidden_stays_paused() {
        let mut gov = Governor::new(false);
        gov.handle(LifecycleEvent::ContextLost);
        gov.handle(LifecycleEvent::Hidden);
        let fx = gov.handle(LifecycleEvent::ContextRestored);
        assert_eq!(gov.state(), HIDDEN);
        assert!(!fx.schedule_frame);

        let fx = gov.handle(LifecycleEvent::Visible);
        assert!(gov.is_running());
        assert!(fx.schedule_frame);
    }

    #[test]
    fn test_renderer_attaches_only_while_live() {
        assert!(LifecycleState::Running.accepts_renderer());
        assert!(HIDDEN.accepts_renderer());
        assert!(UNFOCUSED.accepts_renderer());
        assert!(!LifecycleState::ContextLost.accepts_renderer());
        assert!(!LifecycleState::Disposed.accepts_renderer());
    }

    #[test]
    fn test_loss_during_rebuild_rejects_renderer() {
        let mut gov = Governor::new(false);
        gov.handle(LifecycleEvent::ContextLost);
        gov.handle(LifecycleEvent::ContextRestored);
        assert!(gov.state().accepts_renderer());

        // Lost again before the async rebuild lands
        gov.handle(LifecycleEvent::ContextLost);
        assert!(!gov.state().accepts_renderer());
    }

    #[test]
    fn test_focus_resets_without_rescheduling() {
        let mut gov = Governor::new(false);
        let fx = gov.handle(LifecycleEvent::FocusGained);
        assert!(fx.reset_after_sleep && !fx.schedule_frame);
        assert!(gov.handle(LifecycleEvent::FocusLost).is_empty());
        assert!(gov.is_running());
    }

    #[test]
    fn test_pause_on_blur() {
        let mut gov = Governor::new(true);
        let fx = gov.handle(LifecycleEvent::FocusLost);
        assert_eq!(gov.state(), UNFOCUSED);
        assert!(fx.cancel_frame);

        gov.handle(LifecycleEvent::Hidden);
        assert_eq!(gov.state(), HIDDEN);
        gov.handle(LifecycleEvent::Visible);
        assert!(gov.is_running());

        gov.handle(LifecycleEvent::FocusLost);
        let fx = gov.handle(LifecycleEvent::FocusGained);
        assert!(gov.is_running());
        assert!(fx.schedule_frame);
    }

    #[test]
    fn test_dispose_is_terminal() {
        let mut gov = Governor::new(false);
        let fx = gov.handle(LifecycleEvent::Dispose);
        assert!(fx.cancel_frame && fx.release_resources);
        assert!(gov.is_disposed());

        for event in [
            LifecycleEvent::Visible,
            LifecycleEvent::FocusGained,
            LifecycleEvent::ContextRestored,
            LifecycleEvent::Dispose,
        ] {
            assert!(gov.handle(event).is_empty());
            assert!(gov.is_disposed());
        }
    }

    #[test]
    fn test_state_names() {
        assert_eq!(LifecycleState::Running.to_string(), "running");
        assert_eq!(HIDDEN.as_str(), "paused-hidden");
        assert_eq!(UNFOCUSED.as_str(), "paused-unfocused");
        assert_eq!(LifecycleState::ContextLost.as_str(), "context-lost");
        assert_eq!(LifecycleState::Disposed.as_str(), "disposed");
    }
}
