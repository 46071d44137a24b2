use crate::config::MissingAnchorPolicy;
use crate::constants::STENCIL_ACTIVE_THRESHOLD;
use crate::math::{NdcRect, ScreenRect, Size};

/// How the overlay is clipped this frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StencilDecision {
    /// No mask pass; overlay draws without a stencil test
    Disabled,
    /// Mask pass writes this region; overlay draws where stencil differs
    Masked(NdcRect),
    /// Overlay and screen fx are skipped
    Hidden,
}

impl StencilDecision {
    /// Decide clipping for overlay gate `m`.
    ///
    /// `anchor` is only invoked while `m` exceeds the stencil threshold, so the
    /// host's layout query is skipped whenever the overlay is faded out.
    pub fn resolve(
        m: f32,
        anchor: impl FnOnce() -> Option<ScreenRect>,
        viewport: Size,
        padding: f32,
        policy: MissingAnchorPolicy,
    ) -> Self {
        if m <= STENCIL_ACTIVE_THRESHOLD {
            return StencilDecision::Disabled;
        }
        match anchor().and_then(|rect| rect.to_ndc(viewport, padding)) {
            Some(region) => StencilDecision::Masked(region),
            None => match policy {
                MissingAnchorPolicy::DrawUnclipped => StencilDecision::Disabled,
                MissingAnchorPolicy::HideOverlay => StencilDecision::Hidden,
            },
        }
    }

    #[inline]
    pub fn region(&self) -> Option<NdcRect> {
        match self {
            StencilDecision::Masked(region) => Some(*region),
            _ => None,
        }
    }

    #[inline]
    pub fn stencil_test(&self) -> bool {
        matches!(self, StencilDecision::Masked(_))
    }

    #[inline]
    pub fn overlay_allowed(&self) -> bool {
        !matches!(self, StencilDecision::Hidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const VIEWPORT: Size = Size::new(1000.0, 800.0);

    #[test]
    fn test_anchor_not_polled_below_threshold() {
        let polled = Cell::new(false);
        let decision = StencilDecision::resolve(
            0.01,
            || {
                polled.set(true);
                Some(ScreenRect::new(0.0, 0.0, 10.0, 10.0))
            },
            VIEWPORT,
            0.06,
            MissingAnchorPolicy::DrawUnclipped,
        );
        assert_eq!(decision, StencilDecision::Disabled);
        assert!(!polled.get());
    }

    #[test]
    fn test_masked_region() {
        let decision = StencilDecision::resolve(
            1.0,
            || Some(ScreenRect::new(250.0, 200.0, 500.0, 400.0)),
            VIEWPORT,
            0.06,
            MissingAnchorPolicy::DrawUnclipped,
        );
        let region = decision.region().unwrap();
        assert!(region.center.length() < 1e-6);
        assert!((region.size.x - 1.06).abs() < 1e-6);
        assert!(decision.stencil_test());
    }

    #[test]
    fn test_missing_anchor_policies() {
        let unclipped = StencilDecision::resolve(
            1.0,
            || None,
            VIEWPORT,
            0.06,
            MissingAnchorPolicy::DrawUnclipped,
        );
        assert_eq!(unclipped, StencilDecision::Disabled);
        assert!(unclipped.overlay_allowed());

        let hidden = StencilDecision::resolve(
            1.0,
            || Some(ScreenRect::new(10.0, 10.0, 0.0, 50.0)),
            VIEWPORT,
            0.06,
            MissingAnchorPolicy::HideOverlay,
        );
        assert_eq!(hidden, StencilDecision::Hidden);
        assert!(!hidden.overlay_allowed());
    }
}
