//! Visible-fraction math for hosts that measure layout themselves.
//!
//! Only the vertical axis matters for the page: the fraction is the share of the
//! element's height that lies inside the viewport after applying the root margins.

use serde::{Deserialize, Serialize};

/// Element box relative to the top of the viewport, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementRect {
    pub top: f32,
    pub height: f32,
}

/// Margins added to the viewport edges. Negative values shrink the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RootMargin {
    pub top: f32,
    pub bottom: f32,
}

impl RootMargin {
    pub fn bottom(px: f32) -> Self {
        Self { top: 0.0, bottom: px }
    }
}

/// Fraction of `el` inside a viewport of `viewport_height`, in `0.0..=1.0`.
///
/// A zero-height element counts as fully visible when it sits inside the viewport.
pub fn visible_fraction(el: ElementRect, viewport_height: f32, margin: RootMargin) -> f32 {
    let root_top = -margin.top;
    let root_bottom = viewport_height + margin.bottom;
    if root_bottom <= root_top {
        return 0.0;
    }
    let el_bottom = el.top + el.height;
    if el.height <= 0.0 {
        return if el.top >= root_top && el.top <= root_bottom {
            1.0
        } else {
            0.0
        };
    }
    let overlap = el_bottom.min(root_bottom) - el.top.max(root_top);
    (overlap / el.height).clamp(0.0, 1.0)
}
