// ============================================================================
// KEYFRAMES — TransitionSpec → Web Animations keyframes/options
// ============================================================================

use rp_picker::{Keyframe, TransitionSpec};
use serde::Serialize;

/// One Web Animations keyframe (`transform` and `filter` as CSS strings)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CssKeyframe {
    pub offset: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// `KeyframeAnimationOptions` payload
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CssAnimationOptions {
    pub duration: f64,
    pub easing: &'static str,
    pub iterations: f64,
}

fn css_keyframe(keyframe: &Keyframe) -> CssKeyframe {
    CssKeyframe {
        offset: keyframe.offset,
        transform: keyframe.translate_y.map(|y| {
            if y == 0.0 {
                "none".to_string()
            } else {
                format!("translateY({y}px)")
            }
        }),
        filter: keyframe.blur_px.map(|blur| format!("blur({blur}px)")),
    }
}

/// CSS keyframes of a spin transition
pub fn css_keyframes(spec: &TransitionSpec) -> Vec<CssKeyframe> {
    spec.keyframes.iter().map(css_keyframe).collect()
}

/// Animation options of a spin transition (single iteration)
pub fn css_options(spec: &TransitionSpec) -> CssAnimationOptions {
    CssAnimationOptions {
        duration: spec.duration_ms,
        easing: spec.easing.css_name(),
        iterations: 1.0,
    }
}
