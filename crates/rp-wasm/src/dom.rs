// ============================================================================
// DOM REEL SURFACE
// Reel container element + one reusable Web Animations handle
// ============================================================================

use rp_picker::{ReelSurface, SpinTiming, TransitionDone, TransitionSpec};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Animation, Document, HtmlElement, KeyframeAnimationOptions, KeyframeEffect};

use crate::keyframes::{css_keyframes, css_options};

/// Reel rendered as `<div>` items inside a container element
pub struct DomReelSurface {
    document: Document,
    container: HtmlElement,
    animation: Animation,
}

impl DomReelSurface {
    /// Wrap `container` and create its (cancelled) spin animation
    pub fn new(
        document: Document,
        container: HtmlElement,
        duration_ms: f64,
        timing: &SpinTiming,
    ) -> Result<Self, JsValue> {
        let rest = TransitionSpec::spin(0.0, duration_ms, timing);
        let keyframes = to_js_object(&css_keyframes(&rest))?;
        let options: KeyframeAnimationOptions = to_js_object(&css_options(&rest))?.unchecked_into();

        let animation = container.animate_with_keyframe_animation_options(Some(&keyframes), &options);
        animation.cancel();

        Ok(Self {
            document,
            container,
            animation,
        })
    }

    fn keyframe_effect(&self) -> Option<KeyframeEffect> {
        self.animation
            .effect()
            .and_then(|effect| effect.dyn_into::<KeyframeEffect>().ok())
    }

    fn append_items(&self, items: &[String]) -> Result<(), JsValue> {
        let fragment = self.document.create_document_fragment();
        for name in items {
            let item = self.document.create_element("div")?;
            item.set_text_content(Some(name));
            fragment.append_child(&item)?;
        }
        self.container.append_child(&fragment)?;
        Ok(())
    }
}

fn to_js_object<T: serde::Serialize>(value: &T) -> Result<js_sys::Object, JsValue> {
    let value = serde_wasm_bindgen::to_value(value)?;
    Ok(value.unchecked_into())
}

impl ReelSurface for DomReelSurface {
    fn mount(&mut self, items: &[String]) {
        if let Err(err) = self.append_items(items) {
            log::error!("[ReelPick] Failed to mount reel items: {:?}", err);
        }
    }

    fn clear(&mut self) {
        while let Some(child) = self.container.first_element_child() {
            child.remove();
        }
    }

    fn mounted_count(&self) -> usize {
        self.container.child_element_count() as usize
    }

    fn total_extent(&self) -> Option<f64> {
        Some(self.container.scroll_height() as f64)
    }

    fn item_extent(&self) -> Option<f64> {
        self.container
            .first_element_child()
            .map(|item| item.get_bounding_client_rect().height())
            .filter(|height| *height > 0.0)
    }

    fn start_transition(&mut self, spec: &TransitionSpec) -> TransitionDone {
        match to_js_object(&css_keyframes(spec)) {
            Ok(keyframes) => match self.keyframe_effect() {
                Some(effect) => {
                    if let Err(err) = effect.set_keyframes(Some(&keyframes)) {
                        log::warn!("[ReelPick] Keyframes rejected: {:?}", err);
                    }
                }
                None => log::warn!("[ReelPick] Reel animation has no keyframe effect"),
            },
            Err(err) => log::warn!("[ReelPick] Keyframe conversion failed: {:?}", err),
        }

        if let Err(err) = self.animation.play() {
            log::error!("[ReelPick] Reel animation failed to play: {:?}", err);
            return Box::pin(async {});
        }

        match self.animation.finished() {
            Ok(finished) => Box::pin(async move {
                if let Err(err) = JsFuture::from(finished).await {
                    log::warn!("[ReelPick] Reel animation did not finish: {:?}", err);
                }
            }),
            Err(err) => {
                log::warn!("[ReelPick] Reel animation has no finished promise: {:?}", err);
                Box::pin(async {})
            }
        }
    }

    fn force_to_end(&mut self) {
        if let Err(err) = self.animation.finish() {
            log::warn!("[ReelPick] Could not finish reel animation: {:?}", err);
        }
    }

    fn trim(&mut self, keep_last: usize) {
        let excess = self.mounted_count().saturating_sub(keep_last);
        for _ in 0..excess {
            if let Some(item) = self.container.first_element_child() {
                item.remove();
            }
        }
    }
}
