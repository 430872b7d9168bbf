// ============================================================================
// REELPICK — WASM Port
// Browser bindings for the slot-machine name picker
// Reels are DOM containers animated through the Web Animations API
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use rp_picker::{PickerConfig, PickerError, PickerHooks, ReelSurface, SlotPicker};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

pub mod dom;
pub mod keyframes;
pub mod random;

pub use dom::DomReelSurface;
pub use random::MathRandom;

// ============================================================================
// INITIALIZATION
// ============================================================================

#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    console_log::init_with_level(log::Level::Info).ok();
    log::debug!("[ReelPick WASM] Initialized");
}

// ============================================================================
// CALLBACKS
// ============================================================================

/// JS callbacks, invoked outside any picker borrow so they may call back in
#[derive(Clone, Default)]
struct JsHooks {
    on_spin_start: Option<js_sys::Function>,
    on_spin_end: Option<js_sys::Function>,
    on_name_list_changed: Option<js_sys::Function>,
}

impl JsHooks {
    fn from_config(config: &JsValue) -> Self {
        Self {
            on_spin_start: js_function(config, "onSpinStart"),
            on_spin_end: js_function(config, "onSpinEnd"),
            on_name_list_changed: js_function(config, "onNameListChanged"),
        }
    }
}

fn js_function(object: &JsValue, key: &str) -> Option<js_sys::Function> {
    js_sys::Reflect::get(object, &JsValue::from_str(key))
        .ok()
        .and_then(|value| value.dyn_into::<js_sys::Function>().ok())
}

fn call(hook: &Option<js_sys::Function>, name: &str) {
    if let Some(function) = hook {
        if let Err(err) = function.call0(&JsValue::NULL) {
            log::error!("[ReelPick WASM] {} callback threw: {:?}", name, err);
        }
    }
}

fn report_refusal(err: &PickerError) {
    match err {
        PickerError::InsufficientNames { .. } => {
            log::error!("{}. Cannot start spinning.", err)
        }
        PickerError::SpinInProgress => log::warn!("{}", err),
    }
}

// ============================================================================
// SLOT MACHINE (Main WASM API)
// ============================================================================

type DomPicker = SlotPicker<DomReelSurface>;

#[wasm_bindgen]
pub struct SlotMachine {
    picker: Rc<RefCell<DomPicker>>,
    hooks: JsHooks,
}

#[wasm_bindgen]
impl SlotMachine {
    /// Create a slot machine from a config object
    ///
    /// Keys: `reelContainerSelector` (required), `maxReelItems`,
    /// `removeWinner`, `numberOfSlots`, `timing`, and the callbacks
    /// `onSpinStart`, `onSpinEnd`, `onNameListChanged`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<SlotMachine, JsValue> {
        let hooks = JsHooks::from_config(&config);
        let config: PickerConfig = serde_wasm_bindgen::from_value(config)?;

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("No document available"))?;

        let duration_ms = config.spin_duration_ms();
        let timing = config.timing.clone();

        let picker = SlotPicker::new(
            config,
            PickerHooks::default(),
            MathRandom,
            |selector| {
                let element = document.query_selector(selector).ok().flatten()?;
                let container = element.dyn_into::<HtmlElement>().ok()?;
                DomReelSurface::new(document.clone(), container, duration_ms, &timing)
                    .map_err(|err| {
                        log::warn!("[ReelPick WASM] Reel '{}' unusable: {:?}", selector, err)
                    })
                    .ok()
            },
        )
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

        Ok(SlotMachine {
            picker: Rc::new(RefCell::new(picker)),
            hooks,
        })
    }

    /// Current name list
    #[wasm_bindgen(getter)]
    pub fn names(&self) -> Vec<String> {
        self.picker.borrow().names().to_vec()
    }

    /// Replace the name list; clears every reel
    #[wasm_bindgen(setter)]
    pub fn set_names(&self, names: Vec<String>) {
        self.picker.borrow_mut().set_names(names);
        call(&self.hooks.on_name_list_changed, "onNameListChanged");
    }

    #[wasm_bindgen(getter = removeWinner)]
    pub fn remove_winner(&self) -> bool {
        self.picker.borrow().remove_winner()
    }

    #[wasm_bindgen(setter = removeWinner)]
    pub fn set_remove_winner(&self, remove_winner: bool) {
        self.picker.borrow_mut().set_remove_winner(remove_winner);
    }

    #[wasm_bindgen(getter = isSpinning)]
    pub fn is_spinning(&self) -> bool {
        self.picker.borrow().is_spinning()
    }

    /// Spin all reels; resolves to `false` if the spin could not start
    #[wasm_bindgen]
    pub fn spin(&self) -> js_sys::Promise {
        let picker = self.picker.clone();
        let hooks = self.hooks.clone();

        wasm_bindgen_futures::future_to_promise(async move {
            let spun = run_spin(
                picker,
                || call(&hooks.on_spin_start, "onSpinStart"),
                || call(&hooks.on_spin_end, "onSpinEnd"),
            )
            .await;
            Ok(JsValue::from_bool(spun))
        })
    }
}

/// Drive one spin, calling `on_start` and `on_end` outside any picker borrow
///
/// `on_start` may replace the name list. If the spin can no longer start
/// afterwards, `on_end` still fires so every start is paired with an end.
async fn run_spin<S: ReelSurface>(
    picker: Rc<RefCell<SlotPicker<S>>>,
    on_start: impl Fn(),
    on_end: impl Fn(),
) -> bool {
    let ready = picker.borrow().check_spin();
    if let Err(err) = ready {
        report_refusal(&err);
        return false;
    }

    on_start();

    // The borrow ends before awaiting so callbacks and getters stay usable
    let pending = picker.borrow_mut().begin_spin();
    let pending = match pending {
        Ok(pending) => pending,
        Err(err) => {
            report_refusal(&err);
            on_end();
            return false;
        }
    };

    let completed = pending.wait().await;
    picker.borrow_mut().finish_spin(completed);

    on_end();
    true
}

// ============================================================================
// UTILITY EXPORTS
// ============================================================================

/// Get ReelPick version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// ============================================================================
// TESTS
// ============================================================================
