use js_sys::{Function, Reflect};
use log::warn;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use beacon_motion_core::{
    apply_changes, parse_page_json, Config, DeckId, ElementRect, Engine, Inputs, Outputs,
    PageSpec, Presenter, RootMargin,
};

#[wasm_bindgen]
pub struct BeaconMotion {
    core: Engine,
    /// Sub-millisecond remainder carried into the next update.
    carry_ms: f64,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Presenter backed by a JS object exposing `setText(node, text)`,
/// `setActive(node, active)`, and optionally `setClass(node, class, enabled)` and
/// `setStyle(node, property, value)`.
struct JsPresenter {
    target: JsValue,
}

impl JsPresenter {
    fn method(&self, name: &str) -> Option<Function> {
        Reflect::get(&self.target, &JsValue::from_str(name))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }

    fn call(&self, name: &str, args: &[JsValue]) -> bool {
        let Some(f) = self.method(name) else {
            return false;
        };
        let res = match args {
            [a, b] => f.call2(&self.target, a, b),
            [a, b, c] => f.call3(&self.target, a, b, c),
            _ => return false,
        };
        if let Err(e) = res {
            warn!("presenter.{name} threw: {e:?}");
        }
        true
    }
}

impl Presenter for JsPresenter {
    fn set_text(&mut self, node: &str, text: &str) {
        self.call("setText", &[node.into(), text.into()]);
    }

    fn set_active(&mut self, node: &str, active: bool) {
        self.call("setActive", &[node.into(), JsValue::from_bool(active)]);
    }

    fn set_class(&mut self, node: &str, class: &str, enabled: bool) {
        let handled = self.call(
            "setClass",
            &[node.into(), class.into(), JsValue::from_bool(enabled)],
        );
        if !handled && class == beacon_motion_core::presenter::ACTIVE_CLASS {
            self.set_active(node, enabled);
        }
    }

    fn set_style(&mut self, node: &str, property: &str, value: &str) {
        self.call("setStyle", &[node.into(), property.into(), value.into()]);
    }
}

impl BeaconMotion {
    /// Whole milliseconds to step, keeping the fraction for later frames.
    fn take_dt(&mut self, dt_ms: f64) -> u64 {
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return 0;
        }
        let total = self.carry_ms + dt_ms;
        let whole = total.floor();
        self.carry_ms = total - whole;
        whole as u64
    }

    fn parse_inputs(inputs: JsValue) -> Result<Inputs, JsError> {
        if jsvalue_is_undefined_or_null(&inputs) {
            return Ok(Inputs::default());
        }
        swb::from_value(inputs).map_err(|e| JsError::new(&format!("inputs error: {e}")))
    }

    fn mount_page(&mut self, page: PageSpec) -> Result<JsValue, JsError> {
        let out: &Outputs = self
            .core
            .mount(page)
            .map_err(|e| JsError::new(&format!("mount error: {e}")))?;
        swb::to_value(out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }
}

#[wasm_bindgen]
impl BeaconMotion {
    /// Create a new engine. Pass a config object or undefined/null for defaults.
    /// Example:
    ///   new BeaconMotion({ slider: { interval_ms: 4000 }, reduced_motion: true })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<BeaconMotion, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let core = Engine::new(cfg).map_err(|e| JsError::new(&format!("config error: {e}")))?;

        Ok(BeaconMotion {
            core,
            carry_ms: 0.0,
        })
    }

    /// Mount a page snapshot object. Returns the initial Outputs.
    #[wasm_bindgen]
    pub fn mount(&mut self, page: JsValue) -> Result<JsValue, JsError> {
        if jsvalue_is_undefined_or_null(&page) {
            return Err(JsError::new("mount: page is null/undefined"));
        }
        let page: PageSpec =
            swb::from_value(page).map_err(|e| JsError::new(&format!("mount parse error: {e}")))?;
        self.mount_page(page)
    }

    /// Mount a page snapshot given as a JSON string.
    #[wasm_bindgen(js_name = mount_json)]
    pub fn mount_json(&mut self, page_json: &str) -> Result<JsValue, JsError> {
        let page = parse_page_json(page_json)
            .map_err(|e| JsError::new(&format!("mount parse error: {e}")))?;
        self.mount_page(page)
    }

    /// Step by `dt_ms` (fractions accumulate) with an Inputs object. Returns Outputs.
    #[wasm_bindgen]
    pub fn update(&mut self, dt_ms: f64, inputs: JsValue) -> Result<JsValue, JsError> {
        let inputs = Self::parse_inputs(inputs)?;
        let dt = self.take_dt(dt_ms);
        let out: &Outputs = self.core.update(dt, inputs);
        swb::to_value(out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
    }

    /// Like `update`, but applies the changes through `presenter` and returns only the
    /// events.
    #[wasm_bindgen]
    pub fn render(
        &mut self,
        dt_ms: f64,
        inputs: JsValue,
        presenter: JsValue,
    ) -> Result<JsValue, JsError> {
        if !presenter.is_object() {
            return Err(JsError::new("render: presenter must be an object"));
        }
        let inputs = Self::parse_inputs(inputs)?;
        let dt = self.take_dt(dt_ms);
        let out: &Outputs = self.core.update(dt, inputs);
        let mut js = JsPresenter { target: presenter };
        apply_changes(&out.changes, &mut js);
        swb::to_value(&out.events).map_err(|e| JsError::new(&format!("events error: {e}")))
    }

    /// Active slide of a deck, or undefined for an unknown or empty deck.
    #[wasm_bindgen(js_name = current_slide)]
    pub fn current_slide(&self, deck: u32) -> Option<u32> {
        self.core
            .deck(DeckId(deck))
            .filter(|d| !d.is_empty())
            .map(|d| d.current_index() as u32)
    }

    #[wasm_bindgen(js_name = stop_slider)]
    pub fn stop_slider(&mut self, deck: u32) -> bool {
        self.core.stop_slider(DeckId(deck))
    }

    /// Release timers and visibility registrations (view teardown).
    #[wasm_bindgen]
    pub fn dispose(&mut self) {
        self.core.dispose();
    }

    #[wasm_bindgen(js_name = now_ms)]
    pub fn now_ms(&self) -> f64 {
        self.core.now_ms() as f64
    }
}

/// Visible fraction of an element for hosts measuring layout themselves
/// (`getBoundingClientRect().top/height` against `innerHeight`).
#[wasm_bindgen]
pub fn visible_fraction(
    top: f32,
    height: f32,
    viewport_height: f32,
    margin_top: f32,
    margin_bottom: f32,
) -> f32 {
    beacon_motion_core::visible_fraction(
        ElementRect { top, height },
        viewport_height,
        RootMargin {
            top: margin_top,
            bottom: margin_bottom,
        },
    )
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
