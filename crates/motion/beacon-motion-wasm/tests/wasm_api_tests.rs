#![cfg(target_arch = "wasm32")]
use beacon_motion_wasm::{abi_version, visible_fraction, BeaconMotion};
use js_sys::{Array, Function, Object, Reflect};
use serde_json::json;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn page_json() -> String {
    json!({
        "stats": {
            "container": "stats",
            "counters": [{ "node": "stat-a", "target": 100 }]
        },
        "sliders": [{
            "slides": ["s0", "s1", "s2"],
            "indicators": ["d0", "d1", "d2"]
        }],
        "navbar": "navbar"
    })
    .to_string()
}

fn get(obj: &JsValue, key: &str) -> JsValue {
    Reflect::get(obj, &JsValue::from_str(key)).unwrap()
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn construct_with_defaults_and_partial_config() {
    assert!(BeaconMotion::new(JsValue::UNDEFINED).is_ok());
    assert!(BeaconMotion::new(JsValue::NULL).is_ok());

    let cfg = Object::new();
    let slider = Object::new();
    Reflect::set(&slider, &"interval_ms".into(), &JsValue::from_f64(2000.0)).unwrap();
    Reflect::set(&cfg, &"slider".into(), &slider).unwrap();
    assert!(BeaconMotion::new(cfg.into()).is_ok());
}

#[wasm_bindgen_test]
fn invalid_config_is_an_error() {
    let cfg = Object::new();
    let counter = Object::new();
    Reflect::set(&counter, &"step_count".into(), &JsValue::from_f64(0.0)).unwrap();
    Reflect::set(&cfg, &"counter".into(), &counter).unwrap();
    assert!(BeaconMotion::new(cfg.into()).is_err());
}

#[wasm_bindgen_test]
fn mount_update_and_slides() {
    let mut eng = BeaconMotion::new(JsValue::UNDEFINED).unwrap();
    let out = eng.mount_json(&page_json()).unwrap();
    let changes = Array::from(&get(&out, "changes"));
    assert_eq!(changes.length(), 6);
    assert_eq!(eng.current_slide(0), Some(0));
    assert_eq!(eng.current_slide(5), None);

    // Second mount is rejected.
    assert!(eng.mount_json(&page_json()).is_err());

    // Fractional frames add up to the rotation period.
    for _ in 0..300 {
        eng.update(16.667, JsValue::UNDEFINED).unwrap();
    }
    assert_eq!(eng.now_ms(), 5000.0);
    assert_eq!(eng.current_slide(0), Some(1));

    assert!(eng.stop_slider(0));
    eng.update(20_000.0, JsValue::NULL).unwrap();
    assert_eq!(eng.current_slide(0), Some(1));
}

#[wasm_bindgen_test]
fn update_accepts_inputs_object() {
    let mut eng = BeaconMotion::new(JsValue::UNDEFINED).unwrap();
    eng.mount_json(&page_json()).unwrap();

    let inputs = swb_inputs(json!({
        "visibility": [{ "node": "stats", "fraction": 0.75 }],
        "indicator_clicks": [{ "deck": 0, "index": 2 }]
    }));
    let out = eng.update(0.0, inputs).unwrap();
    let changes = Array::from(&get(&out, "changes"));
    let texts: Vec<String> = changes
        .iter()
        .filter(|c| get(c, "op").as_string().as_deref() == Some("set_text"))
        .filter_map(|c| get(&c, "text").as_string())
        .collect();
    assert_eq!(texts, vec!["2+".to_string()]);
    assert_eq!(eng.current_slide(0), Some(2));

    let bad = swb_inputs(json!({ "visibility": 3 }));
    assert!(eng.update(16.0, bad).is_err());
}

#[wasm_bindgen_test]
fn render_calls_presenter_methods() {
    let mut eng = BeaconMotion::new(JsValue::UNDEFINED).unwrap();
    eng.mount_json(&page_json()).unwrap();

    let log = Array::new();
    let presenter = Object::new();
    Reflect::set(&presenter, &"log".into(), &log).unwrap();
    let set_text = Function::new_with_args("node, text", "this.log.push('text:' + node + '=' + text);");
    let set_active = Function::new_with_args("node, on", "this.log.push('active:' + node + '=' + on);");
    let set_style = Function::new_with_args("node, p, v", "this.log.push('style:' + node + ':' + p);");
    Reflect::set(&presenter, &"setText".into(), &set_text).unwrap();
    Reflect::set(&presenter, &"setActive".into(), &set_active).unwrap();
    Reflect::set(&presenter, &"setStyle".into(), &set_style).unwrap();

    let inputs = swb_inputs(json!({
        "visibility": [{ "node": "stats", "fraction": 1.0 }],
        "scroll_y": 300.0
    }));
    let events = eng.render(0.0, inputs, presenter.into()).unwrap();
    assert!(Array::from(&events).length() >= 2);

    let entries: Vec<String> = log.iter().filter_map(|v| v.as_string()).collect();
    assert!(entries.contains(&"text:stat-a=2+".to_string()));
    assert!(entries.contains(&"style:navbar:box-shadow".to_string()));

    assert!(eng
        .render(0.0, JsValue::UNDEFINED, JsValue::from_f64(1.0))
        .is_err());
}

#[wasm_bindgen_test]
fn visible_fraction_with_margin() {
    assert_eq!(visible_fraction(600.0, 200.0, 800.0, 0.0, -100.0), 0.5);
    assert_eq!(visible_fraction(900.0, 200.0, 800.0, 0.0, 0.0), 0.0);
}

fn swb_inputs(v: serde_json::Value) -> JsValue {
    js_sys::JSON::parse(&v.to_string()).unwrap()
}
