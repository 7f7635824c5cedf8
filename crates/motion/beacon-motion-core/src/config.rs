//! Engine configuration.
//!
//! Every section defaults to the values the Beacon page ships with, so a host can pass
//! `{}` (or nothing) and override only what it needs.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub counter: CounterCfg,
    pub slider: SliderCfg,
    pub thresholds: Thresholds,
    pub reveal: RevealCfg,
    pub navbar: NavbarCfg,
    pub filter: FilterCfg,
    pub capabilities: Capabilities,
    /// Mirrors `prefers-reduced-motion: reduce`. Counters jump to their final frame and
    /// reveal targets become visible without an entrance animation.
    pub reduced_motion: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterCfg {
    pub step_count: u32,
    pub tick_interval_ms: u64,
    pub suffix: String,
}

impl Default for CounterCfg {
    fn default() -> Self {
        Self {
            step_count: 50,
            tick_interval_ms: 30,
            suffix: "+".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderCfg {
    pub interval_ms: u64,
    /// When false the deck only moves on indicator selection.
    pub autoplay: bool,
}

impl Default for SliderCfg {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            autoplay: true,
        }
    }
}

/// Visibility thresholds per consumer, as fractions of the element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub stats: f32,
    pub reveal: f32,
    pub sections: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            stats: 0.5,
            reveal: 0.1,
            sections: 0.4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealCfg {
    pub animation: String,
    /// Bottom root margin (px) the host should apply when computing reveal fractions.
    /// Negative values shrink the viewport.
    pub root_margin_bottom_px: f32,
}

impl Default for RevealCfg {
    fn default() -> Self {
        Self {
            animation: "fadeInUp 0.6s ease-out forwards".to_string(),
            root_margin_bottom_px: -100.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarCfg {
    pub scroll_threshold_px: f64,
    pub raised_shadow: String,
    pub resting_shadow: String,
}

impl Default for NavbarCfg {
    fn default() -> Self {
        Self {
            scroll_threshold_px: 100.0,
            raised_shadow: "0 4px 16px rgba(0, 0, 0, 0.12)".to_string(),
            resting_shadow: "0 2px 8px rgba(0, 0, 0, 0.1)".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCfg {
    /// Filter value that matches every card.
    pub all_value: String,
    pub fade_in_delay_ms: u64,
    pub hide_delay_ms: u64,
}

impl Default for FilterCfg {
    fn default() -> Self {
        Self {
            all_value: "all".to_string(),
            fade_in_delay_ms: 10,
            hide_delay_ms: 300,
        }
    }
}

/// Host facilities the engine depends on. A missing facility makes the dependent
/// features inert instead of failing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    pub visibility: bool,
    pub timers: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            visibility: true,
            timers: true,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.counter.step_count == 0 {
            return Err(EngineError::InvalidConfig(
                "counter.step_count must be at least 1".into(),
            ));
        }
        if self.counter.tick_interval_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "counter.tick_interval_ms must be at least 1".into(),
            ));
        }
        if self.slider.interval_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "slider.interval_ms must be at least 1".into(),
            ));
        }
        for (name, t) in [
            ("thresholds.stats", self.thresholds.stats),
            ("thresholds.reveal", self.thresholds.reveal),
            ("thresholds.sections", self.thresholds.sections),
        ] {
            if !t.is_finite() || !(0.0..=1.0).contains(&t) {
                return Err(EngineError::InvalidConfig(format!(
                    "{name} must be within 0.0..=1.0, got {t}"
                )));
            }
        }
        if !self.navbar.scroll_threshold_px.is_finite() {
            return Err(EngineError::InvalidConfig(
                "navbar.scroll_threshold_px must be finite".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_constants() {
        let cfg = Config::default();
        assert_eq!(cfg.counter.step_count, 50);
        assert_eq!(cfg.counter.tick_interval_ms, 30);
        assert_eq!(cfg.slider.interval_ms, 5000);
        assert_eq!(cfg.thresholds.stats, 0.5);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: Config =
            serde_json::from_str(r#"{ "slider": { "interval_ms": 2000 }, "reduced_motion": true }"#)
                .unwrap();
        assert_eq!(cfg.slider.interval_ms, 2000);
        assert!(cfg.slider.autoplay);
        assert!(cfg.reduced_motion);
        assert_eq!(cfg.counter.suffix, "+");
    }

    #[test]
    fn rejects_zero_steps_and_bad_thresholds() {
        let mut cfg = Config::default();
        cfg.counter.step_count = 0;
        assert!(matches!(cfg.validate(), Err(EngineError::InvalidConfig(_))));

        let mut cfg = Config::default();
        cfg.thresholds.sections = 1.5;
        assert!(matches!(cfg.validate(), Err(EngineError::InvalidConfig(_))));
    }
}
