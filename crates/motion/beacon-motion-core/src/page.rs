//! Page snapshot: the nodes the engine animates, captured once by the host at load.
//!
//! Node keys are opaque strings chosen by the host (element ids, selectors, or indices
//! into its own lookup table).

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::EngineError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    #[serde(default)]
    pub stats: Option<StatsSpec>,
    /// Nodes that play an entrance animation the first time they scroll into view.
    #[serde(default)]
    pub reveal: Vec<String>,
    #[serde(default)]
    pub sections: Vec<SectionNode>,
    #[serde(default)]
    pub nav_links: Vec<NavLinkNode>,
    #[serde(default)]
    pub sliders: Vec<SliderSpec>,
    #[serde(default)]
    pub filter: Option<FilterSpec>,
    #[serde(default)]
    pub navbar: Option<String>,
}

/// Counters that start together when their container becomes visible.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatsSpec {
    pub container: String,
    #[serde(default)]
    pub counters: Vec<CounterNode>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CounterNode {
    pub node: String,
    #[serde(deserialize_with = "deserialize_target")]
    pub target: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionNode {
    pub node: String,
    /// The section's element id, matched against nav link hrefs (`#id`).
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavLinkNode {
    pub node: String,
    pub href: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SliderSpec {
    #[serde(default)]
    pub slides: Vec<String>,
    #[serde(default)]
    pub indicators: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub buttons: Vec<FilterButtonNode>,
    #[serde(default)]
    pub cards: Vec<CourseCardNode>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterButtonNode {
    pub node: String,
    pub filter: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CourseCardNode {
    pub node: String,
    pub category: String,
}

/// Parse a counter target the way a `data-target` attribute is read: leading whitespace
/// is skipped along with at most one `+` sign, then the leading run of decimal digits is
/// taken (`"500+"` → 500).
pub fn parse_counter_target(raw: &str) -> Option<u64> {
    let raw = raw.trim_start();
    let digits: String = raw
        .strip_prefix('+')
        .unwrap_or(raw)
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn deserialize_target<'de, D>(de: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTarget {
        Number(u64),
        Text(String),
    }

    match RawTarget::deserialize(de)? {
        RawTarget::Number(n) => Ok(n),
        RawTarget::Text(s) => parse_counter_target(&s).ok_or_else(|| {
            serde::de::Error::custom(format!("counter target `{s}` is not a non-negative integer"))
        }),
    }
}

/// Parse a page snapshot from JSON and validate it.
pub fn parse_page_json(s: &str) -> Result<PageSpec, EngineError> {
    let page: PageSpec =
        serde_json::from_str(s).map_err(|e| EngineError::PageParse(e.to_string()))?;
    page.validate()?;
    Ok(page)
}

impl PageSpec {
    /// Reject empty node keys; everything else is tolerated at runtime.
    pub fn validate(&self) -> Result<(), EngineError> {
        fn check<'a>(
            keys: impl IntoIterator<Item = &'a str>,
            context: &'static str,
        ) -> Result<(), EngineError> {
            if keys.into_iter().any(str::is_empty) {
                return Err(EngineError::EmptyNodeKey { context });
            }
            Ok(())
        }

        if let Some(stats) = &self.stats {
            check([stats.container.as_str()], "stats.container")?;
            check(stats.counters.iter().map(|c| c.node.as_str()), "stats.counters")?;
        }
        check(self.reveal.iter().map(String::as_str), "reveal")?;
        check(self.sections.iter().map(|s| s.node.as_str()), "sections")?;
        check(self.nav_links.iter().map(|l| l.node.as_str()), "nav_links")?;
        for slider in &self.sliders {
            check(slider.slides.iter().map(String::as_str), "sliders.slides")?;
            check(slider.indicators.iter().map(String::as_str), "sliders.indicators")?;
        }
        if let Some(filter) = &self.filter {
            check(filter.buttons.iter().map(|b| b.node.as_str()), "filter.buttons")?;
            check(filter.cards.iter().map(|c| c.node.as_str()), "filter.cards")?;
        }
        if let Some(navbar) = &self.navbar {
            check([navbar.as_str()], "navbar")?;
        }
        Ok(())
    }
}
