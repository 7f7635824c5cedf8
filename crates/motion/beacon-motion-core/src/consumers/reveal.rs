use crate::config::RevealCfg;
use crate::outputs::Change;

/// Entrance animation for nodes scrolling into view.
#[derive(Clone, Debug)]
pub struct Reveal {
    animation: String,
    reduced_motion: bool,
}

impl Reveal {
    pub fn new(cfg: &RevealCfg, reduced_motion: bool) -> Self {
        Self {
            animation: cfg.animation.clone(),
            reduced_motion,
        }
    }

    pub fn reveal(&self, node: &str, out: &mut Vec<Change>) {
        let (property, value) = if self.reduced_motion {
            ("opacity", "1".to_string())
        } else {
            ("animation", self.animation.clone())
        };
        out.push(Change::SetStyle {
            node: node.to_string(),
            property: property.to_string(),
            value,
        });
    }
}
