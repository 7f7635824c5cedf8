use crate::config::NavbarCfg;
use crate::outputs::Change;

/// Raises the navbar shadow once the page scrolls past a threshold.
/// Changes are emitted only when the raised state flips.
#[derive(Clone, Debug)]
pub struct NavbarShadow {
    node: String,
    cfg: NavbarCfg,
    raised: Option<bool>,
}

impl NavbarShadow {
    pub fn new(node: impl Into<String>, cfg: &NavbarCfg) -> Self {
        Self {
            node: node.into(),
            cfg: cfg.clone(),
            raised: None,
        }
    }

    pub fn is_raised(&self) -> bool {
        self.raised.unwrap_or(false)
    }

    pub fn on_scroll(&mut self, scroll_y: f64, out: &mut Vec<Change>) {
        let raised = scroll_y > self.cfg.scroll_threshold_px;
        if self.raised == Some(raised) {
            return;
        }
        self.raised = Some(raised);
        let shadow = if raised {
            &self.cfg.raised_shadow
        } else {
            &self.cfg.resting_shadow
        };
        out.push(Change::SetStyle {
            node: self.node.clone(),
            property: "box-shadow".to_string(),
            value: shadow.clone(),
        });
    }
}
