use log::debug;

use crate::outputs::Change;
use crate::page::{NavLinkNode, SectionNode};
use crate::presenter::ACTIVE_CLASS;

/// Highlights the nav link pointing at the section most recently scrolled into view.
#[derive(Clone, Debug, Default)]
pub struct SectionTracker {
    sections: Vec<SectionNode>,
    links: Vec<NavLinkNode>,
    current: Option<usize>,
}

impl SectionTracker {
    pub fn new(sections: Vec<SectionNode>, links: Vec<NavLinkNode>) -> Self {
        Self {
            sections,
            links,
            current: None,
        }
    }

    pub fn sections(&self) -> &[SectionNode] {
        &self.sections
    }

    /// Id of the section last activated.
    pub fn current(&self) -> Option<&str> {
        self.current
            .and_then(|i| self.sections.get(i))
            .map(|s| s.id.as_str())
    }

    /// Activate section `index`. Every link is rewritten so only matching hrefs stay
    /// active. Returns the section id, or `None` for an unknown index.
    pub fn activate(&mut self, index: usize, out: &mut Vec<Change>) -> Option<&str> {
        let section = self.sections.get(index)?;
        let anchor = format!("#{}", section.id);
        for link in &self.links {
            out.push(Change::SetClass {
                node: link.node.clone(),
                class: ACTIVE_CLASS.to_string(),
                enabled: link.href == anchor,
            });
        }
        debug!("section `{}` active", section.id);
        self.current = Some(index);
        Some(section.id.as_str())
    }
}
