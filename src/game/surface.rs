//! Rendering seam between the presenters and the page.
//!
//! Presenters produce HTML fragments and hand them to a [`Surface`] keyed by
//! region and element id. The browser implementation writes them into the
//! DOM; [`RecordingSurface`] keeps them in memory.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Named container on the page. Each maps to an element `#netrunner-<name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    Status,
    QuestLog,
    Notifications,
    Popup,
    Dialogue,
    Choice,
    Creation,
}

impl Region {
    pub fn name(self) -> &'static str {
        match self {
            Region::Status => "status",
            Region::QuestLog => "quest-log",
            Region::Notifications => "notifications",
            Region::Popup => "popup",
            Region::Dialogue => "dialogue",
            Region::Choice => "choice",
            Region::Creation => "creation",
        }
    }

    /// DOM id of the element holding fragment `id` inside this region.
    pub fn element_id(self, id: u64) -> String {
        format!("nr-{}-{}", self.name(), id)
    }
}

pub trait Surface {
    /// Mount fragment `id`, or replace its markup if already mounted.
    fn render(&self, region: Region, id: u64, html: &str);

    /// Remove fragment `id`. Removing an unknown id is a no-op.
    fn remove(&self, region: Region, id: u64);

    /// Throw away all rendered state and re-initialize the page.
    fn reload(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    Render { region: Region, id: u64 },
    Remove { region: Region, id: u64 },
    Reload,
}

#[derive(Debug, Default)]
struct Recorded {
    mounted: BTreeMap<(Region, u64), String>,
    ops: Vec<SurfaceOp>,
}

/// In-memory surface. Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    inner: Rc<RefCell<Recorded>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn html(&self, region: Region, id: u64) -> Option<String> {
        self.inner.borrow().mounted.get(&(region, id)).cloned()
    }

    /// Ids mounted in `region`, ascending.
    pub fn mounted(&self, region: Region) -> Vec<u64> {
        self.inner
            .borrow()
            .mounted
            .keys()
            .filter(|(r, _)| *r == region)
            .map(|(_, id)| *id)
            .collect()
    }

    /// Markup of every fragment in `region`, in id order.
    pub fn region_html(&self, region: Region) -> Vec<String> {
        self.inner
            .borrow()
            .mounted
            .iter()
            .filter(|((r, _), _)| *r == region)
            .map(|(_, html)| html.clone())
            .collect()
    }

    pub fn ops(&self) -> Vec<SurfaceOp> {
        self.inner.borrow().ops.clone()
    }

    /// Number of times fragment `id` was rendered.
    pub fn render_count(&self, region: Region, id: u64) -> usize {
        self.inner
            .borrow()
            .ops
            .iter()
            .filter(|op| **op == SurfaceOp::Render { region, id })
            .count()
    }
}

impl Surface for RecordingSurface {
    fn render(&self, region: Region, id: u64, html: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.mounted.insert((region, id), html.to_string());
        inner.ops.push(SurfaceOp::Render { region, id });
    }

    fn remove(&self, region: Region, id: u64) {
        let mut inner = self.inner.borrow_mut();
        inner.mounted.remove(&(region, id));
        inner.ops.push(SurfaceOp::Remove { region, id });
    }

    fn reload(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.mounted.clear();
        inner.ops.push(SurfaceOp::Reload);
    }
}
