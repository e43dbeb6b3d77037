//! `web-sys`/`gloo-timers` implementations of the engine seams.

use gloo_timers::callback::{Interval, Timeout};

use crate::error::{NetRunnerError, Result};
use crate::game::storage::Storage;
use crate::game::surface::{Region, Surface};
use crate::game::timer::{Scheduler, TimerGuard, TimerHandle};

// ── localStorage ───────────────────────────────────────────────────

/// One localStorage key.
pub struct LocalStorage {
    key: String,
}

impl LocalStorage {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    fn backend() -> Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| NetRunnerError::Storage("localStorage unavailable".into()))
    }
}

impl Storage for LocalStorage {
    fn load(&self) -> Option<String> {
        Self::backend().ok()?.get_item(&self.key).ok().flatten()
    }

    fn save(&self, data: &str) -> Result<()> {
        Self::backend()?.set_item(&self.key, data).map_err(|e| {
            tracing::error!("localStorage write failed: {:?}", e);
            NetRunnerError::Storage(format!("write failed: {:?}", e))
        })
    }

    fn clear(&self) -> Result<()> {
        Self::backend()?
            .remove_item(&self.key)
            .map_err(|e| NetRunnerError::Storage(format!("remove failed: {:?}", e)))
    }
}

// ── Timers ─────────────────────────────────────────────────────────

struct IntervalGuard(Interval);

impl TimerGuard for IntervalGuard {
    fn cancel(self: Box<Self>) {
        drop(self.0.cancel());
    }

    fn detach(self: Box<Self>) {
        self.0.forget();
    }
}

struct TimeoutGuard(Timeout);

impl TimerGuard for TimeoutGuard {
    fn cancel(self: Box<Self>) {
        drop(self.0.cancel());
    }

    fn detach(self: Box<Self>) {
        self.0.forget();
    }
}

/// `setInterval`/`setTimeout` through gloo.
#[derive(Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn repeat(&self, interval_ms: u32, mut tick: Box<dyn FnMut()>) -> TimerHandle {
        TimerHandle::new(IntervalGuard(Interval::new(interval_ms.max(1), move || tick())))
    }

    fn once(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> TimerHandle {
        TimerHandle::new(TimeoutGuard(Timeout::new(delay_ms, fire)))
    }
}

// ── DOM ────────────────────────────────────────────────────────────

/// Writes fragments into `#netrunner-<region>` containers, creating any
/// container the page does not provide at the end of `<body>`.
#[derive(Clone, Copy, Default)]
pub struct DomSurface;

impl DomSurface {
    fn document() -> Option<web_sys::Document> {
        web_sys::window()?.document()
    }

    fn container(doc: &web_sys::Document, region: Region) -> Option<web_sys::Element> {
        let id = format!("netrunner-{}", region.name());
        if let Some(el) = doc.get_element_by_id(&id) {
            return Some(el);
        }
        let el = doc.create_element("div").ok()?;
        el.set_id(&id);
        doc.body()?.append_child(&el).ok()?;
        Some(el)
    }
}

impl Surface for DomSurface {
    fn render(&self, region: Region, id: u64, html: &str) {
        let Some(doc) = Self::document() else {
            return;
        };
        let element_id = region.element_id(id);
        if let Some(el) = doc.get_element_by_id(&element_id) {
            el.set_inner_html(html);
            return;
        }
        let Some(container) = Self::container(&doc, region) else {
            tracing::warn!("No container for region {}", region.name());
            return;
        };
        match doc.create_element("div") {
            Ok(el) => {
                el.set_id(&element_id);
                el.set_inner_html(html);
                if container.append_child(&el).is_err() {
                    tracing::warn!("Could not mount {}", element_id);
                }
            }
            Err(e) => tracing::warn!("Could not create {}: {:?}", element_id, e),
        }
    }

    fn remove(&self, region: Region, id: u64) {
        if let Some(el) = Self::document().and_then(|d| d.get_element_by_id(&region.element_id(id))) {
            el.remove();
        }
    }

    fn reload(&self) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().reload() {
                tracing::error!("Page reload failed: {:?}", e);
            }
        }
    }
}
