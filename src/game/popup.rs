//! Modal acknowledgement popups (skill acquired, level up).
//!
//! Unlike notifications they never time out: a popup stays until the player
//! dismisses it. Only the enter and exit transitions are timed.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::game::character::Stats;
use crate::game::markup::{Phase, escape};
use crate::game::surface::{Region, Surface};
use crate::game::timer::{Scheduler, TimerHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupKind {
    Skill { name: String, description: String },
    LevelUp { level: u32, stats: Stats },
}

struct Popup {
    id: u64,
    kind: PopupKind,
    _enter: TimerHandle,
}

pub struct PopupStack {
    scheduler: Rc<dyn Scheduler>,
    surface: Rc<dyn Surface>,
    enter_ms: u32,
    exit_ms: u32,
    next_id: Cell<u64>,
    open: Rc<RefCell<Vec<Popup>>>,
}

impl PopupStack {
    pub fn new(
        scheduler: Rc<dyn Scheduler>,
        surface: Rc<dyn Surface>,
        enter_ms: u32,
        exit_ms: u32,
    ) -> Self {
        Self {
            scheduler,
            surface,
            enter_ms,
            exit_ms,
            next_id: Cell::new(1),
            open: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn show(&self, kind: PopupKind) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.surface
            .render(Region::Popup, id, &render_popup(id, &kind, Phase::Enter));

        let open = Rc::downgrade(&self.open);
        let surface = Rc::clone(&self.surface);
        let enter = self.scheduler.once(
            self.enter_ms,
            Box::new(move || {
                let Some(open) = open.upgrade() else {
                    return;
                };
                if let Some(popup) = open.borrow().iter().find(|p| p.id == id) {
                    surface.render(Region::Popup, id, &render_popup(id, &popup.kind, Phase::Shown));
                }
            }),
        );

        self.open.borrow_mut().push(Popup {
            id,
            kind,
            _enter: enter,
        });
        id
    }

    /// Start the exit transition of popup `id`. Returns false if it is not open.
    pub fn dismiss(&self, id: u64) -> bool {
        let popup = {
            let mut open = self.open.borrow_mut();
            let Some(pos) = open.iter().position(|p| p.id == id) else {
                return false;
            };
            open.remove(pos)
        };
        self.surface
            .render(Region::Popup, id, &render_popup(id, &popup.kind, Phase::Leave));
        let surface = Rc::clone(&self.surface);
        self.scheduler
            .once(
                self.exit_ms,
                Box::new(move || surface.remove(Region::Popup, id)),
            )
            .detach();
        true
    }

    pub fn open_ids(&self) -> Vec<u64> {
        self.open.borrow().iter().map(|p| p.id).collect()
    }

    pub fn kinds(&self) -> Vec<PopupKind> {
        self.open.borrow().iter().map(|p| p.kind.clone()).collect()
    }
}

fn dismiss_button(id: u64) -> String {
    format!(
        r#"<button class="mt-3 px-4 py-1 border border-current rounded hover:bg-white/10 cursor-pointer" onclick="htmx.ajax('POST', '/api/popup/dismiss', {{values: {{id: '{}'}}, swap: 'none'}})">[ OK ]</button>"#,
        id
    )
}

/// Render a popup fragment.
pub fn render_popup(id: u64, kind: &PopupKind, phase: Phase) -> String {
    let mut html = String::with_capacity(512);
    html.push_str(&format!(
        r#"<div class="nr-popup fixed inset-0 flex items-center justify-center bg-black/60" data-phase="{}" role="dialog">"#,
        phase.as_str()
    ));
    match kind {
        PopupKind::Skill { name, description } => {
            html.push_str(r#"<div class="font-mono bg-slate-900 border-2 border-fuchsia-400 text-fuchsia-200 rounded-lg p-5 max-w-md text-center">"#);
            html.push_str(r#"<p class="text-xs tracking-widest mb-1">SKILL ACQUIRED</p>"#);
            html.push_str(&format!(
                r#"<p class="text-xl font-bold mb-2">{}</p>"#,
                escape(name)
            ));
            if !description.is_empty() {
                html.push_str(&format!(
                    r#"<p class="text-sm text-slate-300">{}</p>"#,
                    escape(description)
                ));
            }
        }
        PopupKind::LevelUp { level, stats } => {
            html.push_str(r#"<div class="font-mono bg-slate-900 border-2 border-emerald-400 text-emerald-200 rounded-lg p-5 max-w-md text-center">"#);
            html.push_str(r#"<p class="text-xs tracking-widest mb-1">LEVEL UP</p>"#);
            html.push_str(&format!(
                r#"<p class="text-3xl font-bold mb-2">Level {}</p>"#,
                level
            ));
            html.push_str(r#"<ul class="text-sm text-slate-300">"#);
            for (label, value) in stats.entries() {
                html.push_str(&format!(r#"<li>{} {} <span class="text-emerald-400">(+1)</span></li>"#, label, value));
            }
            html.push_str("</ul>");
        }
    }
    html.push_str(&dismiss_button(id));
    html.push_str("</div></div>");
    html
}
