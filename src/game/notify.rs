//! Transient system notifications ("toasts").
//!
//! Each toast is mounted in phase `enter`, switches to `shown` after the enter
//! delay, to `leave` after the display duration and is removed once the exit
//! transition is over. The tray caps how many are live; the oldest is dropped
//! (timers and all) when a new one would exceed the cap.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::game::markup::{Phase, escape};
use crate::game::surface::{Region, Surface};
use crate::game::timer::{Scheduler, TimerHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Xp,
    Quest,
    Skill,
    Level,
    Error,
}

impl NotificationKind {
    /// Parse a kind tag from the page. Unknown tags are `Info`.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "xp" => NotificationKind::Xp,
            "quest" => NotificationKind::Quest,
            "skill" => NotificationKind::Skill,
            "level" => NotificationKind::Level,
            "error" => NotificationKind::Error,
            _ => NotificationKind::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Xp => "xp",
            NotificationKind::Quest => "quest",
            NotificationKind::Skill => "skill",
            NotificationKind::Level => "level",
            NotificationKind::Error => "error",
        }
    }

    fn classes(self) -> (&'static str, &'static str) {
        match self {
            NotificationKind::Xp => ("border-cyan-400", "text-cyan-300"),
            NotificationKind::Quest => ("border-amber-400", "text-amber-300"),
            NotificationKind::Skill => ("border-fuchsia-400", "text-fuchsia-300"),
            NotificationKind::Level => ("border-emerald-400", "text-emerald-300"),
            NotificationKind::Error => ("border-red-500", "text-red-400"),
            NotificationKind::Info => ("border-slate-400", "text-slate-200"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TrayTiming {
    pub enter_ms: u32,
    pub display_ms: u32,
    pub exit_ms: u32,
    pub max_live: usize,
}

struct Toast {
    id: u64,
    message: String,
    kind: NotificationKind,
    phase: Phase,
    timers: Vec<TimerHandle>,
}

type Toasts = Rc<RefCell<VecDeque<Toast>>>;

pub struct NotificationTray {
    scheduler: Rc<dyn Scheduler>,
    surface: Rc<dyn Surface>,
    timing: TrayTiming,
    next_id: Cell<u64>,
    toasts: Toasts,
}

impl NotificationTray {
    pub fn new(scheduler: Rc<dyn Scheduler>, surface: Rc<dyn Surface>, timing: TrayTiming) -> Self {
        Self {
            scheduler,
            surface,
            timing,
            next_id: Cell::new(1),
            toasts: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    /// Show a message. Returns the toast id.
    pub fn push(&self, message: &str, kind: NotificationKind) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let overflow: Vec<Toast> = {
            let mut toasts = self.toasts.borrow_mut();
            let max_live = self.timing.max_live.max(1);
            let excess = (toasts.len() + 1).saturating_sub(max_live);
            toasts.drain(..excess).collect()
        };
        for old in overflow {
            tracing::debug!("Notification {} dropped: tray full", old.id);
            self.surface.remove(Region::Notifications, old.id);
        }

        self.surface.render(
            Region::Notifications,
            id,
            &render_toast(message, kind, Phase::Enter),
        );

        let TrayTiming {
            enter_ms,
            display_ms,
            exit_ms,
            ..
        } = self.timing;
        let timers = vec![
            self.phase_timer(id, enter_ms, Phase::Shown),
            self.phase_timer(id, enter_ms.saturating_add(display_ms), Phase::Leave),
            self.removal_timer(
                id,
                enter_ms.saturating_add(display_ms).saturating_add(exit_ms),
            ),
        ];

        self.toasts.borrow_mut().push_back(Toast {
            id,
            message: message.to_string(),
            kind,
            phase: Phase::Enter,
            timers,
        });
        id
    }

    /// Remove a toast before its timers run out. Returns false if unknown.
    pub fn dismiss(&self, id: u64) -> bool {
        let removed = take_toast(&self.toasts, id);
        if removed.is_some() {
            self.surface.remove(Region::Notifications, id);
        }
        removed.is_some()
    }

    /// Ids of live toasts, oldest first.
    pub fn live(&self) -> Vec<u64> {
        self.toasts.borrow().iter().map(|t| t.id).collect()
    }

    pub fn messages(&self) -> Vec<(NotificationKind, String)> {
        self.toasts
            .borrow()
            .iter()
            .map(|t| (t.kind, t.message.clone()))
            .collect()
    }

    pub fn phase(&self, id: u64) -> Option<Phase> {
        self.toasts
            .borrow()
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.phase)
    }

    fn phase_timer(&self, id: u64, delay_ms: u32, phase: Phase) -> TimerHandle {
        let toasts = Rc::downgrade(&self.toasts);
        let surface = Rc::clone(&self.surface);
        self.scheduler.once(
            delay_ms,
            Box::new(move || set_phase(&toasts, surface.as_ref(), id, phase)),
        )
    }

    fn removal_timer(&self, id: u64, delay_ms: u32) -> TimerHandle {
        let toasts = Rc::downgrade(&self.toasts);
        let surface = Rc::clone(&self.surface);
        self.scheduler.once(
            delay_ms,
            Box::new(move || {
                let Some(toasts) = toasts.upgrade() else {
                    return;
                };
                if take_toast(&toasts, id).is_some() {
                    surface.remove(Region::Notifications, id);
                }
            }),
        )
    }
}

fn set_phase(toasts: &Weak<RefCell<VecDeque<Toast>>>, surface: &dyn Surface, id: u64, phase: Phase) {
    let Some(toasts) = toasts.upgrade() else {
        return;
    };
    let mut toasts = toasts.borrow_mut();
    if let Some(toast) = toasts.iter_mut().find(|t| t.id == id) {
        toast.phase = phase;
        surface.render(
            Region::Notifications,
            id,
            &render_toast(&toast.message, toast.kind, phase),
        );
    }
}

/// Detach a toast from the tray. Its timers are cancelled when the returned
/// value is dropped, outside the tray borrow.
fn take_toast(toasts: &Toasts, id: u64) -> Option<Toast> {
    let mut toasts = toasts.borrow_mut();
    let pos = toasts.iter().position(|t| t.id == id)?;
    toasts.remove(pos)
}

/// Render a single toast.
pub fn render_toast(message: &str, kind: NotificationKind, phase: Phase) -> String {
    let (border, text) = kind.classes();
    format!(
        r#"<div class="nr-toast font-mono text-sm bg-slate-900/90 border-l-4 {} {} px-3 py-2 mb-2 rounded shadow" data-kind="{}" data-phase="{}" role="status">{}</div>"#,
        border,
        text,
        kind.as_str(),
        phase.as_str(),
        escape(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::surface::RecordingSurface;
    use crate::game::timer::ManualScheduler;

    const TIMING: TrayTiming = TrayTiming {
        enter_ms: 10,
        display_ms: 3000,
        exit_ms: 300,
        max_live: 3,
    };

    fn tray() -> (NotificationTray, ManualScheduler, RecordingSurface) {
        let sched = ManualScheduler::new();
        let surface = RecordingSurface::new();
        let tray = NotificationTray::new(Rc::new(sched.clone()), Rc::new(surface.clone()), TIMING);
        (tray, sched, surface)
    }

    #[test]
    fn full_lifecycle() {
        let (tray, sched, surface) = tray();
        let id = tray.push("+25 XP", NotificationKind::Xp);
        let html = surface.html(Region::Notifications, id).unwrap();
        assert!(html.contains(r#"data-phase="enter""#));
        assert!(html.contains("+25 XP"));

        sched.advance(10);
        assert_eq!(tray.phase(id), Some(Phase::Shown));
        assert!(surface
            .html(Region::Notifications, id)
            .unwrap()
            .contains(r#"data-phase="shown""#));

        sched.advance(3000);
        assert_eq!(tray.phase(id), Some(Phase::Leave));

        sched.advance(300);
        assert!(tray.live().is_empty());
        assert!(surface.mounted(Region::Notifications).is_empty());
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn toasts_stack_independently() {
        let (tray, sched, surface) = tray();
        let first = tray.push("one", NotificationKind::Info);
        sched.advance(1000);
        let second = tray.push("two", NotificationKind::Info);
        sched.advance(2310);
        assert_eq!(tray.live(), vec![second]);
        assert_eq!(surface.mounted(Region::Notifications), vec![second]);
        assert!(surface.html(Region::Notifications, first).is_none());
    }

    #[test]
    fn overflow_drops_the_oldest() {
        let (tray, sched, surface) = tray();
        let ids: Vec<u64> = (0..4)
            .map(|i| tray.push(&format!("msg {i}"), NotificationKind::Info))
            .collect();
        assert_eq!(tray.live(), ids[1..].to_vec());
        assert_eq!(surface.mounted(Region::Notifications), ids[1..].to_vec());
        // The dropped toast's timers are gone with it.
        assert_eq!(sched.pending(), 9);
    }

    #[test]
    fn dismiss_early() {
        let (tray, sched, surface) = tray();
        let id = tray.push("bye", NotificationKind::Quest);
        assert!(tray.dismiss(id));
        assert!(!tray.dismiss(id));
        assert!(surface.mounted(Region::Notifications).is_empty());
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn message_is_escaped() {
        let (tray, _sched, surface) = tray();
        let id = tray.push("<script>alert(1)</script>", NotificationKind::Error);
        let html = surface.html(Region::Notifications, id).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"data-kind="error""#));
    }

    #[test]
    fn kind_tags() {
        assert_eq!(NotificationKind::parse("xp"), NotificationKind::Xp);
        assert_eq!(NotificationKind::parse("whatever"), NotificationKind::Info);
        assert_eq!(NotificationKind::Level.as_str(), "level");
    }
}
