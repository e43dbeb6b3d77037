//! Dialogue box with a typewriter reveal.
//!
//! The text appears one character per tick. A click while the reveal runs
//! fast-forwards to the full text; the next click dismisses the box and
//! resolves its completion. The reveal ticker is owned by the reveal state and
//! cancelled on every exit path: natural end, fast-forward, dismissal, and the
//! box being dropped.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{NetRunnerError, Result};
use crate::game::deferred::{Completion, Deferred, deferred};
use crate::game::markup::{Phase, escape};
use crate::game::surface::{Region, Surface};
use crate::game::timer::{Scheduler, TimerHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueLine {
    pub speaker: String,
    pub text: String,
    pub portrait: Option<String>,
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueStep {
    FastForwarded,
    Dismissed,
}

struct Reveal {
    line: DialogueLine,
    chars: Vec<char>,
    shown: usize,
    phase: Phase,
    ticker: Option<TimerHandle>,
}

impl Reveal {
    fn is_revealing(&self) -> bool {
        self.shown < self.chars.len()
    }

    fn visible(&self) -> String {
        self.chars[..self.shown].iter().collect()
    }

    fn render(&self) -> String {
        render_dialogue(&self.line, &self.visible(), self.is_revealing(), self.phase)
    }
}

pub struct DialogueBox {
    id: u64,
    reveal: Rc<RefCell<Reveal>>,
    done: Deferred<()>,
    scheduler: Rc<dyn Scheduler>,
    surface: Rc<dyn Surface>,
    exit_ms: u32,
}

impl DialogueBox {
    /// Mount the box and start revealing. The completion resolves on dismissal.
    pub fn open(
        id: u64,
        line: DialogueLine,
        scheduler: Rc<dyn Scheduler>,
        surface: Rc<dyn Surface>,
        interval_ms: u32,
        exit_ms: u32,
    ) -> (Self, Completion<()>) {
        let chars: Vec<char> = line.text.chars().collect();
        let reveal = Rc::new(RefCell::new(Reveal {
            line,
            chars,
            shown: 0,
            phase: Phase::Shown,
            ticker: None,
        }));
        surface.render(Region::Dialogue, id, &reveal.borrow().render());

        if reveal.borrow().is_revealing() {
            let weak = Rc::downgrade(&reveal);
            let tick_surface = Rc::clone(&surface);
            let ticker = scheduler.repeat(
                interval_ms,
                Box::new(move || {
                    let Some(reveal) = weak.upgrade() else {
                        return;
                    };
                    let finished = {
                        let mut r = reveal.borrow_mut();
                        if r.is_revealing() {
                            r.shown += 1;
                            tick_surface.render(Region::Dialogue, id, &r.render());
                        }
                        if r.is_revealing() { None } else { r.ticker.take() }
                    };
                    // Cancel outside the borrow.
                    drop(finished);
                }),
            );
            reveal.borrow_mut().ticker = Some(ticker);
        }

        let (done, completion) = deferred();
        let dialogue = Self {
            id,
            reveal,
            done,
            scheduler,
            surface,
            exit_ms,
        };
        (dialogue, completion)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_revealing(&self) -> bool {
        self.reveal.borrow().is_revealing()
    }

    pub fn is_dismissed(&self) -> bool {
        self.done.is_resolved()
    }

    pub fn visible_text(&self) -> String {
        self.reveal.borrow().visible()
    }

    /// A click: fast-forward while revealing, dismiss otherwise.
    pub fn advance(&mut self) -> Result<DialogueStep> {
        if self.is_dismissed() {
            return Err(NetRunnerError::NoActivePrompt("dialogue"));
        }
        if self.is_revealing() {
            self.fast_forward();
            Ok(DialogueStep::FastForwarded)
        } else {
            self.dismiss()?;
            Ok(DialogueStep::Dismissed)
        }
    }

    /// Close the box from any phase and resolve the completion.
    pub fn dismiss(&mut self) -> Result<()> {
        if self.is_dismissed() {
            return Err(NetRunnerError::NoActivePrompt("dialogue"));
        }
        let ticker = {
            let mut r = self.reveal.borrow_mut();
            r.phase = Phase::Leave;
            self.surface.render(Region::Dialogue, self.id, &r.render());
            r.ticker.take()
        };
        drop(ticker);

        let surface = Rc::clone(&self.surface);
        let id = self.id;
        self.scheduler
            .once(
                self.exit_ms,
                Box::new(move || surface.remove(Region::Dialogue, id)),
            )
            .detach();
        tracing::debug!("Dialogue {} dismissed", self.id);
        self.done.resolve(())
    }

    fn fast_forward(&mut self) {
        let ticker = {
            let mut r = self.reveal.borrow_mut();
            r.shown = r.chars.len();
            self.surface.render(Region::Dialogue, self.id, &r.render());
            r.ticker.take()
        };
        drop(ticker);
    }
}

/// Render the dialogue box. `revealing` adds the blinking caret, otherwise a
/// continue hint is shown.
pub fn render_dialogue(line: &DialogueLine, visible: &str, revealing: bool, phase: Phase) -> String {
    let mut html = String::with_capacity(512 + visible.len());
    html.push_str(&format!(
        r#"<div class="nr-dialogue fixed bottom-4 inset-x-4 font-mono bg-slate-950/95 border border-cyan-500 rounded-lg p-4 flex gap-4 cursor-pointer" data-phase="{}" onclick="htmx.ajax('POST', '/api/dialogue/advance', {{swap: 'none'}})">"#,
        phase.as_str()
    ));
    if let Some(portrait) = &line.portrait {
        html.push_str(&format!(
            r#"<img class="w-16 h-16 rounded border border-cyan-700" src="{}" alt="{}">"#,
            escape(portrait),
            escape(&line.speaker)
        ));
    }
    html.push_str(r#"<div class="flex-1">"#);
    html.push_str(&format!(
        r#"<p class="text-cyan-400 font-bold mb-1">{}</p>"#,
        escape(&line.speaker)
    ));
    html.push_str(&format!(
        r#"<p class="text-slate-100 whitespace-pre-wrap">{}"#,
        escape(visible)
    ));
    if revealing {
        html.push_str(r#"<span class="nr-caret animate-pulse">▌</span>"#);
    }
    html.push_str("</p>");
    if !revealing {
        html.push_str(r#"<p class="text-xs text-cyan-600 text-right mt-2">▼ click to continue</p>"#);
    }
    html.push_str("</div></div>");
    html
}
