//! Branching choice prompt.
//!
//! Options render in array order, so the index the player picks is the index
//! into the caller's array. A prompt accepts exactly one selection; the flag
//! side effect is applied by the session before the prompt resolves.

use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::error::{NetRunnerError, Result};
use crate::game::deferred::{Completion, Deferred, deferred};
use crate::game::markup::escape;
use crate::game::surface::{Region, Surface};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub text: String,
    /// Character flag set to `true` when this option is picked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
}

impl ChoiceOption {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            flag: None,
        }
    }

    pub fn with_flag(text: &str, flag: &str) -> Self {
        Self {
            text: text.to_string(),
            flag: Some(flag.to_string()),
        }
    }
}

pub struct ChoicePrompt {
    id: u64,
    prompt: String,
    options: Vec<ChoiceOption>,
    done: Deferred<usize>,
    surface: Rc<dyn Surface>,
}

impl ChoicePrompt {
    pub fn open(
        id: u64,
        prompt: &str,
        options: Vec<ChoiceOption>,
        surface: Rc<dyn Surface>,
    ) -> Result<(Self, Completion<usize>)> {
        if options.is_empty() {
            return Err(NetRunnerError::EmptyChoice);
        }
        surface.render(Region::Choice, id, &render_choice(prompt, &options));
        let (done, completion) = deferred();
        let choice = Self {
            id,
            prompt: prompt.to_string(),
            options,
            done,
            surface,
        };
        Ok((choice, completion))
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    pub fn is_resolved(&self) -> bool {
        self.done.is_resolved()
    }

    /// Option at `index`, or an error that leaves the prompt open.
    pub fn option(&self, index: usize) -> Result<&ChoiceOption> {
        self.options.get(index).ok_or(NetRunnerError::ChoiceOutOfRange {
            index,
            len: self.options.len(),
        })
    }

    /// Resolve with `index` and unmount. Flags must already be persisted.
    pub fn resolve(&mut self, index: usize) -> Result<()> {
        self.option(index)?;
        self.done.resolve(index)?;
        self.surface.remove(Region::Choice, self.id);
        Ok(())
    }
}

/// Render the prompt with one button per option, in order.
pub fn render_choice(prompt: &str, options: &[ChoiceOption]) -> String {
    let mut html = String::with_capacity(512);
    html.push_str(r#"<div class="nr-choice fixed inset-0 flex items-center justify-center bg-black/70" role="dialog">"#);
    html.push_str(r#"<div class="font-mono bg-slate-950 border border-amber-400 rounded-lg p-5 max-w-lg w-full">"#);
    html.push_str(&format!(
        r#"<p class="text-amber-300 mb-4">{}</p>"#,
        escape(prompt)
    ));
    for (i, option) in options.iter().enumerate() {
        html.push_str(&format!(
            r#"<button class="block w-full text-left px-3 py-2 mb-2 border border-amber-700 rounded hover:bg-amber-400/10 text-slate-100 cursor-pointer" data-index="{}" onclick="htmx.ajax('POST', '/api/choice/select', {{values: {{index: '{}'}}, swap: 'none'}})">&gt; {}</button>"#,
            i,
            i,
            escape(&option.text)
        ));
    }
    html.push_str("</div></div>");
    html
}
