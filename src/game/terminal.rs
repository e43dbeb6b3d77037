//! Inline "terminal" widgets embedded in the tutorial text.
//!
//! The page marks a terminal with the expected command and an optional reward
//! (skill and/or XP). Typed input is compared after trimming surrounding
//! whitespace; everything else, including case, must match exactly.

use crate::game::markup::escape;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TerminalSpec {
    pub expected: String,
    pub skill: Option<(String, String)>,
    pub xp: Option<u32>,
}

impl TerminalSpec {
    pub fn accepts(&self, input: &str) -> bool {
        !self.expected.trim().is_empty() && input.trim() == self.expected.trim()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalOutcome {
    /// Wrong command; nothing changed.
    Rejected,
    Accepted {
        /// Skill newly learned by this command, if any.
        skill: Option<String>,
        xp: u32,
    },
}

/// Render the echo of the typed command and the response line.
pub fn render_terminal_output(input: &str, outcome: &TerminalOutcome) -> String {
    let mut html = String::with_capacity(256);
    html.push_str(&format!(
        r#"<div class="nr-terminal-line font-mono text-sm"><span class="text-emerald-500">$</span> {}</div>"#,
        escape(input.trim())
    ));
    match outcome {
        TerminalOutcome::Rejected => {
            html.push_str(&format!(
                r#"<div class="font-mono text-sm text-red-400">command not recognized: {}</div>"#,
                escape(input.trim())
            ));
        }
        TerminalOutcome::Accepted { skill, xp } => {
            html.push_str(r#"<div class="font-mono text-sm text-emerald-400">OK</div>"#);
            if let Some(skill) = skill {
                html.push_str(&format!(
                    r#"<div class="font-mono text-xs text-fuchsia-300">skill unlocked: {}</div>"#,
                    escape(skill)
                ));
            }
            if *xp > 0 {
                html.push_str(&format!(
                    r#"<div class="font-mono text-xs text-cyan-300">+{} XP</div>"#,
                    xp
                ));
            }
        }
    }
    html
}
