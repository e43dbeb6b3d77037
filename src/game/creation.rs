//! Character creation: a name form resolved through a deferred signal.

use std::rc::Rc;

use crate::error::{NetRunnerError, Result};
use crate::game::deferred::{Completion, Deferred, deferred};
use crate::game::markup::escape;
use crate::game::surface::{Region, Surface};

/// Trim and check a proposed name.
pub fn validate_name(raw: &str, max_len: usize) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(NetRunnerError::InvalidName("name must not be empty".into()));
    }
    let len = name.chars().count();
    if len > max_len {
        return Err(NetRunnerError::InvalidName(format!(
            "name is {} characters, limit is {}",
            len, max_len
        )));
    }
    if name.chars().any(char::is_control) {
        return Err(NetRunnerError::InvalidName(
            "name contains control characters".into(),
        ));
    }
    Ok(name.to_string())
}

pub struct CreationPrompt {
    id: u64,
    max_len: usize,
    done: Deferred<String>,
    surface: Rc<dyn Surface>,
}

impl CreationPrompt {
    pub fn open(id: u64, max_len: usize, surface: Rc<dyn Surface>) -> (Self, Completion<String>) {
        surface.render(Region::Creation, id, &render_creation(max_len, None));
        let (done, completion) = deferred();
        let prompt = Self {
            id,
            max_len,
            done,
            surface,
        };
        (prompt, completion)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_resolved(&self) -> bool {
        self.done.is_resolved()
    }

    /// Validate a submission. On error the form re-renders with the message
    /// and stays open.
    pub fn check(&self, raw: &str) -> Result<String> {
        validate_name(raw, self.max_len).inspect_err(|e| {
            self.surface.render(
                Region::Creation,
                self.id,
                &render_creation(self.max_len, Some(&e.to_string())),
            );
        })
    }

    /// Resolve with the accepted name and unmount.
    pub fn resolve(&mut self, name: String) -> Result<()> {
        self.done.resolve(name)?;
        self.surface.remove(Region::Creation, self.id);
        Ok(())
    }
}

pub fn render_creation(max_len: usize, error: Option<&str>) -> String {
    let mut html = String::with_capacity(1024);
    html.push_str(r#"<div class="nr-creation fixed inset-0 flex items-center justify-center bg-black/80" role="dialog">"#);
    html.push_str(r#"<div class="font-mono bg-slate-950 border border-cyan-500 rounded-lg p-6 max-w-md w-full text-slate-100">"#);
    html.push_str(r#"<p class="text-xs tracking-widest text-cyan-400 mb-2">NEW CONNECTION DETECTED</p>"#);
    html.push_str(r#"<label class="block text-sm mb-1" for="nr-name-input">Identify yourself, runner:</label>"#);
    html.push_str(&format!(
        r#"<input type="text" id="nr-name-input" maxlength="{}" autocomplete="off" class="w-full bg-slate-900 border border-cyan-700 rounded px-2 py-1 text-cyan-200 focus:border-cyan-400">"#,
        max_len
    ));
    if let Some(error) = error {
        html.push_str(&format!(
            r#"<p class="text-xs text-red-400 mt-1">{}</p>"#,
            escape(error)
        ));
    }
    html.push_str(r#"<button class="mt-3 w-full bg-cyan-600 hover:bg-cyan-500 text-slate-950 font-bold py-2 rounded cursor-pointer" onclick="htmx.ajax('POST', '/api/creation/submit', {values: {name: document.getElementById('nr-name-input').value}, swap: 'none'})">JACK IN</button>"#);
    html.push_str("</div></div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::surface::RecordingSurface;

    #[test]
    fn trims_names() {
        assert_eq!(validate_name("  Ada  ", 32).unwrap(), "Ada");
    }

    #[test]
    fn rejects_blank_long_and_control() {
        assert!(validate_name("   ", 32).is_err());
        assert!(validate_name("abcdef", 5).is_err());
        assert!(validate_name("a\u{7}b", 32).is_err());
        assert!(validate_name("Zoë", 3).is_ok());
    }

    #[test]
    fn bad_submission_keeps_form_open() {
        let surface = RecordingSurface::new();
        let (prompt, mut done) = CreationPrompt::open(1, 32, Rc::new(surface.clone()));
        assert!(prompt.check("").is_err());
        let html = surface.html(Region::Creation, 1).unwrap();
        assert!(html.contains("must not be empty"));
        assert!(!prompt.is_resolved());
        assert_eq!(done.try_take().unwrap(), None);
    }

    #[test]
    fn resolve_unmounts() {
        let surface = RecordingSurface::new();
        let (mut prompt, mut done) = CreationPrompt::open(1, 32, Rc::new(surface.clone()));
        let name = prompt.check(" Ada ").unwrap();
        prompt.resolve(name).unwrap();
        assert_eq!(done.try_take().unwrap().as_deref(), Some("Ada"));
        assert!(surface.mounted(Region::Creation).is_empty());
    }
}
