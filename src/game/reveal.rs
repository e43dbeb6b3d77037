//! Scroll-reveal events.
//!
//! Elements entering the viewport carry a declarative event of the form
//! `name[:argument]`, e.g. `gain-xp:25` or `acquire-skill:LOCKPICK`. The name
//! is looked up in a fixed registry and turned into [`RevealAction`]s that the
//! session executes. Markup never supplies code.

use std::collections::{HashMap, HashSet};

use crate::error::{NetRunnerError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealAction {
    GainXp(u32),
    AcquireSkill { name: String, description: String },
    CompleteQuest(String),
    Notify(String),
}

/// Handler for a named event: receives the argument after the colon.
pub type RevealHandler = Box<dyn Fn(Option<&str>) -> Result<Vec<RevealAction>>>;

pub struct RevealRegistry {
    handlers: HashMap<String, RevealHandler>,
    fired: HashSet<String>,
}

impl Default for RevealRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RevealRegistry {
    /// Registry with the built-in events.
    pub fn new() -> Self {
        let mut registry = Self {
            handlers: HashMap::new(),
            fired: HashSet::new(),
        };
        registry.register("gain-xp", |arg| {
            let arg = require(arg, "gain-xp")?;
            let amount = arg.trim().parse::<u32>().map_err(|e| invalid("gain-xp", &e.to_string()))?;
            Ok(vec![RevealAction::GainXp(amount)])
        });
        registry.register("acquire-skill", |arg| {
            let arg = require(arg, "acquire-skill")?;
            // `NAME` or `NAME|description`
            let (name, description) = arg.split_once('|').unwrap_or((arg, ""));
            if name.trim().is_empty() {
                return Err(invalid("acquire-skill", "missing skill name"));
            }
            Ok(vec![RevealAction::AcquireSkill {
                name: name.trim().to_string(),
                description: description.trim().to_string(),
            }])
        });
        registry.register("complete-quest", |arg| {
            let arg = require(arg, "complete-quest")?;
            Ok(vec![RevealAction::CompleteQuest(arg.trim().to_string())])
        });
        registry.register("notify", |arg| {
            let arg = require(arg, "notify")?;
            Ok(vec![RevealAction::Notify(arg.to_string())])
        });
        registry
    }

    /// Add or replace a named handler.
    pub fn register(
        &mut self,
        name: &str,
        handler: impl Fn(Option<&str>) -> Result<Vec<RevealAction>> + 'static,
    ) {
        self.handlers.insert(name.to_string(), Box::new(handler));
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn has_fired(&self, element: &str) -> bool {
        self.fired.contains(element)
    }

    /// Resolve `event` for `element` into actions. Returns no actions if the
    /// element has already fired. Nothing is marked here: the caller runs the
    /// actions and then calls [`RevealRegistry::mark_fired`].
    pub fn resolve(&self, element: &str, event: &str) -> Result<Vec<RevealAction>> {
        if self.fired.contains(element) {
            return Ok(Vec::new());
        }
        let (name, arg) = match event.split_once(':') {
            Some((name, arg)) => (name.trim(), Some(arg)),
            None => (event.trim(), None),
        };
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| NetRunnerError::UnknownEvent(name.to_string()))?;
        handler(arg)
    }

    pub fn mark_fired(&mut self, element: &str) {
        self.fired.insert(element.to_string());
    }

    /// Forget which elements fired (page reload).
    pub fn reset(&mut self) {
        self.fired.clear();
    }
}

fn require<'a>(arg: Option<&'a str>, event: &str) -> Result<&'a str> {
    match arg {
        Some(a) if !a.trim().is_empty() => Ok(a),
        _ => Err(invalid(event, "missing argument")),
    }
}

fn invalid(event: &str, reason: &str) -> NetRunnerError {
    NetRunnerError::InvalidEventArgument {
        event: event.to_string(),
        reason: reason.to_string(),
    }
}
