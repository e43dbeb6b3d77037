//! The engine facade and its thread-local instance.
//!
//! [`NetRunner`] is the API narrative scripts talk to. It owns the store, the
//! presenters and whatever prompt is currently open. The browser build
//! installs one instance with web backends at start-up; until then (and in
//! tests) a headless instance with in-memory backends is used.
//!
//! Every mutating call follows the same shape: load the whole record, change
//! it, save it, then present.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use std::cell::RefCell;
use std::rc::Rc;

use crate::config::Config;
use crate::error::{NetRunnerError, Result};
use crate::game::character::{Character, Objective, Quest};
use crate::game::choice::{ChoiceOption, ChoicePrompt};
use crate::game::creation::CreationPrompt;
use crate::game::deferred::Completion;
use crate::game::dialogue::{DialogueBox, DialogueLine, DialogueStep};
use crate::game::notify::{NotificationKind, NotificationTray, TrayTiming};
use crate::game::popup::{PopupKind, PopupStack};
use crate::game::progression::{self, XpOutcome};
use crate::game::quest::render_quest_log;
use crate::game::reveal::{RevealAction, RevealRegistry};
use crate::game::status::render_status;
use crate::game::storage::{MemoryStorage, Storage};
use crate::game::store::CharacterStore;
use crate::game::surface::{RecordingSurface, Region, Surface};
use crate::game::terminal::{TerminalOutcome, TerminalSpec};
use crate::game::timer::{ManualScheduler, Scheduler};

/// Fixed fragment id for the single-instance regions (status, quest log).
const PANEL_ID: u64 = 0;

pub struct NetRunner {
    config: Config,
    store: CharacterStore,
    scheduler: Rc<dyn Scheduler>,
    surface: Rc<dyn Surface>,
    notifications: NotificationTray,
    popups: PopupStack,
    reveals: RevealRegistry,
    dialogue: Option<DialogueBox>,
    choice: Option<ChoicePrompt>,
    creation: Option<CreationPrompt>,
    next_prompt_id: u64,
}

impl NetRunner {
    pub fn new(
        config: Config,
        storage: Rc<dyn Storage>,
        scheduler: Rc<dyn Scheduler>,
        surface: Rc<dyn Surface>,
    ) -> Self {
        let notifications = NotificationTray::new(
            Rc::clone(&scheduler),
            Rc::clone(&surface),
            TrayTiming {
                enter_ms: config.notification_enter_ms,
                display_ms: config.notification_display_ms,
                exit_ms: config.transition_ms,
                max_live: config.max_notifications,
            },
        );
        let popups = PopupStack::new(
            Rc::clone(&scheduler),
            Rc::clone(&surface),
            config.notification_enter_ms,
            config.transition_ms,
        );
        Self {
            store: CharacterStore::new(storage),
            config,
            scheduler,
            surface,
            notifications,
            popups,
            reveals: RevealRegistry::new(),
            dialogue: None,
            choice: None,
            creation: None,
            next_prompt_id: 1,
        }
    }

    /// In-memory backends: nothing persists past the session.
    pub fn headless(config: Config) -> Self {
        Self::new(
            config,
            Rc::new(MemoryStorage::new()),
            Rc::new(ManualScheduler::new()),
            Rc::new(RecordingSurface::new()),
        )
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn notifications(&self) -> &NotificationTray {
        &self.notifications
    }

    pub fn popups(&self) -> &PopupStack {
        &self.popups
    }

    pub fn reveals_mut(&mut self) -> &mut RevealRegistry {
        &mut self.reveals
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_prompt_id;
        self.next_prompt_id += 1;
        id
    }

    // ── Character store ────────────────────────────────────────────

    pub fn get_character(&self) -> Character {
        self.store.load()
    }

    pub fn save_character(&self, character: &Character) -> Result<()> {
        self.store.save(character)?;
        self.refresh_status_display();
        Ok(())
    }

    /// Clear the stored record and make the page start over.
    pub fn reset_character(&mut self) -> Result<()> {
        self.store.reset()?;
        self.reveals.reset();
        self.dialogue = None;
        self.choice = None;
        self.creation = None;
        self.surface.reload();
        Ok(())
    }

    /// URL-safe base64 of the stored record.
    pub fn export_character(&self) -> Result<String> {
        let json = serde_json::to_string(&self.store.load())?;
        Ok(URL_SAFE_NO_PAD.encode(json.as_bytes()))
    }

    /// Replace the stored record with an exported one. Bad input leaves the
    /// stored record untouched.
    pub fn import_character(&self, blob: &str) -> Result<Character> {
        let bytes = URL_SAFE_NO_PAD.decode(blob.trim())?;
        let character: Character = serde_json::from_slice(&bytes)?;
        self.save_character(&character)?;
        tracing::info!("Imported character {}", character.name);
        Ok(character)
    }

    // ── Presentation ───────────────────────────────────────────────

    pub fn refresh_status_display(&self) -> String {
        let html = render_status(&self.store.load());
        self.surface.render(Region::Status, PANEL_ID, &html);
        html
    }

    pub fn notify(&self, message: &str, kind: NotificationKind) -> u64 {
        self.notifications.push(message, kind)
    }

    pub fn dismiss_notification(&self, id: u64) -> bool {
        self.notifications.dismiss(id)
    }

    pub fn dismiss_popup(&self, id: u64) -> bool {
        self.popups.dismiss(id)
    }

    // ── Progression ────────────────────────────────────────────────

    /// Award XP, applying and presenting every level-up it pays for.
    pub fn gain_xp(&self, amount: u32) -> Result<XpOutcome> {
        if amount == 0 {
            return Ok(XpOutcome::default());
        }
        let (_, (mut stats, outcome)) = self
            .store
            .update(|c| (c.stats, progression::apply_xp(c, amount)))?;

        self.notify(&format!("+{} XP", amount), NotificationKind::Xp);
        for level in &outcome.levels {
            tracing::info!("Level up: {}", level);
            stats.increment_all();
            self.popups.show(PopupKind::LevelUp {
                level: *level,
                stats,
            });
        }
        self.refresh_status_display();
        Ok(outcome)
    }

    /// Learn a skill. Returns false (and shows nothing) if already known.
    pub fn acquire_skill(&self, name: &str, description: &str) -> Result<bool> {
        if self.store.load().has_skill(name) {
            return Ok(false);
        }
        self.store.update(|c| c.learn_skill(name))?;
        tracing::info!("Skill acquired: {}", name);
        self.popups.show(PopupKind::Skill {
            name: name.to_string(),
            description: description.to_string(),
        });
        self.refresh_status_display();
        Ok(true)
    }

    // ── Quests ─────────────────────────────────────────────────────

    /// Replace the active quest (no merge with the previous one).
    pub fn update_quest_log(&self, id: &str, status: &str, objectives: Vec<Objective>) -> Result<()> {
        let quest = Quest::new(id, status, objectives);
        self.store.update(|c| c.current_quest = Some(quest))?;
        self.render_quest_log();
        Ok(())
    }

    pub fn render_quest_log(&self) -> String {
        let html = render_quest_log(&self.store.load());
        self.surface.render(Region::QuestLog, PANEL_ID, &html);
        html
    }

    /// Record a quest as completed. Only the first call notifies.
    pub fn complete_quest(&self, id: &str) -> Result<bool> {
        if self.store.load().has_completed(id) {
            return Ok(false);
        }
        self.store.update(|c| c.record_quest(id))?;
        tracing::info!("Quest completed: {}", id);
        self.notify(&format!("Quest complete: {}", id), NotificationKind::Quest);
        self.render_quest_log();
        Ok(true)
    }

    // ── Dialogue ───────────────────────────────────────────────────

    /// Open a dialogue box. An already open dialogue is dismissed first.
    pub fn show_dialogue(&mut self, speaker: &str, text: &str, portrait: Option<&str>) -> Completion<()> {
        if let Some(mut previous) = self.dialogue.take() {
            if let Err(e) = previous.dismiss() {
                tracing::warn!("Could not dismiss previous dialogue: {}", e);
            }
        }
        let id = self.next_id();
        let (dialogue, completion) = DialogueBox::open(
            id,
            DialogueLine {
                speaker: speaker.to_string(),
                text: text.to_string(),
                portrait: portrait.map(str::to_string),
            },
            Rc::clone(&self.scheduler),
            Rc::clone(&self.surface),
            self.config.reveal_interval_ms,
            self.config.transition_ms,
        );
        self.dialogue = Some(dialogue);
        completion
    }

    /// A click on the dialogue box.
    pub fn advance_dialogue(&mut self) -> Result<DialogueStep> {
        let dialogue = self
            .dialogue
            .as_mut()
            .ok_or(NetRunnerError::NoActivePrompt("dialogue"))?;
        let step = dialogue.advance()?;
        if step == DialogueStep::Dismissed {
            self.dialogue = None;
        }
        Ok(step)
    }

    pub fn dismiss_dialogue(&mut self) -> Result<()> {
        let mut dialogue = self
            .dialogue
            .take()
            .ok_or(NetRunnerError::NoActivePrompt("dialogue"))?;
        dialogue.dismiss()
    }

    pub fn dialogue_open(&self) -> bool {
        self.dialogue.is_some()
    }

    // ── Choice ─────────────────────────────────────────────────────

    pub fn show_choice(&mut self, prompt: &str, options: Vec<ChoiceOption>) -> Result<Completion<usize>> {
        if self.choice.is_some() {
            return Err(NetRunnerError::PromptActive("choice"));
        }
        let id = self.next_id();
        let (choice, completion) = ChoicePrompt::open(id, prompt, options, Rc::clone(&self.surface))?;
        self.choice = Some(choice);
        Ok(completion)
    }

    /// Pick option `index`: persist its flag (if any), then resolve.
    pub fn select_choice(&mut self, index: usize) -> Result<usize> {
        let choice = self
            .choice
            .as_mut()
            .ok_or(NetRunnerError::NoActivePrompt("choice"))?;
        let option = choice.option(index)?;
        if let Some(flag) = option.flag.clone() {
            self.store.update(|c| c.flags.insert(flag, true))?;
        }
        choice.resolve(index)?;
        self.choice = None;
        Ok(index)
    }

    pub fn choice_open(&self) -> bool {
        self.choice.is_some()
    }

    // ── Character creation ─────────────────────────────────────────

    pub fn show_character_creation(&mut self) -> Result<Completion<String>> {
        if self.creation.is_some() {
            return Err(NetRunnerError::PromptActive("character creation"));
        }
        let id = self.next_id();
        let (prompt, completion) =
            CreationPrompt::open(id, self.config.max_name_len, Rc::clone(&self.surface));
        self.creation = Some(prompt);
        Ok(completion)
    }

    pub fn submit_character_name(&mut self, raw: &str) -> Result<String> {
        let prompt = self
            .creation
            .as_mut()
            .ok_or(NetRunnerError::NoActivePrompt("character creation"))?;
        let name = prompt.check(raw)?;
        self.store.update(|c| c.name = name.clone())?;
        prompt.resolve(name.clone())?;
        self.creation = None;
        tracing::info!("Character created: {}", name);
        self.refresh_status_display();
        Ok(name)
    }

    // ── Page hooks ─────────────────────────────────────────────────

    /// Check a terminal command; on a match award its skill and XP.
    pub fn check_terminal(&self, spec: &TerminalSpec, input: &str) -> Result<TerminalOutcome> {
        if !spec.accepts(input) {
            return Ok(TerminalOutcome::Rejected);
        }
        let mut learned = None;
        if let Some((name, description)) = &spec.skill {
            if self.acquire_skill(name, description)? {
                learned = Some(name.clone());
            }
        }
        let xp = spec.xp.unwrap_or(0);
        self.gain_xp(xp)?;
        Ok(TerminalOutcome::Accepted { skill: learned, xp })
    }

    /// Fire a reveal event for `element`. Returns the actions that ran.
    ///
    /// The element only counts as fired once every action succeeded, so a
    /// failed write is retried on the next scroll.
    pub fn fire_reveal(&mut self, element: &str, event: &str) -> Result<Vec<RevealAction>> {
        let actions = self.reveals.resolve(element, event)?;
        for action in &actions {
            match action {
                RevealAction::GainXp(amount) => {
                    self.gain_xp(*amount)?;
                }
                RevealAction::AcquireSkill { name, description } => {
                    self.acquire_skill(name, description)?;
                }
                RevealAction::CompleteQuest(id) => {
                    self.complete_quest(id)?;
                }
                RevealAction::Notify(message) => {
                    self.notify(message, NotificationKind::Info);
                }
            }
        }
        self.reveals.mark_fired(element);
        Ok(actions)
    }
}

// ── Thread-local session ───────────────────────────────────────────

thread_local! {
    static RUNNER: RefCell<NetRunner> = RefCell::new(NetRunner::headless(Config::default()));
}

/// Replace the session (start-up, configuration change, tests).
pub fn install(runner: NetRunner) {
    RUNNER.with(|r| {
        *r.borrow_mut() = runner;
    });
}

/// Execute a closure with read access to the session.
pub fn with_runner<F, R>(f: F) -> R
where
    F: FnOnce(&NetRunner) -> R,
{
    RUNNER.with(|r| f(&r.borrow()))
}

/// Execute a closure with mutable access to the session.
pub fn with_runner_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut NetRunner) -> R,
{
    RUNNER.with(|r| f(&mut r.borrow_mut()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::character::Stats;

    struct Harness {
        runner: NetRunner,
        storage: MemoryStorage,
        sched: ManualScheduler,
        surface: RecordingSurface,
    }

    fn harness() -> Harness {
        let storage = MemoryStorage::new();
        let sched = ManualScheduler::new();
        let surface = RecordingSurface::new();
        let runner = NetRunner::new(
            Config::default(),
            Rc::new(storage.clone()),
            Rc::new(sched.clone()),
            Rc::new(surface.clone()),
        );
        Harness {
            runner,
            storage,
            sched,
            surface,
        }
    }

    #[test]
    fn gain_xp_levels_persists_and_presents() {
        let h = harness();
        let outcome = h.runner.gain_xp(100).unwrap();
        assert_eq!(outcome.levels, vec![2]);

        let c = h.runner.get_character();
        assert_eq!((c.level, c.xp, c.xp_to_next), (2, 0, 150));
        assert_eq!(c.stats.memory, Stats::default().memory + 1);
        assert!(h.storage.contents().unwrap().contains(r#""level":2"#));

        let messages = h.runner.notifications().messages();
        assert_eq!(messages, vec![(NotificationKind::Xp, "+100 XP".to_string())]);
        assert_eq!(h.runner.popups().open_ids().len(), 1);
        assert!(h
            .surface
            .html(Region::Status, PANEL_ID)
            .unwrap()
            .contains("LVL <strong>2</strong>"));
    }

    #[test]
    fn multi_level_award_shows_one_popup_per_level() {
        let h = harness();
        h.runner.gain_xp(475).unwrap();
        let levels: Vec<u32> = h
            .runner
            .popups()
            .kinds()
            .into_iter()
            .filter_map(|k| match k {
                PopupKind::LevelUp { level, .. } => Some(level),
                PopupKind::Skill { .. } => None,
            })
            .collect();
        assert_eq!(levels, vec![2, 3, 4]);
        let mounted = h.surface.region_html(Region::Popup);
        assert_eq!(mounted.len(), 3);
        assert!(mounted[0].contains("Level 2"));
        assert!(mounted[2].contains("Level 4"));
        let c = h.runner.get_character();
        assert_eq!((c.level, c.xp, c.xp_to_next), (4, 0, 337));
    }

    #[test]
    fn zero_xp_does_nothing() {
        let h = harness();
        assert_eq!(h.runner.gain_xp(0).unwrap(), XpOutcome::default());
        assert!(h.storage.contents().is_none());
        assert!(h.runner.notifications().live().is_empty());
    }

    #[test]
    fn acquire_skill_is_idempotent() {
        let h = harness();
        assert!(h.runner.acquire_skill("LOCKPICK", "Open locks").unwrap());
        assert!(!h.runner.acquire_skill("LOCKPICK", "Open locks").unwrap());
        assert_eq!(h.runner.get_character().skills, vec!["LOCKPICK".to_string()]);
        assert_eq!(h.runner.popups().open_ids().len(), 1);
    }

    #[test]
    fn complete_quest_is_idempotent_and_notifies_once() {
        let h = harness();
        assert!(h.runner.complete_quest("Q1").unwrap());
        assert!(!h.runner.complete_quest("Q1").unwrap());
        assert_eq!(h.runner.get_character().quests_completed, vec!["Q1".to_string()]);
        let quest_notes = h
            .runner
            .notifications()
            .messages()
            .into_iter()
            .filter(|(kind, _)| *kind == NotificationKind::Quest)
            .count();
        assert_eq!(quest_notes, 1);
    }

    #[test]
    fn quest_log_is_replaced_wholesale() {
        let h = harness();
        h.runner
            .update_quest_log(
                "Q1",
                "active",
                vec![Objective::new("a", true), Objective::new("b", false)],
            )
            .unwrap();
        h.runner
            .update_quest_log("Q2", "active", vec![Objective::new("c", false)])
            .unwrap();
        let quest = h.runner.get_character().current_quest.unwrap();
        assert_eq!(quest.id, "Q2");
        assert_eq!(quest.objectives, vec![Objective::new("c", false)]);
        let html = h.surface.html(Region::QuestLog, PANEL_ID).unwrap();
        assert!(html.contains("Q2"));
        assert!(!html.contains("Q1"));
    }

    #[test]
    fn choice_with_flag_persists_before_resolving() {
        let mut h = harness();
        let mut done = h
            .runner
            .show_choice(
                "Answer the ghost?",
                vec![
                    ChoiceOption::new("No"),
                    ChoiceOption::with_flag("Yes", "met_ghost"),
                ],
            )
            .unwrap();
        assert_eq!(h.runner.select_choice(1).unwrap(), 1);
        assert_eq!(done.try_take().unwrap(), Some(1));
        assert!(h.runner.get_character().flag("met_ghost"));
        assert!(!h.runner.choice_open());
    }

    #[test]
    fn choice_without_flag_writes_nothing() {
        let mut h = harness();
        let mut done = h
            .runner
            .show_choice("?", vec![ChoiceOption::new("ok")])
            .unwrap();
        h.runner.select_choice(0).unwrap();
        assert_eq!(done.try_take().unwrap(), Some(0));
        assert!(h.storage.contents().is_none());
    }

    #[test]
    fn choice_is_single_shot() {
        let mut h = harness();
        let _done = h.runner.show_choice("?", vec![ChoiceOption::new("a")]).unwrap();
        assert!(matches!(
            h.runner.show_choice("again?", vec![ChoiceOption::new("b")]),
            Err(NetRunnerError::PromptActive(_))
        ));
        assert!(h.runner.select_choice(3).is_err());
        assert!(h.runner.choice_open());
        h.runner.select_choice(0).unwrap();
        assert!(matches!(
            h.runner.select_choice(0),
            Err(NetRunnerError::NoActivePrompt(_))
        ));
    }

    #[test]
    fn dialogue_fast_forward_then_dismiss() {
        let mut h = harness();
        let mut done = h.runner.show_dialogue("GHOST", "Hello, runner.", None);
        h.sched.advance(60);
        assert_eq!(h.runner.advance_dialogue().unwrap(), DialogueStep::FastForwarded);
        assert_eq!(done.try_take().unwrap(), None);
        assert_eq!(h.runner.advance_dialogue().unwrap(), DialogueStep::Dismissed);
        assert_eq!(done.try_take().unwrap(), Some(()));
        assert!(!h.runner.dialogue_open());
        h.sched.advance(1_000);
        assert!(h.surface.mounted(Region::Dialogue).is_empty());
        assert_eq!(h.sched.pending(), 0);
    }

    #[test]
    fn new_dialogue_dismisses_the_open_one() {
        let mut h = harness();
        let mut first = h.runner.show_dialogue("A", "first line", None);
        let _second = h.runner.show_dialogue("B", "second line", Some("b.png"));
        assert_eq!(first.try_take().unwrap(), Some(()));
        assert!(h.runner.dialogue_open());
    }

    #[test]
    fn dismiss_without_dialogue_is_an_error() {
        let mut h = harness();
        assert!(matches!(
            h.runner.dismiss_dialogue(),
            Err(NetRunnerError::NoActivePrompt(_))
        ));
        assert!(h.runner.advance_dialogue().is_err());
    }

    #[test]
    fn character_creation_sets_name() {
        let mut h = harness();
        let mut done = h.runner.show_character_creation().unwrap();
        assert!(h.runner.submit_character_name("   ").is_err());
        assert_eq!(done.try_take().unwrap(), None);
        assert_eq!(h.runner.submit_character_name(" Ada ").unwrap(), "Ada");
        assert_eq!(done.try_take().unwrap().as_deref(), Some("Ada"));
        assert_eq!(h.runner.get_character().name, "Ada");
        assert!(h.runner.submit_character_name("Bob").is_err());
    }

    #[test]
    fn reset_returns_to_defaults_and_reloads() {
        let mut h = harness();
        h.runner.gain_xp(250).unwrap();
        h.runner.reset_character().unwrap();
        assert!(h.storage.contents().is_none());
        assert_eq!(h.runner.get_character(), Character::default());
        assert_eq!(
            h.surface.ops().last(),
            Some(&crate::game::surface::SurfaceOp::Reload)
        );
    }

    #[test]
    fn export_import_roundtrip() {
        let h = harness();
        h.runner.acquire_skill("GREP", "").unwrap();
        let blob = h.runner.export_character().unwrap();
        assert!(!blob.contains('='));

        let other = harness();
        let imported = other.runner.import_character(&blob).unwrap();
        assert_eq!(imported.skills, vec!["GREP".to_string()]);
        assert_eq!(other.runner.get_character(), h.runner.get_character());
    }

    #[test]
    fn bad_import_leaves_record_alone() {
        let h = harness();
        h.runner.gain_xp(10).unwrap();
        let before = h.storage.contents();
        assert!(matches!(
            h.runner.import_character("!!!not base64"),
            Err(NetRunnerError::Base64(_))
        ));
        let not_json = URL_SAFE_NO_PAD.encode(b"hello");
        assert!(matches!(
            h.runner.import_character(&not_json),
            Err(NetRunnerError::Json(_))
        ));
        assert_eq!(h.storage.contents(), before);
    }

    #[test]
    fn terminal_match_awards_rewards() {
        let h = harness();
        let spec = TerminalSpec {
            expected: "ls jobs/".into(),
            skill: Some(("LS".into(), "List things".into())),
            xp: Some(20),
        };
        assert_eq!(
            h.runner.check_terminal(&spec, "ls").unwrap(),
            TerminalOutcome::Rejected
        );
        assert!(h.storage.contents().is_none());

        assert_eq!(
            h.runner.check_terminal(&spec, " ls jobs/ ").unwrap(),
            TerminalOutcome::Accepted {
                skill: Some("LS".into()),
                xp: 20
            }
        );
        let c = h.runner.get_character();
        assert!(c.has_skill("LS"));
        assert_eq!(c.xp, 20);

        // Second run: skill already known, XP still awarded.
        assert_eq!(
            h.runner.check_terminal(&spec, "ls jobs/").unwrap(),
            TerminalOutcome::Accepted { skill: None, xp: 20 }
        );
        assert_eq!(h.runner.get_character().xp, 40);
    }

    #[test]
    fn reveal_runs_actions_once() {
        let mut h = harness();
        h.runner.fire_reveal("ch1-end", "gain-xp:30").unwrap();
        h.runner.fire_reveal("ch1-end", "gain-xp:30").unwrap();
        assert_eq!(h.runner.get_character().xp, 30);
        h.runner
            .fire_reveal("ch1-skill", "acquire-skill:CSV_PARSE|Read any CSV")
            .unwrap();
        assert!(h.runner.get_character().has_skill("CSV_PARSE"));
        assert!(h.runner.fire_reveal("evil", "eval:alert(1)").is_err());
    }

    /// Slot whose writes fail while `broken` is set.
    #[derive(Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        broken: std::cell::Cell<bool>,
    }

    impl Storage for FlakyStorage {
        fn load(&self) -> Option<String> {
            self.inner.load()
        }

        fn save(&self, data: &str) -> Result<()> {
            if self.broken.get() {
                return Err(NetRunnerError::Storage("quota exceeded".into()));
            }
            self.inner.save(data)
        }

        fn clear(&self) -> Result<()> {
            self.inner.clear()
        }
    }

    #[test]
    fn failed_reveal_can_fire_again() {
        let storage = Rc::new(FlakyStorage::default());
        storage.broken.set(true);
        let mut runner = NetRunner::new(
            Config::default(),
            Rc::clone(&storage) as Rc<dyn Storage>,
            Rc::new(ManualScheduler::new()),
            Rc::new(RecordingSurface::new()),
        );

        assert!(matches!(
            runner.fire_reveal("el", "gain-xp:10"),
            Err(NetRunnerError::Storage(_))
        ));
        assert!(!runner.reveals_mut().has_fired("el"));

        storage.broken.set(false);
        assert_eq!(
            runner.fire_reveal("el", "gain-xp:10").unwrap(),
            vec![RevealAction::GainXp(10)]
        );
        assert_eq!(runner.get_character().xp, 10);
        assert!(runner.reveals_mut().has_fired("el"));
        assert!(runner.fire_reveal("el", "gain-xp:10").unwrap().is_empty());
    }

    #[test]
    fn reveal_rejects_blank_skill_name() {
        let mut h = harness();
        assert!(matches!(
            h.runner.fire_reveal("el", "acquire-skill: |desc"),
            Err(NetRunnerError::InvalidEventArgument { .. })
        ));
        assert!(h.runner.get_character().skills.is_empty());
        assert!(h.runner.popups().open_ids().is_empty());
    }

    #[test]
    fn thread_local_session_can_be_replaced() {
        install(NetRunner::headless(Config::default()));
        with_runner(|r| r.gain_xp(40)).unwrap();
        assert_eq!(with_runner(|r| r.get_character().xp), 40);
        install(NetRunner::headless(Config::default()));
        assert_eq!(with_runner(|r| r.get_character().xp), 0);
        with_runner_mut(|r| r.show_dialogue("x", "y", None));
        assert!(with_runner(NetRunner::dialogue_open));
    }
}
