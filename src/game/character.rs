//! The persisted character record.
//!
//! Field names match the JSON stored in localStorage (`xpToNext`,
//! `questsCompleted`, ...), so records written by earlier builds of the page
//! keep loading. Missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Threshold for going from level 1 to level 2.
pub const STARTING_XP_TO_NEXT: u32 = 100;

/// The five attributes. All of them go up by one per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "UPPERCASE")]
pub struct Stats {
    pub int: i32,
    pub focus: i32,
    pub memory: i32,
    pub stealth: i32,
    pub reputation: i32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            int: 5,
            focus: 5,
            memory: 5,
            stealth: 3,
            reputation: 1,
        }
    }
}

impl Stats {
    pub fn increment_all(&mut self) {
        for stat in [
            &mut self.int,
            &mut self.focus,
            &mut self.memory,
            &mut self.stealth,
            &mut self.reputation,
        ] {
            *stat = stat.saturating_add(1);
        }
    }

    /// Display order used by the status panel.
    pub fn entries(&self) -> [(&'static str, i32); 5] {
        [
            ("INT", self.int),
            ("FOCUS", self.focus),
            ("MEMORY", self.memory),
            ("STEALTH", self.stealth),
            ("REPUTATION", self.reputation),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub text: String,
    #[serde(default)]
    pub complete: bool,
}

/// The single active quest. Replaced wholesale on every update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub objectives: Vec<Objective>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Character {
    pub name: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub stats: Stats,
    /// Ordered set: see [`Character::learn_skill`].
    pub skills: Vec<String>,
    /// Ordered set: see [`Character::record_quest`].
    pub quests_completed: Vec<String>,
    pub current_quest: Option<Quest>,
    /// Branch data owned by the narrative scripts. Never read by the engine.
    pub choices: serde_json::Map<String, serde_json::Value>,
    pub flags: BTreeMap<String, bool>,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            class_name: "Netrunner".to_string(),
            level: 1,
            xp: 0,
            xp_to_next: STARTING_XP_TO_NEXT,
            stats: Stats::default(),
            skills: Vec::new(),
            quests_completed: Vec::new(),
            current_quest: None,
            choices: serde_json::Map::new(),
            flags: BTreeMap::new(),
        }
    }
}

impl Character {
    pub fn has_skill(&self, name: &str) -> bool {
        self.skills.iter().any(|s| s == name)
    }

    /// Add a skill. Returns false if it was already known.
    pub fn learn_skill(&mut self, name: &str) -> bool {
        if self.has_skill(name) {
            return false;
        }
        self.skills.push(name.to_string());
        true
    }

    pub fn has_completed(&self, quest_id: &str) -> bool {
        self.quests_completed.iter().any(|q| q == quest_id)
    }

    /// Record a completed quest. Returns false if it was already recorded.
    pub fn record_quest(&mut self, quest_id: &str) -> bool {
        if self.has_completed(quest_id) {
            return false;
        }
        self.quests_completed.push(quest_id.to_string());
        true
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    /// Percentage of the way to the next level, for the XP bar.
    pub fn xp_percent(&self) -> u32 {
        if self.xp_to_next == 0 {
            return 0;
        }
        ((u64::from(self.xp) * 100) / u64::from(self.xp_to_next)).min(100) as u32
    }
}
