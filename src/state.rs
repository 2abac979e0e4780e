use std::collections::VecDeque;
use std::path::PathBuf;

use image::DynamicImage;

use crate::hierarchy::{self, Category, Hierarchy, PlayerRecord, category_label};
use crate::image_fetch::{ImageSource, fetch_player_images};
use crate::resolver::{self, ResolvedOptions, player_label};
use crate::selection::{Level, Selection, level_label};

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Category,
    Year,
    League,
    Team,
    Player,
    Display,
}

impl Focus {
    const ORDER: [Focus; 6] = [
        Focus::Category,
        Focus::Year,
        Focus::League,
        Focus::Team,
        Focus::Player,
        Focus::Display,
    ];

    pub fn level(self) -> Option<Level> {
        match self {
            Focus::Year => Some(Level::Year),
            Focus::League => Some(Level::League),
            Focus::Team => Some(Level::Team),
            Focus::Player => Some(Level::Player),
            Focus::Category | Focus::Display => None,
        }
    }

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }
}

pub struct AppState {
    pub data_dir: PathBuf,
    pub category: Category,
    pub hierarchy: Option<Hierarchy>,
    pub load_error: Option<String>,
    pub selection: Selection,
    pub focus: Focus,
    pub images: Vec<DynamicImage>,
    pub profile_label: Option<String>,
    pub fetch_error: Option<String>,
    pub help_overlay: bool,
    pub logs: VecDeque<String>,
}

impl AppState {
    pub fn new(data_dir: PathBuf) -> Self {
        let mut state = Self {
            data_dir,
            category: Category::Pitch,
            hierarchy: None,
            load_error: None,
            selection: Selection::default(),
            focus: Focus::Category,
            images: Vec::new(),
            profile_label: None,
            fetch_error: None,
            help_overlay: false,
            logs: VecDeque::new(),
        };
        state.reload();
        state
    }

    pub fn switch_category(&mut self, category: Category) {
        self.category = category;
        self.reload();
    }

    pub fn toggle_category(&mut self) {
        self.switch_category(self.category.toggle());
    }

    fn reload(&mut self) {
        self.selection = Selection::default();
        self.clear_profile();
        match hierarchy::load(&self.data_dir, self.category) {
            Ok(data) => {
                let years = data.years().count();
                self.hierarchy = Some(data);
                self.load_error = None;
                self.push_log(format!(
                    "[INFO] Loaded {} data ({years} years)",
                    category_label(self.category)
                ));
            }
            Err(err) => {
                self.hierarchy = None;
                self.load_error = Some(err.to_string());
                self.push_log(format!("[WARN] {err}"));
            }
        }
    }

    pub fn options(&self) -> ResolvedOptions<'_> {
        resolver::resolve(
            self.hierarchy.as_ref(),
            self.selection.year(),
            self.selection.league(),
            self.selection.team(),
        )
    }

    /// Choices for a dropdown, excluding its placeholder. Player choices are
    /// display labels.
    pub fn level_choices(&self, level: Level) -> Vec<String> {
        let options = self.options();
        let keys = match level {
            Level::Year => options.years,
            Level::League => options.leagues,
            Level::Team => options.teams,
            Level::Player => {
                // Same-label players collapse to one entry; the label resolves
                // to the first of them.
                let mut labels: Vec<String> = Vec::new();
                for (local, romanized) in options.players {
                    let label = player_label(local, romanized);
                    if !labels.contains(&label) {
                        labels.push(label);
                    }
                }
                return labels;
            }
        };
        keys.into_iter().map(str::to_string).collect()
    }

    pub fn focus_next(&mut self) {
        let pos = self.focus.position();
        self.focus = Focus::ORDER[(pos + 1) % Focus::ORDER.len()];
    }

    pub fn focus_prev(&mut self) {
        let pos = self.focus.position();
        let len = Focus::ORDER.len();
        self.focus = Focus::ORDER[(pos + len - 1) % len];
    }

    pub fn cycle_focused(&mut self, forward: bool) {
        match self.focus {
            Focus::Category => self.toggle_category(),
            Focus::Display => {}
            other => {
                if let Some(level) = other.level() {
                    self.cycle_level(level, forward);
                }
            }
        }
    }

    /// Steps a dropdown through `[placeholder] + choices`, wrapping around.
    /// Landing on the placeholder clears that level.
    pub fn cycle_level(&mut self, level: Level, forward: bool) {
        let choices = self.level_choices(level);
        let total = choices.len() + 1;
        let current = self
            .selection
            .get(level)
            .and_then(|value| choices.iter().position(|c| c == value))
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % total
        } else {
            (current + total - 1) % total
        };

        let before = self.selection.clone();
        if next == 0 {
            self.selection.reset_to(level);
        } else if !self.selection.select(level, choices[next - 1].clone()) {
            self.push_log(format!(
                "[INFO] Pick the level above {} first",
                level_label(level)
            ));
        }
        if self.selection != before {
            self.clear_profile();
        }
    }

    pub fn reset_selection(&mut self) {
        self.selection = Selection::default();
        self.clear_profile();
    }

    pub fn can_display(&self) -> bool {
        self.hierarchy.is_some() && self.selection.is_complete()
    }

    pub fn selected_player(&self) -> Option<&PlayerRecord> {
        let Selection::FullySelected {
            year,
            league,
            team,
            player,
        } = &self.selection
        else {
            return None;
        };
        resolver::find_player(self.hierarchy.as_ref()?, year, league, team, player)
    }

    /// Fetches both images for the selected player. Whatever decoded before a
    /// failure stays on screen.
    pub fn display_profile<S: ImageSource + ?Sized>(&mut self, source: &S) {
        if !self.can_display() {
            self.push_log("[INFO] Select year, league, team and player first");
            return;
        }
        self.clear_profile();
        let Some(record) = self.selected_player().cloned() else {
            let msg = "Selected player is not in the current roster".to_string();
            self.push_log(format!("[WARN] {msg}"));
            self.fetch_error = Some(msg);
            return;
        };
        let label = player_label(&record.local_name, &record.romanized_name);

        let mut images = Vec::new();
        let result = fetch_player_images(source, &record, |_, image| images.push(image));
        self.images = images;
        self.profile_label = Some(label.clone());
        match result {
            Ok(()) => self.push_log(format!("[INFO] Profile loaded: {label}")),
            Err(err) => {
                self.push_log(format!("[WARN] Image load failed: {err}"));
                self.fetch_error = Some(format!("Failed to load images: {err}"));
            }
        }
    }

    fn clear_profile(&mut self) {
        self.images.clear();
        self.profile_label = None;
        self.fetch_error = None;
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_wraps_both_ways() {
        let mut state = AppState::new(PathBuf::from("does-not-exist"));
        assert_eq!(state.focus, Focus::Category);
        state.focus_prev();
        assert_eq!(state.focus, Focus::Display);
        state.focus_next();
        state.focus_next();
        assert_eq!(state.focus, Focus::Year);
    }

    #[test]
    fn log_is_bounded() {
        let mut state = AppState::new(PathBuf::from("does-not-exist"));
        for i in 0..(MAX_LOGS + 25) {
            state.push_log(format!("[INFO] {i}"));
        }
        assert_eq!(state.logs.len(), MAX_LOGS);
        assert_eq!(
            state.logs.back().map(String::as_str),
            Some(format!("[INFO] {}", MAX_LOGS + 24).as_str())
        );
    }
}
