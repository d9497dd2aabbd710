//! Mode dispatch: turns classification results into panel visibility.
//!
//! Applying the mode that is already showing is a no-op, so a noisy stream
//! of identical classifications never re-triggers the view.

use chrono::Utc;

use crate::events::Event;
use crate::orientation::{Mode, Panel, DETECTING_LABEL};

#[derive(Debug, Clone, Default)]
pub struct ModeDispatcher {
    last_applied: Option<Mode>,
    transitions: u64,
}

impl ModeDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_applied(&self) -> Option<Mode> {
        self.last_applied
    }

    /// Number of visibility changes produced so far.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    pub fn label(&self) -> &'static str {
        self.last_applied.map(|m| m.label()).unwrap_or(DETECTING_LABEL)
    }

    /// Panel currently shown; `None` until the first mode is applied.
    pub fn visible_panel(&self) -> Option<Panel> {
        self.last_applied.map(|m| m.panel())
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.visible_panel() == Some(panel)
    }

    /// Apply a mode. Returns the visibility change, or `None` if `mode`
    /// is already applied.
    pub fn apply(&mut self, mode: Mode) -> Option<Event> {
        if self.last_applied == Some(mode) {
            return None;
        }
        tracing::debug!(from = ?self.last_applied, to = %mode, "mode transition");
        self.last_applied = Some(mode);
        self.transitions += 1;
        Some(Event::ModeChanged {
            mode,
            label: mode.label().to_string(),
            visible_panel: mode.panel(),
            at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_detecting_with_all_panels_hidden() {
        let dispatcher = ModeDispatcher::new();
        assert_eq!(dispatcher.label(), "Detecting…");
        assert!(Panel::ALL.iter().all(|p| !dispatcher.is_visible(*p)));
    }

    #[test]
    fn repeated_mode_changes_visibility_once() {
        let mut dispatcher = ModeDispatcher::new();
        assert!(dispatcher.apply(Mode::LandscapePrimary).is_some());
        assert!(dispatcher.apply(Mode::LandscapePrimary).is_none());
        assert_eq!(dispatcher.transitions(), 1);
    }

    #[test]
    fn exactly_one_panel_visible_after_apply() {
        let mut dispatcher = ModeDispatcher::new();
        dispatcher.apply(Mode::PortraitSecondary);
        let visible: Vec<Panel> = Panel::ALL
            .into_iter()
            .filter(|p| dispatcher.is_visible(*p))
            .collect();
        assert_eq!(visible, vec![Panel::Timer]);
        assert_eq!(dispatcher.label(), "Portrait ↓ — Timer");
    }

    #[test]
    fn change_event_carries_mode_and_panel() {
        let mut dispatcher = ModeDispatcher::new();
        match dispatcher.apply(Mode::LandscapeSecondary) {
            Some(Event::ModeChanged {
                mode,
                visible_panel,
                label,
                ..
            }) => {
                assert_eq!(mode, Mode::LandscapeSecondary);
                assert_eq!(visible_panel, Panel::Weather);
                assert_eq!(label, "Landscape ⟳ — Weather");
            }
            other => panic!("Expected ModeChanged, got {other:?}"),
        }
    }
}
