//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change with the active wizard step.
//! The same registry drives key dispatch, the navigation bar and the help
//! overlay, so what is shown is always what works.

use crate::flow_state::Step;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    /// Pick the highlighted option
    Select,
    /// Pick the highlighted option and continue
    Next,
    Back,
    Cancel,
    Send,
    Help,
    Quit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        let mods = event.modifiers & !KeyModifiers::SHIFT;
        self.key == event.code && self.modifiers == mods
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    step_bindings: HashMap<Step, Vec<Keybinding>>,
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            step_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit",
            ),
        ];

        let back_and_cancel = [
            Keybinding::new(KeyCode::Char('b'), KeyAction::Back, "B", "Back"),
            Keybinding::new(KeyCode::Backspace, KeyAction::Back, "Bksp", "Back"),
            Keybinding::new(KeyCode::Esc, KeyAction::Cancel, "Esc", "Cancel order"),
        ];

        self.step_bindings.insert(
            Step::Start,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous quantity"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next quantity"),
                Keybinding::new(KeyCode::Enter, KeyAction::Next, "Enter", "Order this many"),
            ],
        );

        let mut picker = |step: Step, what: &str| {
            let mut bindings = vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous option"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next option"),
                Keybinding::new(KeyCode::Char(' '), KeyAction::Select, "Space", what),
                Keybinding::new(KeyCode::Enter, KeyAction::Next, "Enter", "Next"),
            ];
            bindings.extend(back_and_cancel.iter().cloned());
            self.step_bindings.insert(step, bindings);
        };
        picker(Step::Flavor, "Choose flavor");
        picker(Step::Pickup, "Choose date");

        let mut summary = vec![Keybinding::new(
            KeyCode::Enter,
            KeyAction::Send,
            "Enter",
            "Send order",
        )];
        summary.extend(back_and_cancel.iter().cloned());
        self.step_bindings.insert(Step::Summary, summary);
    }

    /// Get keybindings for a step (includes global bindings)
    pub fn get_bindings(&self, step: Step) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();
        if let Some(step_bindings) = self.step_bindings.get(&step) {
            bindings.extend(step_bindings.iter());
        }
        bindings.extend(self.global_bindings.iter());
        bindings
    }

    /// Resolve a key event to an action for the given step
    pub fn action_for(&self, step: Step, event: &KeyEvent) -> Option<KeyAction> {
        self.get_bindings(step)
            .into_iter()
            .find(|b| b.matches(event))
            .map(|b| b.action)
    }

    /// Navigation bar items for display.
    ///
    /// Back is only listed when there is a step to go back to, and Next only
    /// when the step has the input it needs.
    pub fn get_nav_items(&self, step: Step, can_go_back: bool, can_advance: bool) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(step);

        let priority_actions = match step {
            Step::Start => vec![KeyAction::NavigateUp, KeyAction::Next, KeyAction::Help, KeyAction::Quit],
            Step::Flavor | Step::Pickup => vec![
                KeyAction::NavigateUp,
                KeyAction::Select,
                KeyAction::Next,
                KeyAction::Back,
                KeyAction::Cancel,
                KeyAction::Help,
            ],
            Step::Summary => vec![KeyAction::Send, KeyAction::Back, KeyAction::Cancel, KeyAction::Help],
        };

        let mut items = Vec::new();
        for action in priority_actions {
            if action == KeyAction::Back && !can_go_back {
                continue;
            }
            if action == KeyAction::Next && !can_advance {
                continue;
            }

            if action == KeyAction::NavigateUp {
                items.push(NavBarItem {
                    key_display: "Up/Dn".to_string(),
                    action_label: "Navigate".to_string(),
                });
            } else if let Some(binding) = bindings.iter().find(|b| b.action == action) {
                items.push(NavBarItem {
                    key_display: binding.display.clone(),
                    action_label: binding.description.clone(),
                });
            }
        }

        items
    }

    /// Full help content for a step (for the help overlay)
    pub fn get_help_content(&self, step: Step) -> Vec<HelpSection> {
        let groups: [(&str, &[KeyAction]); 3] = [
            ("Navigation", &[KeyAction::NavigateUp, KeyAction::NavigateDown]),
            (
                "Order",
                &[KeyAction::Select, KeyAction::Next, KeyAction::Send, KeyAction::Cancel],
            ),
            ("General", &[KeyAction::Back, KeyAction::Help, KeyAction::Quit]),
        ];

        let bindings = self.get_bindings(step);
        groups
            .iter()
            .filter_map(|(title, actions)| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| actions.contains(&b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}
