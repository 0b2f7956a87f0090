// Input bindings and remapping

use super::action::{self, Action, InputBinding};
use super::InputError;
use log::debug;
use std::collections::HashMap;

/// Maps physical inputs to actions.
/// One input maps to at most one action; an action may have several inputs.
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    bindings: HashMap<InputBinding, Action>,
}

impl InputConfig {
    /// Empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bindings(bindings: Vec<(InputBinding, Action)>) -> Self {
        let mut config = Self::new();
        for (binding, action) in bindings {
            config.bind(binding, action);
        }
        config
    }

    /// Player defaults (WASD/arrows, mouse, hotkeys)
    pub fn player_defaults() -> Self {
        let mut config = Self::new();
        config.reset_to_defaults();
        config
    }

    /// Bindings that apply regardless of player configuration
    pub fn global() -> Self {
        Self::from_bindings(action::global_bindings())
    }

    /// Bind an input to an action, replacing whatever it was bound to
    pub fn bind(&mut self, binding: InputBinding, action: Action) {
        self.bindings.insert(binding, action);
    }

    /// Remove every input bound to an action
    pub fn unbind_action(&mut self, action: Action) {
        self.bindings.retain(|_, bound| *bound != action);
    }

    pub fn get_action(&self, binding: InputBinding) -> Option<Action> {
        self.bindings.get(&binding).copied()
    }

    /// All inputs bound to an action
    pub fn bindings_for(&self, action: Action) -> Vec<InputBinding> {
        self.bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(binding, _)| *binding)
            .collect()
    }

    pub fn has_binding(&self, action: Action) -> bool {
        self.bindings.values().any(|bound| *bound == action)
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    /// Restore the player defaults
    pub fn reset_to_defaults(&mut self) {
        self.clear();
        for (binding, action) in action::default_bindings() {
            self.bind(binding, action);
        }
    }

    /// Apply remappings from text.
    ///
    /// One `action = input[, input...]` per line; the listed inputs replace
    /// the action's current bindings. Blank lines and `#` comments are
    /// ignored. Nothing is applied if any line fails to parse.
    pub fn apply_overrides(&mut self, text: &str) -> Result<usize, InputError> {
        let mut remaps = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let (action, inputs) = line.split_once('=').ok_or(InputError::MalformedLine {
                line: index + 1,
                content: raw.to_string(),
            })?;

            let action: Action = action.parse()?;
            let inputs = inputs
                .split(',')
                .map(str::parse::<InputBinding>)
                .collect::<Result<Vec<_>, _>>()?;
            remaps.push((action, inputs));
        }

        let count = remaps.len();
        for (action, inputs) in remaps {
            self.unbind_action(action);
            for binding in inputs {
                debug!("Binding {:?} -> {}", binding, action);
                self.bind(binding, action);
            }
        }
        Ok(count)
    }
}
