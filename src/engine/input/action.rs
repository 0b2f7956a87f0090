// Game action definitions and default bindings

use std::fmt;
use std::str::FromStr;

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use super::InputError;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    // Edge-triggered
    Shoot,
    Teleport,

    // Look mode hotkeys
    DirectionalMode,
    MouseLookMode,
    FixedDirectionMode,

    // Meta
    Menu,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Shoot,
        Action::Teleport,
        Action::DirectionalMode,
        Action::MouseLookMode,
        Action::FixedDirectionMode,
        Action::Menu,
    ];

    /// Config name of the action
    pub fn name(self) -> &'static str {
        match self {
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::MoveLeft => "move_left",
            Action::MoveRight => "move_right",
            Action::Shoot => "shoot",
            Action::Teleport => "teleport",
            Action::DirectionalMode => "directional_mode",
            Action::MouseLookMode => "mouse_look_mode",
            Action::FixedDirectionMode => "fixed_direction_mode",
            Action::Menu => "menu",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Action::ALL
            .into_iter()
            .find(|action| action.name() == name)
            .ok_or_else(|| InputError::UnknownAction(s.trim().to_string()))
    }
}

/// A physical input bound to an action (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputBinding {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputBinding {
    /// Create a keyboard binding
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button binding
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

impl FromStr for InputBinding {
    type Err = InputError;

    /// Parse names like `W`, `7`, `Space`, `ArrowUp`, `Escape`,
    /// `MouseLeft`. Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let lower = name.to_ascii_lowercase();

        let binding = match lower.as_str() {
            "mouseleft" => Self::mouse(MouseButton::Left),
            "mouseright" => Self::mouse(MouseButton::Right),
            "mousemiddle" => Self::mouse(MouseButton::Middle),
            "space" => Self::key(KeyCode::Space),
            "escape" | "esc" => Self::key(KeyCode::Escape),
            "enter" => Self::key(KeyCode::Enter),
            "tab" => Self::key(KeyCode::Tab),
            "shift" | "shiftleft" => Self::key(KeyCode::ShiftLeft),
            "arrowup" | "up" => Self::key(KeyCode::ArrowUp),
            "arrowdown" | "down" => Self::key(KeyCode::ArrowDown),
            "arrowleft" | "left" => Self::key(KeyCode::ArrowLeft),
            "arrowright" | "right" => Self::key(KeyCode::ArrowRight),
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::key(
                        char_key(c).ok_or_else(|| InputError::UnknownBinding(name.to_string()))?,
                    ),
                    _ => return Err(InputError::UnknownBinding(name.to_string())),
                }
            }
        };

        Ok(binding)
    }
}

/// Key code for a single letter or digit
fn char_key(c: char) -> Option<KeyCode> {
    let code = match c {
        'a' => KeyCode::KeyA,
        'b' => KeyCode::KeyB,
        'c' => KeyCode::KeyC,
        'd' => KeyCode::KeyD,
        'e' => KeyCode::KeyE,
        'f' => KeyCode::KeyF,
        'g' => KeyCode::KeyG,
        'h' => KeyCode::KeyH,
        'i' => KeyCode::KeyI,
        'j' => KeyCode::KeyJ,
        'k' => KeyCode::KeyK,
        'l' => KeyCode::KeyL,
        'm' => KeyCode::KeyM,
        'n' => KeyCode::KeyN,
        'o' => KeyCode::KeyO,
        'p' => KeyCode::KeyP,
        'q' => KeyCode::KeyQ,
        'r' => KeyCode::KeyR,
        's' => KeyCode::KeyS,
        't' => KeyCode::KeyT,
        'u' => KeyCode::KeyU,
        'v' => KeyCode::KeyV,
        'w' => KeyCode::KeyW,
        'x' => KeyCode::KeyX,
        'y' => KeyCode::KeyY,
        'z' => KeyCode::KeyZ,
        '0' => KeyCode::Digit0,
        '1' => KeyCode::Digit1,
        '2' => KeyCode::Digit2,
        '3' => KeyCode::Digit3,
        '4' => KeyCode::Digit4,
        '5' => KeyCode::Digit5,
        '6' => KeyCode::Digit6,
        '7' => KeyCode::Digit7,
        '8' => KeyCode::Digit8,
        '9' => KeyCode::Digit9,
        _ => return None,
    };
    Some(code)
}

/// Default keyboard/mouse bindings for the player
pub fn default_bindings() -> Vec<(InputBinding, Action)> {
    vec![
        // Movement (WASD + arrows)
        (InputBinding::key(KeyCode::KeyW), Action::MoveUp),
        (InputBinding::key(KeyCode::KeyS), Action::MoveDown),
        (InputBinding::key(KeyCode::KeyA), Action::MoveLeft),
        (InputBinding::key(KeyCode::KeyD), Action::MoveRight),
        (InputBinding::key(KeyCode::ArrowUp), Action::MoveUp),
        (InputBinding::key(KeyCode::ArrowDown), Action::MoveDown),
        (InputBinding::key(KeyCode::ArrowLeft), Action::MoveLeft),
        (InputBinding::key(KeyCode::ArrowRight), Action::MoveRight),
        // Combat
        (InputBinding::mouse(MouseButton::Left), Action::Shoot),
        (InputBinding::key(KeyCode::Space), Action::Teleport),
        // Look modes
        (InputBinding::key(KeyCode::Digit1), Action::DirectionalMode),
        (InputBinding::key(KeyCode::Digit2), Action::MouseLookMode),
        (InputBinding::key(KeyCode::Digit3), Action::FixedDirectionMode),
    ]
}

/// Global bindings (not remappable per player)
pub fn global_bindings() -> Vec<(InputBinding, Action)> {
    vec![(InputBinding::key(KeyCode::Escape), Action::Menu)]
}
