use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::entities::TankState;

/// Represents semantic tank actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    SpawnFish,
    RemoveFish,
    ClearTank,
    MoveLeft,
    MoveRight,
    FireHarpoon,
    Pause,
    Resume,
    Quit,
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    left: bool,
    right: bool,
    fire: bool,
    spawn: bool,
    remove: bool,
    clear: bool,
}

/// Manages input polling and translates raw key events into tank actions
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
        }
    }

    /// Polls for all input events and stores one-shot actions
    /// Should be called once per frame before getting actions
    pub fn poll_events(&mut self, tank_state: &TankState) -> color_eyre::Result<()> {
        // Clear previous one-shot actions
        self.oneshot_actions.clear();

        // Poll for all available events without blocking
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key_event) => {
                    self.handle_key_event(key_event, tank_state);
                }
                Event::Mouse(_) => {
                    // Mouse events currently ignored
                }
                Event::Resize(_, _) => {
                    // Resize events handled elsewhere
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent, tank_state: &TankState) {
        match key_event.kind {
            KeyEventKind::Press => {
                self.handle_key_press(key_event, tank_state);
            }
            KeyEventKind::Release => {
                self.handle_key_release(key_event.code);
            }
            _ => {}
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, tank_state: &TankState) {
        // Check for quit keys first (works in any state)
        if matches!(key_event.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
            || (key_event.code == KeyCode::Char('c')
                && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        // State transitions
        match tank_state {
            TankState::Running => {
                if matches!(key_event.code, KeyCode::Char('p') | KeyCode::Char('P')) {
                    self.oneshot_actions.push(InputAction::Pause);
                    return;
                }
            }
            TankState::Paused => {
                if matches!(key_event.code, KeyCode::Char('p') | KeyCode::Char('P')) {
                    self.oneshot_actions.push(InputAction::Resume);
                    return;
                }
            }
        }

        // Continuous action keys (only tracked while running)
        if *tank_state == TankState::Running {
            match key_event.code {
                KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                    self.key_state.left = true;
                    self.key_state.right = false;
                }
                KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                    self.key_state.right = true;
                    self.key_state.left = false;
                }
                KeyCode::Char('f')
                | KeyCode::Char('F')
                | KeyCode::Char('w')
                | KeyCode::Char('W')
                | KeyCode::Up => {
                    self.key_state.fire = true;
                }
                KeyCode::Char(' ') => {
                    self.key_state.spawn = true;
                }
                // Shift+R clears the whole tank; plain r removes one fish.
                KeyCode::Char('R') => {
                    self.key_state.clear = true;
                    self.key_state.remove = false;
                }
                KeyCode::Char('r') => {
                    if key_event.modifiers.contains(KeyModifiers::SHIFT) {
                        self.key_state.clear = true;
                        self.key_state.remove = false;
                    } else {
                        self.key_state.remove = true;
                    }
                }
                _ => {}
            }
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = false;
            }
            KeyCode::Char('f')
            | KeyCode::Char('F')
            | KeyCode::Char('w')
            | KeyCode::Char('W')
            | KeyCode::Up => {
                self.key_state.fire = false;
            }
            KeyCode::Char(' ') => {
                self.key_state.spawn = false;
            }
            // Shift may be released before the letter, so a release of either
            // case clears both held intents.
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.key_state.remove = false;
                self.key_state.clear = false;
            }
            _ => {}
        }
    }

    /// Returns all actions for this frame (both continuous and one-shot)
    /// Must be called after poll_events()
    pub fn get_actions(&self, tank_state: &TankState) -> Vec<InputAction> {
        let mut actions = Vec::new();

        // Add one-shot actions first
        actions.extend_from_slice(&self.oneshot_actions);

        // Add continuous actions based on held keys (only while running)
        if *tank_state == TankState::Running {
            if self.key_state.left {
                actions.push(InputAction::MoveLeft);
            }
            if self.key_state.right {
                actions.push(InputAction::MoveRight);
            }
            if self.key_state.fire {
                actions.push(InputAction::FireHarpoon);
            }
            if self.key_state.spawn {
                actions.push(InputAction::SpawnFish);
            }
            if self.key_state.remove {
                actions.push(InputAction::RemoveFish);
            }
            if self.key_state.clear {
                actions.push(InputAction::ClearTank);
            }
        }

        actions
    }
}
