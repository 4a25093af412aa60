//! Application module
//!
//! Contains the terminal event loop and key dispatch.
//!
//! # Module Structure
//! - `state` - Application state types (AppState, StatusMessage)
//! - Main module - App struct and event loop

mod state;

pub use state::{AppState, StatusMessage};

use crate::components::KeybindingContext;
use crate::error::Result;
use crate::flow_state::StepFlowController;
use crate::share::ShareTarget;
use crate::ui::UiRenderer;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use std::time::Duration;
use tracing::{debug, info};

/// How long to wait for input before looping
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Main application struct
pub struct App<T: ShareTarget> {
    state: AppState,
    ui_renderer: UiRenderer,
    keybinding_context: KeybindingContext,
    share_target: T,
}

impl<T: ShareTarget> App<T> {
    /// Create a new application instance
    pub fn new(flow: StepFlowController, share_target: T) -> Self {
        info!(step = %flow.current_step(), "Creating new App instance");
        Self {
            state: AppState::new(flow),
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
            share_target,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Consume the app and hand back the share target
    pub fn into_share_target(self) -> T {
        self.share_target
    }

    /// Run the main loop until the user quits
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            if self.state.take_redraw() {
                terminal.draw(|f| {
                    self.ui_renderer
                        .render(f, &self.state, &self.keybinding_context)
                })?;
            }

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }

            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    if self.handle_key_event(key_event) {
                        break;
                    }
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "Terminal resized");
                    self.state.mark_dirty();
                }
                _ => {}
            }
        }

        info!("Main loop finished");
        Ok(())
    }

    /// Handle keyboard input. Returns true when exit was requested.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
        let step = self.state.step();

        // While help is open, only keys that close it or quit do anything
        if self.state.help_visible {
            return match self.keybinding_context.action_for(step, &key_event) {
                Some(action @ crate::components::KeyAction::Quit) => {
                    self.state.handle_action(action, &mut self.share_target)
                }
                _ => {
                    self.state.help_visible = false;
                    self.state.mark_dirty();
                    false
                }
            };
        }

        match self.keybinding_context.action_for(step, &key_event) {
            Some(action) => self.state.handle_action(action, &mut self.share_target),
            None => false,
        }
    }
}
