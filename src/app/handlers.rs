//! Key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{ActionItem, App, AppCommand};

impl App {
    /// Apply a key press to the state and return the side effect, if any,
    /// for the runtime to perform.
    pub fn handle_key(&mut self, key: KeyEvent) -> AppCommand {
        self.mark_dirty();

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit();
                return AppCommand::Quit;
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.quit();
                return AppCommand::Quit;
            }
            _ => {}
        }

        if self.on_actions() {
            if let Some(command) = self.handle_actions_key(key.code) {
                return command;
            }
        }

        match key.code {
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') | KeyCode::Enter => {
                self.next_slide()
            }
            KeyCode::Left | KeyCode::Char('h') => self.prev_slide(),
            KeyCode::Home => self.first_slide(),
            KeyCode::End => self.last_slide(),
            _ => {}
        }
        AppCommand::None
    }

    /// Keys that only mean something on the actions slide. `None` falls
    /// through to slide navigation.
    fn handle_actions_key(&mut self, code: KeyCode) -> Option<AppCommand> {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev_action();
                Some(AppCommand::None)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next_action();
                Some(AppCommand::None)
            }
            KeyCode::Enter => Some(self.activate(self.selected_action())),
            KeyCode::Char(c) => ActionItem::ALL
                .iter()
                .find(|item| item.shortcut() == c)
                .map(|item| {
                    self.action_index = ActionItem::ALL
                        .iter()
                        .position(|other| other == item)
                        .unwrap_or(self.action_index);
                    self.activate(*item)
                }),
            _ => None,
        }
    }

    fn activate(&mut self, item: ActionItem) -> AppCommand {
        let command = item.command();
        if command == AppCommand::Quit {
            self.quit();
        }
        command
    }
}
