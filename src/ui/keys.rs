//! # Key Handling
//!
//! Maps key presses onto [`App`] operations. Anything that has to happen
//! outside the app state (network work, writing the config) is returned as
//! an [`Effect`] for the event loop to carry out.
//!
//! ## Normal mode
//! - `q` - Quit
//! - `Tab` - Cycle focus (Rules, Input, Results)
//! - `j` / `Down`, `k` / `Up` - Move the rule cursor, or scroll results
//! - `Space` / `Enter` - Toggle the rule under the cursor
//! - `a` / `n` - Select all / deselect all rules
//! - `m` - Switch between text and file mode
//! - `i` - Edit the active input
//! - `c` - Check the text, or upload the file
//! - `e` - Export the corrected text
//! - `r` - Reload the rule list
//! - `t` - Next theme
//!
//! ## Editing
//! - `Esc` - Stop editing
//! - `Enter` - New line (text mode) or stop editing (file mode)
//! - `Backspace` - Delete the last character

use crate::checker::Job;
use crate::ui::app::{App, FocusPane, Mode};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Work requested by a key press that the app cannot do by itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Dispatch(Job),
    SaveConfig,
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Effect> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return None;
    }

    if app.editing {
        handle_editing_key(app, key);
        return None;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.should_quit = true;
        }
        KeyCode::Tab => app.toggle_focus(),
        KeyCode::Char('m') => app.toggle_mode(),
        KeyCode::Char('i') => app.enter_editing(),
        KeyCode::Char('c') => return app.submit().map(Effect::Dispatch),
        KeyCode::Char('r') => return app.load_rules().map(Effect::Dispatch),
        KeyCode::Char('e') => {
            app.export();
        }
        KeyCode::Char('a') => app.select_all(),
        KeyCode::Char('n') => app.deselect_all(),
        KeyCode::Char('t') => {
            app.cycle_theme();
            return Some(Effect::SaveConfig);
        }
        KeyCode::Down | KeyCode::Char('j') => match app.focus {
            FocusPane::Results => app.scroll_results_down(),
            _ => app.next_rule(),
        },
        KeyCode::Up | KeyCode::Char('k') => match app.focus {
            FocusPane::Results => app.scroll_results_up(),
            _ => app.previous_rule(),
        },
        KeyCode::Char(' ') | KeyCode::Enter => {
            if app.focus == FocusPane::Rules {
                app.toggle_current();
            }
        }
        _ => {}
    }

    None
}

fn handle_editing_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_editing(),
        KeyCode::Enter => match app.mode {
            Mode::Text => app.input_push_char('\n'),
            Mode::File => app.exit_editing(),
        },
        KeyCode::Backspace => app.input_pop_char(),
        KeyCode::Char(c) => app.input_push_char(c),
        _ => {}
    }
}
