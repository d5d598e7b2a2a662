use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    DismissError,
    CycleFocus,
    MoveUp,
    MoveDown,
    Activate,
    RunTest,
    NextTab,
    ShowTab(usize),
    OpenUpload,
    OpenTarget,
    RefreshReport,
    PromptInput(char),
    PromptBackspace,
    PromptSubmit,
    PromptCancel,
    None,
}

/// Captures the UI state needed to interpret a key press.
#[derive(Debug, Clone, Default)]
pub struct InputContext {
    pub has_error: bool,
    pub prompt_open: bool,
}

pub fn map_key(key: KeyEvent, ctx: &InputContext) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    // The upload prompt swallows typing
    if ctx.prompt_open {
        return match key.code {
            KeyCode::Enter => Action::PromptSubmit,
            KeyCode::Esc => Action::PromptCancel,
            KeyCode::Backspace => Action::PromptBackspace,
            KeyCode::Char(c) => Action::PromptInput(c),
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Esc => {
            if ctx.has_error {
                Action::DismissError
            } else {
                Action::Quit
            }
        }
        KeyCode::Tab | KeyCode::BackTab => Action::CycleFocus,
        KeyCode::Up | KeyCode::Char('k') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => Action::MoveDown,
        KeyCode::Enter | KeyCode::Char(' ') => Action::Activate,
        KeyCode::Char('r') => Action::RunTest,
        KeyCode::Char('t') => Action::NextTab,
        KeyCode::Char(c @ '1'..='9') => Action::ShowTab((c as u8 - b'1') as usize),
        KeyCode::Char('u') => Action::OpenUpload,
        KeyCode::Char('o') => Action::OpenTarget,
        KeyCode::Char('g') => Action::RefreshReport,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent {
            kind: KeyEventKind::Release,
            ..press(code)
        }
    }

    fn ctx() -> InputContext {
        InputContext::default()
    }

    fn ctx_prompt() -> InputContext {
        InputContext {
            prompt_open: true,
            ..Default::default()
        }
    }

    #[test]
    fn quit_on_q() {
        assert_eq!(map_key(press(KeyCode::Char('q')), &ctx()), Action::Quit);
    }

    #[test]
    fn esc_quits_without_error() {
        assert_eq!(map_key(press(KeyCode::Esc), &ctx()), Action::Quit);
    }

    #[test]
    fn esc_dismisses_error_when_present() {
        let ctx = InputContext {
            has_error: true,
            ..Default::default()
        };
        assert_eq!(map_key(press(KeyCode::Esc), &ctx), Action::DismissError);
    }

    #[test]
    fn ctrl_c_quits_even_in_prompt() {
        let key = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..press(KeyCode::Char('c'))
        };
        assert_eq!(map_key(key, &ctx_prompt()), Action::Quit);
    }

    #[test]
    fn release_is_ignored() {
        assert_eq!(map_key(release(KeyCode::Char('q')), &ctx()), Action::None);
    }

    #[test]
    fn navigation_keys() {
        assert_eq!(map_key(press(KeyCode::Up), &ctx()), Action::MoveUp);
        assert_eq!(map_key(press(KeyCode::Char('k')), &ctx()), Action::MoveUp);
        assert_eq!(map_key(press(KeyCode::Down), &ctx()), Action::MoveDown);
        assert_eq!(map_key(press(KeyCode::Char('j')), &ctx()), Action::MoveDown);
        assert_eq!(map_key(press(KeyCode::Tab), &ctx()), Action::CycleFocus);
        assert_eq!(map_key(press(KeyCode::Enter), &ctx()), Action::Activate);
    }

    #[test]
    fn dashboard_commands() {
        assert_eq!(map_key(press(KeyCode::Char('r')), &ctx()), Action::RunTest);
        assert_eq!(map_key(press(KeyCode::Char('u')), &ctx()), Action::OpenUpload);
        assert_eq!(map_key(press(KeyCode::Char('o')), &ctx()), Action::OpenTarget);
        assert_eq!(map_key(press(KeyCode::Char('t')), &ctx()), Action::NextTab);
        assert_eq!(map_key(press(KeyCode::Char('g')), &ctx()), Action::RefreshReport);
    }

    #[test]
    fn digits_pick_tabs() {
        assert_eq!(map_key(press(KeyCode::Char('1')), &ctx()), Action::ShowTab(0));
        assert_eq!(map_key(press(KeyCode::Char('2')), &ctx()), Action::ShowTab(1));
        assert_eq!(map_key(press(KeyCode::Char('0')), &ctx()), Action::None);
    }

    #[test]
    fn prompt_captures_letters() {
        assert_eq!(map_key(press(KeyCode::Char('q')), &ctx_prompt()), Action::PromptInput('q'));
        assert_eq!(map_key(press(KeyCode::Char('r')), &ctx_prompt()), Action::PromptInput('r'));
    }

    #[test]
    fn prompt_editing_keys() {
        assert_eq!(map_key(press(KeyCode::Enter), &ctx_prompt()), Action::PromptSubmit);
        assert_eq!(map_key(press(KeyCode::Esc), &ctx_prompt()), Action::PromptCancel);
        assert_eq!(map_key(press(KeyCode::Backspace), &ctx_prompt()), Action::PromptBackspace);
        assert_eq!(map_key(press(KeyCode::Tab), &ctx_prompt()), Action::None);
    }
}
