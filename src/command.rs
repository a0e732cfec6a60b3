use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Pause,
    Autopilot,
    Reset,
    BoostPress,
    BoostRelease,
}

impl Command {
    /// Map a key event to a command.  Release events only matter for the
    /// boost key, and held-down keys only repeat steering and boost.
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        if ev.kind == KeyEventKind::Release {
            return (ev.code == KeyCode::Char(' ')).then_some(Command::BoostRelease);
        }
        let cmd = match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Command::Quit,
            (KeyModifiers::NONE, KeyCode::Char('w' | 'k') | KeyCode::Up) => Command::Up,
            (KeyModifiers::NONE, KeyCode::Char('s' | 'j') | KeyCode::Down) => Command::Down,
            (KeyModifiers::NONE, KeyCode::Char('a' | 'h') | KeyCode::Left) => Command::Left,
            (KeyModifiers::NONE, KeyCode::Char('d' | 'l') | KeyCode::Right) => Command::Right,
            (KeyModifiers::NONE, KeyCode::Char('p')) | (KeyModifiers::SHIFT, KeyCode::Char('P')) => {
                Command::Pause
            }
            (KeyModifiers::NONE, KeyCode::Char('o')) => Command::Autopilot,
            (KeyModifiers::NONE, KeyCode::Char('r')) | (_, KeyCode::Enter) => Command::Reset,
            (KeyModifiers::NONE, KeyCode::Char('q')) | (_, KeyCode::Esc) => Command::Quit,
            (KeyModifiers::NONE, KeyCode::Char(' ')) => Command::BoostPress,
            _ => return None,
        };
        if ev.kind == KeyEventKind::Repeat && !cmd.repeats() {
            return None;
        }
        Some(cmd)
    }

    /// Whether holding the key down should keep issuing the command
    fn repeats(self) -> bool {
        matches!(
            self,
            Command::Up | Command::Down | Command::Left | Command::Right | Command::BoostPress
        )
    }
}
