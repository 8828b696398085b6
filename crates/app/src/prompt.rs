use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal::{self, ClearType},
};
use engine::{Confirm, Currency, Transaction};

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Asks on the terminal before a deletion. Anything but `y` declines.
pub struct TerminalConfirm {
    pub currency: Currency,
}

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, transaction: &Transaction) -> bool {
        let question = format!(
            "Delete this transaction? #{} {} {} [y/N] ",
            transaction.id,
            transaction.description,
            transaction.amount.format(self.currency)
        );
        match ask_yes_no(&question) {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!("confirmation prompt failed: {err}");
                false
            }
        }
    }
}

fn ask_yes_no(question: &str) -> io::Result<bool> {
    let _raw = RawModeGuard::enter()?;

    let mut out = io::stderr();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(question)
    )?;
    out.flush()?;

    loop {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read()?
        else {
            continue;
        };
        if kind != KeyEventKind::Press {
            continue;
        }

        let answer = match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => false,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Enter | KeyCode::Esc => false,
            _ => continue,
        };
        execute!(out, Print(if answer { "y" } else { "n" }), Print("\r\n"))?;
        out.flush()?;
        return Ok(answer);
    }
}
