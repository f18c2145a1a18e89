use std::io::{self, Write};

use crossterm::{cursor, terminal, QueueableCommand};

/// Single rewritable terminal line for progress while properties run
#[derive(Debug, Default)]
pub struct StatusLine {
    visible: bool,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, out: &mut impl Write, text: &str) -> io::Result<()> {
        out.queue(cursor::MoveToColumn(0))?;
        out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
        out.write_all(text.as_bytes())?;
        out.flush()?;
        self.visible = true;
        Ok(())
    }

    pub fn clear(&mut self, out: &mut impl Write) -> io::Result<()> {
        if !self.visible {
            return Ok(());
        }
        out.queue(cursor::MoveToColumn(0))?;
        out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
        out.flush()?;
        self.visible = false;
        Ok(())
    }
}
