//! Watch mode: re-render a report on a fixed interval until Ctrl-C.

use std::io::{self, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};

/// Receives a message when the user presses Ctrl-C.
struct Interrupt {
    rx: Receiver<()>,
}

impl Interrupt {
    fn install_ctrlc_handler() -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        ctrlc::set_handler(move || {
            let _ = tx.send(());
        })
        .context("install ctrl+c handler for watch mode")?;
        Ok(Self { rx })
    }
}

/// Clears the terminal and calls `render` every `interval` until interrupted.
///
/// The cursor is hidden while watching and shown again on exit, including
/// when `render` fails.
pub fn run<F>(interval: Duration, render: F) -> Result<()>
where
    F: FnMut(&mut io::Stdout) -> Result<()>,
{
    let interrupt = Interrupt::install_ctrlc_handler()?;
    let mut out = io::stdout();

    execute!(out, Hide)?;
    let result = watch_loop(&mut out, &interrupt.rx, interval, render);
    execute!(out, Show)?;
    result
}

fn watch_loop<W, F>(out: &mut W, stop: &Receiver<()>, interval: Duration, mut render: F) -> Result<()>
where
    W: Write,
    F: FnMut(&mut W) -> Result<()>,
{
    tracing::debug!(?interval, "entering watch mode");
    loop {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        render(out)?;
        writeln!(out)?;
        writeln!(out, "Refreshing every {:.1}s. Press Ctrl+C to exit.", interval.as_secs_f64())?;
        out.flush()?;

        match stop.recv_timeout(interval) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                tracing::debug!("watch interrupted");
                return Ok(());
            }
            Err(RecvTimeoutError::Timeout) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_renders_until_interrupted() {
        let (tx, rx) = mpsc::channel();
        let mut out = Vec::new();
        let mut renders = 0;

        watch_loop(&mut out, &rx, Duration::from_millis(5), |w| {
            renders += 1;
            writeln!(w, "tick {renders}")?;
            if renders == 3 {
                tx.send(()).unwrap();
            }
            Ok(())
        })
        .unwrap();

        assert_eq!(renders, 3);
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("tick 1"));
        assert!(output.contains("tick 3"));
        assert!(output.contains("Press Ctrl+C to exit."));
    }

    #[test]
    fn watch_stops_when_sender_dropped() {
        let (tx, rx) = mpsc::channel::<()>();
        drop(tx);
        let mut out = Vec::new();
        let mut renders = 0;

        watch_loop(&mut out, &rx, Duration::from_secs(60), |_| {
            renders += 1;
            Ok(())
        })
        .unwrap();

        assert_eq!(renders, 1);
    }

    #[test]
    fn watch_propagates_render_errors() {
        let (_tx, rx) = mpsc::channel();
        let mut out = Vec::new();

        let err = watch_loop(&mut out, &rx, Duration::from_millis(1), |_| {
            anyhow::bail!("store unreadable")
        })
        .unwrap_err();

        assert_eq!(err.to_string(), "store unreadable");
    }
}
