use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};
use tokio::sync::mpsc;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize(u16, u16),
    /// Terminal window gained focus
    FocusGained,
    /// Terminal window lost focus
    FocusLost,
}

/// Reads terminal input on a dedicated thread and forwards it, together
/// with periodic ticks, into an async channel.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (event_tx, rx) = mpsc::unbounded_channel();

        let spawned = thread::Builder::new()
            .name("input-reader".to_string())
            .spawn(move || read_loop(event_tx, tick_rate));
        if let Err(err) = spawned {
            tracing::error!(error = %err, "Failed to spawn input reader");
        }

        Self { rx }
    }

    /// Next event; `None` once the reader thread has stopped.
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

fn read_loop(event_tx: mpsc::UnboundedSender<AppEvent>, tick_rate: Duration) {
    let mut last_tick = Instant::now();
    loop {
        if event_tx.is_closed() {
            break;
        }

        // Short poll timeout so a closed channel is noticed quickly
        let timeout = tick_rate
            .saturating_sub(last_tick.elapsed())
            .min(Duration::from_millis(50));

        match event::poll(timeout) {
            Ok(true) => {
                let forwarded = match event::read() {
                    Ok(Event::Key(key)) => Some(AppEvent::Key(key)),
                    Ok(Event::Resize(cols, rows)) => Some(AppEvent::Resize(cols, rows)),
                    Ok(Event::FocusGained) => Some(AppEvent::FocusGained),
                    Ok(Event::FocusLost) => Some(AppEvent::FocusLost),
                    Ok(_) => None,
                    Err(err) => {
                        tracing::error!(error = %err, "Terminal read failed");
                        break;
                    }
                };
                if let Some(app_event) = forwarded {
                    let _ = event_tx.send(app_event);
                }
            }
            Ok(false) => {}
            Err(err) => {
                tracing::error!(error = %err, "Terminal poll failed");
                break;
            }
        }

        if last_tick.elapsed() >= tick_rate {
            let _ = event_tx.send(AppEvent::Tick);
            last_tick = Instant::now();
        }
    }
}
