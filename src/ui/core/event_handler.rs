use crossterm::event::{poll, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Duration;

use super::actions::Action;
use crate::constants::EVENT_POLL_INTERVAL;

/// Everything the main loop reacts to, delivered over a single channel
#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Task(Action),
}

pub struct EventHandler {
    poll_interval: Duration,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            poll_interval: EVENT_POLL_INTERVAL,
        }
    }

    /// Next terminal event that matters to the app, or `None` after an idle interval
    pub async fn next_event(&mut self) -> anyhow::Result<Option<AppEvent>> {
        // Check for terminal events without blocking first
        if poll(Duration::from_millis(0))? {
            return Ok(translate(crossterm::event::read()?));
        }

        tokio::time::sleep(self.poll_interval).await;
        Ok(None)
    }

    /// Forward terminal input into `sender` until the receiver goes away
    pub fn spawn(mut self, sender: mpsc::UnboundedSender<AppEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                match self.next_event().await {
                    Ok(Some(event)) => {
                        if sender.send(event).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {
                        if sender.is_closed() {
                            break;
                        }
                    }
                    Err(e) => {
                        log::error!("terminal input failed: {}", e);
                        break;
                    }
                }
            }
        })
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a raw terminal event; key releases and repeats are dropped
pub fn translate(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}
