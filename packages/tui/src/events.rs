use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Terminal-level events feeding the main loop
#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize,
    Quit,
}

/// Polls crossterm on a blocking thread and emits a tick every `tick_rate`
pub struct EventHandler {
    sender: mpsc::UnboundedSender<AppEvent>,
    receiver: mpsc::UnboundedReceiver<AppEvent>,
    handler: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let poll_sender = sender.clone();

        // The loop ends once the receiver is gone and a send fails
        let handler = tokio::task::spawn_blocking(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                match event::poll(timeout) {
                    Ok(true) => {
                        let forwarded = match event::read() {
                            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                                poll_sender.send(AppEvent::Key(key))
                            }
                            Ok(Event::Resize(_, _)) => poll_sender.send(AppEvent::Resize),
                            _ => Ok(()),
                        };
                        if forwarded.is_err() {
                            break;
                        }
                    }
                    Ok(false) => {}
                    // No terminal attached; keep ticking
                    Err(_) => std::thread::sleep(timeout),
                }

                if last_tick.elapsed() >= tick_rate {
                    if poll_sender.send(AppEvent::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self {
            sender,
            receiver,
            handler,
        }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.receiver.recv().await
    }

    pub fn sender(&self) -> &mpsc::UnboundedSender<AppEvent> {
        &self.sender
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ticks_and_injected_events_reach_the_loop() {
        let mut events = EventHandler::new(Duration::from_millis(10));
        events.sender().send(AppEvent::Quit).unwrap();

        let mut saw_quit = false;
        let mut saw_tick = false;
        for _ in 0..20 {
            match events.next().await {
                Some(AppEvent::Quit) => saw_quit = true,
                Some(AppEvent::Tick) => saw_tick = true,
                _ => {}
            }
            if saw_quit && saw_tick {
                break;
            }
        }

        assert!(saw_quit);
        assert!(saw_tick);
    }
}
