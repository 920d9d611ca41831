//! Channel between the session engine and the event-loop thread.
//!
//! Engine transitions run on timer threads, but the tray handle and the
//! overlay windows live on the event-loop thread. The engine-side hook
//! implementations here only enqueue work orders; the event loop drains
//! them in `about_to_wait`.

use std::error::Error;
use std::sync::mpsc::Sender;

use rodoro_core::{Overlay, SessionState, StatusIcon};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiMessage {
    Icon { label: String, state: SessionState },
    ShowOverlay,
    HideOverlay,
}

pub struct IconBridge {
    tx: Sender<UiMessage>,
}

impl IconBridge {
    pub fn new(tx: Sender<UiMessage>) -> Self {
        Self { tx }
    }
}

impl StatusIcon for IconBridge {
    fn update(&self, label: &str, state: SessionState) -> Result<(), Box<dyn Error>> {
        self.tx
            .send(UiMessage::Icon {
                label: label.to_string(),
                state,
            })
            .map_err(|_| "event loop gone".into())
    }
}

pub struct OverlayBridge {
    tx: Sender<UiMessage>,
}

impl OverlayBridge {
    pub fn new(tx: Sender<UiMessage>) -> Self {
        Self { tx }
    }
}

impl Overlay for OverlayBridge {
    fn show(&self) -> Result<(), Box<dyn Error>> {
        self.tx
            .send(UiMessage::ShowOverlay)
            .map_err(|_| "event loop gone".into())
    }

    fn hide(&self) -> Result<(), Box<dyn Error>> {
        self.tx
            .send(UiMessage::HideOverlay)
            .map_err(|_| "event loop gone".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_updates_cross_the_channel() {
        let (tx, rx) = std::sync::mpsc::channel();
        let bridge = IconBridge::new(tx);
        bridge.update("42", SessionState::Working).unwrap();
        assert_eq!(
            rx.recv().unwrap(),
            UiMessage::Icon {
                label: "42".into(),
                state: SessionState::Working,
            }
        );
    }

    #[test]
    fn overlay_commands_cross_the_channel() {
        let (tx, rx) = std::sync::mpsc::channel();
        let bridge = OverlayBridge::new(tx);
        bridge.show().unwrap();
        bridge.hide().unwrap();
        assert_eq!(rx.recv().unwrap(), UiMessage::ShowOverlay);
        assert_eq!(rx.recv().unwrap(), UiMessage::HideOverlay);
    }

    #[test]
    fn send_after_receiver_drop_reports_an_error() {
        let (tx, rx) = std::sync::mpsc::channel();
        drop(rx);
        let bridge = OverlayBridge::new(tx);
        assert!(bridge.show().is_err());
    }
}
