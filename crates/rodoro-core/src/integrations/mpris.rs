//! MPRIS media-player control over the D-Bus session bus.

use std::error::Error;

use zbus::blocking::Connection;

use crate::session::{MediaCommand, MediaControl};

const MPRIS_PATH: &str = "/org/mpris/MediaPlayer2";
const PLAYER_INTERFACE: &str = "org.mpris.MediaPlayer2.Player";

/// Sends `Play`/`Pause` to a single MPRIS player, e.g. Spotify.
pub struct MprisMediaControl {
    bus_name: String,
}

impl MprisMediaControl {
    pub fn new(player: &str) -> Self {
        Self {
            bus_name: format!("org.mpris.MediaPlayer2.{player}"),
        }
    }
}

impl MediaControl for MprisMediaControl {
    fn send(&self, command: MediaCommand) -> Result<(), Box<dyn Error>> {
        let connection = Connection::session()?;
        connection.call_method(
            Some(self.bus_name.as_str()),
            MPRIS_PATH,
            Some(PLAYER_INTERFACE),
            command.method(),
            &(),
        )?;
        Ok(())
    }
}
