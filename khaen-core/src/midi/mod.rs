//! MIDI controller input.
//!
//! Only note-on/note-off reach the engine, reduced to a pitch class.
//! Everything else, and anything malformed, is dropped at the parser.

use midir::{MidiInput, MidiInputConnection};
use std::sync::mpsc::{self, Receiver};

use khaen_types::{Action, MidiAction, NoteEvent, PitchClass};

const NOTE_OFF: u8 = 0x80;
const NOTE_ON: u8 = 0x90;

/// A parsed note event with its driver timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiEvent {
    /// Event timestamp in microseconds (driver-specific epoch)
    pub timestamp_us: u64,
    pub note: NoteEvent,
}

impl MidiEvent {
    pub fn new(timestamp_us: u64, note: NoteEvent) -> Self {
        Self { timestamp_us, note }
    }

    pub fn to_action(&self) -> Action {
        Action::Midi(MidiAction::Note(self.note))
    }
}

/// Information about an available MIDI port
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiPortInfo {
    pub index: usize,
    pub name: String,
}

/// MIDI input manager
pub struct MidiInputManager {
    client_name: String,
    midi_in: Option<MidiInput>,
    connection: Option<MidiInputConnection<()>>,
    event_receiver: Option<Receiver<MidiEvent>>,
    connected_port_name: Option<String>,
    available_ports: Vec<MidiPortInfo>,
    devices_present: bool,
}

impl MidiInputManager {
    /// Acquire the MIDI client once. A denied or missing backend leaves the
    /// manager usable with no ports.
    pub fn new(client_name: &str) -> Self {
        let midi_in = match MidiInput::new(client_name) {
            Ok(m) => Some(m),
            Err(e) => {
                log::warn!(target: "midi", "MIDI input unavailable: {}", e);
                None
            }
        };
        Self {
            client_name: client_name.to_string(),
            midi_in,
            connection: None,
            event_receiver: None,
            connected_port_name: None,
            available_ports: Vec::new(),
            devices_present: false,
        }
    }

    /// Refresh the list of available MIDI input ports
    pub fn refresh_ports(&mut self) {
        self.available_ports.clear();

        if let Some(ref midi_in) = self.midi_in {
            let ports = midi_in.ports();
            for (index, port) in ports.iter().enumerate() {
                if let Ok(name) = midi_in.port_name(port) {
                    self.available_ports.push(MidiPortInfo { index, name });
                }
            }
        }
    }

    /// Re-scan ports and report a connect/disconnect transition, if any, as
    /// the action that updates the engine's display flag.
    pub fn refresh_availability(&mut self) -> Option<Action> {
        self.refresh_ports();
        let present = !self.available_ports.is_empty();
        if present == self.devices_present {
            return None;
        }
        self.devices_present = present;
        log::info!(target: "midi", "input devices present: {}", present);
        Some(Action::Midi(MidiAction::DeviceAvailability(present)))
    }

    /// Get list of available MIDI input ports
    pub fn list_ports(&self) -> &[MidiPortInfo] {
        &self.available_ports
    }

    pub fn devices_present(&self) -> bool {
        self.devices_present
    }

    /// Check if connected to a MIDI port
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Get the name of the connected port
    pub fn connected_port_name(&self) -> Option<&str> {
        self.connected_port_name.as_deref()
    }

    /// Connect to the first port whose name contains `fragment`, or the
    /// first port at all when `fragment` is None.
    pub fn connect_matching(&mut self, fragment: Option<&str>) -> Result<(), String> {
        if self.available_ports.is_empty() {
            self.refresh_ports();
        }
        let index = match fragment {
            Some(f) => self
                .available_ports
                .iter()
                .find(|p| p.name.contains(f))
                .map(|p| p.index)
                .ok_or_else(|| format!("No MIDI input matching '{}'", f))?,
            None => self
                .available_ports
                .first()
                .map(|p| p.index)
                .ok_or_else(|| "No MIDI input ports".to_string())?,
        };
        self.connect(index)
    }

    /// Connect to a MIDI input port by index
    pub fn connect(&mut self, port_index: usize) -> Result<(), String> {
        // Disconnect existing connection first
        self.disconnect();

        // midir consumes the MidiInput on connect
        let midi_in = MidiInput::new(&self.client_name).map_err(|e| e.to_string())?;
        let ports = midi_in.ports();

        let port = ports
            .get(port_index)
            .ok_or_else(|| format!("Invalid port index: {}", port_index))?;
        let port_name = midi_in
            .port_name(port)
            .unwrap_or_else(|_| "Unknown".to_string());

        let (tx, rx) = mpsc::channel();
        self.event_receiver = Some(rx);

        let connection = midi_in
            .connect(
                port,
                "khaen-input",
                move |timestamp, message, _| {
                    if let Some(note) = parse_midi_message(message) {
                        let _ = tx.send(MidiEvent::new(timestamp, note));
                    }
                },
                (),
            )
            .map_err(|e| e.to_string())?;

        log::info!(target: "midi", "connected to {}", port_name);
        self.connection = Some(connection);
        self.connected_port_name = Some(port_name);

        // Recreate MidiInput for future port listing
        self.midi_in = MidiInput::new(&self.client_name).ok();

        Ok(())
    }

    /// Disconnect from the current MIDI input port
    pub fn disconnect(&mut self) {
        if let Some(conn) = self.connection.take() {
            conn.close();
            log::info!(target: "midi", "disconnected");
        }
        self.event_receiver = None;
        self.connected_port_name = None;
    }

    /// Poll for pending MIDI events (non-blocking)
    pub fn poll_events(&self) -> Vec<MidiEvent> {
        let mut events = Vec::new();
        if let Some(ref rx) = self.event_receiver {
            while let Ok(event) = rx.try_recv() {
                events.push(event);
            }
        }
        events
    }
}

impl Drop for MidiInputManager {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// Parse a raw MIDI message into a note event.
///
/// Note-on with velocity > 0 activates `note mod 12`; note-off, or note-on
/// with velocity 0, releases it. Any channel is accepted.
pub fn parse_midi_message(data: &[u8]) -> Option<NoteEvent> {
    let &[status, note, velocity] = data else {
        return None;
    };
    if note > 0x7F || velocity > 0x7F {
        return None;
    }

    let pitch_class = PitchClass::from_midi(note);
    match status & 0xF0 {
        NOTE_OFF => Some(NoteEvent::off(pitch_class)),
        NOTE_ON if velocity == 0 => Some(NoteEvent::off(pitch_class)),
        NOTE_ON => Some(NoteEvent::on(pitch_class)),
        _ => None,
    }
}
