/// Player intents and the wireless controller's line protocol.
///
/// The controller streams short ASCII lines terminated by `\n`:
///
/// * `B0`                 — fire button pressed
/// * `J0:<angle>,<dist>`  — joystick; `angle` in degrees, `dist` in `0.0..=1.0`
///
/// Everything else is ignored.

use std::sync::mpsc::{Receiver, TryRecvError};

use tracing::debug;

/// Requested actions for the next tick.
///
/// Movement is level-triggered.  `fire` is edge-triggered: whoever sets it
/// must clear it after the tick that consumed it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
}

/// Joystick deflection below this is treated as centred.
pub const JOYSTICK_DEAD_ZONE: f32 = 0.2;

/// Longest line kept; a longer one is thrown away.
const LINE_CAPACITY: usize = 15;

/// Byte-at-a-time parser.  Holds at most one partial line and never
/// allocates.
#[derive(Clone, Debug, Default)]
pub struct CommandParser {
    buf: [u8; LINE_CAPACITY],
    len: usize,
}

impl CommandParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte, updating `intents` when it completes a command.
    pub fn push(&mut self, byte: u8, intents: &mut Intents) {
        if byte == b'\n' {
            apply_line(&self.buf[..self.len], intents);
            self.len = 0;
        } else if self.len < LINE_CAPACITY {
            self.buf[self.len] = byte;
            self.len += 1;
        } else {
            debug!("controller line overflow, discarding partial line");
            self.len = 0;
        }
    }

    pub fn push_bytes(&mut self, bytes: &[u8], intents: &mut Intents) {
        for &b in bytes {
            self.push(b, intents);
        }
    }
}

fn apply_line(line: &[u8], intents: &mut Intents) {
    if line.starts_with(b"B0") {
        intents.fire = true;
    } else if let Some(rest) = line.strip_prefix(b"J0:") {
        match parse_joystick(rest) {
            Some((angle, dist)) => apply_joystick(angle, dist, intents),
            None => debug!(line = %String::from_utf8_lossy(line), "malformed joystick command"),
        }
    } else if !line.is_empty() {
        debug!(line = %String::from_utf8_lossy(line), "unknown controller command");
    }
}

fn parse_joystick(payload: &[u8]) -> Option<(f32, f32)> {
    let text = std::str::from_utf8(payload).ok()?;
    let (angle, dist) = text.split_once(',')?;
    let angle = angle.trim().parse::<f32>().ok()?;
    let dist = dist.trim().parse::<f32>().ok()?;
    Some((angle, dist))
}

/// Bucket a joystick reading into left / right / neutral.
pub fn apply_joystick(angle: f32, dist: f32, intents: &mut Intents) {
    if dist < JOYSTICK_DEAD_ZONE {
        intents.move_left = false;
        intents.move_right = false;
    } else if angle > 90.0 && angle <= 270.0 {
        intents.move_left = true;
        intents.move_right = false;
    } else {
        intents.move_left = false;
        intents.move_right = true;
    }
}

/// Drain every pending controller snapshot into `remote`.
///
/// Movement takes the latest value.  A fire press is latched into
/// `remote.fire` until the caller consumes it.  Once the sending side is
/// gone the stick counts as centred.
pub fn drain_remote(rx: &Receiver<Intents>, remote: &mut Intents) {
    loop {
        match rx.try_recv() {
            Ok(snapshot) => {
                remote.move_left = snapshot.move_left;
                remote.move_right = snapshot.move_right;
                remote.fire |= snapshot.fire;
            }
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                remote.move_left = false;
                remote.move_right = false;
                break;
            }
        }
    }
}
