//! Intent snapshots
//!
//! A snapshot packs into one byte, so scripted runs can be stored as a flat
//! tape with one byte per tick:
//!
//! | bit  | intent    |
//! |------|-----------|
//! | 0x01 | left      |
//! | 0x02 | right     |
//! | 0x04 | up        |
//! | 0x08 | down      |
//! | 0x10 | fire      |
//! | 0x20 | quit      |
//! | 0x40 | autopilot |
//! | 0x80 | reserved  |

use thiserror::Error;

use crate::sim::TickInput;

const LEFT: u8 = 0x01;
const RIGHT: u8 = 0x02;
const UP: u8 = 0x04;
const DOWN: u8 = 0x08;
const FIRE: u8 = 0x10;
const QUIT: u8 = 0x20;
const AUTOPILOT: u8 = 0x40;
const RESERVED_MASK: u8 = 0x80;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("reserved intent bits set: {0:#04x}")]
    ReservedBits(u8),
    #[error("input script exhausted after {ticks} ticks")]
    ScriptExhausted { ticks: usize },
}

/// Supplies one intent snapshot per tick
pub trait InputSource {
    fn poll(&mut self) -> Result<TickInput, InputError>;
}

#[inline]
pub fn encode_intents(input: &TickInput) -> u8 {
    [
        (input.left, LEFT),
        (input.right, RIGHT),
        (input.up, UP),
        (input.down, DOWN),
        (input.fire, FIRE),
        (input.quit, QUIT),
        (input.autopilot, AUTOPILOT),
    ]
    .into_iter()
    .filter(|(held, _)| *held)
    .fold(0, |acc, (_, bit)| acc | bit)
}

pub fn decode_intents(byte: u8) -> Result<TickInput, InputError> {
    if byte & RESERVED_MASK != 0 {
        return Err(InputError::ReservedBits(byte & RESERVED_MASK));
    }
    Ok(TickInput {
        left: byte & LEFT != 0,
        right: byte & RIGHT != 0,
        up: byte & UP != 0,
        down: byte & DOWN != 0,
        fire: byte & FIRE != 0,
        quit: byte & QUIT != 0,
        autopilot: byte & AUTOPILOT != 0,
    })
}

/// Replays a byte tape, one byte per tick
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    tape: Vec<u8>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(tape: Vec<u8>) -> Self {
        Self { tape, cursor: 0 }
    }

    pub fn from_inputs(inputs: &[TickInput]) -> Self {
        Self::new(inputs.iter().map(encode_intents).collect())
    }

    pub fn remaining(&self) -> usize {
        self.tape.len() - self.cursor
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Result<TickInput, InputError> {
        let Some(&byte) = self.tape.get(self.cursor) else {
            return Err(InputError::ScriptExhausted { ticks: self.cursor });
        };
        self.cursor += 1;
        decode_intents(byte)
    }
}

/// The same snapshot every tick; a window-system backend would update it
/// from key events between polls
#[derive(Debug, Clone, Default)]
pub struct HeldInput {
    pub held: TickInput,
}

impl HeldInput {
    pub fn new(held: TickInput) -> Self {
        Self { held }
    }

    /// Demo source that lets the sim fly the ship
    pub fn autopilot() -> Self {
        Self::new(TickInput {
            autopilot: true,
            ..Default::default()
        })
    }
}

impl InputSource for HeldInput {
    fn poll(&mut self) -> Result<TickInput, InputError> {
        Ok(self.held)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bits() {
        let input = decode_intents(LEFT | UP | FIRE).unwrap();
        assert!(input.left && input.up && input.fire);
        assert!(!input.right && !input.down && !input.quit && !input.autopilot);
        assert_eq!(encode_intents(&input), LEFT | UP | FIRE);
    }

    #[test]
    fn test_reserved_bit_rejected() {
        assert_eq!(decode_intents(0x81), Err(InputError::ReservedBits(0x80)));
    }

    #[test]
    fn test_opposing_directions_are_valid() {
        let input = decode_intents(LEFT | RIGHT).unwrap();
        assert_eq!(input.direction().x, 0.0);
    }

    #[test]
    fn test_script_runs_out() {
        let mut script = ScriptedInput::new(vec![FIRE, 0]);
        assert!(script.poll().unwrap().fire);
        assert_eq!(script.poll().unwrap(), TickInput::default());
        assert_eq!(script.remaining(), 0);
        assert_eq!(script.poll(), Err(InputError::ScriptExhausted { ticks: 2 }));
    }

    #[test]
    fn test_held_input_repeats() {
        let mut held = HeldInput::autopilot();
        for _ in 0..3 {
            assert!(held.poll().unwrap().autopilot);
        }
    }
}
