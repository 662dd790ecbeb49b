//! Platform abstraction layer
//!
//! The sim asks for one intent snapshot per tick. Where those intents come
//! from (keyboard, recorded tape, a test script) is hidden behind
//! `InputSource`.

pub mod input;

pub use input::{
    HeldInput, InputError, InputSource, ScriptedInput, decode_intents, encode_intents,
};
