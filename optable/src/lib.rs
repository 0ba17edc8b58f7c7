//! Builds the CHIP-8 opcode dispatch table from the comments of a handler
//! source file. Each handler is documented with its opcode pattern:
//!
//! ```text
//! /*
//! 8xy4 adds vy to vx
//! */
//! void chip8_addvxvy(chip8_t* chip, opcode_params_t* params);
//! ```
//!
//! `x`, `y`, `n`, `k` and `_` each stand for any nibble, so the entry above
//! claims the 256 opcodes `0x8004..=0x8FF4` with low nibble 4.

pub mod emit;
pub mod error;
pub mod expand;
pub mod generate;
pub mod pattern;
pub mod scan;
pub mod table;

pub use emit::{render, Format, Layout};
pub use error::Error;
pub use expand::{expand, expand_str};
pub use generate::{build, build_file, read_lines, Report};
pub use pattern::{Pattern, Symbol, WildcardKind};
pub use scan::{scan, Entry, Incomplete, Reason, Scanner};
pub use table::{Collision, Handler, OpcodeTable, DEFAULT_SENTINEL, TABLE_LEN};
