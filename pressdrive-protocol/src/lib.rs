//! Operator protocol for the pressdrive actuator controller
//!
//! The controller talks to its operator over a plain serial text channel.
//! One command per line, one acknowledgment or error line per command,
//! plus a telemetry line every control tick.
//!
//! # Protocol Overview
//!
//! ```text
//! operator → controller          controller → operator
//! ─────────────────────          ──────────────────────────────────
//! P3-5.00                        SET: P3 -> 5.00 psi
//! M1+100                         MOV: M1 +100 steps
//! stop                           STOP: All motors halted
//! bogus                          ERR: Format: P#-# or M#±steps
//!                                0.00\t0.12\t5.01\t0.00\t0.00\t0.00
//!                                DONE: P3 = 5.01 psi
//!                                DONE: M1 manual move complete
//! ```
//!
//! Bytes from the transport are assembled by [`LineBuffer`], parsed by
//! [`parse_command`], and answered with a [`Response`].

#![no_std]
#![deny(unsafe_code)]

pub mod axis;
pub mod command;
pub mod line;
pub mod response;
pub mod telemetry;

pub use axis::{AxisId, TargetRange, AXIS_COUNT};
pub use command::{parse_command, Command, CommandError};
pub use line::{Line, LineBuffer, LineError, MAX_LINE_LEN};
pub use response::{Response, ResponseLine, MAX_RESPONSE_LEN};
pub use telemetry::{classify_line, format_readings, parse_readings, HostLine, HEADER_LINES};
