//! Software two-wire bus for the Xicor/Intersil X9258 family
//!
//! Looks like I²C, but the read sequence is
//! `START, address, instruction, value, STOP` without a repeated start or a
//! R/W bit, which regular I²C controllers can't produce. So both lines are
//! driven directly:
//!
//! - START: DATA falls while CLK is high
//! - STOP: DATA rises while CLK is high
//! - data bits change while CLK is low and are latched on the rising CLK
//!   edge, highest bit first
//! - after each byte the receiver pulls DATA low for one CLK cycle (ACK)
//!
//! Lines are driven push-pull, so the master switches DATA to input whenever
//! the device is expected to drive it (ACK after writes, read data).

mod hardware;
mod low_level;
mod operations;

pub use self::hardware::{
	Direction,
	Hardware,
	Line,
	reliable_sleep,
};

pub use self::low_level::{
	LowLevel,
	Transaction,
};

pub use self::operations::{
	BusOperations,
	NotAcknowledged,
	Phase,
};
