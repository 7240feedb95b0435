use std::fmt;

use failure::Fail;

use super::{
	Hardware,
	LowLevel,
	low_level::Transaction,
};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Phase {
	Address,
	Instruction,
}

impl fmt::Display for Phase {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(match *self {
			Phase::Address => "address",
			Phase::Instruction => "instruction",
		})
	}
}

/// The device didn't acknowledge the address or instruction byte; the
/// transaction was aborted with a stop condition.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Fail)]
#[fail(display = "{} byte 0x{:02x} not acknowledged", phase, byte)]
pub struct NotAcknowledged {
	pub phase: Phase,
	pub byte: u8,
}

// start a transaction and send the address and instruction bytes, each of
// which must be acknowledged
fn open_instruction<H>(hardware: &mut H, address: u8, instruction: u8) -> crate::AResult<Transaction<H>>
where
	H: Hardware + ?Sized,
{
	let mut tx = hardware.start_transaction();

	if !tx.send_byte(address) {
		return Err(NotAcknowledged { phase: Phase::Address, byte: address }.into());
	}
	if !tx.send_byte(instruction) {
		return Err(NotAcknowledged { phase: Phase::Instruction, byte: instruction }.into());
	}

	Ok(tx)
}

/// The three transaction shapes of the bus.
///
/// All of them start with the device address byte followed by the
/// instruction byte; a missing acknowledgement for either aborts the
/// transaction. The stop condition is sent when the transaction guard goes
/// out of scope.
pub trait BusOperations: Hardware {
	fn write_instruction(&mut self, address: u8, instruction: u8) -> crate::AResult<()> {
		open_instruction(self, address, instruction)?;
		Ok(())
	}

	// the acknowledgement for the value byte isn't checked
	fn write_value(&mut self, address: u8, instruction: u8, value: u8) -> crate::AResult<()> {
		let mut tx = open_instruction(self, address, instruction)?;
		if !tx.send_byte(value) {
			debug!("value byte 0x{:02x} for instruction 0x{:02x} not acknowledged, ignoring", value, instruction);
		}
		Ok(())
	}

	fn read_value(&mut self, address: u8, instruction: u8) -> crate::AResult<u8> {
		let mut tx = open_instruction(self, address, instruction)?;
		Ok(tx.receive_byte())
	}
}

impl<H: Hardware + ?Sized> BusOperations for H {
}
