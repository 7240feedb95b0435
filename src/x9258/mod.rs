//! Xicor/Intersil X9258: quad digital potentiometer, 256 taps per wiper, four
//! non-volatile data registers ("memory") per wiper.
//!
//! Every operation comes in two flavours: `try_*` returns the
//! `NotAcknowledged` error if the device didn't respond, while the plain
//! variant swallows it (reads return `0xff` then, which is also a valid
//! wiper position).

use std::time::Duration;

use crate::twi::{
	BusOperations,
	Hardware,
};

mod address;
mod instruction;

pub use self::address::DeviceAddress;
pub use self::instruction::Instruction;

/// Returned by the plain read operations if the device didn't acknowledge.
pub const NOT_ACKNOWLEDGED_VALUE: u8 = 0xff;

/// Maximum time the device needs to program a data register. The driver
/// doesn't wait for it; callers must not talk to the device before it passed.
pub const NONVOLATILE_WRITE_CYCLE: Duration = Duration::from_millis(10);

pub const WIPER_COUNT: u8 = 4;
pub const MEMORY_COUNT: u8 = 4;

fn silent<T>(result: crate::AResult<T>, fallback: T) -> T {
	match result {
		Ok(v) => v,
		Err(e) => {
			debug!("ignoring failed operation: {}", e);
			fallback
		},
	}
}

pub struct X9258<H: Hardware> {
	hardware: H,
	address: DeviceAddress,
}

impl<H: Hardware> X9258<H> {
	pub fn new(hardware: H) -> Self {
		Self::with_address(hardware, 0)
	}

	pub fn with_address(hardware: H, selector: u8) -> Self {
		X9258 {
			hardware,
			address: DeviceAddress::new(selector),
		}
	}

	/// Only the lower 4 bits (A3..A0) are used.
	pub fn set_address(&mut self, selector: u8) {
		self.address = DeviceAddress::new(selector);
	}

	pub fn address(&self) -> DeviceAddress {
		self.address
	}

	pub fn hardware(&self) -> &H {
		&self.hardware
	}

	pub fn hardware_mut(&mut self) -> &mut H {
		&mut self.hardware
	}

	pub fn into_inner(self) -> H {
		self.hardware
	}

	fn write_instruction(&mut self, instruction: Instruction) -> crate::AResult<()> {
		trace!("{}: {:?}", self.address, instruction);
		self.hardware.write_instruction(self.address.byte(), instruction.byte())
	}

	fn write_value(&mut self, instruction: Instruction, value: u8) -> crate::AResult<()> {
		trace!("{}: {:?} <- 0x{:02x}", self.address, instruction, value);
		self.hardware.write_value(self.address.byte(), instruction.byte(), value)
	}

	fn read_value(&mut self, instruction: Instruction) -> crate::AResult<u8> {
		trace!("{}: {:?}", self.address, instruction);
		self.hardware.read_value(self.address.byte(), instruction.byte())
	}

	pub fn try_get_wiper(&mut self, wiper: u8) -> crate::AResult<u8> {
		self.read_value(Instruction::read_wiper(wiper))
	}

	pub fn try_set_wiper(&mut self, wiper: u8, value: u8) -> crate::AResult<()> {
		self.write_value(Instruction::write_wiper(wiper), value)
	}

	pub fn try_get_memory(&mut self, wiper: u8, memory: u8) -> crate::AResult<u8> {
		self.read_value(Instruction::read_memory(wiper, memory))
	}

	// see NONVOLATILE_WRITE_CYCLE
	pub fn try_set_memory(&mut self, wiper: u8, memory: u8, value: u8) -> crate::AResult<()> {
		self.write_value(Instruction::write_memory(wiper, memory), value)
	}

	pub fn try_xfr_memory_to_wiper(&mut self, wiper: u8, memory: u8) -> crate::AResult<()> {
		self.write_instruction(Instruction::xfr_memory_to_wiper(wiper, memory))
	}

	pub fn try_xfr_wiper_to_memory(&mut self, wiper: u8, memory: u8) -> crate::AResult<()> {
		self.write_instruction(Instruction::xfr_wiper_to_memory(wiper, memory))
	}

	pub fn try_global_xfr_memory_to_wiper(&mut self, memory: u8) -> crate::AResult<()> {
		self.write_instruction(Instruction::global_xfr_memory_to_wiper(memory))
	}

	pub fn try_global_xfr_wiper_to_memory(&mut self, memory: u8) -> crate::AResult<()> {
		self.write_instruction(Instruction::global_xfr_wiper_to_memory(memory))
	}

	// datasheet is vague here; this only sends the instruction with a 0/1 data byte
	pub fn try_enable_inc_dec_wiper(&mut self, wiper: u8, inc_when_high: bool) -> crate::AResult<()> {
		self.write_value(Instruction::inc_dec_wiper(wiper), inc_when_high as u8)
	}

	pub fn get_wiper(&mut self, wiper: u8) -> u8 {
		silent(self.try_get_wiper(wiper), NOT_ACKNOWLEDGED_VALUE)
	}

	pub fn set_wiper(&mut self, wiper: u8, value: u8) {
		silent(self.try_set_wiper(wiper, value), ())
	}

	pub fn get_memory(&mut self, wiper: u8, memory: u8) -> u8 {
		silent(self.try_get_memory(wiper, memory), NOT_ACKNOWLEDGED_VALUE)
	}

	pub fn set_memory(&mut self, wiper: u8, memory: u8, value: u8) {
		silent(self.try_set_memory(wiper, memory, value), ())
	}

	pub fn xfr_memory_to_wiper(&mut self, wiper: u8, memory: u8) {
		silent(self.try_xfr_memory_to_wiper(wiper, memory), ())
	}

	pub fn xfr_wiper_to_memory(&mut self, wiper: u8, memory: u8) {
		silent(self.try_xfr_wiper_to_memory(wiper, memory), ())
	}

	pub fn global_xfr_memory_to_wiper(&mut self, memory: u8) {
		silent(self.try_global_xfr_memory_to_wiper(memory), ())
	}

	pub fn global_xfr_wiper_to_memory(&mut self, memory: u8) {
		silent(self.try_global_xfr_wiper_to_memory(memory), ())
	}

	pub fn enable_inc_dec_wiper(&mut self, wiper: u8, inc_when_high: bool) {
		silent(self.try_enable_inc_dec_wiper(wiper, inc_when_high), ())
	}
}
