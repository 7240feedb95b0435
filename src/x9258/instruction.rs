use std::fmt;

mod consts {
	// upper nibble of the device address
	pub const DEVICE_TYPE: u8 = 0x50;

	pub const READ_WIPER:                 u8 = 0x90;
	pub const WRITE_WIPER:                u8 = 0xa0;
	pub const READ_MEMORY:                u8 = 0xb0; // "read data register"
	pub const WRITE_MEMORY:               u8 = 0xc0; // "write data register"
	pub const XFR_MEMORY_TO_WIPER:        u8 = 0xd0;
	pub const XFR_WIPER_TO_MEMORY:        u8 = 0xe0;
	pub const GLOBAL_XFR_MEMORY_TO_WIPER: u8 = 0x10;
	pub const GLOBAL_XFR_WIPER_TO_MEMORY: u8 = 0x80;
	pub const INC_DEC_WIPER:              u8 = 0x20;

	pub const OPCODE_MASK: u8 = 0xf0;
	pub const WIPER_MASK:  u8 = 0x03;
	pub const MEMORY_MASK: u8 = 0x03;
	pub const MEMORY_SHIFT: u8 = 2;
}

pub(super) use self::consts::DEVICE_TYPE;
use self::consts::*;

fn wiper_bits(wiper: u8) -> u8 {
	wiper & WIPER_MASK
}

fn memory_bits(memory: u8) -> u8 {
	(memory & MEMORY_MASK) << MEMORY_SHIFT
}

/// Instruction byte: opcode nibble, memory slot in bits 2-3, wiper in bits
/// 0-1.
///
/// Operands out of range are truncated to their field width.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instruction(pub u8);

impl Instruction {
	pub fn read_wiper(wiper: u8) -> Self {
		Instruction(READ_WIPER | wiper_bits(wiper))
	}

	pub fn write_wiper(wiper: u8) -> Self {
		Instruction(WRITE_WIPER | wiper_bits(wiper))
	}

	pub fn read_memory(wiper: u8, memory: u8) -> Self {
		Instruction(READ_MEMORY | memory_bits(memory) | wiper_bits(wiper))
	}

	pub fn write_memory(wiper: u8, memory: u8) -> Self {
		Instruction(WRITE_MEMORY | memory_bits(memory) | wiper_bits(wiper))
	}

	pub fn xfr_memory_to_wiper(wiper: u8, memory: u8) -> Self {
		Instruction(XFR_MEMORY_TO_WIPER | memory_bits(memory) | wiper_bits(wiper))
	}

	pub fn xfr_wiper_to_memory(wiper: u8, memory: u8) -> Self {
		Instruction(XFR_WIPER_TO_MEMORY | memory_bits(memory) | wiper_bits(wiper))
	}

	// all four wipers at once
	pub fn global_xfr_memory_to_wiper(memory: u8) -> Self {
		Instruction(GLOBAL_XFR_MEMORY_TO_WIPER | memory_bits(memory))
	}

	pub fn global_xfr_wiper_to_memory(memory: u8) -> Self {
		Instruction(GLOBAL_XFR_WIPER_TO_MEMORY | memory_bits(memory))
	}

	pub fn inc_dec_wiper(wiper: u8) -> Self {
		Instruction(INC_DEC_WIPER | wiper_bits(wiper))
	}

	pub fn byte(&self) -> u8 {
		self.0
	}

	pub fn wiper(&self) -> u8 {
		self.0 & WIPER_MASK
	}

	pub fn memory(&self) -> u8 {
		(self.0 >> MEMORY_SHIFT) & MEMORY_MASK
	}

	pub fn name(&self) -> Option<&'static str> {
		Some(match self.0 & OPCODE_MASK {
			READ_WIPER => "read wiper",
			WRITE_WIPER => "write wiper",
			READ_MEMORY => "read memory",
			WRITE_MEMORY => "write memory",
			XFR_MEMORY_TO_WIPER => "memory to wiper",
			XFR_WIPER_TO_MEMORY => "wiper to memory",
			GLOBAL_XFR_MEMORY_TO_WIPER => "global memory to wiper",
			GLOBAL_XFR_WIPER_TO_MEMORY => "global wiper to memory",
			INC_DEC_WIPER => "inc/dec wiper",
			_ => return None,
		})
	}
}

impl fmt::Display for Instruction {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "0x{:02x}", self.0)
	}
}

impl fmt::Debug for Instruction {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "0x{:02x} (", self.0)?;
		match self.0 & OPCODE_MASK {
			READ_WIPER | WRITE_WIPER | INC_DEC_WIPER => {
				write!(f, "{}, wiper: {}", self.name().unwrap_or("?"), self.wiper())?;
			},
			GLOBAL_XFR_MEMORY_TO_WIPER | GLOBAL_XFR_WIPER_TO_MEMORY => {
				write!(f, "{}, memory: {}", self.name().unwrap_or("?"), self.memory())?;
			},
			READ_MEMORY | WRITE_MEMORY | XFR_MEMORY_TO_WIPER | XFR_WIPER_TO_MEMORY => {
				write!(f, "{}, wiper: {}, memory: {}", self.name().unwrap_or("?"), self.wiper(), self.memory())?;
			},
			_ => write!(f, "unknown")?,
		}
		write!(f, ")")
	}
}
