use std::fmt;

use super::instruction::DEVICE_TYPE;

const SELECTOR_MASK: u8 = 0x0f;

/// Bus address byte: the family type `0x5` in the upper nibble, the
/// hardwired A3..A0 pins in the lower nibble.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct DeviceAddress(u8);

impl DeviceAddress {
	// upper bits of `selector` are ignored
	pub fn new(selector: u8) -> Self {
		DeviceAddress(DEVICE_TYPE | (selector & SELECTOR_MASK))
	}

	pub fn selector(&self) -> u8 {
		self.0 & SELECTOR_MASK
	}

	pub fn byte(&self) -> u8 {
		self.0
	}
}

impl Default for DeviceAddress {
	fn default() -> Self {
		DeviceAddress::new(0)
	}
}

impl fmt::Display for DeviceAddress {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "0x{:02x}", self.0)
	}
}
