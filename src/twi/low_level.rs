use std::ops::{
	Deref,
	DerefMut,
};

use super::{
	Direction,
	Hardware,
	Line,
};

/// An open transaction: the bus is inside the critical section and a start
/// condition was sent.
///
/// Dropping it sends the stop condition and leaves the critical section, no
/// matter how the transaction ended.
pub struct Transaction<'a, H: ?Sized+LowLevel+'a>(&'a mut H);

impl<'a, H: ?Sized+LowLevel> Drop for Transaction<'a, H> {
	fn drop(&mut self) {
		self.0.send_stop();
		self.0.leave_critical_section();
	}
}

impl<'a, H: ?Sized+LowLevel> Deref for Transaction<'a, H> {
	type Target = H;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl<'a, H: ?Sized+LowLevel> DerefMut for Transaction<'a, H> {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.0
	}
}

trait InternalLowLevel: Hardware {
	// the receiver pulls DATA low during the ninth clock to acknowledge
	fn _wait_for_ack(&mut self) -> bool {
		self.set_direction(Line::Data, Direction::Input);

		self.write_level(Line::Clock, true);
		let level = self.read_level(Line::Data);
		self.write_level(Line::Clock, false);

		self.set_direction(Line::Data, Direction::Output);

		!level
	}

	fn _send_ack(&mut self) {
		self.write_level(Line::Data, false);
		self.send_clock_pulse();
	}
}

impl<H: Hardware+?Sized> InternalLowLevel for H {
}

pub trait LowLevel: Hardware {
	// DATA falls while CLK is high
	fn send_start(&mut self) {
		self.set_direction(Line::Clock, Direction::Output);
		self.set_direction(Line::Data, Direction::Output);

		self.write_level(Line::Data, true);
		self.write_level(Line::Clock, true);
		self.delay(); // start setup time
		self.write_level(Line::Data, false);
		self.delay(); // start hold time
		trace!("start");
	}

	// DATA rises while CLK is high; leaves CLK low
	fn send_stop(&mut self) {
		self.write_level(Line::Data, false);
		self.write_level(Line::Clock, true);
		self.delay(); // stop setup time
		self.write_level(Line::Data, true);
		self.write_level(Line::Clock, false);
		self.delay(); // bus free time
		trace!("stop");
	}

	// latch the bit already present on DATA
	fn send_clock_pulse(&mut self) {
		self.write_level(Line::Clock, true);
		self.write_level(Line::Clock, false);
	}

	// send byte starting with the highest bit; returns whether the receiver
	// acknowledged it
	fn send_byte(&mut self, byte: u8) -> bool {
		self.write_level(Line::Clock, false);

		for bit in (0..8).rev() {
			let bit_mask = 1u8 << bit;
			self.write_level(Line::Data, 0 != (byte & bit_mask));
			self.send_clock_pulse();
		}

		let ack = self._wait_for_ack();
		trace!("sent 0x{:02x} ({})", byte, if ack { "ack" } else { "nack" });
		ack
	}

	// read byte starting with the highest bit, then acknowledge it.
	//
	// the sender puts the next bit on DATA while CLK is low, so we sample
	// right before the rising edge.
	fn receive_byte(&mut self) -> u8 {
		self.set_direction(Line::Data, Direction::Input);
		self.write_level(Line::Clock, false);

		let mut result = 0u8;
		for bit in (0..8).rev() {
			let bit_mask = 1u8 << bit;
			if self.read_level(Line::Data) {
				result |= bit_mask;
			}
			self.send_clock_pulse();
		}

		self.set_direction(Line::Data, Direction::Output);
		self._send_ack();

		trace!("received 0x{:02x}", result);
		result
	}

	fn start_transaction(&mut self) -> Transaction<Self> {
		self.enter_critical_section();
		self.send_start();

		Transaction(self)
	}
}

impl<H: Hardware+?Sized> LowLevel for H {
}
