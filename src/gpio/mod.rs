//! Linux sysfs GPIO backend for the software bus.
//!
//! sysfs is slow (a syscall per edge), which keeps us well within the
//! device's timing limits. Signals are blocked during transactions so a
//! handler can't stall the bus halfway through a byte.

mod line;
mod signals;

pub use self::line::SysfsLine;

use crate::twi::{
	Direction,
	Hardware,
	Line,
};

pub struct SysfsGpio {
	clock: SysfsLine,
	data: SysfsLine,
	critical: signals::CriticalSection,
}

impl SysfsGpio {
	fn line(&mut self, line: Line) -> &mut SysfsLine {
		match line {
			Line::Clock => &mut self.clock,
			Line::Data => &mut self.data,
		}
	}
}

impl Hardware for SysfsGpio {
	fn set_direction(&mut self, line: Line, direction: Direction) {
		let l = self.line(line);
		if let Err(e) = l.set_direction(direction) {
			error!("{} (GPIO {}): couldn't set direction {:?}: {}", line, l.number(), direction, e);
		}
	}

	fn write_level(&mut self, line: Line, high: bool) {
		let l = self.line(line);
		if let Err(e) = l.write(high) {
			error!("{} (GPIO {}): couldn't write level: {}", line, l.number(), e);
		}
	}

	// a line we can't read counts as released (high)
	fn read_level(&mut self, line: Line) -> bool {
		let l = self.line(line);
		match l.read() {
			Ok(level) => level,
			Err(e) => {
				error!("{} (GPIO {}): couldn't read level: {}", line, l.number(), e);
				true
			},
		}
	}

	fn enter_critical_section(&mut self) {
		self.critical.enter();
	}

	fn leave_critical_section(&mut self) {
		self.critical.leave();
	}
}

/// Open both lines and put the bus into idle state (CLK low, DATA high,
/// both outputs).
pub fn open_lines(clock: u32, data: u32) -> crate::AResult<SysfsGpio> {
	ensure!(clock != data, "clock and data need separate GPIOs (both are {})", clock);

	let mut gpio = SysfsGpio {
		clock: SysfsLine::open(clock)?,
		data: SysfsLine::open(data)?,
		critical: signals::CriticalSection::default(),
	};
	debug!(
		"GPIO {} (scl) was {:?}, GPIO {} (sda) was {:?}",
		clock, gpio.clock.direction(), data, gpio.data.direction()
	);

	with_context!(("couldn't configure GPIO {}/{} for the bus", clock, data), {
		gpio.clock.write_or_preset(false)?;
		gpio.clock.set_direction(Direction::Output)?;
		gpio.data.write_or_preset(true)?;
		gpio.data.set_direction(Direction::Output)?;
		Ok(())
	})?;

	debug!("bus on GPIO {} (scl) / {} (sda) ready", clock, data);
	Ok(gpio)
}
