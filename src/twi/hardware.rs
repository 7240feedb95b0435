use std::fmt;
use std::thread;
use std::time::{
	Duration,
	Instant,
};

// start/stop setup and hold times (t_SU:STA, t_HD:STA, t_SU:STO)
const CLOCK_EDGE: Duration = Duration::from_nanos(600);

pub fn reliable_sleep(mut duration: Duration) {
	loop {
		let now = Instant::now();
		thread::sleep(duration);
		let elapsed = now.elapsed();
		if elapsed >= duration {
			return;
		}
		duration -= elapsed;
	}
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Line {
	Clock,
	Data,
}

impl fmt::Display for Line {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(match *self {
			Line::Clock => "scl",
			Line::Data => "sda",
		})
	}
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Direction {
	Input,
	Output,
}

/// The two GPIO lines of the bus.
///
/// Levels are `true` for high. `write_level` is only meaningful while the
/// line is an output, `read_level` only while it is an input.
pub trait Hardware {
	fn set_direction(&mut self, line: Line, direction: Direction);
	fn write_level(&mut self, line: Line, high: bool);
	fn read_level(&mut self, line: Line) -> bool;

	// delay for (at least) one clock edge
	fn delay(&mut self) {
		reliable_sleep(CLOCK_EDGE);
	}

	// nothing else may touch the lines (or delay us) until the matching
	// `leave_critical_section`
	fn enter_critical_section(&mut self) {
	}

	fn leave_critical_section(&mut self) {
	}
}

impl<'a, H: ?Sized + Hardware> Hardware for &'a mut H {
	fn set_direction(&mut self, line: Line, direction: Direction) {
		H::set_direction(*self, line, direction)
	}
	fn write_level(&mut self, line: Line, high: bool) {
		H::write_level(*self, line, high)
	}
	fn read_level(&mut self, line: Line) -> bool {
		H::read_level(*self, line)
	}
	fn delay(&mut self) {
		H::delay(*self)
	}
	fn enter_critical_section(&mut self) {
		H::enter_critical_section(*self)
	}
	fn leave_critical_section(&mut self) {
		H::leave_critical_section(*self)
	}
}
