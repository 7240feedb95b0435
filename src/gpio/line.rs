use std::fs;
use std::io;
use std::os::unix::fs::FileExt;
use std::path::Path;
use std::time::Duration;

use crate::twi::{
	Direction,
	reliable_sleep,
};

const SYSFS_GPIO: &str = "/sys/class/gpio";

// udev may need a moment to fix permissions of freshly exported lines
const EXPORT_RETRIES: usize = 20;
const EXPORT_RETRY_DELAY: Duration = Duration::from_millis(10);

fn write_exact_at(file: &fs::File, buf: &[u8]) -> io::Result<()> {
	// sysfs attributes take the whole value in one step
	let l = file.write_at(buf, 0)?;
	if l != buf.len() {
		Err(io::Error::new(io::ErrorKind::Other, "failed to write whole buffer"))
	} else {
		Ok(())
	}
}

fn open_attribute(number: u32, name: &str) -> io::Result<fs::File> {
	let path = format!("{}/gpio{}/{}", SYSFS_GPIO, number, name);
	let mut tries = 0;
	loop {
		match fs::OpenOptions::new().read(true).write(true).open(&path) {
			Err(ref e) if e.kind() == io::ErrorKind::PermissionDenied && tries < EXPORT_RETRIES => {
				tries += 1;
				reliable_sleep(EXPORT_RETRY_DELAY);
			},
			r => return r,
		}
	}
}

/// A GPIO line exported through `/sys/class/gpio`.
pub struct SysfsLine {
	number: u32,
	direction_file: fs::File,
	value_file: fs::File,
	direction: Direction,
	// last level written, applied again when switching to output
	latch: bool,
}

impl SysfsLine {
	pub fn open(number: u32) -> crate::AResult<Self> {
		with_context!(("couldn't open GPIO {}", number), {
			if !Path::new(&format!("{}/gpio{}", SYSFS_GPIO, number)).exists() {
				debug!("exporting GPIO {}", number);
				let export = fs::OpenOptions::new().write(true).open(format!("{}/export", SYSFS_GPIO))?;
				write_exact_at(&export, number.to_string().as_bytes())?;
			}

			let direction_file = open_attribute(number, "direction")?;
			let value_file = open_attribute(number, "value")?;

			let mut buf = [0u8; 4];
			let l = direction_file.read_at(&mut buf, 0)?;
			let direction = if buf[..l].starts_with(b"out") { Direction::Output } else { Direction::Input };

			Ok(SysfsLine {
				number,
				direction_file,
				value_file,
				direction,
				latch: false,
			})
		})
	}

	pub fn number(&self) -> u32 {
		self.number
	}

	pub fn direction(&self) -> Direction {
		self.direction
	}

	pub fn set_direction(&mut self, direction: Direction) -> io::Result<()> {
		if direction == self.direction {
			return Ok(());
		}
		let value: &[u8] = match direction {
			Direction::Input => b"in",
			// "high"/"low" switch to output with the level applied atomically
			Direction::Output if self.latch => b"high",
			Direction::Output => b"low",
		};
		write_exact_at(&self.direction_file, value)?;
		self.direction = direction;
		Ok(())
	}

	pub fn write(&mut self, high: bool) -> io::Result<()> {
		self.latch = high;
		write_exact_at(&self.value_file, if high { b"1" } else { b"0" })
	}

	// sysfs rejects writing the value of an input; only remember the level
	// for the next switch to output then
	pub fn write_or_preset(&mut self, high: bool) -> io::Result<()> {
		match self.direction {
			Direction::Output => self.write(high),
			Direction::Input => {
				self.latch = high;
				Ok(())
			},
		}
	}

	pub fn read(&mut self) -> io::Result<bool> {
		let mut buf = [0u8; 2];
		let l = self.value_file.read_at(&mut buf, 0)?;
		if 0 == l {
			return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "empty GPIO value"));
		}
		Ok(buf[0] == b'1')
	}
}
