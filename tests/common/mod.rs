#![allow(dead_code)]

use x9258_twi::twi::{
	Direction,
	Hardware,
	Line,
};

pub fn init_logging() {
	let _ = env_logger::Builder::from_default_env().is_test(true).try_init();
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Event {
	Start,
	Stop,
	// byte clocked in from the master; whether the device acknowledged it
	Received(u8, bool),
	// byte clocked out to the master; whether the master acknowledged it
	Sent(u8, bool),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Phase {
	Idle,
	Receive { byte: u8, count: u8 },
	// eighth bit latched; the device answers once CLK falls
	AckPending { ack: bool },
	// ninth clock after a received byte
	Ack { ack: bool },
	Send { byte: u8, count: u8 },
	MasterAck { byte: u8 },
	// not addressed (or done) until the next START
	Ignore,
}

/// X9258 on the other end of the lines, decoding the master's transitions.
pub struct SimulatedX9258 {
	pub selector: u8,
	pub respond: bool,
	pub nack_instructions: bool,
	pub nack_values: bool,

	pub wipers: [u8; 4],
	pub memory: [[u8; 4]; 4],
	// (wiper, data byte) of each inc/dec instruction
	pub inc_dec: Vec<(u8, u8)>,

	pub events: Vec<Event>,
	// master DATA level at each rising CLK edge while the device listens
	pub data_bits: Vec<bool>,
	pub rising_edges: usize,

	pub critical_depth: usize,
	pub critical_entries: usize,
	pub max_critical_depth: usize,
	// line accesses outside the critical section
	pub unguarded: usize,

	scl: bool,
	sda_out: bool,
	sda_dir: Direction,
	device_sda: Option<bool>,
	phase: Phase,
	received: usize,
	instruction: Option<u8>,
	value: Option<u8>,
}

impl SimulatedX9258 {
	pub fn new(selector: u8) -> Self {
		SimulatedX9258 {
			selector,
			respond: true,
			nack_instructions: false,
			nack_values: false,
			wipers: [0; 4],
			memory: [[0; 4]; 4],
			inc_dec: Vec::new(),
			events: Vec::new(),
			data_bits: Vec::new(),
			rising_edges: 0,
			critical_depth: 0,
			critical_entries: 0,
			max_critical_depth: 0,
			unguarded: 0,
			scl: false,
			sda_out: true,
			sda_dir: Direction::Output,
			device_sda: None,
			phase: Phase::Idle,
			received: 0,
			instruction: None,
			value: None,
		}
	}

	pub fn address(&self) -> u8 {
		0x50 | (self.selector & 0x0f)
	}

	pub fn clear_trace(&mut self) {
		self.events.clear();
		self.data_bits.clear();
		self.rising_edges = 0;
		self.critical_entries = 0;
	}

	pub fn received_bytes(&self) -> Vec<u8> {
		self.events.iter().filter_map(|e| match *e {
			Event::Received(b, _) => Some(b),
			_ => None,
		}).collect()
	}

	fn accept(&mut self, byte: u8) -> bool {
		self.received += 1;
		match self.received {
			1 => self.respond && byte == self.address(),
			2 => {
				if self.nack_instructions {
					return false;
				}
				self.instruction = Some(byte);
				true
			},
			_ => {
				if self.nack_values {
					return false;
				}
				self.value = Some(byte);
				true
			},
		}
	}

	fn read_register(&self, instruction: u8) -> Option<u8> {
		let wiper = (instruction & 0x03) as usize;
		let memory = ((instruction >> 2) & 0x03) as usize;
		match instruction & 0xf0 {
			0x90 => Some(self.wipers[wiper]),
			0xb0 => Some(self.memory[wiper][memory]),
			_ => None,
		}
	}

	// the device acts on STOP
	fn execute(&mut self) {
		let instruction = match self.instruction.take() {
			Some(i) => i,
			None => return,
		};
		let value = self.value.take();
		let wiper = (instruction & 0x03) as usize;
		let memory = ((instruction >> 2) & 0x03) as usize;
		match (instruction & 0xf0, value) {
			(0xa0, Some(v)) => self.wipers[wiper] = v,
			(0xc0, Some(v)) => self.memory[wiper][memory] = v,
			(0xd0, _) => self.wipers[wiper] = self.memory[wiper][memory],
			(0xe0, _) => self.memory[wiper][memory] = self.wipers[wiper],
			(0x10, _) => for w in 0..4 {
				self.wipers[w] = self.memory[w][memory];
			},
			(0x80, _) => for w in 0..4 {
				self.memory[w][memory] = self.wipers[w];
			},
			(0x20, Some(v)) => self.inc_dec.push((wiper as u8, v)),
			_ => (),
		}
	}

	fn rising_clock(&mut self) {
		self.rising_edges += 1;
		match self.phase {
			Phase::Receive { byte, count } => {
				let bit = self.sda_out;
				self.data_bits.push(bit);
				let byte = (byte << 1) | (bit as u8);
				if count + 1 < 8 {
					self.phase = Phase::Receive { byte, count: count + 1 };
					return;
				}
				let ack = self.accept(byte);
				self.events.push(Event::Received(byte, ack));
				self.phase = Phase::AckPending { ack };
			},
			Phase::MasterAck { byte } => {
				let ack = self.sda_dir == Direction::Output && !self.sda_out;
				self.events.push(Event::Sent(byte, ack));
				self.phase = Phase::Ignore;
			},
			_ => (),
		}
	}

	fn falling_clock(&mut self) {
		match self.phase {
			Phase::AckPending { ack } => {
				if ack {
					self.device_sda = Some(false);
				}
				self.phase = Phase::Ack { ack };
			},
			Phase::Ack { ack } => {
				self.device_sda = None;
				if !ack {
					self.phase = Phase::Ignore;
					return;
				}
				let read = match (self.received, self.instruction) {
					(2, Some(i)) => self.read_register(i),
					_ => None,
				};
				self.phase = match read {
					Some(byte) => {
						self.device_sda = Some(0 != byte & 0x80);
						Phase::Send { byte, count: 0 }
					},
					None => Phase::Receive { byte: 0, count: 0 },
				};
			},
			Phase::Send { byte, count } => {
				let count = count + 1;
				if count == 8 {
					self.device_sda = None;
					self.phase = Phase::MasterAck { byte };
				} else {
					self.device_sda = Some(0 != byte & (0x80 >> count));
					self.phase = Phase::Send { byte, count };
				}
			},
			_ => (),
		}
	}

	fn data_changed(&mut self, high: bool) {
		if !self.scl || self.sda_dir != Direction::Output {
			return;
		}
		if high {
			self.events.push(Event::Stop);
			self.execute();
			self.phase = Phase::Idle;
		} else {
			self.events.push(Event::Start);
			self.received = 0;
			self.instruction = None;
			self.value = None;
			self.phase = Phase::Receive { byte: 0, count: 0 };
		}
		self.device_sda = None;
	}

	fn check_guarded(&mut self) {
		if 0 == self.critical_depth {
			self.unguarded += 1;
		}
	}
}

impl Hardware for SimulatedX9258 {
	fn set_direction(&mut self, line: Line, direction: Direction) {
		self.check_guarded();
		if line == Line::Data {
			self.sda_dir = direction;
		}
	}

	fn write_level(&mut self, line: Line, high: bool) {
		self.check_guarded();
		match line {
			Line::Clock => {
				if high == self.scl {
					return;
				}
				self.scl = high;
				if high {
					self.rising_clock();
				} else {
					self.falling_clock();
				}
			},
			Line::Data => {
				let previous = self.sda_out;
				self.sda_out = high;
				if previous != high {
					self.data_changed(high);
				}
			},
		}
	}

	fn read_level(&mut self, line: Line) -> bool {
		self.check_guarded();
		match line {
			Line::Clock => self.scl,
			Line::Data => match self.sda_dir {
				// pulled up unless the device drives it
				Direction::Input => self.device_sda.unwrap_or(true),
				Direction::Output => self.sda_out,
			},
		}
	}

	fn delay(&mut self) {
	}

	fn enter_critical_section(&mut self) {
		self.critical_depth += 1;
		self.critical_entries += 1;
		if self.critical_depth > self.max_critical_depth {
			self.max_critical_depth = self.critical_depth;
		}
	}

	fn leave_critical_section(&mut self) {
		assert!(self.critical_depth > 0, "left critical section that wasn't entered");
		self.critical_depth -= 1;
	}
}
