use std::io;
use std::mem;
use std::ptr;

use libc::{
	SIG_BLOCK,
	SIG_SETMASK,
	pthread_sigmask,
	sigfillset,
	sigset_t,
};

/// All signals blocked for the current thread; the previous mask is restored
/// on drop.
pub struct BlockedSignals {
	previous: sigset_t,
}

impl Drop for BlockedSignals {
	fn drop(&mut self) {
		let res = unsafe {
			pthread_sigmask(SIG_SETMASK, &self.previous, ptr::null_mut())
		};
		if 0 != res {
			error!("restoring signal mask failed: {}", io::Error::from_raw_os_error(res));
		}
	}
}

pub fn block_all() -> io::Result<BlockedSignals> {
	unsafe {
		let mut all: sigset_t = mem::zeroed();
		if 0 != sigfillset(&mut all) {
			return Err(io::Error::last_os_error());
		}

		let mut previous: sigset_t = mem::zeroed();
		let res = pthread_sigmask(SIG_BLOCK, &all, &mut previous);
		if 0 != res {
			return Err(io::Error::from_raw_os_error(res));
		}

		Ok(BlockedSignals { previous })
	}
}

/// Nestable signal block: the mask is only restored when the outermost
/// section is left.
#[derive(Default)]
pub struct CriticalSection {
	depth: usize,
	blocked: Option<BlockedSignals>,
}

impl CriticalSection {
	pub fn enter(&mut self) {
		self.depth += 1;
		if 1 != self.depth {
			return;
		}
		match block_all() {
			Ok(blocked) => self.blocked = Some(blocked),
			Err(e) => warn!("couldn't block signals for bus transaction: {}", e),
		}
	}

	pub fn leave(&mut self) {
		if 0 == self.depth {
			warn!("leaving critical section that wasn't entered");
			return;
		}
		self.depth -= 1;
		if 0 == self.depth {
			self.blocked = None;
		}
	}

	pub fn depth(&self) -> usize {
		self.depth
	}
}
