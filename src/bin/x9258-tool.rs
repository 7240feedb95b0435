#[macro_use]
extern crate clap;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

extern crate x9258_twi;
use x9258_twi::*;

use std::process::exit;

use x9258_twi::twi::{
	Hardware,
	reliable_sleep,
};
use x9258_twi::x9258::{
	MEMORY_COUNT,
	NONVOLATILE_WRITE_CYCLE,
	WIPER_COUNT,
	X9258,
};

fn get_param<T>(matches: &clap::ArgMatches, name: &str) -> AResult<T>
where
	T: std::str::FromStr,
	failure::Error: From<<T as std::str::FromStr>::Err>,
{
	let param = match matches.value_of(name) {
		Some(p) => p,
		None => bail!("missing parameter {}", name),
	};
	param.parse::<T>().map_err(|e| {
		let e = failure::Error::from(e);
		let msg = format!("invalid parameter {}: {}", name, e);
		e.context(msg).into()
	})
}

fn get_wiper_param(matches: &clap::ArgMatches) -> AResult<u8> {
	let wiper: u8 = get_param(matches, "WIPER")?;
	ensure!(wiper < WIPER_COUNT, "invalid wiper {} (device has {})", wiper, WIPER_COUNT);
	Ok(wiper)
}

fn get_memory_param(matches: &clap::ArgMatches) -> AResult<u8> {
	let memory: u8 = get_param(matches, "MEMORY")?;
	ensure!(memory < MEMORY_COUNT, "invalid memory register {} (device has {} per wiper)", memory, MEMORY_COUNT);
	Ok(memory)
}

fn get_wiper<H: Hardware>(pot: &mut X9258<H>, sub_m: &clap::ArgMatches) -> AResult<()> {
	let wiper = get_wiper_param(sub_m)?;
	println!("{}", pot.try_get_wiper(wiper)?);
	Ok(())
}

fn set_wiper<H: Hardware>(pot: &mut X9258<H>, sub_m: &clap::ArgMatches) -> AResult<()> {
	let wiper = get_wiper_param(sub_m)?;
	let value: u8 = get_param(sub_m, "VALUE")?;
	pot.try_set_wiper(wiper, value)
}

fn get_memory<H: Hardware>(pot: &mut X9258<H>, sub_m: &clap::ArgMatches) -> AResult<()> {
	let wiper = get_wiper_param(sub_m)?;
	let memory = get_memory_param(sub_m)?;
	println!("{}", pot.try_get_memory(wiper, memory)?);
	Ok(())
}

fn set_memory<H: Hardware>(pot: &mut X9258<H>, sub_m: &clap::ArgMatches) -> AResult<()> {
	let wiper = get_wiper_param(sub_m)?;
	let memory = get_memory_param(sub_m)?;
	let value: u8 = get_param(sub_m, "VALUE")?;
	pot.try_set_memory(wiper, memory, value)?;
	reliable_sleep(NONVOLATILE_WRITE_CYCLE);
	Ok(())
}

fn xfr_memory_to_wiper<H: Hardware>(pot: &mut X9258<H>, sub_m: &clap::ArgMatches) -> AResult<()> {
	let wiper = get_wiper_param(sub_m)?;
	let memory = get_memory_param(sub_m)?;
	pot.try_xfr_memory_to_wiper(wiper, memory)
}

fn xfr_wiper_to_memory<H: Hardware>(pot: &mut X9258<H>, sub_m: &clap::ArgMatches) -> AResult<()> {
	let wiper = get_wiper_param(sub_m)?;
	let memory = get_memory_param(sub_m)?;
	pot.try_xfr_wiper_to_memory(wiper, memory)?;
	reliable_sleep(NONVOLATILE_WRITE_CYCLE);
	Ok(())
}

fn global_xfr_memory_to_wiper<H: Hardware>(pot: &mut X9258<H>, sub_m: &clap::ArgMatches) -> AResult<()> {
	let memory = get_memory_param(sub_m)?;
	pot.try_global_xfr_memory_to_wiper(memory)
}

fn global_xfr_wiper_to_memory<H: Hardware>(pot: &mut X9258<H>, sub_m: &clap::ArgMatches) -> AResult<()> {
	let memory = get_memory_param(sub_m)?;
	pot.try_global_xfr_wiper_to_memory(memory)?;
	reliable_sleep(NONVOLATILE_WRITE_CYCLE);
	Ok(())
}

fn inc_dec<H: Hardware>(pot: &mut X9258<H>, sub_m: &clap::ArgMatches) -> AResult<()> {
	let wiper = get_wiper_param(sub_m)?;
	let inc_when_high = sub_m.is_present("high");
	pot.try_enable_inc_dec_wiper(wiper, inc_when_high)
}

fn dump<H: Hardware>(pot: &mut X9258<H>) -> AResult<()> {
	for wiper in 0..WIPER_COUNT {
		print!("wiper {}: {:3} memory:", wiper, pot.try_get_wiper(wiper)?);
		for memory in 0..MEMORY_COUNT {
			print!(" {:3}", pot.try_get_memory(wiper, memory)?);
		}
		println!();
	}
	Ok(())
}

fn main_app() -> AResult<()> {
	let matches = clap_app!(@app (app_from_crate!())
		(@setting SubcommandRequiredElseHelp)
		(global_setting: clap::AppSettings::VersionlessSubcommands)
		(@arg SCL: --scl +takes_value +required "GPIO number of the clock line")
		(@arg SDA: --sda +takes_value +required "GPIO number of the data line")
		(@arg ADDRESS: -a --address +takes_value "device address pins A3..A0 (0-15, default 0)")
		(@subcommand get_wiper =>
			(about: "read wiper position")
			(@arg WIPER: +required "wiper (0-3)")
		)
		(@subcommand set_wiper =>
			(about: "set wiper position")
			(@arg WIPER: +required "wiper (0-3)")
			(@arg VALUE: +required "position (0-255)")
		)
		(@subcommand get_memory =>
			(about: "read non-volatile data register of a wiper")
			(@arg WIPER: +required "wiper (0-3)")
			(@arg MEMORY: +required "data register (0-3)")
		)
		(@subcommand set_memory =>
			(about: "write non-volatile data register of a wiper")
			(@arg WIPER: +required "wiper (0-3)")
			(@arg MEMORY: +required "data register (0-3)")
			(@arg VALUE: +required "value (0-255)")
		)
		(@subcommand xfr_memory_to_wiper =>
			(about: "load wiper position from data register")
			(@arg WIPER: +required "wiper (0-3)")
			(@arg MEMORY: +required "data register (0-3)")
		)
		(@subcommand xfr_wiper_to_memory =>
			(about: "store wiper position in data register")
			(@arg WIPER: +required "wiper (0-3)")
			(@arg MEMORY: +required "data register (0-3)")
		)
		(@subcommand global_xfr_memory_to_wiper =>
			(about: "load all wiper positions from their data registers")
			(@arg MEMORY: +required "data register (0-3)")
		)
		(@subcommand global_xfr_wiper_to_memory =>
			(about: "store all wiper positions in their data registers")
			(@arg MEMORY: +required "data register (0-3)")
		)
		(@subcommand inc_dec =>
			(about: "enable increment/decrement mode for a wiper (untested)")
			(@arg high: --high "increment when high")
			(@arg WIPER: +required "wiper (0-3)")
		)
		(@subcommand dump =>
			(about: "show all wiper positions and data registers")
		)
	).get_matches();

	let scl: u32 = get_param(&matches, "SCL")?;
	let sda: u32 = get_param(&matches, "SDA")?;
	let selector: u8 = if matches.is_present("ADDRESS") {
		get_param(&matches, "ADDRESS")?
	} else {
		0
	};
	ensure!(selector < 16, "invalid device address {} (only 4 address pins)", selector);

	let gpio = gpio::open_lines(scl, sda)?;
	let mut pot = X9258::with_address(gpio, selector);
	info!("X9258 at {} on GPIO {} (scl) / {} (sda)", pot.address(), scl, sda);

	match matches.subcommand() {
		("get_wiper", Some(sub_m)) => get_wiper(&mut pot, sub_m),
		("set_wiper", Some(sub_m)) => set_wiper(&mut pot, sub_m),
		("get_memory", Some(sub_m)) => get_memory(&mut pot, sub_m),
		("set_memory", Some(sub_m)) => set_memory(&mut pot, sub_m),
		("xfr_memory_to_wiper", Some(sub_m)) => xfr_memory_to_wiper(&mut pot, sub_m),
		("xfr_wiper_to_memory", Some(sub_m)) => xfr_wiper_to_memory(&mut pot, sub_m),
		("global_xfr_memory_to_wiper", Some(sub_m)) => global_xfr_memory_to_wiper(&mut pot, sub_m),
		("global_xfr_wiper_to_memory", Some(sub_m)) => global_xfr_wiper_to_memory(&mut pot, sub_m),
		("inc_dec", Some(sub_m)) => inc_dec(&mut pot, sub_m),
		("dump", _) => dump(&mut pot),
		("", _) => bail!("no subcommand"),
		(cmd, _) => bail!("not implemented subcommand {:?}", cmd),
	}
}

fn main() {
	env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();

	if let Err(e) = main_app() {
		error!("Error: {}", e);
		exit(1);
	}
}
