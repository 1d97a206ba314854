extern crate clap;
extern crate env_logger;
extern crate level;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use level::{LevelFolder, SaveOptions, WorldProperties};
use nbt::Framing;
use region::RegionReader;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::process;

fn validate_height(height: String) -> Result<(), String> {
	match height.parse::<u32>() {
		Ok(height) => WorldProperties::new(height).map(|_| ()).map_err(|e| e.to_string()),
		Err(parse) => Err(parse.to_string())
	}
}

fn main() {
	env_logger::init();

	let matches = App::new("mcatool")
		.version("0.1.0")
		.author("coderbot16 <coderbot16@gmail.com>")
		.about("Inspects and edits Anvil save folders, region files, and NBT documents")
		.setting(AppSettings::SubcommandRequiredElseHelp)
		.subcommand(SubCommand::with_name("dump")
			.about("Prints an NBT document as a tree")
			.arg(Arg::with_name("FILE")
				.help("The document to read")
				.required(true)
			)
			.arg(Arg::with_name("gzip")
				.short("z")
				.long("gzip")
				.help("Reads the document as GZIP compressed, like level.dat")
			)
			.arg(Arg::with_name("hex")
				.short("x")
				.long("hex")
				.help("Also prints the raw encoded bytes in hexadecimal")
			)
		)
		.subcommand(SubCommand::with_name("region")
			.about("Lists the occupied slots of a region file")
			.arg(Arg::with_name("FILE")
				.help("The region file to read")
				.required(true)
			)
		)
		.subcommand(SubCommand::with_name("fullbright")
			.about("Sets all sky light in a save folder to the maximum and writes it back")
			.arg(Arg::with_name("LEVEL")
				.help("The save folder")
				.required(true)
			)
			.arg(Arg::with_name("height")
				.long("height")
				.value_name("BLOCKS")
				.help("Sets the world height in blocks")
				.default_value("256")
				.validator(validate_height)
			)
		)
		.get_matches();

	let result = match matches.subcommand() {
		("dump", Some(matches)) => dump(matches),
		("region", Some(matches)) => list_region(matches),
		("fullbright", Some(matches)) => fullbright(matches),
		_ => Ok(())
	};

	if let Err(e) = result {
		eprintln!("error: {}", e);
		process::exit(1);
	}
}

fn dump(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
	let path = matches.value_of("FILE").unwrap_or_default();
	let framing = if matches.is_present("gzip") { Framing::Gzip } else { Framing::Plain };

	let document = nbt::read_from(BufReader::new(File::open(path)?), framing)?;

	println!("{}", document);

	if matches.is_present("hex") {
		let bytes = nbt::encode(&document)?;

		for line in bytes.chunks(16) {
			let hex: Vec<String> = line.iter().map(|byte| format!("{:02x}", byte)).collect();
			println!("{}", hex.join(" "));
		}
	}

	Ok(())
}

fn list_region(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
	let path = matches.value_of("FILE").unwrap_or_default();
	let reader = RegionReader::new(BufReader::new(File::open(path)?))?;

	let timestamps: Vec<_> = reader.locations()
		.into_iter()
		.map(|(x, z, location)| (x, z, location, reader.header().timestamp(x, z)))
		.collect();

	println!("{} occupied slots", timestamps.len());

	for (chunk, (x, z, location, timestamp)) in reader.chunks().zip(timestamps) {
		let chunk = chunk?;

		println!("[{:2}, {:2}] {} saved at {}, {} compressed bytes ({:?})",
			x,
			z,
			location,
			timestamp.into_unix_seconds(),
			chunk.payload.data.len(),
			chunk.payload.compression
		);
	}

	Ok(())
}

fn fullbright(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
	let root = matches.value_of("LEVEL").unwrap_or_default();
	let height = matches.value_of("height").unwrap_or("256").parse::<u32>()?;

	let folder = LevelFolder::new(root);
	let level = folder.load(WorldProperties::new(height)?)?;

	for (id, world) in level.dimensions() {
		println!("dimension {}: {} chunks", id, world.len());
		world.fullbright();
	}

	folder.save(&level, SaveOptions { delete_old: false })?;

	Ok(())
}
