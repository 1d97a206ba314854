//! Save folders: `level.dat` at the root, and one directory of region files per dimension.

use crate::anvil::{read_region, write_region};
use crate::error::Result;
use crate::info::LevelInfo;
use crate::properties::{SaveOptions, WorldProperties};
use crate::world::World;
use nbt::Framing;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use vocs::position::RegionPosition;

pub const OVERWORLD: i32 = 0;
pub const NETHER: i32 = -1;
pub const END: i32 = 1;

/// Dimensions looked for when loading a folder.
pub const DIMENSIONS: [i32; 3] = [OVERWORLD, NETHER, END];

/// A whole save: the level metadata and the world of each dimension.
pub struct Level {
	pub info: LevelInfo,
	dimensions: BTreeMap<i32, World>
}

impl Level {
	pub fn new(info: LevelInfo) -> Self {
		Level { info, dimensions: BTreeMap::new() }
	}

	/// Creates a level holding only an overworld.
	pub fn with_overworld(info: LevelInfo, overworld: World) -> Self {
		let mut level = Level::new(info);
		level.set_dimension(OVERWORLD, overworld);

		level
	}

	pub fn dimension(&self, id: i32) -> Option<&World> {
		self.dimensions.get(&id)
	}

	/// Assigns the world of a dimension, returning the one it replaced.
	pub fn set_dimension(&mut self, id: i32, world: World) -> Option<World> {
		self.dimensions.insert(id, world)
	}

	pub fn dimensions(&self) -> impl Iterator<Item=(i32, &World)> {
		self.dimensions.iter().map(|(&id, world)| (id, world))
	}
}

/// Paths within a save folder.
#[derive(Debug, Clone)]
pub struct LevelFolder {
	root: PathBuf
}

impl LevelFolder {
	pub fn new<P: Into<PathBuf>>(root: P) -> Self {
		LevelFolder { root: root.into() }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn level_dat(&self) -> PathBuf {
		self.root.join("level.dat")
	}

	/// Directory holding the region files of a dimension: `region` for the overworld, `DIM<id>` otherwise.
	pub fn dimension_dir(&self, id: i32) -> PathBuf {
		if id == OVERWORLD {
			self.root.join("region")
		} else {
			self.root.join(format!("DIM{}", id))
		}
	}

	pub fn region_file(&self, id: i32, window: RegionPosition) -> PathBuf {
		self.dimension_dir(id).join(region_file_name(window))
	}

	/// Writes the level metadata and every non-empty dimension.
	///
	/// Dimensions, and the region files within each, are written in parallel. Every file is attempted
	/// even after a failure, and the first error is returned once all of them are done.
	pub fn save(&self, level: &Level, options: SaveOptions) -> Result<()> {
		if options.delete_old && self.root.exists() {
			info!("deleting old save at {}", self.root.display());
			fs::remove_dir_all(&self.root)?;
		}

		fs::create_dir_all(&self.root)?;

		let mut out = BufWriter::new(File::create(self.level_dat())?);
		nbt::write_to(&mut out, &level.info.to_document(), Framing::Gzip)?;
		out.flush()?;

		let results: Vec<Result<()>> = level.dimensions
			.par_iter()
			.filter(|(_, world)| !world.is_empty())
			.map(|(&id, world)| self.save_dimension(id, world))
			.collect();

		first_error(results)
	}

	fn save_dimension(&self, id: i32, world: &World) -> Result<()> {
		let dir = self.dimension_dir(id);
		fs::create_dir_all(&dir)?;

		let windows = world.region_windows();

		let results: Vec<Result<usize>> = windows
			.par_iter()
			.map(|&window| -> Result<usize> {
				let path = dir.join(region_file_name(window));
				let mut out = BufWriter::new(File::create(&path)?);

				let count = write_region(world, window, &mut out).map_err(|e| {
					warn!("failed to write {}: {}", path.display(), e);
					e
				})?;

				out.flush()?;

				Ok(count)
			})
			.collect();

		let chunks: usize = results.iter().filter_map(|result| result.as_ref().ok()).sum();

		info!("saved dimension {}: {} chunks in {} region files", id, chunks, windows.len());

		first_error(results)
	}

	/// Reads a save folder, building each dimension found with the given properties.
	///
	/// A missing `level.dat` leaves the default metadata. Dimensions without a directory are left out.
	/// Files whose names are not region file names are ignored. Use `load_into` to keep whatever was
	/// read when some region file fails.
	pub fn load(&self, properties: WorldProperties) -> Result<Level> {
		let mut level = Level::new(LevelInfo::default());
		self.load_into(&mut level, properties)?;

		Ok(level)
	}

	/// Reads a save folder into an existing level.
	///
	/// Fields present in `level.dat` overwrite those of `level.info`, and every dimension with a
	/// directory replaces the world of that dimension. When a region file fails to read, the rest of
	/// its dimension and the other dimensions are still read and stored in `level`, and the first
	/// error is returned once all of them are done.
	pub fn load_into(&self, level: &mut Level, properties: WorldProperties) -> Result<()> {
		let level_dat = self.level_dat();

		if level_dat.is_file() {
			let document = nbt::read_from(BufReader::new(File::open(&level_dat)?), Framing::Gzip)?;
			level.info.apply(&document)?;
		} else {
			warn!("{} has no level.dat, using default level settings", self.root.display());
		}

		let loaded: Vec<(i32, Option<World>, Result<()>)> = DIMENSIONS
			.par_iter()
			.map(|&id| {
				let (world, result) = self.load_dimension(id, properties);
				(id, world, result)
			})
			.collect();

		let mut results = Vec::with_capacity(loaded.len());

		for (id, world, result) in loaded {
			if let Some(world) = world {
				level.set_dimension(id, world);
			}

			results.push(result);
		}

		first_error(results)
	}

	/// Reads one dimension. The world is returned whenever its directory could be listed, along with
	/// the first error of its region files.
	fn load_dimension(&self, id: i32, properties: WorldProperties) -> (Option<World>, Result<()>) {
		let dir = self.dimension_dir(id);

		if !dir.is_dir() {
			return (None, Ok(()));
		}

		let files = match region_files(&dir) {
			Ok(files) => files,
			Err(e) => return (None, Err(e))
		};

		let world = World::new(properties);

		let results: Vec<Result<usize>> = files
			.par_iter()
			.map(|(window, path)| -> Result<usize> {
				let input = BufReader::new(File::open(path)?);

				read_region(&world, *window, input).map_err(|e| {
					warn!("failed to read {}: {}", path.display(), e);
					e
				})
			})
			.collect();

		info!("loaded dimension {}: {} chunks from {} region files", id, world.len(), files.len());

		(Some(world), first_error(results))
	}
}

/// Lists the region files of a dimension directory.
fn region_files(dir: &Path) -> Result<Vec<(RegionPosition, PathBuf)>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let entry = entry?;

		if !entry.file_type()?.is_file() {
			continue;
		}

		let window = match entry.file_name().to_str().and_then(parse_region_file_name) {
			Some(window) => window,
			None => continue
		};

		files.push((window, entry.path()));
	}

	Ok(files)
}

fn first_error<T>(results: Vec<Result<T>>) -> Result<()> {
	for result in results {
		result?;
	}

	Ok(())
}

/// Name of the region file for a window, `r.<x>.<z>.mca`.
pub fn region_file_name(window: RegionPosition) -> String {
	format!("r.{}.{}.mca", window.x(), window.z())
}

/// Parses a region file name, accepting negative coordinates.
pub fn parse_region_file_name(name: &str) -> Option<RegionPosition> {
	let mut parts = name.split('.');

	if parts.next()? != "r" {
		return None;
	}

	let x = parts.next()?.parse::<i32>().ok()?;
	let z = parts.next()?.parse::<i32>().ok()?;

	if parts.next()? != "mca" || parts.next().is_some() {
		return None;
	}

	Some(RegionPosition::new(x, z))
}
