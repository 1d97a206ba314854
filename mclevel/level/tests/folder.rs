use assert_matches::assert_matches;
use level::folder::{END, NETHER, OVERWORLD};
use level::{Error, Level, LevelFolder, LevelInfo, SaveOptions, World, WorldProperties};
use std::fs;
use vocs::nibbles::u4;
use vocs::position::{ColumnPosition, RegionPosition};

fn sample_level() -> Level {
	let mut info = LevelInfo::default();
	info.name = "Sample".to_owned();
	info.seed = 1234;

	let overworld = World::default();
	overworld.set_block(0, 64, 0, 1, u4::new(0));
	overworld.set_block(-600, 10, 900, 4, u4::new(0));

	let nether = World::default();
	nether.set_block(16, 30, -16, 87, u4::new(0));

	let mut level = Level::with_overworld(info, overworld);
	level.set_dimension(NETHER, nether);
	level.set_dimension(END, World::default());

	level
}

#[test]
fn save_and_load() {
	let dir = tempfile::tempdir().unwrap();
	let folder = LevelFolder::new(dir.path().join("world"));

	folder.save(&sample_level(), SaveOptions::default()).unwrap();

	assert!(folder.level_dat().is_file());
	assert!(folder.region_file(OVERWORLD, RegionPosition::new(0, 0)).is_file());
	assert!(folder.region_file(OVERWORLD, RegionPosition::new(-2, 1)).is_file());
	assert!(folder.region_file(NETHER, RegionPosition::new(0, -1)).is_file());
	assert!(!folder.dimension_dir(END).exists());

	let level = folder.load(WorldProperties::default()).unwrap();

	assert_eq!(level.info.name, "Sample");
	assert_eq!(level.info.seed, 1234);

	let overworld = level.dimension(OVERWORLD).unwrap();

	assert_eq!(overworld.len(), 2);
	assert_eq!(overworld.block_id(0, 64, 0), Some(1));
	assert_eq!(overworld.block_id(-600, 10, 900), Some(4));

	let nether = level.dimension(NETHER).unwrap();

	assert_eq!(nether.block_id(16, 30, -16), Some(87));
	assert!(level.dimension(END).is_none());
}

#[test]
fn delete_old() {
	let dir = tempfile::tempdir().unwrap();
	let folder = LevelFolder::new(dir.path());

	folder.save(&sample_level(), SaveOptions::default()).unwrap();

	let stale = folder.region_file(OVERWORLD, RegionPosition::new(-2, 1));

	let small = Level::with_overworld(LevelInfo::default(), World::default());
	small.dimension(OVERWORLD).unwrap().get_or_create(ColumnPosition::new(0, 0));

	folder.save(&small, SaveOptions { delete_old: false }).unwrap();
	assert!(stale.is_file());

	folder.save(&small, SaveOptions { delete_old: true }).unwrap();
	assert!(!stale.exists());
	assert!(!folder.dimension_dir(NETHER).exists());
}

#[test]
fn ignores_foreign_files() {
	let dir = tempfile::tempdir().unwrap();
	let folder = LevelFolder::new(dir.path());

	folder.save(&sample_level(), SaveOptions::default()).unwrap();

	fs::write(folder.dimension_dir(OVERWORLD).join("notes.txt"), b"not a region").unwrap();
	fs::write(folder.dimension_dir(OVERWORLD).join("r.0.0.mca.bak"), b"").unwrap();

	let level = folder.load(WorldProperties::default()).unwrap();

	assert_eq!(level.dimension(OVERWORLD).unwrap().len(), 2);
}

#[test]
fn missing_level_dat() {
	let dir = tempfile::tempdir().unwrap();
	let folder = LevelFolder::new(dir.path());

	let level = folder.load(WorldProperties::default()).unwrap();

	assert_eq!(level.info, LevelInfo::default());
	assert_eq!(level.dimensions().count(), 0);
}

#[test]
fn corrupt_region_reports_error() {
	let dir = tempfile::tempdir().unwrap();
	let folder = LevelFolder::new(dir.path());

	folder.save(&sample_level(), SaveOptions::default()).unwrap();

	// Point the first slot of an otherwise valid file into the header tables.
	let path = folder.region_file(OVERWORLD, RegionPosition::new(0, 0));
	let mut bytes = fs::read(&path).unwrap();
	bytes[0..4].copy_from_slice(&[0, 0, 1, 1]);
	fs::write(&path, &bytes).unwrap();

	let result = folder.load(WorldProperties::default()).map(|_| ());

	assert_matches!(result, Err(Error::Region(region::Error::InvalidLocation { x: 0, z: 0, .. })));
}

#[test]
fn truncated_region_reports_io() {
	let dir = tempfile::tempdir().unwrap();
	let folder = LevelFolder::new(dir.path());

	folder.save(&sample_level(), SaveOptions::default()).unwrap();
	fs::write(folder.region_file(NETHER, RegionPosition::new(0, -1)), vec![0u8; 100]).unwrap();

	assert_matches!(folder.load(WorldProperties::default()).map(|_| ()), Err(Error::Io(_)));
}

#[test]
fn invalid_height() {
	assert_matches!(WorldProperties::new(100), Err(Error::InvalidHeight(100)));
}

#[test]
fn failed_dimension_keeps_the_others() {
	let dir = tempfile::tempdir().unwrap();
	let folder = LevelFolder::new(dir.path());

	folder.save(&sample_level(), SaveOptions::default()).unwrap();
	fs::write(folder.region_file(NETHER, RegionPosition::new(0, -1)), vec![0u8; 100]).unwrap();

	let mut level = Level::new(LevelInfo::default());
	let result = folder.load_into(&mut level, WorldProperties::default());

	assert_matches!(result, Err(Error::Io(_)));
	assert_eq!(level.info.name, "Sample");

	let overworld = level.dimension(OVERWORLD).unwrap();

	assert_eq!(overworld.len(), 2);
	assert_eq!(overworld.block_id(0, 64, 0), Some(1));
	assert_eq!(overworld.block_id(-600, 10, 900), Some(4));

	assert!(level.dimension(NETHER).unwrap().is_empty());
}

#[test]
fn failed_region_keeps_its_siblings() {
	let dir = tempfile::tempdir().unwrap();
	let folder = LevelFolder::new(dir.path());

	let overworld = World::default();
	overworld.set_block(0, 64, 0, 1, u4::new(0));
	overworld.set_block(512, 64, 0, 2, u4::new(0));

	// A directory where the second region file should go cannot be opened for writing.
	let blocked = folder.region_file(OVERWORLD, RegionPosition::new(1, 0));
	fs::create_dir_all(&blocked).unwrap();

	let level = Level::with_overworld(LevelInfo::default(), overworld);
	let result = folder.save(&level, SaveOptions { delete_old: false });

	assert_matches!(result, Err(Error::Io(_)));
	assert!(blocked.is_dir());
	assert!(folder.region_file(OVERWORLD, RegionPosition::new(0, 0)).is_file());

	let read = folder.load(WorldProperties::default()).unwrap();
	let overworld = read.dimension(OVERWORLD).unwrap();

	assert_eq!(overworld.len(), 1);
	assert_eq!(overworld.block_id(0, 64, 0), Some(1));
	assert_eq!(overworld.block_id(512, 64, 0), None);
}
