use nbt::{Compound, NamedTag, Tag};
use std::collections::BTreeMap;

/// Names of commonly used game rules.
pub mod rules {
	pub const COMMAND_BLOCK_OUTPUT: &str = "commandBlockOutput";
	pub const DO_DAYLIGHT_CYCLE: &str = "doDaylightCycle";
	pub const DO_FIRE_TICK: &str = "doFireTick";
	pub const DO_MOB_LOOT: &str = "doMobLoot";
	pub const DO_MOB_SPAWNING: &str = "doMobSpawning";
	pub const DO_TILE_DROPS: &str = "doTileDrops";
	pub const KEEP_INVENTORY: &str = "keepInventory";
	pub const MOB_GRIEFING: &str = "mobGriefing";
	pub const NATURAL_REGENERATION: &str = "naturalRegeneration";
}

/// Storage version written to `level.dat`, identifying the Anvil format.
pub const ANVIL_VERSION: i32 = 19133;

/// The contents of `level.dat`.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelInfo {
	pub initialized: bool,
	pub name: String,
	pub generator_name: String,
	pub generator_version: i32,
	/// Generator options, only used by the superflat generator.
	pub generator_options: String,
	pub seed: i64,
	/// Whether structures such as villages are generated.
	pub map_features: bool,
	/// Unix time in milliseconds of the last time the level was loaded.
	pub last_played: i64,
	/// Estimated size of the level in bytes. Unused by the game.
	pub size_on_disk: i64,
	pub allow_commands: bool,
	pub hardcore: bool,
	pub game_type: i32,
	/// Total ticks the level has been running.
	pub time: i64,
	pub day_time: i64,
	pub spawn: (i32, i32, i32),
	pub raining: bool,
	/// Ticks until `raining` toggles.
	pub rain_time: i32,
	pub thundering: bool,
	/// Ticks until `thundering` toggles.
	pub thunder_time: i32,
	pub game_rules: BTreeMap<String, String>
}

impl LevelInfo {
	pub fn set_rule<N, V>(&mut self, name: N, value: V) where N: Into<String>, V: ToString {
		self.game_rules.insert(name.into(), value.to_string());
	}

	pub fn rule(&self, name: &str) -> Option<&str> {
		self.game_rules.get(name).map(String::as_str)
	}

	/// Builds the `level.dat` document: the fields live in a `Data` compound under an unnamed root.
	pub fn to_document(&self) -> NamedTag {
		let mut rules = Compound::new();

		for (name, value) in &self.game_rules {
			rules.insert(name.as_str(), value.as_str());
		}

		let data = Compound::new()
			.with("version", ANVIL_VERSION)
			.with("initialized", self.initialized)
			.with("LevelName", self.name.as_str())
			.with("generatorName", self.generator_name.as_str())
			.with("generatorVersion", self.generator_version)
			.with("generatorOptions", self.generator_options.as_str())
			.with("RandomSeed", self.seed)
			.with("MapFeatures", self.map_features)
			.with("LastPlayed", self.last_played)
			.with("SizeOnDisk", self.size_on_disk)
			.with("allowCommands", self.allow_commands)
			.with("hardcore", self.hardcore)
			.with("GameType", self.game_type)
			.with("Time", self.time)
			.with("DayTime", self.day_time)
			.with("SpawnX", self.spawn.0)
			.with("SpawnY", self.spawn.1)
			.with("SpawnZ", self.spawn.2)
			.with("raining", self.raining)
			.with("rainTime", self.rain_time)
			.with("thundering", self.thundering)
			.with("thunderTime", self.thunder_time)
			.with("GameRules", rules);

		NamedTag::new("", Compound::new().with("Data", data))
	}

	/// Restores the fields present in a `level.dat` document, leaving the others untouched.
	/// Game rules are merged by name.
	pub fn apply(&mut self, document: &NamedTag) -> nbt::Result<()> {
		let data = document.compound()?.compound("Data")?;

		restore(data, "initialized", &mut self.initialized, Tag::as_bool)?;
		restore(data, "LevelName", &mut self.name, owned_string)?;
		restore(data, "generatorName", &mut self.generator_name, owned_string)?;
		restore(data, "generatorVersion", &mut self.generator_version, Tag::as_i32)?;
		restore(data, "generatorOptions", &mut self.generator_options, owned_string)?;
		restore(data, "RandomSeed", &mut self.seed, Tag::as_i64_exact)?;
		restore(data, "MapFeatures", &mut self.map_features, Tag::as_bool)?;
		restore(data, "LastPlayed", &mut self.last_played, Tag::as_i64_exact)?;
		restore(data, "SizeOnDisk", &mut self.size_on_disk, Tag::as_i64_exact)?;
		restore(data, "allowCommands", &mut self.allow_commands, Tag::as_bool)?;
		restore(data, "hardcore", &mut self.hardcore, Tag::as_bool)?;
		restore(data, "GameType", &mut self.game_type, Tag::as_i32)?;
		restore(data, "Time", &mut self.time, Tag::as_i64_exact)?;
		restore(data, "DayTime", &mut self.day_time, Tag::as_i64_exact)?;
		restore(data, "SpawnX", &mut self.spawn.0, Tag::as_i32)?;
		restore(data, "SpawnY", &mut self.spawn.1, Tag::as_i32)?;
		restore(data, "SpawnZ", &mut self.spawn.2, Tag::as_i32)?;
		restore(data, "raining", &mut self.raining, Tag::as_bool)?;
		restore(data, "rainTime", &mut self.rain_time, Tag::as_i32)?;
		restore(data, "thundering", &mut self.thundering, Tag::as_bool)?;
		restore(data, "thunderTime", &mut self.thunder_time, Tag::as_i32)?;

		if let Some(rules) = data.get("GameRules") {
			for (name, value) in rules.as_compound()? {
				self.game_rules.insert(name.clone(), value.as_str()?.to_owned());
			}
		}

		Ok(())
	}

	/// Reads a `level.dat` document on top of the defaults.
	pub fn from_document(document: &NamedTag) -> nbt::Result<Self> {
		let mut info = LevelInfo::default();
		info.apply(document)?;

		Ok(info)
	}
}

fn restore<T, F>(data: &Compound, name: &str, target: &mut T, read: F) -> nbt::Result<()> where F: FnOnce(&Tag) -> nbt::Result<T> {
	if let Some(tag) = data.get(name) {
		*target = read(tag)?;
	}

	Ok(())
}

fn owned_string(tag: &Tag) -> nbt::Result<String> {
	tag.as_str().map(str::to_owned)
}

impl Default for LevelInfo {
	fn default() -> Self {
		LevelInfo {
			initialized: true,
			name: "Columbus".to_owned(),
			generator_name: "flat".to_owned(),
			generator_version: 0,
			generator_options: "0".to_owned(),
			seed: 0,
			map_features: false,
			last_played: 0,
			size_on_disk: 0,
			allow_commands: false,
			hardcore: false,
			game_type: 1,
			time: 6000,
			day_time: 6000,
			spawn: (0, 0, 0),
			raining: false,
			rain_time: i32::max_value(),
			thundering: false,
			thunder_time: i32::max_value(),
			game_rules: BTreeMap::new()
		}
	}
}
