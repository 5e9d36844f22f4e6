use std::io::Read;

use anyhow::{Result, bail};
use slide_engine::SpawnPool;

/// Largest accepted width or height.
pub const MAX_DIMENSION: usize = 64;

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Config {
    // Dimensions left out here and on the command line are asked for on stdin.
    #[serde(default)]
    pub width: Option<usize>,
    #[serde(default)]
    pub height: Option<usize>,

    /// RNG seed for reproducible sessions. Drawn from OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub spawn: Spawn,
    #[serde(default)]
    pub keys: KeyBindings,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Spawn {
    /// Candidate values for new tiles; repeat a value to make it more likely.
    #[serde(default = "defaults::pool")]
    pub pool: Vec<u64>,
    /// Spawn after every move command, even one that left the grid unchanged.
    #[serde(default = "defaults::on_noop")]
    pub on_noop: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct KeyBindings {
    #[serde(default = "defaults::left")]
    pub left: char,
    #[serde(default = "defaults::right")]
    pub right: char,
    #[serde(default = "defaults::up")]
    pub up: char,
    #[serde(default = "defaults::down")]
    pub down: char,
    #[serde(default = "defaults::quit")]
    pub quit: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            seed: None,
            spawn: Spawn::default(),
            keys: KeyBindings::default(),
        }
    }
}

impl Default for Spawn {
    fn default() -> Self {
        Self {
            pool: defaults::pool(),
            on_noop: defaults::on_noop(),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: defaults::left(),
            right: defaults::right(),
            up: defaults::up(),
            down: defaults::down(),
            quit: defaults::quit(),
        }
    }
}

impl Spawn {
    /// Validated spawn pool.
    pub fn spawn_pool(&self) -> Result<SpawnPool> {
        match SpawnPool::new(self.pool.clone()) {
            Some(pool) => Ok(pool),
            None => bail!(
                "spawn pool must be non-empty powers of two, got {:?}",
                self.pool
            ),
        }
    }
}

impl KeyBindings {
    fn all(&self) -> [char; 5] {
        [self.left, self.right, self.up, self.down, self.quit]
    }
}

impl Config {
    pub fn from_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = std::fs::File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let cfg: Self = toml::from_str(&contents)?;
        Ok(cfg)
    }

    /// Command-line values win over the file.
    pub fn with_overrides(
        mut self,
        width: Option<usize>,
        height: Option<usize>,
        seed: Option<u64>,
    ) -> Self {
        self.width = width.or(self.width);
        self.height = height.or(self.height);
        self.seed = seed.or(self.seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == Some(0) || self.height == Some(0) {
            bail!("grid dimensions must be at least 1");
        }
        for (name, dim) in [("width", self.width), ("height", self.height)] {
            if let Some(n) = dim.filter(|&n| n > MAX_DIMENSION) {
                bail!("{name} {n} exceeds the maximum of {}", MAX_DIMENSION);
            }
        }
        self.spawn.spawn_pool()?;
        let keys = self.keys.all().map(|c| c.to_ascii_lowercase());
        for (i, k) in keys.iter().enumerate() {
            if keys[i + 1..].contains(k) {
                bail!("key '{k}' is bound to more than one command");
            }
        }
        Ok(())
    }
}

mod defaults {
    pub fn pool() -> Vec<u64> { vec![2, 4] }
    pub fn on_noop() -> bool { true }
    pub fn left() -> char { 'a' }
    pub fn right() -> char { 'd' }
    pub fn up() -> char { 'w' }
    pub fn down() -> char { 's' }
    pub fn quit() -> char { 'q' }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_file_gives_defaults() {
        let td = tempdir().unwrap();
        let path = td.path().join("game.toml");
        std::fs::write(&path, "").unwrap();
        let cfg = Config::from_toml(&path).expect("load config");
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.spawn.pool, vec![2, 4]);
        assert!(cfg.spawn.on_noop);
        assert_eq!(cfg.keys.quit, 'q');
    }

    #[test]
    fn nested_sections_parse() {
        let td = tempdir().unwrap();
        let path = td.path().join("game.toml");
        std::fs::write(
            &path,
            r#"
            width = 5
            seed = 99

            [spawn]
            pool = [2, 2, 2, 4]
            on_noop = false

            [keys]
            left = "h"
            right = "l"
            "#,
        )
        .unwrap();
        let cfg = Config::from_toml(&path).expect("load config");
        assert_eq!(cfg.width, Some(5));
        assert_eq!(cfg.height, None);
        assert_eq!(cfg.seed, Some(99));
        assert_eq!(cfg.spawn.pool, vec![2, 2, 2, 4]);
        assert!(!cfg.spawn.on_noop);
        assert_eq!(cfg.keys.left, 'h');
        assert_eq!(cfg.keys.right, 'l');
        assert_eq!(cfg.keys.up, 'w');
        cfg.validate().unwrap();
    }

    #[test]
    fn missing_file_is_an_error() {
        let td = tempdir().unwrap();
        assert!(Config::from_toml(td.path().join("nope.toml")).is_err());
    }

    #[test]
    fn overrides_win() {
        let cfg = Config {
            width: Some(4),
            height: Some(4),
            ..Config::default()
        }
        .with_overrides(Some(6), None, Some(1));
        assert_eq!(cfg.width, Some(6));
        assert_eq!(cfg.height, Some(4));
        assert_eq!(cfg.seed, Some(1));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let zero = Config {
            height: Some(0),
            ..Config::default()
        };
        assert!(zero.validate().is_err());

        let huge = Config::default().with_overrides(Some(usize::MAX), Some(2), Some(1));
        assert!(huge.validate().is_err());
        let tall = Config::default().with_overrides(Some(4), Some(MAX_DIMENSION + 1), None);
        assert!(tall.validate().is_err());
        let edge = Config::default().with_overrides(Some(MAX_DIMENSION), Some(MAX_DIMENSION), None);
        assert!(edge.validate().is_ok());

        let mut bad_pool = Config::default();
        bad_pool.spawn.pool = vec![3];
        assert!(bad_pool.validate().is_err());

        let mut clash = Config::default();
        clash.keys.up = 'A';
        assert!(clash.validate().is_err());

        assert!(Config::default().validate().is_ok());
    }
}
