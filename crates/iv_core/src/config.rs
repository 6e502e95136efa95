//! Session configuration.
//!
//! The settings special directives read and write: debug flags, number format,
//! index origin, prompt and random seed. Setters validate before mutating, so a
//! rejected request leaves the configuration as it was.

use std::path::Path;

use indexmap::IndexMap;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

/// Debug flags known to the interpreter, in listing order.
pub const DEBUG_FLAGS: &[&str] = &["panic", "parse", "tokens", "types"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("illegal origin {0}")]
    IllegalOrigin(i64),
    #[error("no such debug flag: {0}")]
    UnknownDebugFlag(String),
    #[error("reading {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug)]
pub struct Config {
    debug: IndexMap<&'static str, bool>,
    format: String,
    origin: i64,
    prompt: String,
    seed: i64,
    rng: StdRng,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: DEBUG_FLAGS.iter().map(|&name| (name, false)).collect(),
            format: String::new(),
            origin: 1,
            prompt: String::new(),
            seed: 0,
            rng: StdRng::seed_from_u64(0),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all registered debug flags.
    pub fn debug_flags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.debug.keys().copied()
    }

    pub fn is_debug_flag(&self, name: &str) -> bool {
        self.debug.contains_key(name)
    }

    /// Current value of a flag; unknown names read as `false`.
    pub fn debug(&self, name: &str) -> bool {
        self.debug.get(name).copied().unwrap_or(false)
    }

    pub fn set_debug(&mut self, name: &str, on: bool) -> Result<(), ConfigError> {
        match self.debug.get_mut(name) {
            Some(flag) => {
                *flag = on;
                tracing::debug!(flag = name, on, "debug flag set");
                Ok(())
            }
            None => Err(ConfigError::UnknownDebugFlag(name.to_string())),
        }
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn set_format(&mut self, format: impl Into<String>) {
        self.format = format.into();
    }

    pub fn origin(&self) -> i64 {
        self.origin
    }

    /// Only 0 and 1 are accepted.
    pub fn set_origin(&mut self, origin: i64) -> Result<(), ConfigError> {
        if origin != 0 && origin != 1 {
            return Err(ConfigError::IllegalOrigin(origin));
        }
        self.origin = origin;
        Ok(())
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Record `seed` and restart the generator from it.
    pub fn random_seed(&mut self, seed: i64) {
        self.seed = seed;
        self.rng = StdRng::seed_from_u64(seed as u64);
        tracing::debug!(seed, "random generator reseeded");
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Apply every setting present in `file`. All values are checked first; on
    /// error nothing is changed.
    pub fn apply(&mut self, file: &ConfigFile) -> Result<(), ConfigError> {
        if let Some(origin) = file.origin {
            if origin != 0 && origin != 1 {
                return Err(ConfigError::IllegalOrigin(origin));
            }
        }
        if let Some(bad) = file.debug.iter().find(|name| !self.is_debug_flag(name)) {
            return Err(ConfigError::UnknownDebugFlag(bad.clone()));
        }

        if let Some(format) = &file.format {
            self.set_format(format.clone());
        }
        if let Some(origin) = file.origin {
            self.set_origin(origin)?;
        }
        if let Some(prompt) = &file.prompt {
            self.set_prompt(prompt.clone());
        }
        if let Some(seed) = file.seed {
            self.random_seed(seed);
        }
        for name in &file.debug {
            self.set_debug(name, true)?;
        }
        Ok(())
    }
}

/// Startup settings read from a TOML file.
///
/// ```toml
/// format = "%.4f"
/// origin = 0
/// prompt = "> "
/// seed = 7
/// debug = ["types"]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub format: Option<String>,
    pub origin: Option<i64>,
    pub prompt: Option<String>,
    pub seed: Option<i64>,
    pub debug: Vec<String>,
}

impl ConfigFile {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn defaults() {
        let c = Config::new();
        assert_eq!(c.origin(), 1);
        assert_eq!(c.format(), "");
        assert_eq!(c.prompt(), "");
        assert_eq!(c.debug_flags().collect::<Vec<_>>(), DEBUG_FLAGS);
        assert!(DEBUG_FLAGS.iter().all(|f| !c.debug(f)));
    }

    #[test]
    fn illegal_origin_leaves_value() {
        let mut c = Config::new();
        c.set_origin(0).unwrap();
        assert!(matches!(c.set_origin(2), Err(ConfigError::IllegalOrigin(2))));
        assert!(matches!(c.set_origin(-1), Err(ConfigError::IllegalOrigin(-1))));
        assert_eq!(c.origin(), 0);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let mut c = Config::new();
        let err = c.set_debug("nosuchflag", true).unwrap_err();
        assert_eq!(err.to_string(), "no such debug flag: nosuchflag");
        assert!(!c.debug("nosuchflag"));
    }

    #[test]
    fn reseeding_repeats_the_sequence() {
        let mut c = Config::new();
        c.random_seed(42);
        let a: Vec<u32> = (0..4).map(|_| c.rng().gen_range(0..1000)).collect();
        c.random_seed(42);
        let b: Vec<u32> = (0..4).map(|_| c.rng().gen_range(0..1000)).collect();
        assert_eq!(a, b);
        assert_eq!(c.seed(), 42);
    }

    #[test]
    fn apply_file_settings() {
        let file = ConfigFile::from_toml_str(
            "format = \"%.2f\"\norigin = 0\nprompt = \"> \"\nseed = 9\ndebug = [\"types\"]\n",
        )
        .unwrap();
        let mut c = Config::new();
        c.apply(&file).unwrap();
        assert_eq!(c.format(), "%.2f");
        assert_eq!(c.origin(), 0);
        assert_eq!(c.prompt(), "> ");
        assert_eq!(c.seed(), 9);
        assert!(c.debug("types"));
    }

    #[test]
    fn apply_is_all_or_nothing() {
        let file = ConfigFile::from_toml_str("format = \"%x\"\norigin = 5\n").unwrap();
        let mut c = Config::new();
        assert!(matches!(c.apply(&file), Err(ConfigError::IllegalOrigin(5))));
        assert_eq!(c.format(), "");

        let file = ConfigFile::from_toml_str("prompt = \"$ \"\ndebug = [\"bogus\"]\n").unwrap();
        assert!(matches!(c.apply(&file), Err(ConfigError::UnknownDebugFlag(_))));
        assert_eq!(c.prompt(), "");
    }

    #[test]
    fn unknown_keys_fail_to_parse() {
        assert!(matches!(
            ConfigFile::from_toml_str("colour = true\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iv.toml");
        std::fs::write(&path, "origin = 0\n").unwrap();
        let file = ConfigFile::load(&path).unwrap();
        assert_eq!(file.origin, Some(0));
        assert!(matches!(
            ConfigFile::load(dir.path().join("missing.toml")),
            Err(ConfigError::Read { .. })
        ));
    }
}
