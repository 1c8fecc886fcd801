//! Project configuration
//!
//! A project file names the ROM, its load address and everything else the
//! command line accepts, so a disassembly can be rerun with one argument:
//!
//! ```toml
//! rom = "game.rom"
//! start = "4000"
//! exec = "0x4010"
//! definitions = ["msxbios.def", "game.def"]
//! entry_points = ["4123h", "5000"]
//! outputs = ["game.asm", "game.lst"]
//! trampoline = true
//! ```
//!
//! Relative paths are taken from the directory holding the project file.

use crate::error::{parse_hex_addr, DasmError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Cartridge load address when none is given
pub const DEFAULT_START: u16 = 0x4000;

/// Output written when none is given
pub const DEFAULT_OUTPUT: &str = "msxdasm.asm";

/// Settings as written in a project file or on the command line.
/// Addresses are still unparsed hex strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub rom: Option<PathBuf>,
    pub start: Option<String>,
    pub exec: Option<String>,
    pub definitions: Vec<PathBuf>,
    pub entry_points: Vec<String>,
    pub outputs: Vec<PathBuf>,
    pub trampoline: Option<bool>,
}

impl ProjectConfig {
    /// Read a TOML project file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| DasmError::io(path, e))?;
        let mut config = Self::from_toml(&text, path)?;
        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        debug!("Loaded project {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Parse project file text. `path` is only used in error messages.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| DasmError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Make relative paths relative to `base`
    fn rebase(&mut self, base: &Path) {
        let rebase = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };

        if let Some(rom) = self.rom.as_mut() {
            rebase(rom);
        }
        self.definitions.iter_mut().for_each(rebase);
        self.outputs.iter_mut().for_each(rebase);
    }

    /// Layer `overrides` on top: scalars replace, lists are appended
    pub fn merge(mut self, overrides: ProjectConfig) -> ProjectConfig {
        if overrides.rom.is_some() {
            self.rom = overrides.rom;
        }
        if overrides.start.is_some() {
            self.start = overrides.start;
        }
        if overrides.exec.is_some() {
            self.exec = overrides.exec;
        }
        if overrides.trampoline.is_some() {
            self.trampoline = overrides.trampoline;
        }
        self.definitions.extend(overrides.definitions);
        self.entry_points.extend(overrides.entry_points);
        self.outputs.extend(overrides.outputs);
        self
    }

    /// Parse addresses and fill in defaults
    pub fn resolve(self) -> Result<DasmConfig> {
        let rom = self.rom.ok_or(DasmError::MissingRom)?;

        let start = match self.start {
            Some(text) => parse_hex_addr(&text)?,
            None => DEFAULT_START,
        };
        let exec = self.exec.as_deref().map(parse_hex_addr).transpose()?;
        let entry_points = self
            .entry_points
            .iter()
            .map(|text| parse_hex_addr(text))
            .collect::<Result<Vec<_>>>()?;

        let outputs = if self.outputs.is_empty() {
            vec![PathBuf::from(DEFAULT_OUTPUT)]
        } else {
            self.outputs
        };

        Ok(DasmConfig {
            rom,
            start,
            exec,
            definitions: self.definitions,
            entry_points,
            outputs,
            trampoline: self.trampoline.unwrap_or(true),
        })
    }
}

/// Fully resolved settings for one disassembly run
#[derive(Debug, Clone, PartialEq)]
pub struct DasmConfig {
    pub rom: PathBuf,
    pub start: u16,
    pub exec: Option<u16>,
    pub definitions: Vec<PathBuf>,
    pub entry_points: Vec<u16>,
    pub outputs: Vec<PathBuf>,
    pub trampoline: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn project() -> &'static Path {
        Path::new("game.toml")
    }

    #[test]
    fn test_defaults() {
        let config = ProjectConfig {
            rom: Some(PathBuf::from("game.rom")),
            ..Default::default()
        }
        .resolve()
        .unwrap();

        assert_eq!(config.start, 0x4000);
        assert_eq!(config.exec, None);
        assert!(config.entry_points.is_empty());
        assert_eq!(config.outputs, vec![PathBuf::from("msxdasm.asm")]);
        assert!(config.trampoline);
    }

    #[test]
    fn test_missing_rom() {
        let err = ProjectConfig::default().resolve().unwrap_err();
        assert!(matches!(err, DasmError::MissingRom));
    }

    #[test]
    fn test_parse_toml() {
        let text = r#"
            rom = "game.rom"
            start = "8000"
            exec = "0x8010"
            definitions = ["msxbios.def"]
            entry_points = ["8123h", "9000"]
            outputs = ["game.lst"]
            trampoline = false
        "#;
        let config = ProjectConfig::from_toml(text, project())
            .unwrap()
            .resolve()
            .unwrap();

        assert_eq!(config.rom, PathBuf::from("game.rom"));
        assert_eq!(config.start, 0x8000);
        assert_eq!(config.exec, Some(0x8010));
        assert_eq!(config.definitions, vec![PathBuf::from("msxbios.def")]);
        assert_eq!(config.entry_points, vec![0x8123, 0x9000]);
        assert_eq!(config.outputs, vec![PathBuf::from("game.lst")]);
        assert!(!config.trampoline);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = ProjectConfig::from_toml("rom = \"a.rom\"\nstrat = \"4000\"\n", project())
            .unwrap_err();
        assert!(matches!(err, DasmError::Config { .. }));
    }

    #[test]
    fn test_bad_address() {
        let config = ProjectConfig::from_toml("rom = \"a.rom\"\nexec = \"40g0\"\n", project()).unwrap();
        assert!(matches!(
            config.resolve(),
            Err(DasmError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_merge_overrides_scalars_and_extends_lists() {
        let file = ProjectConfig {
            rom: Some(PathBuf::from("a.rom")),
            start: Some("4000".to_string()),
            definitions: vec![PathBuf::from("bios.def")],
            entry_points: vec!["4100".to_string()],
            trampoline: Some(true),
            ..Default::default()
        };
        let cli = ProjectConfig {
            start: Some("8000".to_string()),
            definitions: vec![PathBuf::from("game.def")],
            entry_points: vec!["8100".to_string()],
            trampoline: Some(false),
            ..Default::default()
        };

        let config = file.merge(cli).resolve().unwrap();
        assert_eq!(config.rom, PathBuf::from("a.rom"));
        assert_eq!(config.start, 0x8000);
        assert_eq!(
            config.definitions,
            vec![PathBuf::from("bios.def"), PathBuf::from("game.def")]
        );
        assert_eq!(config.entry_points, vec![0x4100, 0x8100]);
        assert!(!config.trampoline);
    }

    #[test]
    fn test_load_rebases_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "rom = \"game.rom\"").unwrap();
        writeln!(file, "definitions = [\"/usr/share/msx/bios.def\", \"game.def\"]").unwrap();
        writeln!(file, "outputs = [\"out/game.asm\"]").unwrap();

        let config = ProjectConfig::load(&path).unwrap();
        assert_eq!(config.rom, Some(dir.path().join("game.rom")));
        assert_eq!(
            config.definitions,
            vec![
                PathBuf::from("/usr/share/msx/bios.def"),
                dir.path().join("game.def")
            ]
        );
        assert_eq!(config.outputs, vec![dir.path().join("out/game.asm")]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ProjectConfig::load(Path::new("/nonexistent/project.toml")).unwrap_err();
        assert!(matches!(err, DasmError::Io { .. }));
    }
}
