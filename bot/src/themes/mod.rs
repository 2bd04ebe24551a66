//! Themes
//!
//! Registry of place file templates and per-request identifier randomization.

pub mod randomizer;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, instrument};

pub use randomizer::{
    is_place_file, randomize_place, randomize_referents, randomize_script_guids,
    PLACE_FILE_EXTENSION,
};

/// Code of the stock theme.
pub const NORMAL_THEME_CODE: &str = "nl";

/// A named place file template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Short unique code used as the command value (e.g. `"nl"`).
    pub code: String,
    /// Display name shown to users.
    pub name: String,
    /// Template file location.
    pub path: PathBuf,
}

/// A place file ready to be sent to a user.
#[derive(Debug, Clone)]
pub struct PlaceFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Theme errors.
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Failed to read theme template {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Ordered set of themes keyed by code.
#[derive(Debug, Clone, Default)]
pub struct ThemeRegistry {
    themes: Vec<Theme>,
}

impl ThemeRegistry {
    /// Registry with the stock themes, paths resolved against `base_dir`.
    pub fn builtin(base_dir: &Path) -> Self {
        Self::default().with_theme(
            NORMAL_THEME_CODE,
            "Normal Theme",
            base_dir.join("Files").join("Normal_Theme.rbxlx"),
        )
    }

    /// Add a theme, replacing any existing theme with the same code.
    #[must_use]
    pub fn with_theme(
        mut self,
        code: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        let theme = Theme {
            code: code.into(),
            name: name.into(),
            path: path.into(),
        };
        match self.themes.iter_mut().find(|t| t.code == theme.code) {
            Some(existing) => *existing = theme,
            None => self.themes.push(theme),
        }
        self
    }

    pub fn get(&self, code: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter()
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// `(display name, code)` pairs in registration order.
    pub fn choices(&self) -> Vec<(String, String)> {
        self.themes
            .iter()
            .map(|t| (t.name.clone(), t.code.clone()))
            .collect()
    }

    /// Themes whose name or code contains `partial` (case-insensitive).
    pub fn search(&self, partial: &str) -> Vec<&Theme> {
        let needle = partial.trim().to_lowercase();
        self.themes
            .iter()
            .filter(|t| {
                needle.is_empty()
                    || t.name.to_lowercase().contains(&needle)
                    || t.code.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Load a theme's template and randomize its identifiers.
    ///
    /// Returns `Ok(None)` for an unknown code. Templates that are not
    /// `.rbxlx` files are returned unchanged.
    #[instrument(skip(self))]
    pub fn load(&self, code: &str) -> Result<Option<PlaceFile>, ThemeError> {
        let Some(theme) = self.get(code) else {
            debug!(code, "Unknown theme requested");
            return Ok(None);
        };

        let data = std::fs::read(&theme.path).map_err(|source| ThemeError::Io {
            path: theme.path.clone(),
            source,
        })?;

        let bytes = if is_place_file(&theme.path) {
            randomize_place(&data)
        } else {
            data
        };

        let file_name = theme.path.file_name().map_or_else(
            || format!("{}{PLACE_FILE_EXTENSION}", theme.code),
            |name| name.to_string_lossy().into_owned(),
        );

        debug!(code, file_name = %file_name, size = bytes.len(), "Theme loaded");
        Ok(Some(PlaceFile { file_name, bytes }))
    }
}
