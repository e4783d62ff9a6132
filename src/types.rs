//! Shared types used across whiteout.
//! Includes the `Tolerance` newtype, `ExtensionMatch` and the `ExtensionFilter`
//! used by directory discovery.
use std::ffi::OsStr;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How far below 255 a color channel may be and still count as white.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tolerance(pub u8);

impl Tolerance {
    pub const DEFAULT: Tolerance = Tolerance(30);

    /// Minimum channel value a background pixel must reach: 255 - tolerance.
    pub fn threshold(self) -> u8 {
        u8::MAX - self.0
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u8> for Tolerance {
    fn from(value: u8) -> Self {
        Tolerance(value)
    }
}

impl FromStr for Tolerance {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map(Tolerance)
            .map_err(|_| crate::Error::InvalidArgument {
                arg: "tolerance",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for Tolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionMatch {
    /// `png` matches `a.png` but not `a.PNG`
    #[default]
    Exact,
    /// `png` matches `a.png`, `a.PNG` and `a.Png`
    IgnoreCase,
}

impl std::fmt::Display for ExtensionMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtensionMatch::Exact => write!(f, "exact"),
            ExtensionMatch::IgnoreCase => write!(f, "ignore_case"),
        }
    }
}

/// File suffix filter applied during discovery.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ExtensionFilter {
    extension: String,
    mode: ExtensionMatch,
}

impl ExtensionFilter {
    /// Leading dots are stripped, so `".png"` and `"png"` are equivalent.
    pub fn new(extension: &str, mode: ExtensionMatch) -> crate::Result<Self> {
        let extension = extension.trim().trim_start_matches('.');
        if extension.is_empty() || extension.contains(['/', '\\']) {
            return Err(crate::Error::InvalidArgument {
                arg: "extension",
                value: extension.to_string(),
            });
        }
        Ok(Self {
            extension: extension.to_string(),
            mode,
        })
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn mode(&self) -> ExtensionMatch {
        self.mode
    }

    pub fn matches(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(OsStr::to_str) else {
            return false;
        };
        match self.mode {
            ExtensionMatch::Exact => ext == self.extension,
            ExtensionMatch::IgnoreCase => ext.eq_ignore_ascii_case(&self.extension),
        }
    }

    /// Upper-cased extension used in console labels, e.g. `PNG`.
    pub fn label(&self) -> String {
        self.extension.to_ascii_uppercase()
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self {
            extension: "png".to_string(),
            mode: ExtensionMatch::Exact,
        }
    }
}
