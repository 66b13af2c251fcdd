//! Ordered field alternatives for artifact records.
//!
//! Generators have used several names for the same logical field. Each
//! [`Field`] lists the accepted keys in priority order; the first key with a
//! non-empty string value wins and the rest are ignored.

use super::Artifact;

/// A logical artifact field and its accepted keys, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub keys: &'static [&'static str],
}

impl Field {
    pub const BOARD_ID: Field = Field {
        keys: &["board_id", "machine"],
    };
    pub const BOARD_REV: Field = Field {
        keys: &["board_rev", "version"],
    };
    pub const EDK_BASELINE: Field = Field {
        keys: &["edk2_baseline", "edk", "base"],
    };
    pub const FIRMWARE_TYPE: Field = Field {
        keys: &["firmware_type", "fw_type"],
    };
    pub const REFCODE: Field = Field {
        keys: &["refcode_base", "release_tag"],
    };
    pub const VERSION_FULL: Field = Field {
        keys: &["version_full", "fw_version_full"],
    };
    pub const BUILD: Field = Field {
        keys: &["build"],
    };
    pub const RELEASED: Field = Field {
        keys: &["git_datetime", "datetime"],
    };

    /// Baseline read by the sort key. Only the primary key participates.
    pub const SORT_EDK: Field = Field {
        keys: &["edk"],
    };
    /// Refcode read by the sort key. Only the primary key participates.
    pub const SORT_REFCODE: Field = Field {
        keys: &["refcode_base"],
    };

    /// Return the first present alternative.
    pub fn lookup<'a>(&self, artifact: &'a Artifact) -> Option<&'a str> {
        self.keys.iter().find_map(|key| artifact.text(key))
    }
}

/// Raw keys contributing to the free-text search haystack, per artifact.
///
/// Every key is included (not just the first present alternative) and no
/// derived label is added.
pub const SEARCH_KEYS: &[&str] = &[
    "path",
    "edk",
    "base",
    "board_rev",
    "version",
    "refcode_base",
    "release_tag",
    "build",
    "firmware_type",
    "fw_type",
];

impl Artifact {
    /// Full firmware version, composed from `fw_version` and `stage` when no
    /// pre-formatted value exists.
    pub fn version_full(&self) -> Option<String> {
        if let Some(full) = Field::VERSION_FULL.lookup(self) {
            return Some(full.to_string());
        }
        let version = self.text("fw_version")?;
        Some(match self.text("stage") {
            Some(stage) => format!("{version}_{stage}"),
            None => version.to_string(),
        })
    }

    /// Whether the baseline names an EDK/UDK tree, i.e. a UEFI build.
    pub fn is_uefi(&self) -> bool {
        Field::EDK_BASELINE.lookup(self).is_some_and(|b| {
            b.get(..3)
                .is_some_and(|p| p.eq_ignore_ascii_case("edk") || p.eq_ignore_ascii_case("udk"))
        })
    }
}
