//! Mirror table: the fixed set of GitHub mirrors and their endpoint prefixes.
//!
//! [`Mirror::ALL`] is the only list of known mirrors. Both the settings panel
//! and the CLI listing iterate it, so a mirror cannot be offered without a
//! table entry.

mod table;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use table::MirrorEndpoints;

/// Configuration error raised when a mirror identifier is not in the table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MirrorError {
    #[error("unknown mirror identifier {0:?} (expected one of: {known})", known = known_ids())]
    Unknown(String),
}

/// A known GitHub mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mirror {
    #[default]
    Fastgit,
    Mtr,
    Ghproxy,
    Gitclone,
    Mirr,
}

impl Mirror {
    /// Every mirror, in the order offered to the user.
    pub const ALL: [Mirror; 5] = [
        Mirror::Fastgit,
        Mirror::Mtr,
        Mirror::Ghproxy,
        Mirror::Gitclone,
        Mirror::Mirr,
    ];

    /// Identifier used in persisted settings and on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Mirror::Fastgit => "fastgit",
            Mirror::Mtr => "mtr",
            Mirror::Ghproxy => "ghproxy",
            Mirror::Gitclone => "gitclone",
            Mirror::Mirr => "mirr",
        }
    }

    pub fn endpoints(self) -> MirrorEndpoints {
        table::endpoints_for(self)
    }
}

impl fmt::Display for Mirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Mirror {
    type Err = MirrorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mirror::ALL
            .into_iter()
            .find(|m| m.id() == s)
            .ok_or_else(|| MirrorError::Unknown(s.to_string()))
    }
}

/// Looks up the endpoints for a mirror identifier.
///
/// Fails with [`MirrorError::Unknown`] instead of falling back to a default:
/// an unknown identifier means the table and the offered choices disagree.
pub fn lookup(id: &str) -> Result<MirrorEndpoints, MirrorError> {
    id.parse::<Mirror>().map(Mirror::endpoints)
}

fn known_ids() -> String {
    Mirror::ALL
        .iter()
        .map(|m| m.id())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mirror_round_trips_through_its_id() {
        for mirror in Mirror::ALL {
            assert_eq!(mirror.id().parse::<Mirror>().unwrap(), mirror);
            assert_eq!(mirror.to_string(), mirror.id());
        }
    }

    #[test]
    fn lookup_known_ids() {
        let fastgit = lookup("fastgit").unwrap();
        assert_eq!(fastgit.download, "https://download.fastgit.org/");
        assert_eq!(fastgit.raw, "https://raw.fastgit.org/");
        assert_eq!(fastgit.repo, "https://hub.fastgit.org/");

        let ghproxy = lookup("ghproxy").unwrap();
        assert_eq!(ghproxy.download, ghproxy.repo);
        assert_eq!(ghproxy.raw, "https://mirror.ghproxy.com/https://github.com/");
    }

    #[test]
    fn lookup_unknown_id_is_config_error() {
        for id in ["", "github", "FastGit", "fastgit ", "cnpmjs"] {
            assert_eq!(lookup(id), Err(MirrorError::Unknown(id.to_string())));
        }
    }

    #[test]
    fn unknown_error_lists_known_ids() {
        let msg = lookup("nope").unwrap_err().to_string();
        assert!(msg.contains("\"nope\""));
        assert!(msg.contains("fastgit, mtr, ghproxy, gitclone, mirr"));
    }

    #[test]
    fn serde_uses_lowercase_ids() {
        assert_eq!(serde_json::to_string(&Mirror::Gitclone).unwrap(), "\"gitclone\"");
        let m: Mirror = serde_json::from_str("\"mtr\"").unwrap();
        assert_eq!(m, Mirror::Mtr);
        assert!(serde_json::from_str::<Mirror>("\"unknown\"").is_err());
    }

    #[test]
    fn default_mirror_is_fastgit() {
        assert_eq!(Mirror::default(), Mirror::Fastgit);
    }
}
