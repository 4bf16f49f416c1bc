//! Location descriptors: one source tree, its age threshold and its action

use crate::constants::{ACTION_DELETE, ACTION_MOVE};
use serde::{Deserialize, Serialize};
use sweeper_errors::ConfigError;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// What to do with a file once it is older than its location's threshold
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Remove the file
    Delete,
    /// Rename the file to the same relative path under `target`
    Move { target: PathBuf },
}

impl Action {
    /// The configuration tag for this action
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delete => ACTION_DELETE,
            Self::Move { .. } => ACTION_MOVE,
        }
    }

    /// Target root for moves
    #[must_use]
    pub fn target(&self) -> Option<&Path> {
        match self {
            Self::Delete => None,
            Self::Move { target } => Some(target),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delete => f.write_str(ACTION_DELETE),
            Self::Move { target } => write!(f, "{ACTION_MOVE} -> {}", target.display()),
        }
    }
}

/// One configured unit of work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Root of the tree to sweep
    pub source: PathBuf,
    /// Files strictly older than this many whole days qualify
    pub max_age_days: u32,
    pub action: Action,
}

impl Location {
    /// Create a location that deletes expired files
    pub fn delete(source: impl Into<PathBuf>, max_age_days: u32) -> Self {
        Self {
            source: source.into(),
            max_age_days,
            action: Action::Delete,
        }
    }

    /// Create a location that moves expired files under `target`
    pub fn relocate(
        source: impl Into<PathBuf>,
        max_age_days: u32,
        target: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source: source.into(),
            max_age_days,
            action: Action::Move {
                target: target.into(),
            },
        }
    }
}

/// Location record as it appears in the configuration document
///
/// Absent fields decode to their zero values and are judged by
/// [`RawLocation::into_location`]: a missing `days` is a zero-day threshold,
/// a missing `path` or `action` is rejected there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLocation {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub days: u32,
    #[serde(default)]
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl RawLocation {
    /// Validate the record and convert it into a typed [`Location`].
    ///
    /// `index` is the position in the `locations` array and is only used to
    /// name the offending field. Non-fatal findings are pushed onto
    /// `warnings`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty, the action is unknown, a move
    /// has no target, or the target lies inside the source tree.
    pub fn into_location(
        self,
        index: usize,
        warnings: &mut Vec<String>,
    ) -> Result<Location, ConfigError> {
        let field = |name: &str| format!("locations[{index}].{name}");

        if self.path.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: field("path"),
            });
        }
        let source = PathBuf::from(&self.path);

        let target = self
            .target
            .filter(|t| !t.trim().is_empty())
            .map(PathBuf::from);

        let action = match self.action.as_str() {
            ACTION_DELETE => {
                if let Some(target) = &target {
                    warnings.push(format!(
                        "{}: target {} is ignored for delete locations",
                        field("target"),
                        target.display()
                    ));
                }
                Action::Delete
            }
            ACTION_MOVE => {
                let target = target.ok_or_else(|| ConfigError::MissingField {
                    field: field("target"),
                })?;
                if normalized(&target).starts_with(normalized(&source)) {
                    return Err(ConfigError::Invalid {
                        message: format!(
                            "{}: target {} is inside source {}",
                            field("target"),
                            target.display(),
                            source.display()
                        ),
                    });
                }
                Action::Move { target }
            }
            other => {
                return Err(ConfigError::InvalidValue {
                    field: field("action"),
                    value: other.to_string(),
                })
            }
        };

        Ok(Location {
            source,
            max_age_days: self.days,
            action,
        })
    }
}

/// Absolute form of `path` with `.` and `..` resolved lexically.
///
/// Symlinks are not resolved, so two spellings that only meet through a link
/// still compare as unrelated.
fn normalized(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}

impl From<&Location> for RawLocation {
    fn from(location: &Location) -> Self {
        Self {
            path: location.source.display().to_string(),
            days: location.max_age_days,
            action: location.action.as_str().to_string(),
            target: location
                .action
                .target()
                .map(|t| t.display().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_errors::UserFacingError;

    fn raw(action: &str, target: Option<&str>) -> RawLocation {
        RawLocation {
            path: "/data/in".to_string(),
            days: 7,
            action: action.to_string(),
            target: target.map(str::to_string),
        }
    }

    #[test]
    fn test_delete_location() {
        let location = raw("delete", None).into_location(0, &mut Vec::new()).unwrap();
        assert_eq!(location, Location::delete("/data/in", 7));
    }

    #[test]
    fn test_delete_with_target_warns() {
        let mut warnings = Vec::new();
        let location = raw("delete", Some("/archive"))
            .into_location(2, &mut warnings)
            .unwrap();
        assert_eq!(location.action, Action::Delete);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("locations[2].target"));
    }

    #[test]
    fn test_move_location() {
        let location = raw("move", Some("/archive")).into_location(0, &mut Vec::new()).unwrap();
        assert_eq!(location.action.target(), Some(Path::new("/archive")));
        assert_eq!(location.action.as_str(), "move");
    }

    #[test]
    fn test_move_without_target_is_rejected() {
        let err = raw("move", None).into_location(4, &mut Vec::new()).unwrap_err();
        assert!(matches!(
            &err,
            ConfigError::MissingField { field } if field == "locations[4].target"
        ));
        assert_eq!(
            err.user_hint(),
            Some("Locations with action \"move\" need a \"target\" directory.")
        );

        let err = raw("move", Some("  ")).into_location(0, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { .. }));
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let err = raw("archive", None).into_location(3, &mut Vec::new()).unwrap_err();
        match err {
            ConfigError::InvalidValue { field, value } => {
                assert_eq!(field, "locations[3].action");
                assert_eq!(value, "archive");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_action_tag_is_case_sensitive() {
        assert!(raw("Delete", None).into_location(0, &mut Vec::new()).is_err());
    }

    #[test]
    fn test_target_inside_source_is_rejected() {
        let err = raw("move", Some("/data/in/archive"))
            .into_location(0, &mut Vec::new())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        // Sibling with a shared prefix is fine: comparison is per component
        assert!(raw("move", Some("/data/inbox")).into_location(0, &mut Vec::new()).is_ok());
    }

    #[test]
    fn test_target_inside_source_is_rejected_across_spellings() {
        let mut relative = raw("move", Some("./logs/archive"));
        relative.path = "logs".to_string();
        assert!(matches!(
            relative.into_location(0, &mut Vec::new()),
            Err(ConfigError::Invalid { .. })
        ));

        let dotted = raw("move", Some("/data/other/../in/archive"));
        assert!(matches!(
            dotted.into_location(0, &mut Vec::new()),
            Err(ConfigError::Invalid { .. })
        ));

        let mut trailing = raw("move", Some("/data/in/./old"));
        trailing.path = "/data/in/.".to_string();
        assert!(trailing.into_location(0, &mut Vec::new()).is_err());

        // Climbing out of the source makes the target a sibling
        let sibling = raw("move", Some("/data/in/../archive"));
        assert!(sibling.into_location(0, &mut Vec::new()).is_ok());
    }

    #[test]
    fn test_normalized_resolves_dots() {
        assert_eq!(normalized(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalized(Path::new("/../x")), PathBuf::from("/x"));
    }

    #[test]
    fn test_empty_path_is_rejected() {
        let mut record = raw("delete", None);
        record.path = String::new();
        let err = record.into_location(1, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { field } if field == "locations[1].path"));
    }

    #[test]
    fn test_raw_round_trip_from_location() {
        let location = Location::relocate("/a", 10, "/b");
        let raw = RawLocation::from(&location);
        assert_eq!(raw.into_location(0, &mut Vec::new()).unwrap(), location);
    }
}
