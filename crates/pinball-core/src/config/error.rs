use std::fmt;

/// A table definition that cannot be simulated.
///
/// Every variant is raised before any physics body exists, so a bad definition
/// never produces a half-built table.
#[derive(Debug)]
pub enum ConfigError {
    /// A size, thickness, radius or rate that must be strictly positive.
    NonPositive { field: &'static str, value: f32 },
    /// A coefficient or offset that must not be negative.
    Negative { field: &'static str, value: f32 },
    /// The playfield does not narrow toward the drain.
    FunnelNotTapered { top_width: f32, bottom_width: f32 },
    /// Flipper swing limit outside (0, π/2).
    MaxAngleOutOfRange(f32),
    /// Bumpers must add energy on contact.
    BumperNotBouncy { index: usize, restitution: f32 },
    TooFewBoundaryPoints(usize),
    DrainGapOutOfBounds { gap: (usize, usize), points: usize },
    /// The drain gap must be a consecutive pair of boundary points.
    DrainGapNotAdjacent { gap: (usize, usize), points: usize },
    InvalidColor { field: &'static str, value: String },
    UnknownTable(String),
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "{} must be positive, got {}", field, value)
            }
            ConfigError::Negative { field, value } => {
                write!(f, "{} must not be negative, got {}", field, value)
            }
            ConfigError::FunnelNotTapered { top_width, bottom_width } => write!(
                f,
                "bottom width {} must be smaller than top width {}",
                bottom_width, top_width
            ),
            ConfigError::MaxAngleOutOfRange(angle) => {
                write!(f, "flipper max angle {} must lie strictly between 0 and pi/2", angle)
            }
            ConfigError::BumperNotBouncy { index, restitution } => write!(
                f,
                "bumper {} has restitution {}, bumpers need more than 1",
                index, restitution
            ),
            ConfigError::TooFewBoundaryPoints(n) => {
                write!(f, "boundary needs at least 3 points, got {}", n)
            }
            ConfigError::DrainGapOutOfBounds { gap, points } => write!(
                f,
                "drain gap {:?} is out of bounds for {} boundary points",
                gap, points
            ),
            ConfigError::DrainGapNotAdjacent { gap, points } => write!(
                f,
                "drain gap {:?} is not a consecutive pair of the {} boundary points",
                gap, points
            ),
            ConfigError::InvalidColor { field, value } => {
                write!(f, "{} color {:?} is not a #rrggbb hex color", field, value)
            }
            ConfigError::UnknownTable(name) => write!(f, "no table named {:?}", name),
            ConfigError::Json(err) => write!(f, "malformed table definition: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn messages_name_the_offending_value() {
        let err = ConfigError::FunnelNotTapered { top_width: 200.0, bottom_width: 400.0 };
        assert_eq!(err.to_string(), "bottom width 400 must be smaller than top width 200");

        let err = ConfigError::NonPositive { field: "table.height", value: -1.0 };
        assert_eq!(err.to_string(), "table.height must be positive, got -1");
    }

    #[test]
    fn json_errors_keep_their_source() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = ConfigError::from(json_err);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("malformed table definition"));
    }
}
