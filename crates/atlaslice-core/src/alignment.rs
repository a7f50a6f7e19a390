//! Sprite alignment and pivot derivation.

use serde::{Deserialize, Serialize};

/// Named anchor convention used to derive a sprite pivot.
///
/// The discriminants are the stable codes echoed into slice metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Center = 0,
    TopLeft = 1,
    TopCenter = 2,
    TopRight = 3,
    LeftCenter = 4,
    RightCenter = 5,
    BottomLeft = 6,
    BottomCenter = 7,
    BottomRight = 8,
    /// Pivot comes from the caller-supplied custom offset.
    Custom = 9,
}

impl Alignment {
    /// All alignments in code order.
    pub const ALL: [Alignment; 10] = [
        Alignment::Center,
        Alignment::TopLeft,
        Alignment::TopCenter,
        Alignment::TopRight,
        Alignment::LeftCenter,
        Alignment::RightCenter,
        Alignment::BottomLeft,
        Alignment::BottomCenter,
        Alignment::BottomRight,
        Alignment::Custom,
    ];

    /// Stable integer code.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Looks up an alignment by its integer code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Returns the alignment as a string identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Center => "center",
            Alignment::TopLeft => "top_left",
            Alignment::TopCenter => "top_center",
            Alignment::TopRight => "top_right",
            Alignment::LeftCenter => "left_center",
            Alignment::RightCenter => "right_center",
            Alignment::BottomLeft => "bottom_left",
            Alignment::BottomCenter => "bottom_center",
            Alignment::BottomRight => "bottom_right",
            Alignment::Custom => "custom",
        }
    }
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Alignment {
    type Err = String;

    /// Accepts the snake_case identifier, with `-` allowed in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == normalized)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|a| a.as_str()).collect();
                format!(
                    "unknown alignment '{}' (expected one of: {})",
                    s,
                    names.join(", ")
                )
            })
    }
}

/// Pivot used when no custom offset is configured.
pub const DEFAULT_CUSTOM_OFFSET: [f32; 2] = [0.5, 0.5];

/// Returns the fractional pivot for an alignment.
///
/// Pivot space has its origin at the bottom-left of the sprite rectangle.
/// `custom_offset` is only used for [`Alignment::Custom`] and is returned
/// unclamped.
pub fn pivot_for(alignment: Alignment, custom_offset: [f32; 2]) -> [f32; 2] {
    match alignment {
        Alignment::Center => [0.5, 0.5],
        Alignment::TopLeft => [0.0, 1.0],
        Alignment::TopCenter => [0.5, 1.0],
        Alignment::TopRight => [1.0, 1.0],
        Alignment::LeftCenter => [0.0, 0.5],
        Alignment::RightCenter => [1.0, 0.5],
        Alignment::BottomLeft => [0.0, 0.0],
        Alignment::BottomCenter => [0.5, 0.0],
        Alignment::BottomRight => [1.0, 0.0],
        Alignment::Custom => custom_offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pivot_table() {
        let offset = [0.25, 0.75];
        let expected = [
            (Alignment::Center, [0.5, 0.5]),
            (Alignment::TopLeft, [0.0, 1.0]),
            (Alignment::TopCenter, [0.5, 1.0]),
            (Alignment::TopRight, [1.0, 1.0]),
            (Alignment::LeftCenter, [0.0, 0.5]),
            (Alignment::RightCenter, [1.0, 0.5]),
            (Alignment::BottomLeft, [0.0, 0.0]),
            (Alignment::BottomCenter, [0.5, 0.0]),
            (Alignment::BottomRight, [1.0, 0.0]),
        ];
        for (alignment, pivot) in expected {
            assert_eq!(pivot_for(alignment, offset), pivot, "{}", alignment);
        }
    }

    #[test]
    fn test_custom_offset_is_unclamped() {
        assert_eq!(pivot_for(Alignment::Custom, [0.25, 0.75]), [0.25, 0.75]);
        assert_eq!(pivot_for(Alignment::Custom, [-1.5, 2.0]), [-1.5, 2.0]);
    }

    #[test]
    fn test_codes_round_trip() {
        for alignment in Alignment::ALL {
            assert_eq!(Alignment::from_code(alignment.code()), Some(alignment));
        }
        assert_eq!(Alignment::Custom.code(), 9);
        assert_eq!(Alignment::from_code(10), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("center".parse::<Alignment>(), Ok(Alignment::Center));
        assert_eq!("Top-Left".parse::<Alignment>(), Ok(Alignment::TopLeft));
        assert_eq!("bottom_right".parse::<Alignment>(), Ok(Alignment::BottomRight));
        let err = "middle".parse::<Alignment>().unwrap_err();
        assert!(err.contains("unknown alignment 'middle'"));
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Alignment::LeftCenter).unwrap();
        assert_eq!(json, "\"left_center\"");
        let parsed: Alignment = serde_json::from_str("\"custom\"").unwrap();
        assert_eq!(parsed, Alignment::Custom);
    }
}
