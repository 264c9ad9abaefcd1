//! Domain models carried inside network events.
//!
//! These are plain values describing live world state: which monster is
//! where, and which way it faces. They know nothing about the wire format;
//! [`codec`](crate::codec) and the event types map them to and from text.

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::error::TokenError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Defines a non-negative `i32` id newtype.
///
/// The field is private: every value goes through [`TryFrom<i32>`] (or the
/// always-valid `From<u16>`), so an id that would fail to decode can't be
/// built and therefore can't be encoded. Serde goes through the same check.
macro_rules! non_negative_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
            Deserialize,
        )]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Checked constructor.
            ///
            /// # Errors
            /// Returns [`TokenError::OutOfRange`] for a negative value.
            pub fn new(value: i32) -> Result<Self, TokenError> {
                if value < 0 {
                    return Err(TokenError::OutOfRange(value));
                }
                Ok(Self(value))
            }

            pub fn get(self) -> i32 {
                self.0
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TokenError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<u16> for $name {
            fn from(value: u16) -> Self {
                Self(i32::from(value))
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> i32 {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }
    };
}

non_negative_id!(
    /// Identifies a monster's static definition (its species/template).
    ///
    /// Newtype so a template id can't be passed where an instance id is
    /// expected. Serialized as the bare number.
    TemplateId,
    "T"
);

non_negative_id!(
    /// Identifies one live monster within a session.
    ///
    /// Uniqueness among live monsters is the game-state store's job; this
    /// type only carries the number.
    InstanceId,
    "M"
);

non_negative_id!(
    /// Identifies a connected player.
    PlayerId,
    "P"
);

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Facing direction of an actor.
///
/// The ordinal of each member is its wire representation, so the order
/// below is part of the protocol and must not change:
///
/// ```text
/// North = 0, East = 1, South = 2, West = 3
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub enum Direction {
    #[default]
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Every member, in ordinal order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The wire ordinal of this direction.
    pub fn ordinal(self) -> i32 {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// Looks up a direction by ordinal. Out-of-range values yield `None`
    /// rather than being clamped to a neighbour.
    pub fn from_ordinal(ordinal: i32) -> Option<Self> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Models
// ---------------------------------------------------------------------------

/// A tile position plus facing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub struct PositionModel {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
}

impl PositionModel {
    pub fn new(x: i32, y: i32, direction: Direction) -> Self {
        Self { x, y, direction }
    }
}

/// One live monster as the client needs to see it.
///
/// Only the template id travels; the client already knows everything else
/// about the template (stats, sprite, name) and looks it up locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonsterInstance {
    pub template_id: TemplateId,
    pub instance_id: InstanceId,
    pub position: PositionModel,
}

/// A monster stepped or turned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonsterMovement {
    pub instance_id: InstanceId,
    pub position: PositionModel,
}

/// A player stepped or turned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMovement {
    pub player_id: PlayerId,
    pub position: PositionModel,
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_ordinals_are_fixed() {
        assert_eq!(Direction::North.ordinal(), 0);
        assert_eq!(Direction::East.ordinal(), 1);
        assert_eq!(Direction::South.ordinal(), 2);
        assert_eq!(Direction::West.ordinal(), 3);
    }

    #[test]
    fn test_direction_from_ordinal_matches_all() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_ordinal(dir.ordinal()), Some(dir));
        }
    }

    #[test]
    fn test_direction_from_ordinal_rejects_out_of_range() {
        assert_eq!(Direction::from_ordinal(4), None);
        assert_eq!(Direction::from_ordinal(9), None);
        assert_eq!(Direction::from_ordinal(-1), None);
        assert_eq!(Direction::from_ordinal(i32::MAX), None);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(TemplateId::from(3).to_string(), "T-3");
        assert_eq!(InstanceId::from(17).to_string(), "M-17");
        assert_eq!(PlayerId::from(4).to_string(), "P-4");
    }

    #[test]
    fn test_ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&InstanceId::from(17)).unwrap();
        assert_eq!(json, "17");
    }

    #[test]
    fn test_monster_instance_json_shape() {
        let monster = MonsterInstance {
            template_id: TemplateId::from(3),
            instance_id: InstanceId::from(17),
            position: PositionModel::new(5, -2, Direction::North),
        };
        let json = serde_json::to_value(&monster).unwrap();
        assert_eq!(json["template_id"], 3);
        assert_eq!(json["instance_id"], 17);
        assert_eq!(json["position"]["y"], -2);
        assert_eq!(json["position"]["direction"], "North");
    }

    #[test]
    fn test_ids_reject_negative_construction() {
        assert_eq!(TemplateId::new(-1), Err(TokenError::OutOfRange(-1)));
        assert_eq!(InstanceId::try_from(-7), Err(TokenError::OutOfRange(-7)));
        assert_eq!(PlayerId::new(i32::MIN), Err(TokenError::OutOfRange(i32::MIN)));
        assert_eq!(PlayerId::new(0).map(PlayerId::get), Ok(0));
        assert_eq!(InstanceId::new(i32::MAX).map(i32::from), Ok(i32::MAX));
    }

    #[test]
    fn test_ids_deserialize_through_the_same_check() {
        assert_eq!(serde_json::from_str::<TemplateId>("3").unwrap().get(), 3);
        assert!(serde_json::from_str::<TemplateId>("-3").is_err());
        assert!(serde_json::from_str::<InstanceId>("-1").is_err());
    }
}
