//! Synthetic identifiers for entries created in the showcase
//!
//! DoYouBuzz assigns 8+ digit identifiers to everything it exports. Entries
//! added by hand in the showcase have none, so the exporter derives one from
//! the entry's position. Every function here is pure: the same document always
//! exports with the same identifiers.
//!
//! Sub-entity identifiers are laid out per experience in blocks of 100:
//!
//! | kind        | offset | slots |
//! |-------------|--------|-------|
//! | mission     | 0      | 20    |
//! | result      | 20     | 10    |
//! | objective   | 30     | 20    |
//! | environment | 50     | 40    |
//! | context     | 90     | 10    |
//!
//! Entries beyond a kind's slots move to an overflow range so the kinds never
//! collide with each other.

/// Base of the primary sub-entity range.
pub const SUB_ENTITY_BASE: i64 = 100_000_000;

/// Base of the overflow sub-entity range.
pub const SUB_ENTITY_OVERFLOW_BASE: i64 = 200_000_000;

/// Base for experiences without a platform identifier.
pub const EXPERIENCE_BASE: i64 = 19_000_000;

/// Base for certificates without a platform identifier.
pub const CERTIFICATE_BASE: i64 = 1_000_000;

/// Base for language skills without a platform identifier.
pub const LANGUAGE_BASE: i64 = 2_000_000;

const EXPERIENCE_STRIDE: i64 = 100;
const OVERFLOW_EXPERIENCE_STRIDE: i64 = 10_000;
const OVERFLOW_KIND_STRIDE: i64 = 1_000;

/// The typed item lists attached to one experience record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubEntityKind {
    Mission,
    Result,
    Objective,
    Context,
    Environment,
}

impl SubEntityKind {
    /// Kinds that are edited as lists in the showcase. Context is a single string.
    pub const LISTS: [SubEntityKind; 4] = [
        SubEntityKind::Mission,
        SubEntityKind::Result,
        SubEntityKind::Objective,
        SubEntityKind::Environment,
    ];

    /// Offset of this kind inside an experience's block.
    pub fn offset(self) -> i64 {
        match self {
            SubEntityKind::Mission => 0,
            SubEntityKind::Result => 20,
            SubEntityKind::Objective => 30,
            SubEntityKind::Environment => 50,
            SubEntityKind::Context => 90,
        }
    }

    /// Number of primary-range slots before the next kind's offset.
    pub fn slots(self) -> usize {
        match self {
            SubEntityKind::Mission => 20,
            SubEntityKind::Result => 10,
            SubEntityKind::Objective => 20,
            SubEntityKind::Environment => 40,
            SubEntityKind::Context => 10,
        }
    }

    fn rank(self) -> i64 {
        match self {
            SubEntityKind::Mission => 0,
            SubEntityKind::Result => 1,
            SubEntityKind::Objective => 2,
            SubEntityKind::Environment => 3,
            SubEntityKind::Context => 4,
        }
    }

    /// Value of the platform `type` field.
    pub fn type_tag(self) -> &'static str {
        match self {
            SubEntityKind::Mission => "mission",
            SubEntityKind::Result => "result",
            SubEntityKind::Objective => "objective",
            SubEntityKind::Environment => "environment",
            SubEntityKind::Context => "context",
        }
    }

    /// Key of the list in a platform experience object.
    pub fn platform_key(self) -> &'static str {
        match self {
            SubEntityKind::Mission => "missions",
            SubEntityKind::Result => "results",
            SubEntityKind::Objective => "objectives",
            SubEntityKind::Environment => "environments",
            SubEntityKind::Context => "contexts",
        }
    }

    /// Whether entries left blank are removed on export instead of kept empty.
    pub fn drops_blank(self) -> bool {
        matches!(self, SubEntityKind::Result | SubEntityKind::Objective)
    }
}

/// Identifier for the `entry_index`-th entry of `kind` in the `experience_index`-th experience.
pub fn sub_entity_id(experience_index: usize, kind: SubEntityKind, entry_index: usize) -> i64 {
    let experience = experience_index as i64;
    let entry = entry_index as i64;
    if entry_index < kind.slots() {
        SUB_ENTITY_BASE + experience * EXPERIENCE_STRIDE + kind.offset() + entry
    } else {
        SUB_ENTITY_OVERFLOW_BASE
            + experience * OVERFLOW_EXPERIENCE_STRIDE
            + kind.rank() * OVERFLOW_KIND_STRIDE
            + entry
    }
}

/// Identifier for an experience without one.
pub fn experience_id(index: usize) -> i64 {
    EXPERIENCE_BASE + index as i64
}

/// Identifier for a certificate without one.
pub fn certificate_id(index: usize) -> i64 {
    CERTIFICATE_BASE + index as i64
}

/// Identifier for a language skill without one.
pub fn language_id(index: usize) -> i64 {
    LANGUAGE_BASE + index as i64
}
