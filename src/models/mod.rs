//! Models for the showcase document and its DoYouBuzz round-trip data
//!
//! - `showcase`: the editable document (personal info, skills, experience, ...)
//! - `metadata`: the side-channel of preserved platform attributes
//! - `date`: year/month conversion for experience ranges
//! - `ids`: identifier synthesis for entries created by hand

pub mod date;
pub mod ids;
pub mod metadata;
pub mod showcase;

pub use date::YearMonth;
pub use ids::SubEntityKind;
pub use metadata::ProfileMetadata;
pub use showcase::{
    Certification, Entry, Experience, Language, PersonalInfo, Showcase, SkillCategory, SkillItem,
    TrackedEntry, VariantInfo,
};
