//! Stat pipeline.
//!
//! A calculation walks through the stages below, each owning one module. The
//! stages only ever add to tables copied out of the game data; nothing here
//! mutates the bundle.
//!
//! ```text
//! [ Raw assembly ]        raw.rs     base + gear (or crew) + growth modifiers
//!      ↓
//! [ Growth derivation ]   growth.rs  primaries, mastery, secondaries, floors
//!      ↓
//! [ Mod aggregation ]     mods.rs    characters only
//!      ↓
//! [ Formatting ]          format.rs  scale, percentages, final table
//! ```
//!
//! Ships get their crew sub-table from the crew rating ([`crew`]).
//!
//! ## Numbers
//!
//! All magnitudes are integers ([`Fixed`], display × 1e8) until the
//! formatter renders them; table coefficients are [`Coefficient`]s. Every
//! truncation is an explicit floor at a documented step.

pub mod crew;
pub mod fixed;
pub mod format;
pub mod growth;
pub mod ids;
pub mod mods;
pub mod raw;
pub mod sheet;
pub mod table;

pub use crew::{crew_rating, crewless_crew_rating, validate_crew};
pub use fixed::{Coefficient, FLAT_SCALE, Fixed, PERCENT_SCALE, UNIT};
pub use format::{StatFormatter, StatSection, UnitStats};
pub use ids::StatId;
pub use sheet::{BonusSource, StatSheet};
pub use table::StatTable;
