//! Schedule board services.
//!
//! Everything here except [`presence::PresenceTicker`] is a pure function or
//! an immutable value: the store is replaced rather than mutated, the
//! indexer and layout resolver are recomputed per query, and no operation
//! returns an error. [`board::ScheduleBoard`] is the stateful façade that a
//! view (or the `grid-status` binary) drives.

pub mod board;
pub mod filter;
pub mod grid;
pub mod layout;
pub mod preferences;
pub mod presence;
pub mod slots;
pub mod store;

pub use board::ScheduleBoard;
pub use filter::VisibilityFilter;
pub use grid::{render_week, GridCell, GridRow, GridSpec, WeekGrid};
pub use layout::{layout_for, SizeTier, SlotLayout};
pub use preferences::{ColorPreferenceMap, ColorPreferences};
pub use presence::{currently_active, Clock, FixedClock, LocalClock, PresenceTicker, DEFAULT_TICK, MIN_TICK};
pub use slots::{active_in_slot, RenderedSlot, SlotEntry};
pub use store::ScheduleStore;
