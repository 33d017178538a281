//! Tournament scheduling and disruption handling.
//!
//! # Generation
//!
//! [`generate_schedule`] pairs each enabled game's roster into first-round
//! matches, adds a semifinal placeholder for brackets of four or more, and
//! lays everything out on the game's stage with [`TimeSlotAllocator`].
//! Fixed events (lunch, ceremonies) are placed first and never move.
//!
//! # Adjustment
//!
//! [`adjust_schedule`] recomputes a schedule from the baseline and the full
//! disruption list:
//!
//! | Disruption | Effect on the match | Effect on related matches |
//! |------------|---------------------|---------------------------|
//! | Late arrival | Start (and end) later | Pushed back |
//! | Extended duration | Longer | Pushed back |
//! | Early finish | Shorter, never below 10 min | Pulled forward, never before baseline |
//!
//! Two matches are *related* when they share a team or a stage. Related
//! matches keep the rest period (shared team) or setup buffer (shared stage)
//! between them.
//!
//! # KPI
//!
//! [`ScheduleMetrics`] and [`AdjustmentMetrics`] report span, idle time,
//! stage utilization and how much an adjustment moved.

mod adjust;
mod allocator;
pub mod applicator;
mod backend;
mod generate;
mod kpi;
mod propagation;
mod sequence;
mod session;

pub use adjust::{adjust_schedule, AdjustedSchedule, MatchChange, SkipReason, SkippedDisruption};
pub use allocator::TimeSlotAllocator;
pub use applicator::{MAX_MATCH_MINUTES, MIN_MATCH_MINUTES};
pub use backend::{AdjustRequest, GenerateRequest, LocalBackend, SchedulingBackend};
pub use generate::{first_round_pairs, generate_schedule};
pub use kpi::{AdjustmentMetrics, ScheduleMetrics};
pub use propagation::{PropagationEngine, MIN_SHRUNK_MINUTES};
pub use sequence::SequenceValidator;
pub use session::SchedulerSession;
