//! Disruption applicator: the per-match edit behind every adjustment.

use tracing::{debug, warn};

use super::SkipReason;
use crate::models::timestamp;
use crate::models::{Disruption, DisruptionKind, Match};

/// Shortest a match may become through an early finish (minutes).
pub const MIN_MATCH_MINUTES: i64 = 10;

/// Longest duration a match with an unusable duration is clamped to (minutes).
pub const MAX_MATCH_MINUTES: i64 = 24 * 60;

/// Applies one disruption to one match.
///
/// | Kind | Effect |
/// |------|--------|
/// | `extended_duration` | `duration += n` |
/// | `late_arrival` | `start += n`, duration kept |
/// | `early_finish` | `duration = max(10, duration - n)` |
///
/// `end_time` is re-derived in every case. An early finish never lengthens a
/// match that was already shorter than the floor.
///
/// # Errors
/// Returns why the disruption cannot be applied:
/// - [`SkipReason::FixedEvent`] for fixed events and breaks
/// - [`SkipReason::ZeroMinutes`] when `extra_minutes` is 0
/// - [`SkipReason::OutOfRange`] when the edited times are not representable
pub fn apply(m: &Match, disruption: &Disruption) -> Result<Match, SkipReason> {
    if m.is_immovable() {
        debug!(match_id = %m.id, disruption = %disruption.id, "fixed event, disruption not applied");
        return Err(SkipReason::FixedEvent);
    }
    if disruption.extra_minutes == 0 {
        warn!(match_id = %m.id, disruption = %disruption.id, "disruption of zero minutes skipped");
        return Err(SkipReason::ZeroMinutes);
    }

    let minutes = disruption.minutes();
    let (start, duration) = match disruption.kind {
        DisruptionKind::ExtendedDuration => (Some(m.start_time), m.duration.checked_add(minutes)),
        DisruptionKind::LateArrival => (timestamp::add_minutes(m.start_time, minutes), Some(m.duration)),
        DisruptionKind::EarlyFinish => {
            let floor = MIN_MATCH_MINUTES.min(m.duration);
            (Some(m.start_time), Some(m.duration.saturating_sub(minutes).max(floor)))
        }
    };
    let edited = start.zip(duration).and_then(|(start, duration)| {
        timestamp::add_minutes(start, duration).map(|end| (start, duration, end))
    });
    let Some((start_time, duration, end_time)) = edited else {
        warn!(match_id = %m.id, disruption = %disruption.id, minutes, "disruption pushes match out of range, skipped");
        return Err(SkipReason::OutOfRange);
    };

    let mut out = m.clone();
    out.start_time = start_time;
    out.duration = duration;
    out.end_time = end_time;

    debug!(
        match_id = %m.id,
        kind = %disruption.kind,
        minutes,
        start = %out.start_time,
        end = %out.end_time,
        "disruption applied"
    );
    Ok(out)
}
