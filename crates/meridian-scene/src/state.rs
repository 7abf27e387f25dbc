/// Longitude range in integer degrees (inclusive).
pub const LONGITUDE_RANGE: (i32, i32) = (0, 360);
/// Latitude range in integer degrees (inclusive).
pub const LATITUDE_RANGE: (i32, i32) = (-90, 90);

/// The two camera angles driving the right viewport and the overlays.
///
/// Always within range: construction and every mutation clamp. There are no
/// other mutation paths — input handling produces [`OrbitCommand`]s and the
/// frame loop applies them here.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct AngleState {
    /// Degrees east, 0..=360. No wraparound: stepping past a bound holds.
    pub longitude: i32,
    /// Degrees north, -90..=90.
    pub latitude: i32,
}

/// A single user-initiated change to the angle state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum OrbitCommand {
    /// Step longitude by the given delta (arrow keys use ±1).
    StepLongitude(i32),
    /// Step latitude by the given delta (arrow keys use ±1).
    StepLatitude(i32),
    /// Absolute assignment from the sliders. Values are clamped into range,
    /// so an out-of-range control cannot break the invariant.
    Set { longitude: i32, latitude: i32 },
}

impl AngleState {
    /// Applies a command, clamping to the valid ranges.
    ///
    /// Returns `true` when the state actually changed; the caller uses this
    /// to decide whether a redraw is needed.
    pub fn apply(&mut self, cmd: OrbitCommand) -> bool {
        let before = *self;
        match cmd {
            OrbitCommand::StepLongitude(delta) => {
                self.longitude =
                    (self.longitude + delta).clamp(LONGITUDE_RANGE.0, LONGITUDE_RANGE.1);
            }
            OrbitCommand::StepLatitude(delta) => {
                self.latitude = (self.latitude + delta).clamp(LATITUDE_RANGE.0, LATITUDE_RANGE.1);
            }
            OrbitCommand::Set {
                longitude,
                latitude,
            } => {
                self.longitude = longitude.clamp(LONGITUDE_RANGE.0, LONGITUDE_RANGE.1);
                self.latitude = latitude.clamp(LATITUDE_RANGE.0, LATITUDE_RANGE.1);
            }
        }
        *self != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── stepping ──────────────────────────────────────────────────────────

    #[test]
    fn longitude_steps_by_one() {
        let mut s = AngleState::default();
        assert!(s.apply(OrbitCommand::StepLongitude(1)));
        assert_eq!(s.longitude, 1);
    }

    #[test]
    fn longitude_clamps_at_upper_bound() {
        let mut s = AngleState {
            longitude: 360,
            latitude: 0,
        };
        assert!(!s.apply(OrbitCommand::StepLongitude(1)));
        assert_eq!(s.longitude, 360);
    }

    #[test]
    fn longitude_clamps_at_zero() {
        let mut s = AngleState::default();
        assert!(!s.apply(OrbitCommand::StepLongitude(-1)));
        assert_eq!(s.longitude, 0);
    }

    #[test]
    fn latitude_clamps_at_both_poles() {
        let mut s = AngleState {
            longitude: 0,
            latitude: 90,
        };
        assert!(!s.apply(OrbitCommand::StepLatitude(1)));
        assert_eq!(s.latitude, 90);

        s.latitude = -90;
        assert!(!s.apply(OrbitCommand::StepLatitude(-1)));
        assert_eq!(s.latitude, -90);
    }

    #[test]
    fn stepping_east_370_times_saturates_at_360() {
        let mut s = AngleState::default();
        for _ in 0..370 {
            s.apply(OrbitCommand::StepLongitude(1));
        }
        assert_eq!(s.longitude, 360);
    }

    // ── absolute set ──────────────────────────────────────────────────────

    #[test]
    fn set_round_trips_in_range_values() {
        let mut s = AngleState::default();
        assert!(s.apply(OrbitCommand::Set {
            longitude: 90,
            latitude: -45,
        }));
        assert_eq!((s.longitude, s.latitude), (90, -45));
    }

    #[test]
    fn set_clamps_out_of_range_values() {
        let mut s = AngleState::default();
        s.apply(OrbitCommand::Set {
            longitude: 500,
            latitude: -180,
        });
        assert_eq!((s.longitude, s.latitude), (360, -90));
    }

    #[test]
    fn unchanged_set_reports_no_change() {
        let mut s = AngleState {
            longitude: 10,
            latitude: 20,
        };
        assert!(!s.apply(OrbitCommand::Set {
            longitude: 10,
            latitude: 20,
        }));
    }
}
