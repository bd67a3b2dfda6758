//! Keyframe animation for position markers.
//!
//! A track moves one [`Position`] through a list of keyframes. Time is a
//! relative offset from the start of the view (0 = view start). The
//! position's own placement is the implicit pose at time 0, so a track whose
//! first keyframe is later than 0 eases out of the resting placement.
//!
//! Sampling is piecewise linear; rotation takes the shortest arc.

use serde::{Deserialize, Serialize};

use crate::entities::Position;
use crate::error::DomainError;
use crate::ids::PositionId;

/// One discrete pose on a track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f64,
    pub x: f64,
    pub y: f64,
    /// Missing rotation keeps the previous facing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl Keyframe {
    pub fn new(time: f64, x: f64, y: f64) -> Self {
        Self {
            time,
            x,
            y,
            rotation: None,
        }
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }
}

/// Movement timeline of a single position within one view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationTrack {
    pub position_id: PositionId,
    #[serde(default)]
    pub keyframes: Vec<Keyframe>,
}

/// A sampled placement of a marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    /// Degrees in `[0, 360)`
    pub rotation: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, rotation: f64) -> Self {
        Self {
            x,
            y,
            rotation: rotation.rem_euclid(360.0),
        }
    }

    /// The resting pose of a position.
    pub fn of(position: &Position) -> Self {
        Self::new(position.x, position.y, position.rotation)
    }
}

impl AnimationTrack {
    /// Create a track; keyframes are put in ascending time order.
    pub fn new(position_id: PositionId, mut keyframes: Vec<Keyframe>) -> Self {
        keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self {
            position_id,
            keyframes,
        }
    }

    /// Time of the last keyframe, or 0 for an empty track.
    pub fn duration(&self) -> f64 {
        self.keyframes.last().map_or(0.0, |k| k.time)
    }

    /// Check keyframe ordering and numeric sanity.
    pub fn validate_keyframes(&self) -> Result<(), DomainError> {
        let mut previous = 0.0_f64;
        for keyframe in &self.keyframes {
            let finite = keyframe.time.is_finite()
                && keyframe.x.is_finite()
                && keyframe.y.is_finite()
                && keyframe.rotation.map_or(true, f64::is_finite);
            if !finite {
                return Err(DomainError::validation(format!(
                    "Animation for position {} has a non-finite keyframe",
                    self.position_id
                )));
            }
            if keyframe.time < previous {
                return Err(DomainError::validation(format!(
                    "Animation keyframes for position {} must be in ascending time order (time {} follows {})",
                    self.position_id, keyframe.time, previous
                )));
            }
            previous = keyframe.time;
        }
        Ok(())
    }

    /// Sample the pose at `time`, starting from the `rest` pose at time 0.
    ///
    /// Times before 0 clamp to 0; times after the last keyframe hold it.
    pub fn sample(&self, time: f64, rest: Pose) -> Pose {
        let Some(first) = self.keyframes.first() else {
            return rest;
        };
        let t = time.max(0.0);

        if t < first.time {
            let factor = t / first.time;
            return interpolate(rest, self.pose_at(0, rest), factor);
        }

        let next = self.keyframes.partition_point(|k| k.time <= t);
        if next == self.keyframes.len() {
            return self.pose_at(next - 1, rest);
        }

        let (from, to) = (&self.keyframes[next - 1], &self.keyframes[next]);
        let factor = (t - from.time) / (to.time - from.time);
        interpolate(self.pose_at(next - 1, rest), self.pose_at(next, rest), factor)
    }

    /// Pose at keyframe `index`, resolving an inherited rotation.
    fn pose_at(&self, index: usize, rest: Pose) -> Pose {
        let keyframe = &self.keyframes[index];
        let rotation = self.keyframes[..=index]
            .iter()
            .rev()
            .find_map(|k| k.rotation)
            .unwrap_or(rest.rotation);
        Pose::new(keyframe.x, keyframe.y, rotation)
    }
}

fn interpolate(from: Pose, to: Pose, factor: f64) -> Pose {
    let delta = (to.rotation - from.rotation + 180.0).rem_euclid(360.0) - 180.0;
    Pose::new(
        from.x + (to.x - from.x) * factor,
        from.y + (to.y - from.y) * factor,
        from.rotation + delta * factor,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_pose(actual: Pose, x: f64, y: f64, rotation: f64) {
        assert!((actual.x - x).abs() < EPS, "x: {} != {}", actual.x, x);
        assert!((actual.y - y).abs() < EPS, "y: {} != {}", actual.y, y);
        assert!(
            (actual.rotation - rotation).abs() < EPS,
            "rotation: {} != {}",
            actual.rotation,
            rotation
        );
    }

    fn track(keyframes: Vec<Keyframe>) -> AnimationTrack {
        AnimationTrack::new(PositionId::parse("p1").unwrap(), keyframes)
    }

    mod sampling {
        use super::*;

        #[test]
        fn empty_track_stays_at_rest() {
            let rest = Pose::new(0.3, 0.4, 90.0);
            assert_eq!(track(vec![]).sample(5.0, rest), rest);
        }

        #[test]
        fn eases_out_of_rest_before_first_keyframe() {
            let rest = Pose::new(0.0, 0.0, 0.0);
            let track = track(vec![Keyframe::new(2.0, 1.0, 0.5)]);
            assert_pose(track.sample(1.0, rest), 0.5, 0.25, 0.0);
        }

        #[test]
        fn interpolates_between_keyframes() {
            let rest = Pose::new(0.0, 0.0, 0.0);
            let track = track(vec![
                Keyframe::new(0.0, 0.0, 0.0),
                Keyframe::new(1.0, 1.0, 0.0),
                Keyframe::new(3.0, 1.0, 1.0),
            ]);
            assert_pose(track.sample(0.5, rest), 0.5, 0.0, 0.0);
            assert_pose(track.sample(2.0, rest), 1.0, 0.5, 0.0);
        }

        #[test]
        fn clamps_outside_the_timeline() {
            let rest = Pose::new(0.0, 0.0, 0.0);
            let track = track(vec![
                Keyframe::new(0.0, 0.2, 0.2),
                Keyframe::new(1.0, 0.8, 0.8),
            ]);
            assert_pose(track.sample(-3.0, rest), 0.2, 0.2, 0.0);
            assert_pose(track.sample(10.0, rest), 0.8, 0.8, 0.0);
        }

        #[test]
        fn coincident_keyframes_jump_to_the_later_one() {
            let rest = Pose::new(0.0, 0.0, 0.0);
            let track = track(vec![
                Keyframe::new(1.0, 0.0, 0.0),
                Keyframe::new(1.0, 0.5, 0.5),
                Keyframe::new(2.0, 1.0, 1.0),
            ]);
            assert_pose(track.sample(1.0, rest), 0.5, 0.5, 0.0);
        }

        #[test]
        fn rotation_takes_the_shortest_arc() {
            let rest = Pose::new(0.0, 0.0, 350.0);
            let track = track(vec![
                Keyframe::new(0.0, 0.0, 0.0),
                Keyframe::new(1.0, 0.0, 0.0).with_rotation(10.0),
            ]);
            assert_pose(track.sample(0.5, rest), 0.0, 0.0, 0.0);
        }

        #[test]
        fn missing_rotation_is_inherited() {
            let rest = Pose::new(0.0, 0.0, 45.0);
            let track = track(vec![
                Keyframe::new(1.0, 0.0, 0.0).with_rotation(90.0),
                Keyframe::new(2.0, 1.0, 0.0),
            ]);
            assert_pose(track.sample(2.0, rest), 1.0, 0.0, 90.0);
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn new_sorts_keyframes() {
            let track = track(vec![Keyframe::new(2.0, 0.0, 0.0), Keyframe::new(1.0, 0.0, 0.0)]);
            assert_eq!(track.keyframes[0].time, 1.0);
            assert_eq!(track.duration(), 2.0);
            assert!(track.validate_keyframes().is_ok());
        }

        #[test]
        fn rejects_descending_times() {
            let mut track = track(vec![]);
            track.keyframes = vec![Keyframe::new(2.0, 0.0, 0.0), Keyframe::new(1.0, 0.0, 0.0)];
            assert!(matches!(
                track.validate_keyframes(),
                Err(DomainError::Validation(_))
            ));
        }

        #[test]
        fn rejects_negative_and_non_finite_times() {
            let negative = track(vec![Keyframe::new(-1.0, 0.0, 0.0)]);
            assert!(negative.validate_keyframes().is_err());

            let nan = AnimationTrack {
                position_id: PositionId::parse("p1").unwrap(),
                keyframes: vec![Keyframe::new(f64::NAN, 0.0, 0.0)],
            };
            assert!(nan.validate_keyframes().is_err());
        }
    }
}
