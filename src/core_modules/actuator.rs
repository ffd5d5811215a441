// THEORY:
// The pan/tilt head is driven by two 2-byte serial messages per frame: a header byte
// naming the axis followed by a servo angle. The angle is the offset of the tracked
// centroid from the frame centre, added to the 90 degree rest position. Tilt is
// inverted because image rows grow downwards.

use crate::core_modules::tracker::Track;

pub const PAN_HEADER: u8 = 0b1010_1010;
pub const TILT_HEADER: u8 = 0b1101_0101;
pub const REST_ANGLE: i64 = 90;
pub const MAX_ANGLE: i64 = 180;

/// One frame's worth of actuator commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorCommand {
    pub pan: u8,
    pub tilt: u8,
}

impl Default for ActuatorCommand {
    fn default() -> Self {
        Self {
            pan: REST_ANGLE as u8,
            tilt: REST_ANGLE as u8,
        }
    }
}

impl ActuatorCommand {
    /// Aims at the mean of the track midpoints. With no tracks the head rests centred.
    pub fn from_tracks(tracks: &[Track], width: usize, height: usize) -> Self {
        if tracks.is_empty() {
            return Self::default();
        }

        let count = tracks.len() as i64;
        let (sum_x, sum_y) = tracks.iter().fold((0i64, 0i64), |(sx, sy), track| {
            let center = track.bbox.center();
            (sx + center.x as i64, sy + center.y as i64)
        });

        let pan_offset = sum_x / count - width as i64 / 2;
        let tilt_offset = -(sum_y / count - height as i64 / 2);

        Self {
            pan: to_angle(pan_offset),
            tilt: to_angle(tilt_offset),
        }
    }

    /// Serial wire form: `[PAN_HEADER, pan, TILT_HEADER, tilt]`.
    pub fn to_bytes(&self) -> [u8; 4] {
        [PAN_HEADER, self.pan, TILT_HEADER, self.tilt]
    }
}

fn to_angle(offset: i64) -> u8 {
    (offset + REST_ANGLE).clamp(0, MAX_ANGLE) as u8
}
