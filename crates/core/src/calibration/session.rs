//! Per-session face completion tracking
//!
//! Each calibratable face holds an "unset until completed" gravity reading.
//! Once a face is recorded its value is frozen for the rest of the session.

use super::orientation::OrientationFace;

/// Gravity readings for all six faces, in canonical order
///
/// `*_pos` is the reading while the positive axis points along gravity's
/// reaction (sensor reads about +1 g), `*_neg` the opposite face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityReadings {
    pub x_pos: f32,
    pub x_neg: f32,
    pub y_pos: f32,
    pub y_neg: f32,
    pub z_pos: f32,
    pub z_neg: f32,
}

impl GravityReadings {
    /// Values as `(x+, x-, y+, y-, z+, z-)`
    pub fn as_array(&self) -> [f32; 6] {
        [
            self.x_pos, self.x_neg, self.y_pos, self.y_neg, self.z_pos, self.z_neg,
        ]
    }
}

/// Face completion state for one calibration session
#[derive(Debug, Clone, Default)]
pub struct CalibrationSession {
    faces: [Option<f32>; 6],
}

impl CalibrationSession {
    /// Create a session with no face completed
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `face` already has a recorded value (`false` for `Unknown`)
    pub fn is_completed(&self, face: OrientationFace) -> bool {
        self.value(face).is_some()
    }

    /// Recorded value for `face`, if any
    pub fn value(&self, face: OrientationFace) -> Option<f32> {
        face.slot().and_then(|slot| self.faces[slot])
    }

    /// Record the gravity reading for `face`
    ///
    /// Returns `true` if the value was stored. Recording `Unknown` or a face
    /// that is already completed is a no-op and returns `false`.
    pub fn record(&mut self, face: OrientationFace, value: f32) -> bool {
        match face.slot() {
            Some(slot) if self.faces[slot].is_none() => {
                self.faces[slot] = Some(value);
                true
            }
            _ => false,
        }
    }

    /// Number of completed faces
    pub fn completed_count(&self) -> usize {
        self.faces.iter().filter(|f| f.is_some()).count()
    }

    /// True when all six faces are completed
    pub fn is_complete(&self) -> bool {
        self.faces.iter().all(Option::is_some)
    }

    /// All six readings once the session is complete
    pub fn readings(&self) -> Option<GravityReadings> {
        let [front, back, up, down, left, right] = self.faces;
        Some(GravityReadings {
            x_pos: back?,
            x_neg: front?,
            y_pos: left?,
            y_neg: right?,
            z_pos: up?,
            z_neg: down?,
        })
    }
}
