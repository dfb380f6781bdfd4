//! Orientation classification for six-face accelerometer calibration
//!
//! Maps a resting accelerometer vector to the vehicle face that points toward
//! gravity. A face is only reported when one axis strictly dominates the other
//! two; ties and near-diagonal poses classify as [`OrientationFace::Unknown`].

use libm::fabsf;
use nalgebra::Vector3;

/// Sensor axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Select this axis' component from a vector
    #[inline]
    pub fn component(self, v: &Vector3<f32>) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}

/// Sign of the dominant axis for a face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

/// Axis and polarity a face's gravity reading is captured on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureTarget {
    pub axis: Axis,
    pub polarity: Polarity,
}

/// Vehicle face resting downward, as seen by the accelerometer
///
/// `Unknown` is a valid classifier output but never a calibratable face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationFace {
    Front,
    Back,
    Up,
    Down,
    Left,
    Right,
    Unknown,
}

impl OrientationFace {
    /// The six calibratable faces, in session slot order
    pub const CALIBRATABLE: [OrientationFace; 6] = [
        OrientationFace::Front,
        OrientationFace::Back,
        OrientationFace::Up,
        OrientationFace::Down,
        OrientationFace::Left,
        OrientationFace::Right,
    ];

    /// Session slot of a calibratable face, `None` for `Unknown`
    pub fn slot(self) -> Option<usize> {
        match self {
            OrientationFace::Front => Some(0),
            OrientationFace::Back => Some(1),
            OrientationFace::Up => Some(2),
            OrientationFace::Down => Some(3),
            OrientationFace::Left => Some(4),
            OrientationFace::Right => Some(5),
            OrientationFace::Unknown => None,
        }
    }

    /// Axis and polarity captured for this face, `None` for `Unknown`
    pub fn capture_target(self) -> Option<CaptureTarget> {
        let (axis, polarity) = match self {
            OrientationFace::Front => (Axis::X, Polarity::Negative),
            OrientationFace::Back => (Axis::X, Polarity::Positive),
            OrientationFace::Up => (Axis::Z, Polarity::Positive),
            OrientationFace::Down => (Axis::Z, Polarity::Negative),
            OrientationFace::Left => (Axis::Y, Polarity::Positive),
            OrientationFace::Right => (Axis::Y, Polarity::Negative),
            OrientationFace::Unknown => return None,
        };
        Some(CaptureTarget { axis, polarity })
    }

    /// Lower-case name used in operator messages
    pub fn as_str(self) -> &'static str {
        match self {
            OrientationFace::Front => "front",
            OrientationFace::Back => "back",
            OrientationFace::Up => "up",
            OrientationFace::Down => "down",
            OrientationFace::Left => "left",
            OrientationFace::Right => "right",
            OrientationFace::Unknown => "unknown",
        }
    }
}

/// Classify which face is resting downward
///
/// The axis whose magnitude is strictly greater than both others selects the
/// face pair; its sign picks the face:
///
/// | Dominant axis | negative | non-negative |
/// |---|---|---|
/// | X | Front | Back |
/// | Y | Right | Left |
/// | Z | Down | Up |
///
/// Any tie (including all-zero and NaN input) yields `Unknown`.
pub fn classify_orientation(accel: &Vector3<f32>) -> OrientationFace {
    let (x, y, z) = (fabsf(accel.x), fabsf(accel.y), fabsf(accel.z));

    if x > y && x > z {
        if accel.x < 0.0 {
            OrientationFace::Front
        } else {
            OrientationFace::Back
        }
    } else if y > x && y > z {
        if accel.y < 0.0 {
            OrientationFace::Right
        } else {
            OrientationFace::Left
        }
    } else if z > x && z > y {
        if accel.z < 0.0 {
            OrientationFace::Down
        } else {
            OrientationFace::Up
        }
    } else {
        OrientationFace::Unknown
    }
}
