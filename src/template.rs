//! Prebuilt set-piece run shapes.
//!
//! A template is a fixed offset pattern stamped from a token's position. The
//! set is closed — adding or removing a shape is a compile-time change, and
//! the toolbar iterates [`RunTemplate::ALL`] rather than any string registry.
//!
//! Offsets are written in terms of an `inside` sign pointing from the
//! token's half of the pitch toward the vertical centerline (left half → +x,
//! right half → −x; the centerline counts as left), so one definition yields
//! mirrored left/right behavior. `outside` is its negation.

#[cfg(test)]
#[path = "template_test.rs"]
mod template_test;

use crate::camera::Point;
use crate::consts::PITCH_WIDTH;

/// The available run shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunTemplate {
    /// Sharp angled dart toward the near post.
    NearPost,
    /// Long looping run across to the far post.
    FarPost,
    /// Down toward the byline, then a pull back into the box.
    Cutback,
    /// Around the outside, holding width.
    Overlap,
    /// Short inside jab to drag a marker, then stop.
    Decoy,
}

impl RunTemplate {
    pub const ALL: [RunTemplate; 5] = [
        RunTemplate::NearPost,
        RunTemplate::FarPost,
        RunTemplate::Cutback,
        RunTemplate::Overlap,
        RunTemplate::Decoy,
    ];

    /// Toolbar label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RunTemplate::NearPost => "Near post",
            RunTemplate::FarPost => "Far post",
            RunTemplate::Cutback => "Cutback",
            RunTemplate::Overlap => "Overlap",
            RunTemplate::Decoy => "Decoy",
        }
    }

    /// Waypoints for this shape stamped at `origin`, mirrored toward the
    /// centerline and clamped to the pitch margins.
    #[must_use]
    pub fn waypoints(self, origin: Point) -> Vec<Point> {
        let inside = if origin.x <= PITCH_WIDTH / 2.0 { 1.0 } else { -1.0 };
        let outside = -inside;

        let offsets: Vec<(f64, f64)> = match self {
            RunTemplate::NearPost => vec![(8.0 * inside, -5.0), (14.0 * inside, -12.0)],
            RunTemplate::FarPost => {
                vec![(6.0 * inside, -3.0), (16.0 * inside, -2.0), (26.0 * inside, -9.0)]
            }
            RunTemplate::Cutback => {
                vec![(11.0 * inside, -7.0), (16.0 * inside, -2.0), (13.0 * inside, 5.0)]
            }
            RunTemplate::Overlap => {
                vec![(4.0 * outside, 6.0), (13.0 * outside, 8.0), (21.0 * outside, 4.0)]
            }
            RunTemplate::Decoy => vec![(6.0 * inside, -4.0), (8.0 * inside, -2.0)],
        };

        offsets
            .into_iter()
            .map(|(dx, dy)| Point::new(origin.x + dx, origin.y + dy).clamped_to_pitch())
            .collect()
    }
}
