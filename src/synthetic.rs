//! Stand-in keypoints for demos and tests when no pose model is available.

use crate::{
    error::Error,
    pose::{Keypoint, NUM_KEYPOINTS},
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Frame position the synthetic figure is drawn around.
pub const CENTER: (f32, f32) = (200.0, 300.0);

/// Offsets of each keypoint from [`CENTER`], in keypoint order.
const TEMPLATE: [(f32, f32); NUM_KEYPOINTS] = [
    (0.0, -80.0),
    (-20.0, -70.0),
    (20.0, -70.0),
    (-30.0, -60.0),
    (30.0, -60.0),
    (-40.0, -20.0),
    (40.0, -20.0),
    (-50.0, 20.0),
    (50.0, 20.0),
    (-60.0, 60.0),
    (60.0, 60.0),
    (-30.0, 40.0),
    (30.0, 40.0),
    (-40.0, 100.0),
    (40.0, 100.0),
    (-50.0, 160.0),
    (50.0, 160.0),
];

/// Largest shift applied to a template point, in either direction.
const MAX_VARIATION: f32 = 10.0;
const MIN_SCORE: f32 = 0.6;
const MAX_SCORE: f32 = 1.0;

/// Generate one frame of keypoints from the template.
///
/// Each point is shifted by a single uniform offset in `[-10, 10)` applied
/// to both axes and gets a confidence in `[0.6, 1.0)`.
pub fn generate_keypoints<R>(rng: &mut R) -> Result<Vec<Keypoint>, Error>
where
    R: Rng,
{
    let (center_x, center_y) = CENTER;
    TEMPLATE
        .iter()
        .map(|&(dx, dy)| {
            let variation = rng.gen_range(-MAX_VARIATION..MAX_VARIATION);
            let score = rng.gen_range(MIN_SCORE..MAX_SCORE);
            Keypoint::new(center_x + dx + variation, center_y + dy + variation, score)
        })
        .collect()
}

/// An endless, reproducible stream of synthetic frames.
pub struct SyntheticSource {
    rng: StdRng,
}

impl SyntheticSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Iterator for SyntheticSource {
    type Item = Result<Vec<Keypoint>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(generate_keypoints(&mut self.rng))
    }
}
