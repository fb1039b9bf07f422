use crate::{error::Error, geometry::Point};
use bitvec::{bitvec, prelude::BitVec};
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Body landmarks in the order a pose model emits them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, num_derive::FromPrimitive)]
pub enum KeypointKind {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

pub const NUM_KEYPOINTS: usize = 17;

impl KeypointKind {
    #[inline]
    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn from_idx(index: usize) -> Result<Self, Error> {
        Self::from_usize(index).ok_or(Error::ConvertUSizeToKeypointKind(index))
    }

    /// Iterate over every kind in index order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..NUM_KEYPOINTS).filter_map(Self::from_usize)
    }
}

/// A single detected landmark and the model's confidence in it.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawKeypoint", into = "RawKeypoint")]
pub struct Keypoint {
    pub point: Point,
    pub score: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, score: f32) -> Result<Self, Error> {
        Ok(Self {
            point: Point::new(x, y)?,
            score,
        })
    }

    /// Whether the landmark is confident enough to take part in a check.
    #[inline]
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.score > threshold
    }
}

#[derive(Serialize, Deserialize)]
struct RawKeypoint {
    x: f32,
    y: f32,
    #[serde(alias = "confidence")]
    score: f32,
}

impl TryFrom<RawKeypoint> for Keypoint {
    type Error = Error;

    fn try_from(RawKeypoint { x, y, score }: RawKeypoint) -> Result<Self, Self::Error> {
        Self::new(x, y, score)
    }
}

impl From<Keypoint> for RawKeypoint {
    fn from(Keypoint { point, score }: Keypoint) -> Self {
        Self {
            x: point.x(),
            y: point.y(),
            score,
        }
    }
}

pub type Keypoints = [Keypoint; NUM_KEYPOINTS];

/// A full set of landmarks for one frame, indexed by [`KeypointKind`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Pose {
    keypoints: Keypoints,
}

impl Pose {
    pub fn new(keypoints: Keypoints) -> Self {
        Self { keypoints }
    }

    #[inline]
    pub fn get(&self, kind: KeypointKind) -> &Keypoint {
        &self.keypoints[kind.idx()]
    }

    #[inline]
    pub fn point(&self, kind: KeypointKind) -> Point {
        self.get(kind).point
    }

    pub fn keypoints(&self) -> &Keypoints {
        &self.keypoints
    }

    /// One bit per keypoint, set when its score exceeds `threshold`.
    pub fn visibility(&self, threshold: f32) -> BitVec {
        let mut mask = bitvec![0; NUM_KEYPOINTS];
        self.keypoints
            .iter()
            .enumerate()
            .for_each(|(i, keypoint)| mask.set(i, keypoint.is_visible(threshold)));
        mask
    }

    pub fn all_visible(&self, kinds: &[KeypointKind], threshold: f32) -> bool {
        let visible = self.visibility(threshold);
        kinds.iter().all(|&kind| visible[kind.idx()])
    }
}

impl std::ops::Index<KeypointKind> for Pose {
    type Output = Keypoint;

    fn index(&self, kind: KeypointKind) -> &Self::Output {
        self.get(kind)
    }
}

impl TryFrom<&[Keypoint]> for Pose {
    type Error = Error;

    /// Take the first [`NUM_KEYPOINTS`] keypoints; anything after them is ignored.
    fn try_from(keypoints: &[Keypoint]) -> Result<Self, Self::Error> {
        let got = keypoints.len();
        let head = keypoints
            .get(..NUM_KEYPOINTS)
            .ok_or(Error::InsufficientKeypoints {
                expected: NUM_KEYPOINTS,
                got,
            })?;
        let keypoints: Keypoints = head.try_into().map_err(|_| Error::InsufficientKeypoints {
            expected: NUM_KEYPOINTS,
            got,
        })?;
        Ok(Self::new(keypoints))
    }
}

/// Read a JSON array of keypoints (`[{"x": .., "y": .., "score": ..}, ..]`).
///
/// The array may hold any number of keypoints; length is checked when a
/// [`Pose`] is built from it.
pub fn read_keypoints<R>(reader: R) -> Result<Vec<Keypoint>, Error>
where
    R: std::io::Read,
{
    serde_json::from_reader(reader).map_err(Error::ParseKeypoints)
}
