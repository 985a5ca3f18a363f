use super::Vec3;

/// Axis-aligned bounding box.
///
/// Invariant: `min <= max` on every axis. [`BoundingBox::new`] sorts the
/// corners so callers may pass them in any order.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawBox"))]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Box of the given footprint standing on `feet`, centred on x and z.
    pub fn around_feet(feet: Vec3, width: f64, height: f64) -> Self {
        let half = width / 2.0;
        Self::new(
            Vec3::new(feet.x - half, feet.y, feet.z - half),
            Vec3::new(feet.x + half, feet.y + height, feet.z + half),
        )
    }

    /// Grows the box by `margin` on every side.
    ///
    /// Negative margins shrink it; an axis that would invert collapses to its
    /// centre instead.
    #[must_use]
    pub fn expand(self, margin: f64) -> Self {
        let grow = Vec3::new(margin, margin, margin);
        let min = self.min - grow;
        let max = self.max + grow;
        let center = self.center();

        let fix = |lo: f64, hi: f64, mid: f64| if lo > hi { (mid, mid) } else { (lo, hi) };
        let (min_x, max_x) = fix(min.x, max.x, center.x);
        let (min_y, max_y) = fix(min.y, max.y, center.y);
        let (min_z, max_z) = fix(min.z, max.z, center.z);

        Self {
            min: Vec3::new(min_x, min_y, min_z),
            max: Vec3::new(max_x, max_y, max_z),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.min.lerp(self.max, 0.5)
    }

    pub fn contains(&self, point: Vec3) -> bool {
        (self.min.x..=self.max.x).contains(&point.x)
            && (self.min.y..=self.max.y).contains(&point.y)
            && (self.min.z..=self.max.z).contains(&point.z)
    }

    /// Closest point on or inside the box to `point`.
    pub fn nearest_point(&self, point: Vec3) -> Vec3 {
        nearest_point(point, self)
    }
}

/// Clamps each axis of `point` into the box independently.
///
/// Exact for axis-aligned boxes: points inside are returned unchanged,
/// points outside on all three axes land on a corner.
pub fn nearest_point(point: Vec3, bounds: &BoundingBox) -> Vec3 {
    let mut axes = point.to_array();
    let mins = bounds.min.to_array();
    let maxs = bounds.max.to_array();

    for (axis, (lo, hi)) in axes.iter_mut().zip(mins.into_iter().zip(maxs)) {
        // clamp() panics on inverted or NaN bounds
        *axis = axis.max(lo).min(hi);
    }

    Vec3::from_array(axes)
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBox {
    min: Vec3,
    max: Vec3,
}

#[cfg(feature = "serde")]
impl From<RawBox> for BoundingBox {
    fn from(raw: RawBox) -> Self {
        Self::new(raw.min, raw.max)
    }
}
