//! Blending operators.
//!
//! Outside their blend band every operator runs only the single populator on
//! that side and returns its result untouched, so the extremes are exactly
//! equal to the unblended case. Inside the band both sides run and their
//! heights are interpolated; the tag switches at the band's split point.

use crate::cell::Cell;
use crate::math::{clamp01, curve3, lerp};
use crate::populator::{Control, Populator};

/// Run `lower` then `upper` into `cell` and ease between their heights.
///
/// `control` must lie within `[min, max]` and `min < max`.
#[allow(clippy::too_many_arguments)]
fn blend_pair(
    cell: &mut Cell,
    x: f32,
    z: f32,
    control: f32,
    lower: &Populator,
    upper: &Populator,
    min: f32,
    max: f32,
    split: f32,
) {
    lower.apply(cell, x, z);
    let lower_value = cell.value;
    let lower_tag = cell.tag;

    upper.apply(cell, x, z);
    let alpha = curve3(clamp01((control - min) / (max - min)));
    cell.value = clamp01(lerp(lower_value, cell.value, alpha));
    if control < split {
        cell.tag = lower_tag;
    }
}

fn ordered(min: f32, max: f32) -> (f32, f32) {
    if max > min {
        (min, max)
    } else {
        (min, min + f32::EPSILON)
    }
}

/// Two-way blend on a control value.
pub struct Blender {
    control: Control,
    lower: Populator,
    upper: Populator,
    min: f32,
    max: f32,
    split: f32,
}

impl Blender {
    /// `split` is clamped into `[min, max]`.
    pub fn new(
        control: Control,
        lower: Populator,
        upper: Populator,
        min: f32,
        max: f32,
        split: f32,
    ) -> Self {
        let (min, max) = ordered(min, max);
        Self {
            control,
            lower,
            upper,
            min,
            max,
            split: split.clamp(min, max),
        }
    }

    pub fn apply(&self, cell: &mut Cell, x: f32, z: f32) {
        let control = self.control.value(cell, x, z);
        if control < self.min {
            self.lower.apply(cell, x, z);
        } else if control > self.max {
            self.upper.apply(cell, x, z);
        } else {
            blend_pair(
                cell,
                x,
                z,
                control,
                &self.lower,
                &self.upper,
                self.min,
                self.max,
                self.split,
            );
        }
    }

    pub fn tag(&self, cell: &mut Cell, x: f32, z: f32) {
        if self.control.value(cell, x, z) < self.split {
            self.lower.tag(cell, x, z);
        } else {
            self.upper.tag(cell, x, z);
        }
    }
}

impl From<Blender> for Populator {
    fn from(blender: Blender) -> Self {
        Populator::Blend(Box::new(blender))
    }
}

/// Three-way blend across two adjacent bands `[min, mid]` and `[mid, max]`.
pub struct MultiBlender {
    control: Control,
    lower: Populator,
    middle: Populator,
    upper: Populator,
    min: f32,
    mid: f32,
    max: f32,
}

impl MultiBlender {
    pub fn new(
        control: Control,
        lower: Populator,
        middle: Populator,
        upper: Populator,
        min: f32,
        mid: f32,
        max: f32,
    ) -> Self {
        let (min, mid) = ordered(min, mid);
        let (mid, max) = ordered(mid, max);
        Self {
            control,
            lower,
            middle,
            upper,
            min,
            mid,
            max,
        }
    }

    pub fn apply(&self, cell: &mut Cell, x: f32, z: f32) {
        let control = self.control.value(cell, x, z);
        if control < self.min {
            self.lower.apply(cell, x, z);
        } else if control > self.max {
            self.upper.apply(cell, x, z);
        } else if control < self.mid {
            blend_pair(
                cell,
                x,
                z,
                control,
                &self.lower,
                &self.middle,
                self.min,
                self.mid,
                (self.min + self.mid) * 0.5,
            );
        } else {
            blend_pair(
                cell,
                x,
                z,
                control,
                &self.middle,
                &self.upper,
                self.mid,
                self.max,
                (self.mid + self.max) * 0.5,
            );
        }
    }

    pub fn tag(&self, cell: &mut Cell, x: f32, z: f32) {
        let control = self.control.value(cell, x, z);
        if control < (self.min + self.mid) * 0.5 {
            self.lower.tag(cell, x, z);
        } else if control < (self.mid + self.max) * 0.5 {
            self.middle.tag(cell, x, z);
        } else {
            self.upper.tag(cell, x, z);
        }
    }
}

impl From<MultiBlender> for Populator {
    fn from(blender: MultiBlender) -> Self {
        Populator::MultiBlend(Box::new(blender))
    }
}

/// Linear interpolation weighted directly by a control in `[0, 1]`.
pub struct Lerp {
    control: Control,
    lower: Populator,
    upper: Populator,
}

impl Lerp {
    pub fn new(control: Control, lower: Populator, upper: Populator) -> Self {
        Self {
            control,
            lower,
            upper,
        }
    }

    pub fn apply(&self, cell: &mut Cell, x: f32, z: f32) {
        let t = clamp01(self.control.value(cell, x, z));
        if t <= 0.0 {
            self.lower.apply(cell, x, z);
            return;
        }
        if t >= 1.0 {
            self.upper.apply(cell, x, z);
            return;
        }

        self.lower.apply(cell, x, z);
        let lower_value = cell.value;
        let lower_tag = cell.tag;

        self.upper.apply(cell, x, z);
        cell.value = clamp01(lerp(lower_value, cell.value, t));
        if t < 0.5 {
            cell.tag = lower_tag;
        }
    }

    pub fn tag(&self, cell: &mut Cell, x: f32, z: f32) {
        if self.control.value(cell, x, z) < 0.5 {
            self.lower.tag(cell, x, z);
        } else {
            self.upper.tag(cell, x, z);
        }
    }
}

impl From<Lerp> for Populator {
    fn from(lerp: Lerp) -> Self {
        Populator::Lerp(Box::new(lerp))
    }
}
