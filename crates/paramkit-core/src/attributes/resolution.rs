//! Width × height pair with optional power-of-two snapping and aspect-ratio lock.
//!
//! Edits resolve the edited dimension first, then derive the other one from
//! the stored aspect ratio. Snapping direction follows the edit: a growing edit
//! rounds up, a shrinking (or unchanged) edit rounds down.

use serde_json::json;

use crate::document::{read_bool, read_i32, Fields};
use crate::error::AttrResult;

/// Snap `value` to a power of two.
///
/// `value <= 0` gives 1. Otherwise `lower` is the largest power of two
/// `<= value` and the result is `2 * lower` when `round_up`, else `lower`.
/// An exact power of two still doubles when rounding up. `2^30` is the largest
/// power of two an `i32` holds, so rounding up saturates there.
pub fn make_power_of_two(value: i32, round_up: bool) -> i32 {
    if value <= 0 {
        return 1;
    }
    let lower = 1i32 << (31 - value.leading_zeros());
    if round_up {
        lower.checked_mul(2).unwrap_or(lower)
    } else {
        lower
    }
}

pub fn is_power_of_two(value: i32) -> bool {
    value > 0 && (value & (value - 1)) == 0
}

/// Snap a dimension derived through the aspect ratio. An exact power of two is
/// kept as is; otherwise the direction follows the change from `previous`.
fn snap_derived(value: i32, previous: i32) -> i32 {
    if is_power_of_two(value) {
        value
    } else {
        make_power_of_two(value, value > previous)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionAttr {
    width: i32,
    height: i32,
    keep_aspect_ratio: bool,
    power_of_two: bool,
    aspect_ratio: f32,
}

impl ResolutionAttr {
    /// Dimensions are clamped to at least 1; with `power_of_two` both snap down.
    pub fn new(width: i32, height: i32, keep_aspect_ratio: bool, power_of_two: bool) -> Self {
        let mut out = Self {
            width: width.max(1),
            height: height.max(1),
            keep_aspect_ratio,
            power_of_two,
            aspect_ratio: 1.0,
        };
        if power_of_two {
            out.width = make_power_of_two(out.width, false);
            out.height = make_power_of_two(out.height, false);
        }
        out.update_aspect_ratio();
        out
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn keep_aspect_ratio(&self) -> bool {
        self.keep_aspect_ratio
    }

    pub fn power_of_two(&self) -> bool {
        self.power_of_two
    }

    pub fn set_width(&mut self, width: i32) {
        let mut w = width;
        if self.power_of_two {
            w = make_power_of_two(w, w > self.width);
        }
        self.width = w.max(1);

        if self.keep_aspect_ratio {
            let mut h = (self.width as f32 / self.aspect_ratio).round() as i32;
            if self.power_of_two {
                h = snap_derived(h, self.height);
            }
            self.height = h.max(1);
        }
        self.update_aspect_ratio();
    }

    pub fn set_height(&mut self, height: i32) {
        let mut h = height;
        if self.power_of_two {
            h = make_power_of_two(h, h > self.height);
        }
        self.height = h.max(1);

        if self.keep_aspect_ratio {
            let mut w = (self.height as f32 * self.aspect_ratio).round() as i32;
            if self.power_of_two {
                w = snap_derived(w, self.width);
            }
            self.width = w.max(1);
        }
        self.update_aspect_ratio();
    }

    pub fn set_keep_aspect_ratio(&mut self, keep: bool) {
        self.keep_aspect_ratio = keep;
    }

    /// Turning snapping on rounds both dimensions down.
    pub fn set_power_of_two(&mut self, power_of_two: bool) {
        self.power_of_two = power_of_two;
        if power_of_two {
            self.width = make_power_of_two(self.width, false);
            self.height = make_power_of_two(self.height, false);
            self.update_aspect_ratio();
        }
    }

    fn update_aspect_ratio(&mut self) {
        self.aspect_ratio = self.width as f32 / self.height as f32;
    }

    pub(crate) fn write_fields(&self, doc: &mut Fields) {
        doc.insert("width".into(), json!(self.width));
        doc.insert("height".into(), json!(self.height));
        doc.insert("keep_aspect_ratio".into(), json!(self.keep_aspect_ratio));
        doc.insert("power_of_two".into(), json!(self.power_of_two));
    }

    pub(crate) fn read_fields(&mut self, doc: &Fields) -> AttrResult<()> {
        let width = read_i32(doc, "width")?;
        let height = read_i32(doc, "height")?;
        let keep_aspect_ratio = read_bool(doc, "keep_aspect_ratio")?;
        let power_of_two = read_bool(doc, "power_of_two")?;
        self.width = width.max(1);
        self.height = height.max(1);
        self.keep_aspect_ratio = keep_aspect_ratio;
        self.power_of_two = power_of_two;
        self.update_aspect_ratio();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_of_two_rounding() {
        assert_eq!(make_power_of_two(0, true), 1);
        assert_eq!(make_power_of_two(-7, false), 1);
        assert_eq!(make_power_of_two(1, false), 1);
        assert_eq!(make_power_of_two(1, true), 2);
        assert_eq!(make_power_of_two(300, false), 256);
        assert_eq!(make_power_of_two(300, true), 512);
        assert_eq!(make_power_of_two(256, false), 256);
        assert_eq!(make_power_of_two(256, true), 512);
        assert_eq!(make_power_of_two(i32::MAX, false), 1 << 30);
    }

    #[test]
    fn rounding_up_saturates_at_largest_power() {
        assert_eq!(make_power_of_two((1 << 30) + 5, true), 1 << 30);
        assert_eq!(make_power_of_two(i32::MAX, true), 1 << 30);
        assert_eq!(make_power_of_two(1 << 29, true), 1 << 30);

        let mut r = ResolutionAttr::new(1024, 1024, false, true);
        r.set_width((1 << 30) + 5);
        assert_eq!(r.width(), 1 << 30);
        assert!(is_power_of_two(r.width()));
        r.set_height(i32::MAX);
        assert!(is_power_of_two(r.height()));
    }

    #[test]
    fn construction_snaps_down() {
        let r = ResolutionAttr::new(300, 200, false, true);
        assert_eq!((r.width(), r.height()), (256, 128));
        assert_eq!(r.aspect_ratio(), 2.0);

        let r = ResolutionAttr::new(0, -5, false, false);
        assert_eq!((r.width(), r.height()), (1, 1));
    }

    #[test]
    fn growing_edit_rounds_up() {
        let mut r = ResolutionAttr::new(300, 200, false, true);
        r.set_width(300);
        assert_eq!(r.width(), 512);
        assert_eq!(r.height(), 128);
        assert_eq!(r.aspect_ratio(), 4.0);
    }

    #[test]
    fn shrinking_edit_rounds_down() {
        let mut r = ResolutionAttr::new(512, 512, false, true);
        r.set_height(300);
        assert_eq!(r.height(), 256);
    }

    #[test]
    fn aspect_lock_derives_height_from_ratio() {
        let mut r = ResolutionAttr::new(300, 200, true, true);
        assert_eq!(r.aspect_ratio(), 2.0);
        r.set_width(300);
        assert_eq!(r.width(), 512);
        assert_eq!(r.height(), 256);
        assert_eq!(r.aspect_ratio(), 2.0);
    }

    #[test]
    fn aspect_lock_without_snapping() {
        let mut r = ResolutionAttr::new(1600, 900, true, false);
        r.set_width(800);
        assert_eq!(r.height(), 450);
        r.set_height(90);
        assert_eq!(r.width(), 160);
        assert!((r.width() as f32 / r.height() as f32 - 16.0 / 9.0).abs() < 0.02);
    }

    #[test]
    fn snapped_dimensions_stay_powers_of_two() {
        let mut r = ResolutionAttr::new(640, 480, true, true);
        for edit in [1000, 3, 77, 2048, 129, 1, 5000, 640] {
            r.set_width(edit);
            assert!(is_power_of_two(r.width()), "width {}", r.width());
            assert!(is_power_of_two(r.height()), "height {}", r.height());
            r.set_height(edit / 2);
            assert!(is_power_of_two(r.width()), "width {}", r.width());
            assert!(is_power_of_two(r.height()), "height {}", r.height());
        }
    }

    #[test]
    fn aspect_lock_error_is_one_rounding_step() {
        let mut r = ResolutionAttr::new(1920, 1080, true, false);
        for edit in [1000, 37, 2500, 641, 333] {
            let aspect = r.aspect_ratio();
            r.set_width(edit);
            let exact = r.width() as f32 / aspect;
            assert!((r.height() as f32 - exact).abs() <= 0.5, "{}x{}", r.width(), r.height());

            let aspect = r.aspect_ratio();
            r.set_height(edit / 3);
            let exact = r.height() as f32 * aspect;
            assert!((r.width() as f32 - exact).abs() <= 0.5, "{}x{}", r.width(), r.height());
        }
    }

    #[test]
    fn dimensions_never_drop_below_one() {
        let mut r = ResolutionAttr::new(64, 64, true, false);
        r.set_width(-20);
        assert_eq!(r.width(), 1);
        assert_eq!(r.height(), 1);
    }
}
