//! Advisory bounds metadata for scalar attributes.
//!
//! Core setters never clamp. Editors consult the policy to decide whether a
//! slider may leave `[vmin, vmax]`.

/// Which side(s) of `[vmin, vmax]` an editor should respect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsPolicy {
    /// Free value; `vmin`/`vmax` only size the editor.
    None,
    LowerOnly,
    UpperOnly,
    #[default]
    Both,
}

impl BoundsPolicy {
    pub fn has_lower(self) -> bool {
        matches!(self, Self::LowerOnly | Self::Both)
    }

    pub fn has_upper(self) -> bool {
        matches!(self, Self::UpperOnly | Self::Both)
    }

    /// Whether `value` satisfies the enforced side(s).
    pub fn check<T: PartialOrd>(self, value: T, vmin: T, vmax: T) -> bool {
        !(self.has_lower() && value < vmin) && !(self.has_upper() && value > vmax)
    }

    /// Clamp `value` on the enforced side(s) only.
    pub fn clamp<T: PartialOrd>(self, value: T, vmin: T, vmax: T) -> T {
        if self.has_lower() && value < vmin {
            vmin
        } else if self.has_upper() && value > vmax {
            vmax
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_respects_each_policy() {
        assert!(BoundsPolicy::None.check(-5.0, 0.0, 1.0));
        assert!(BoundsPolicy::None.check(5.0, 0.0, 1.0));

        assert!(!BoundsPolicy::LowerOnly.check(-5.0, 0.0, 1.0));
        assert!(BoundsPolicy::LowerOnly.check(5.0, 0.0, 1.0));

        assert!(BoundsPolicy::UpperOnly.check(-5.0, 0.0, 1.0));
        assert!(!BoundsPolicy::UpperOnly.check(5.0, 0.0, 1.0));

        assert!(!BoundsPolicy::Both.check(-5, 0, 1));
        assert!(!BoundsPolicy::Both.check(5, 0, 1));
        assert!(BoundsPolicy::Both.check(1, 0, 1));
    }

    #[test]
    fn clamp_only_touches_enforced_side() {
        assert_eq!(BoundsPolicy::LowerOnly.clamp(-2, 0, 10), 0);
        assert_eq!(BoundsPolicy::LowerOnly.clamp(20, 0, 10), 20);
        assert_eq!(BoundsPolicy::UpperOnly.clamp(20, 0, 10), 10);
        assert_eq!(BoundsPolicy::UpperOnly.clamp(-2, 0, 10), -2);
        assert_eq!(BoundsPolicy::Both.clamp(20, 0, 10), 10);
        assert_eq!(BoundsPolicy::None.clamp(20, 0, 10), 20);
    }
}
