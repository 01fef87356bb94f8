//! Abstract number input.
//!
//! [`NumberInput`] owns a bounded arbitrary-precision integer value and the
//! value-changed events; a concrete widget embeds it and maps text entry,
//! spinner buttons or drag gestures onto it. Values are `BigInt`, so the
//! range is limited only by the optional min/max bounds; 64-bit accessors
//! saturate.
//!
//! Every change fires four parallel slots carrying the value as a decimal
//! string, a `BigInt`, an `i64` and a `u64`, each paired with a `committed`
//! flag the host passes through. Editing widgets use it to distinguish
//! keystroke-by-keystroke updates from a confirmed entry.

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};

use crate::event::Slot;

/// A clamped integer value with change events.
#[derive(Default)]
pub struct NumberInput {
    /// The current value. Always within the bounds.
    value: BigInt,
    /// Lower bound, if any.
    min: Option<BigInt>,
    /// Upper bound, if any.
    max: Option<BigInt>,
    /// Increment step; 1 when unset.
    step: Option<BigInt>,
    /// Fires with the decimal string form.
    pub on_value_changed_string: Slot<(String, bool)>,
    /// Fires with the full-precision value.
    pub on_value_changed_big_int: Slot<(BigInt, bool)>,
    /// Fires with the value saturated to `i64`.
    pub on_value_changed_i64: Slot<(i64, bool)>,
    /// Fires with the value saturated to `u64`; negative values give 0.
    pub on_value_changed_u64: Slot<(u64, bool)>,
}

impl NumberInput {
    /// A zero value with no bounds and no step.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value. Clamps to the bounds first; a clamped-to-unchanged
    /// value does not fire. Returns true iff the stored value changed.
    pub fn set(&mut self, value: impl Into<BigInt>, committed: bool) -> bool {
        self.apply(value.into(), false, committed)
    }

    /// Set the value, firing the events even when the clamped value equals
    /// the stored one. Returns true iff the stored value changed.
    pub fn force_set(&mut self, value: impl Into<BigInt>, committed: bool) -> bool {
        self.apply(value.into(), true, committed)
    }

    /// Clamp, store and fire.
    fn apply(&mut self, value: BigInt, force: bool, committed: bool) -> bool {
        let value = self.clamp(value);
        let changed = value != self.value;
        if !changed && !force {
            return false;
        }
        self.value = value;
        self.on_value_changed_string
            .emit((self.value_string(), committed));
        self.on_value_changed_big_int
            .emit((self.value.clone(), committed));
        self.on_value_changed_i64.emit((self.value_i64(), committed));
        self.on_value_changed_u64.emit((self.value_u64(), committed));
        changed
    }

    /// Move `value` to the nearest bound when outside.
    fn clamp(&self, value: BigInt) -> BigInt {
        if let Some(min) = &self.min {
            if value < *min {
                return min.clone();
            }
        }
        if let Some(max) = &self.max {
            if value > *max {
                return max.clone();
            }
        }
        value
    }

    /// Set or clear the lower bound, re-clamping the current value. A
    /// re-clamp that moves the value fires as a committed change.
    pub fn set_min(&mut self, min: Option<BigInt>) {
        self.min = min;
        self.apply(self.value.clone(), false, true);
    }

    /// Set or clear the upper bound, re-clamping the current value. A
    /// re-clamp that moves the value fires as a committed change.
    pub fn set_max(&mut self, max: Option<BigInt>) {
        self.max = max;
        self.apply(self.value.clone(), false, true);
    }

    /// Set or clear the increment step. The current value is not re-aligned.
    pub fn set_step(&mut self, step: Option<BigInt>) {
        self.step = step;
    }

    /// The lower bound, if any.
    pub fn min(&self) -> Option<&BigInt> {
        self.min.as_ref()
    }

    /// The upper bound, if any.
    pub fn max(&self) -> Option<&BigInt> {
        self.max.as_ref()
    }

    /// The increment step, if any.
    pub fn step(&self) -> Option<&BigInt> {
        self.step.as_ref()
    }

    /// Parse `text` as a base-10 integer and set the value. Leading and
    /// trailing whitespace is trimmed and full-width and typographic sign
    /// and digit characters are normalized first. Unparseable text is
    /// silently ignored.
    pub fn set_string(&mut self, text: &str, force: bool, committed: bool) {
        let normalized = normalize_numeric(text.trim());
        if let Ok(value) = normalized.parse::<BigInt>() {
            self.apply(value, force, committed);
        }
    }

    /// Add the step (1 when unset) to the value, clamping. Fires even when
    /// clamping leaves the value unchanged.
    pub fn increment(&mut self) {
        let step = self.step.clone().unwrap_or_else(|| BigInt::from(1));
        self.apply(&self.value + step, true, true);
    }

    /// Subtract the step (1 when unset) from the value, clamping. Fires even
    /// when clamping leaves the value unchanged.
    pub fn decrement(&mut self) {
        let step = self.step.clone().unwrap_or_else(|| BigInt::from(1));
        self.apply(&self.value - step, true, true);
    }

    /// The value's position within the bounds as `(value−min)/(max−min)`,
    /// in `[0, 1]`. NaN when either bound is unset or the range is zero.
    pub fn rate(&self) -> f64 {
        let (Some(min), Some(max)) = (&self.min, &self.max) else {
            return f64::NAN;
        };
        let num = (&self.value - min).to_f64().unwrap_or(f64::NAN);
        let den = (max - min).to_f64().unwrap_or(f64::NAN);
        num / den
    }

    /// True when incrementing can still raise the value.
    pub fn can_increment(&self) -> bool {
        self.max.as_ref().is_none_or(|max| self.value < *max)
    }

    /// True when decrementing can still lower the value.
    pub fn can_decrement(&self) -> bool {
        self.min.as_ref().is_none_or(|min| self.value > *min)
    }

    /// The current value.
    pub fn value(&self) -> &BigInt {
        &self.value
    }

    /// The current value in decimal.
    pub fn value_string(&self) -> String {
        self.value.to_string()
    }

    /// The current value saturated to `i64`.
    pub fn value_i64(&self) -> i64 {
        self.value.to_i64().unwrap_or_else(|| {
            if self.value.is_negative() {
                i64::MIN
            } else {
                i64::MAX
            }
        })
    }

    /// The current value saturated to `u64`; negative values give 0.
    pub fn value_u64(&self) -> u64 {
        if self.value.is_negative() {
            return 0;
        }
        self.value.to_u64().unwrap_or(u64::MAX)
    }
}

impl std::fmt::Debug for NumberInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumberInput")
            .field("value", &self.value)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("step", &self.step)
            .finish()
    }
}

/// Replace full-width and typographic sign and digit characters with their
/// ASCII equivalents.
fn normalize_numeric(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2212}' | '\u{FE63}' | '\u{FF0D}' => '-',
            '\u{FE62}' | '\u{FF0B}' => '+',
            '\u{FF10}'..='\u{FF19}' => {
                char::from(b'0' + (u32::from(c) - 0xFF10) as u8)
            }
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn stepping_clamps_at_the_bounds() {
        let mut input = NumberInput::new();
        input.set_min(Some(BigInt::from(-10)));
        input.set_max(Some(BigInt::from(10)));
        input.set_step(Some(BigInt::from(3)));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        input
            .on_value_changed_i64
            .bind(move |(v, _)| log.borrow_mut().push(v));

        for _ in 0..4 {
            input.increment();
        }
        assert_eq!(*seen.borrow(), vec![3, 6, 9, 10]);
        assert!(!input.can_increment());
        assert!(input.can_decrement());

        // At the bound a forced step still fires, value pinned.
        input.increment();
        assert_eq!(seen.borrow().last(), Some(&10));
        assert_eq!(input.value_i64(), 10);
    }

    #[test]
    fn set_skips_events_when_unchanged() {
        let mut input = NumberInput::new();
        let fired = Rc::new(RefCell::new(0));
        let log = Rc::clone(&fired);
        input.on_value_changed_string.bind(move |_| *log.borrow_mut() += 1);

        assert!(input.set(5, true));
        assert!(!input.set(5, true));
        assert_eq!(*fired.borrow(), 1);
        assert!(!input.force_set(5, true));
        assert_eq!(*fired.borrow(), 2);
    }

    #[test]
    fn tightening_a_bound_re_clamps() {
        let mut input = NumberInput::new();
        input.set(42, true);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        input
            .on_value_changed_big_int
            .bind(move |(v, committed)| log.borrow_mut().push((v, committed)));

        input.set_max(Some(BigInt::from(30)));
        assert_eq!(*seen.borrow(), vec![(BigInt::from(30), true)]);
        input.set_min(Some(BigInt::from(35)));
        assert_eq!(input.value(), &BigInt::from(35));
    }

    #[test]
    fn parses_normalized_text() {
        let mut input = NumberInput::new();
        input.set_string("  \u{2212}\u{FF11}\u{FF12}\u{FF13} ", false, true);
        assert_eq!(input.value_string(), "-123");

        input.set_string("\u{FF0B}\u{FF14}\u{FF15}", false, true);
        assert_eq!(input.value_i64(), 45);

        // Garbage leaves the value alone.
        input.set_string("12abc", false, true);
        assert_eq!(input.value_i64(), 45);
        input.set_string("", false, true);
        assert_eq!(input.value_i64(), 45);
    }

    #[test]
    fn rate_is_nan_without_both_bounds() {
        let mut input = NumberInput::new();
        assert!(input.rate().is_nan());
        input.set_min(Some(BigInt::from(0)));
        assert!(input.rate().is_nan());
        input.set_max(Some(BigInt::from(10)));
        input.set(5, true);
        assert!((input.rate() - 0.5).abs() < 1e-9);

        // Zero-width range.
        input.set_max(Some(BigInt::from(0)));
        assert!(input.rate().is_nan());
    }

    #[test]
    fn accessors_saturate() {
        let mut input = NumberInput::new();
        let huge: BigInt = BigInt::from(u64::MAX) * 16;
        input.set(huge.clone(), true);
        assert_eq!(input.value_i64(), i64::MAX);
        assert_eq!(input.value_u64(), u64::MAX);
        assert_eq!(input.value(), &huge);

        input.set(-huge, true);
        assert_eq!(input.value_i64(), i64::MIN);
        assert_eq!(input.value_u64(), 0);
    }

    #[test]
    fn string_slot_carries_decimal_form() {
        let mut input = NumberInput::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        input
            .on_value_changed_string
            .bind(move |(s, committed)| log.borrow_mut().push((s, committed)));

        input.set(-7, false);
        input.set(0, true);
        assert_eq!(
            *seen.borrow(),
            vec![("-7".to_string(), false), ("0".to_string(), true)]
        );
    }
}
