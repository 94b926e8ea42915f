//! Power domain and reset line control
//!
//! The receiver does not own its power domain or reset controller; the
//! platform supplies them through [`PowerControl`]. Standby sequencing
//! (which of these steps a variant needs) lives in the receiver.

/// Power-domain and reset-controller primitives for one receiver
pub trait PowerControl {
    /// Take a runtime power reference (power the block up if needed)
    fn power_get(&mut self);

    /// Drop a runtime power reference
    fn power_put(&mut self);

    /// Hold the receiver in reset
    fn reset_assert(&mut self);

    /// Release the receiver from reset
    fn reset_deassert(&mut self);
}

impl<P: PowerControl + ?Sized> PowerControl for &mut P {
    fn power_get(&mut self) {
        (**self).power_get();
    }

    fn power_put(&mut self) {
        (**self).power_put();
    }

    fn reset_assert(&mut self) {
        (**self).reset_assert();
    }

    fn reset_deassert(&mut self) {
        (**self).reset_deassert();
    }
}

/// Power control for platforms where the block is always on
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysOn;

impl PowerControl for AlwaysOn {
    fn power_get(&mut self) {}

    fn power_put(&mut self) {}

    fn reset_assert(&mut self) {}

    fn reset_deassert(&mut self) {}
}
