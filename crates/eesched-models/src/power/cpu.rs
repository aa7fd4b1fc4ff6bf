//! CPU power model trait.

use dyn_clone::{clone_trait_object, DynClone};

/// A model for estimating the power consumption of CPU based on its current operating frequency.
pub trait CpuPowerModel: DynClone {
    /// Returns CPU power consumption in relative units.
    ///
    /// CPU frequency is passed as a float in relative units,
    /// where 1.0 corresponds to the unit (reference) frequency.
    fn power(&self, frequency: f64) -> f64;
}

clone_trait_object!(CpuPowerModel);
