// SPDX-License-Identifier: MPL-2.0
pub mod spinner;

pub use spinner::{Spinner, SpinnerState};
