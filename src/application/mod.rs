//! Application layer: the two pages of the manual payment flow and the workflow
//! that moves between them.
//!
//! `CheckoutPage` drives method selection and proof submission, `StatusPage` shows the
//! verification status, and `Workflow` mounts one or the other from a `Route`.

pub mod checkout;
pub mod navigation;
pub mod status;
pub mod workflow;
