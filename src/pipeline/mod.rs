//! Pipeline stages for badge generation.
//!
//! Each submodule implements exactly one transformation step. Keeping the
//! stages separate makes each independently testable and lets us swap an
//! implementation (e.g. a different resampling filter or PDF backend)
//! without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! roster ──▶ resample ──▶ compose
//! (CSV rows)  (headshot    (one PDF page
//!              300x300)     per record)
//! ```
//!
//! 1. [`roster`]   — parse the employee CSV into field-name → value records
//! 2. [`resample`] — decode and Lanczos-resize one headshot to the fixed
//!    target resolution, entirely in memory
//! 3. [`compose`]  — draw background, photo, and name onto one page of the
//!    shared document

pub mod compose;
pub mod resample;
pub mod roster;
