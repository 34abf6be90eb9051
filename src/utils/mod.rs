//! Cross-cutting helpers.
//!
//! Currently holds the conditional parallelism layer that lets the geometric loops run on Rayon
//! when the `parallel` feature is enabled and serially otherwise.

pub(crate) mod parallel;
