//! Concrete ring kinds.
//!
//! | Kind | Element | Flags | Zero test |
//! |------|---------|-------|-----------|
//! | [`Nmod`] | `u64` residue in `[0, n)` | `FINITE`, `EXACT` | always decided |
//! | [`RationalField`] | `BigRational` | `EXACT` | always decided |
//! | [`BallRing`] | [`Ball`] (midpoint, radius) | none | undecided when the ball straddles zero |
//!
//! Each kind implements [`Ring`](crate::Ring) once; wrap it in a
//! [`GrCtx`](crate::GrCtx) to use it with the generic vector and matrix code.

pub mod ball;
pub mod nmod;
pub mod rational;

pub use ball::{Ball, BallRing};
pub use nmod::Nmod;
pub use rational::RationalField;
