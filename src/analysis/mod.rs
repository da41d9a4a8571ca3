//! The reasoning engine: domain, range, intercepts, and point evaluation
//! over a validated expression, each producing a summary plus an ordered
//! trace of steps. Stages are independent; one stage degrading to a
//! fallback never stops the others.

mod domain;
mod evaluate;
mod format;
mod intersect;
mod range;
mod restriction;
mod trace;

pub use domain::*;
pub use evaluate::*;
pub use format::*;
pub use intersect::*;
pub use range::*;
pub use restriction::*;
pub use trace::*;
