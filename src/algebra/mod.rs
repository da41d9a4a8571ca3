//! The symbolic-algebra capability the analysis layer is built on:
//! simplification, numeric evaluation, polynomial queries, rational
//! decomposition, equation and inequality solving, factoring, and
//! differentiation over a restricted expression grammar (polynomials,
//! rational functions, logs, radicals, exp, trig, abs).

mod derive;
mod factor;
mod numeric;
mod poly;
mod rational;
mod simplify;
mod solve;

pub use derive::*;
pub use factor::*;
pub use numeric::*;
pub use poly::*;
pub use rational::*;
pub use simplify::*;
pub use solve::*;
