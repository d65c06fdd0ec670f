//! # Cyclic Symbol Model
//!
//! Stems, branches, pillars and the five elements, with the fixed tables
//! that hang off them (palace, noble, moon general, punishment).
//!
//! Design rule: every table here is a `const` or a `match`. Nothing is
//! mutable, nothing is lazily initialized, nothing does I/O.

pub mod element;
pub mod stem;
pub mod branch;
pub mod pillar;

pub use element::{Element, Polarity, generate, overcome};
pub use stem::Stem;
pub use branch::Branch;
pub use pillar::{Pillar, EIGHT_TRANSMISSION_DAYS};
