//! Text tools module.

pub mod letter_counter;

pub use letter_counter::{LetterCounterParams, LetterCounterTool, count_occurrences};
