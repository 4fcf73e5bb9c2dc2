pub mod catalog;
pub mod docs;
pub mod evaluate;
pub mod export;
pub mod planner;

pub use catalog::*;
pub use docs::*;
pub use evaluate::{evaluate_all_handler, evaluate_handler};
pub use export::*;
pub use planner::*;
