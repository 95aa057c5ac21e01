pub mod distribution;
pub mod page_index;
pub mod parser;
pub mod summary;

pub use distribution::ChangeDistribution;
pub use page_index::{PageIndex, PAGE_BREAK};
pub use parser::{parse_diff, DiffOp, LineChange};
pub use summary::DiffSummary;
