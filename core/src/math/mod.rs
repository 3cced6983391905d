pub mod geodesy;
pub mod similarity;

pub use similarity::token_sort_ratio;
