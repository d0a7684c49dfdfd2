pub mod outline_ops;
pub mod search;
pub mod visibility;
