pub mod archive;
pub mod content;
pub mod filter;
pub mod page;
pub mod sort;
pub mod status;
pub mod tier;
