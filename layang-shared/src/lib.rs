pub mod money;

pub use money::{format_rupiah, parse_rupiah};
