//! Korean Exchange Implementations
//!
//! 한국 거래소 구현체

mod bithumb;

pub use bithumb::Bithumb;
