//! Foreign Exchange Implementations
//!
//! 해외 거래소 구현체

mod huobi;

pub use huobi::Huobi;
