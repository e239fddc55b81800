//! Common types

mod account;
mod asset;
mod exchange;
mod features;
mod history;
mod order;
mod orderbook;
mod pair;
mod ticker;
mod withdraw;

pub use account::{AccountCurrencyInfo, AccountInfo};
pub use asset::{AssetType, AssetTypes};
pub use exchange::{Exchange, ExchangeId};
pub use features::{Features, FeaturesEnabled, FeaturesSupported, ProtocolFeatures, TradingSupported};
pub use history::{FundHistory, TradeHistory};
pub use order::{
    CancelAllOrdersResponse, ModifyOrder, OpenOrder, OrderCancellation, OrderSide, OrderSubmission,
    OrderType, SubmitOrderResponse,
};
pub use orderbook::{OrderBook, OrderBookEntry};
pub use pair::{find_pair_differences, CurrencyPair, PairFormat};
pub use ticker::Ticker;
pub use withdraw::WithdrawPermissions;
