pub mod exchange_host;
pub mod fixer;
pub mod util;

pub use exchange_host::ExchangeHostProvider;
pub use fixer::FixerProvider;
