// Re-export model modules
mod currencies;
mod exchange_rates;

pub use currencies::*;
pub use exchange_rates::*;
