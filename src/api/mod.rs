pub mod frankfurter_client;
pub mod gemini_client;
pub mod serper_client;

pub use frankfurter_client::{FrankfurterClient, RateProvider, HISTORY_WINDOW_DAYS};
pub use gemini_client::GeminiClient;
pub use serper_client::SerperClient;
