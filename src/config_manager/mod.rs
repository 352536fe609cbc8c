pub mod main;
pub mod stateless_llm;
pub mod system;
pub mod utils;

pub use main::Config;
pub use stateless_llm::StatelessLLMConfig;
pub use system::{ConsoleConfig, SystemConfig};
