pub mod candidates;
pub mod horizon;
pub mod intent;
pub mod parser;
pub mod resolver;

pub use intent::{Intent, IntentPredicate, IntentRule, IntentRules};
pub use parser::{ParsedQuery, QueryParser};
pub use resolver::{NameResolver, Resolution};
