pub mod rules;

pub use rules::{Rule, RuleEngine, RuleMatch, RuleSet, FALLBACK_RULE};
