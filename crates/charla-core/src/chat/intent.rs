//! Keyword-triggered canned replies.
//!
//! A flat lookup table: the first rule with a keyword contained in the
//! lowercased message wins. Rules are checked in configuration order.

use charla_types::config::IntentRule;

#[derive(Debug, Clone, Default)]
pub struct IntentTable {
    rules: Vec<IntentRule>,
}

impl IntentTable {
    pub fn new(rules: &[IntentRule]) -> Self {
        let rules = rules
            .iter()
            .map(|r| IntentRule {
                name: r.name.clone(),
                keywords: r.keywords.iter().map(|k| k.to_lowercase()).collect(),
                reply: r.reply.clone(),
            })
            .collect();
        Self { rules }
    }

    /// The rule matching `message`, if any.
    pub fn match_message(&self, message: &str) -> Option<&IntentRule> {
        let message = message.to_lowercase();
        self.rules
            .iter()
            .find(|r| r.keywords.iter().any(|k| message.contains(k.as_str())))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charla_types::config::CharlaConfig;

    fn table() -> IntentTable {
        IntentTable::new(&CharlaConfig::default().intents)
    }

    #[test]
    fn greeting_matches_case_insensitively() {
        let intents = table();
        let rule = intents.match_message("HOLA, ¿qué tal?").unwrap();
        assert_eq!(rule.name, "saluda");
    }

    #[test]
    fn weather_matches_substring() {
        assert_eq!(table().match_message("¿Qué tiempo hace?").unwrap().name, "tiempo");
        assert_eq!(table().match_message("dime el clima").unwrap().name, "tiempo");
    }

    #[test]
    fn first_rule_wins() {
        assert_eq!(table().match_message("hola, ¿y el tiempo?").unwrap().name, "saluda");
    }

    #[test]
    fn unrelated_message_does_not_match() {
        assert!(table().match_message("explícame la arquitectura gótica").is_none());
        assert!(table().match_message("").is_none());
    }

    #[test]
    fn keywords_are_normalized() {
        let t = IntentTable::new(&[IntentRule {
            name: "ping".into(),
            keywords: vec!["PING".into()],
            reply: "pong".into(),
        }]);
        assert_eq!(t.match_message("ping?").unwrap().reply, "pong");
    }
}
