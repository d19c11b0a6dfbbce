//! Name-pattern rules for models without an exact preset.
//!
//! The cascade is an ordered table of `(pattern, effect)` pairs, evaluated
//! first match wins, so the order stays auditable and each rule can be
//! tested in isolation. Substring checks are case-sensitive and run on the
//! raw model name, never a normalized form.

use super::settings::EditFormat;

/// Field values in effect before any rule or preset applies.
#[derive(Debug, Clone)]
pub struct ProfileDefaults {
    pub edit_format: EditFormat,
    pub use_repo_map: bool,
    pub send_undo_reply: bool,
    pub accepts_images: bool,
    pub weak_model_name: Option<String>,
    pub max_chat_history_tokens: usize,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            edit_format: EditFormat::Whole,
            use_repo_map: false,
            send_undo_reply: false,
            accepts_images: false,
            weak_model_name: None,
            max_chat_history_tokens: 1024,
        }
    }
}

/// Fields a matched rule overrides.
#[derive(Debug, Clone, Copy)]
pub struct RuleEffect {
    pub edit_format: EditFormat,
    pub use_repo_map: bool,
    pub send_undo_reply: bool,
}

/// One cascade rule.
///
/// `groups` is a disjunction of conjunctions: the rule matches when the
/// name contains every substring of at least one group.
#[derive(Debug)]
pub struct NameRule {
    pub groups: &'static [&'static [&'static str]],
    pub effect: RuleEffect,
}

impl NameRule {
    pub fn matches(&self, name: &str) -> bool {
        self.groups
            .iter()
            .any(|group| group.iter().all(|sub| name.contains(sub)))
    }
}

/// The cascade, in evaluation order.
pub const NAME_RULES: &[NameRule] = &[
    NameRule {
        groups: &[&["llama3", "70b"]],
        effect: RuleEffect {
            edit_format: EditFormat::Diff,
            use_repo_map: true,
            send_undo_reply: true,
        },
    },
    NameRule {
        groups: &[&["gpt-4-turbo"], &["gpt-4-", "-preview"]],
        effect: RuleEffect {
            edit_format: EditFormat::Udiff,
            use_repo_map: true,
            send_undo_reply: true,
        },
    },
    NameRule {
        groups: &[&["gpt-4"], &["claude-2"], &["claude-3-opus"]],
        effect: RuleEffect {
            edit_format: EditFormat::Diff,
            use_repo_map: true,
            send_undo_reply: true,
        },
    },
];

/// First rule matching `name`, if any.
pub fn match_rule(name: &str) -> Option<&'static NameRule> {
    NAME_RULES.iter().find(|rule| rule.matches(name))
}
