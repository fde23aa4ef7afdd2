use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Declarative continuation predicate attached to a gating question.
///
/// The predicate is evaluated against the id of the option the user picked.
/// When it evaluates to `false` the flow completes as disqualified instead of
/// advancing to the next question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ContinueRule {
    OptionIn { options: Vec<String> },
    OptionNotIn { options: Vec<String> },
    All { rules: Vec<ContinueRule> },
    Any { rules: Vec<ContinueRule> },
    Not { rule: Box<ContinueRule> },
}

impl ContinueRule {
    /// Continue only when the chosen option is one of `options`.
    pub fn option_in<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ContinueRule::OptionIn {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Continue unless the chosen option is one of `options`.
    pub fn option_not_in<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ContinueRule::OptionNotIn {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` when the flow may continue after `option_id` was chosen.
    pub fn permits(&self, option_id: &str) -> bool {
        match self {
            ContinueRule::OptionIn { options } => options.iter().any(|id| id == option_id),
            ContinueRule::OptionNotIn { options } => !options.iter().any(|id| id == option_id),
            ContinueRule::All { rules } => rules.iter().all(|rule| rule.permits(option_id)),
            ContinueRule::Any { rules } => rules.iter().any(|rule| rule.permits(option_id)),
            ContinueRule::Not { rule } => !rule.permits(option_id),
        }
    }

    /// Every option id named anywhere inside the rule, in declaration order.
    pub fn referenced_options(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_options(&mut out);
        out
    }

    fn collect_options<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            ContinueRule::OptionIn { options } | ContinueRule::OptionNotIn { options } => {
                out.extend(options.iter().map(String::as_str));
            }
            ContinueRule::All { rules } | ContinueRule::Any { rules } => {
                for rule in rules {
                    rule.collect_options(out);
                }
            }
            ContinueRule::Not { rule } => rule.collect_options(out),
        }
    }
}
