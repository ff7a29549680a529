//! Compiled rule sets for two-pass dispatch.
//!
//! `RuleOptions` from the configuration are compiled once at build start
//! into `Rule`s holding real regexes. Within a pass the first matching rule
//! wins; a rule whose `exclude` matches never applies, even when `test`
//! matches.

use lade_config::{BuildOptions, ConfigError, RuleOptions};
use regex::Regex;
use serde_json::Value;

use crate::Result;

/// One step of a rule's transformer chain.
#[derive(Debug, Clone)]
pub struct TransformStep {
    /// Transformer name resolved against the registry
    pub transformer: String,

    /// Options forwarded to the transformer on every invocation
    pub options: Value,
}

/// A compiled transformation rule.
#[derive(Debug, Clone)]
pub struct Rule {
    test: Regex,
    exclude: Option<Regex>,
    steps: Vec<TransformStep>,
}

impl Rule {
    /// Compile a declarative rule.
    pub fn compile(options: &RuleOptions) -> Result<Self> {
        let test = compile_pattern(&options.test)?;
        let exclude = options
            .exclude
            .as_deref()
            .map(compile_pattern)
            .transpose()?;

        let steps = options
            .transformer_chain()
            .into_iter()
            .map(|name| TransformStep {
                transformer: name.to_string(),
                options: options.options.clone(),
            })
            .collect();

        Ok(Self {
            test,
            exclude,
            steps,
        })
    }

    /// Whether this rule applies to the given specifier.
    ///
    /// `exclude` takes precedence: a specifier it matches never applies.
    pub fn matches(&self, specifier: &str) -> bool {
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(specifier) {
                return false;
            }
        }
        self.test.is_match(specifier)
    }

    /// Chain steps in execution order.
    pub fn steps(&self) -> &[TransformStep] {
        &self.steps
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| {
        ConfigError::BadPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

/// The two rule-evaluation stages applied to each asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Pre,
    Main,
}

/// Both compiled rule lists of a build.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    pre: Vec<Rule>,
    main: Vec<Rule>,
}

impl RuleSet {
    /// Compile both passes from the build configuration.
    pub fn compile(options: &BuildOptions) -> Result<Self> {
        let pre = options
            .pre_rules
            .iter()
            .map(Rule::compile)
            .collect::<Result<Vec<_>>>()?;
        let main = options
            .rules
            .iter()
            .map(Rule::compile)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { pre, main })
    }

    /// First matching rule of a pass, if any. No fallthrough: the caller
    /// applies exactly this rule or none.
    pub fn first_match(&self, pass: Pass, specifier: &str) -> Option<&Rule> {
        let rules = match pass {
            Pass::Pre => &self.pre,
            Pass::Main => &self.main,
        };
        rules.iter().find(|rule| rule.matches(specifier))
    }

    /// Every compiled rule across both passes.
    pub fn all(&self) -> impl Iterator<Item = &Rule> {
        self.pre.iter().chain(self.main.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(test: &str, transformer: &str) -> Rule {
        Rule::compile(&RuleOptions::new(test, transformer)).unwrap()
    }

    #[test]
    fn rule_matches_test_pattern() {
        let rule = rule(r"\.css$", "css");
        assert!(rule.matches("styles/main.css"));
        assert!(!rule.matches("app.js"));
    }

    #[test]
    fn exclude_takes_precedence_over_test() {
        let rule = Rule::compile(
            &RuleOptions::new(r"\.js$", "es2015").exclude("node_modules"),
        )
        .unwrap();
        assert!(rule.matches("app.js"));
        assert!(!rule.matches("node_modules/lib.js"));
    }

    #[test]
    fn first_match_wins_within_a_pass() {
        let options = BuildOptions::default()
            .with_rule(RuleOptions::new(r"\.js$|\.tag$", "es2015"))
            .with_rule(RuleOptions::new(r"\.tag$", "never-reached"));
        let rules = RuleSet::compile(&options).unwrap();

        let rule = rules.first_match(Pass::Main, "widget.tag").unwrap();
        assert_eq!(rule.steps()[0].transformer, "es2015");
    }

    #[test]
    fn passes_are_independent() {
        let options = BuildOptions::default()
            .with_pre_rule(RuleOptions::new(r"\.tag$", "tag"))
            .with_rule(RuleOptions::new(r"\.css$", "css"));
        let rules = RuleSet::compile(&options).unwrap();

        assert!(rules.first_match(Pass::Pre, "widget.tag").is_some());
        assert!(rules.first_match(Pass::Main, "widget.tag").is_none());
        assert!(rules.first_match(Pass::Pre, "main.css").is_none());
        assert!(rules.first_match(Pass::Main, "main.css").is_some());
    }

    #[test]
    fn bad_pattern_is_a_compile_error() {
        let options = BuildOptions::default().with_rule(RuleOptions::new(r"[", "css"));
        assert!(RuleSet::compile(&options).is_err());
    }

    #[test]
    fn chain_steps_share_rule_options() {
        let rule = Rule::compile(
            &RuleOptions::new(r"\.css$", "style!css")
                .options(serde_json::json!({ "sourceMap": false })),
        )
        .unwrap();
        assert_eq!(rule.steps().len(), 2);
        assert_eq!(rule.steps()[0].transformer, "css");
        assert_eq!(rule.steps()[1].transformer, "style");
        assert_eq!(rule.steps()[0].options, rule.steps()[1].options);
    }
}
