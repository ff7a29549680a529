//! Two-pass, first-match-wins transformation dispatch.

use tracing::{debug, trace};

use crate::asset::Asset;
use crate::registry::{TransformContext, TransformerRegistry};
use crate::rules::{Pass, RuleSet};
use crate::{Error, Result};

/// What the dispatcher did with one asset.
#[derive(Debug, Clone, Default)]
pub struct DispatchOutcome {
    /// A pre-pass rule matched and ran
    pub pre_matched: bool,

    /// A main-pass rule matched and ran
    pub main_matched: bool,

    /// Transformer names that ran, in execution order
    pub transformers: Vec<String>,
}

impl DispatchOutcome {
    /// Whether any rule applied in either pass.
    pub fn matched(&self) -> bool {
        self.pre_matched || self.main_matched
    }
}

/// Applies the compiled rule set to assets.
///
/// For each asset: the pre pass runs first and its output replaces the asset
/// content, then the main pass runs against the replaced content. Within a
/// pass only the first matching rule applies. Dispatch is deterministic:
/// the same specifier against the same rule sequence always selects the same
/// transformers.
pub struct Dispatcher<'r> {
    rules: RuleSet,
    registry: &'r TransformerRegistry,
}

impl<'r> Dispatcher<'r> {
    pub fn new(rules: RuleSet, registry: &'r TransformerRegistry) -> Self {
        Self { rules, registry }
    }

    /// Run both passes over one asset, mutating its content in place.
    pub fn dispatch(&self, ctx: &mut TransformContext, asset: &mut Asset) -> Result<DispatchOutcome> {
        let mut outcome = DispatchOutcome::default();

        for pass in [Pass::Pre, Pass::Main] {
            let Some(rule) = self.rules.first_match(pass, &asset.specifier) else {
                trace!(specifier = %asset.specifier, ?pass, "no rule matched");
                continue;
            };

            match pass {
                Pass::Pre => outcome.pre_matched = true,
                Pass::Main => outcome.main_matched = true,
            }

            for step in rule.steps() {
                debug!(
                    specifier = %asset.specifier,
                    transformer = %step.transformer,
                    ?pass,
                    "transforming"
                );

                let transformer = self.registry.get(&step.transformer)?;
                let content = std::mem::take(&mut asset.content);
                asset.content = transformer
                    .transform(ctx, asset, content, &step.options)
                    .map_err(|source| Error::Transform {
                        specifier: asset.specifier.clone(),
                        transformer: step.transformer.clone(),
                        source: Box::new(source),
                    })?;

                outcome.transformers.push(step.transformer.clone());
            }
        }

        Ok(outcome)
    }
}
