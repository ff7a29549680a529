//! Build orchestration: discover assets, dispatch rules, assemble the
//! bundle and write the output directory.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use lade_config::{BuildOptions, ConfigError};

use crate::asset::{specifier_for, Asset};
use crate::dispatch::Dispatcher;
use crate::emit::write_output;
use crate::plugins::{instantiate_plugins, EmitContext};
use crate::registry::{TransformContext, TransformerRegistry};
use crate::rules::RuleSet;
use crate::{Error, Result};

/// What a finished build produced.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    /// Number of modules concatenated into the bundle
    pub modules: usize,

    /// Number of files written to the output directory
    pub files: usize,

    /// Path of the written bundle
    pub bundle_path: PathBuf,

    /// Path of the generated HTML page, when the html plugin ran
    pub html_path: Option<PathBuf>,
}

/// Run a build with the built-in transformers.
pub fn build(options: &BuildOptions, root: &Path) -> Result<BuildSummary> {
    build_with_registry(options, root, &TransformerRegistry::with_builtins())
}

/// Run a build with a caller-provided transformer registry.
///
/// Use this to register external transformers (template compilers,
/// transpilers) on top of [`TransformerRegistry::with_builtins`].
pub fn build_with_registry(
    options: &BuildOptions,
    root: &Path,
    registry: &TransformerRegistry,
) -> Result<BuildSummary> {
    let context_dir = root.join(&options.context);
    let output_dir = root.join(&options.output.dir);

    let rules = RuleSet::compile(options)?;
    verify_transformers(&rules, registry)?;
    let plugins = instantiate_plugins(&options.plugins)?;

    // Entry specifiers, normalized the same way discovered assets are.
    let entries: Vec<String> = options
        .entries
        .iter()
        .map(|e| specifier_for(Path::new(e)))
        .collect();

    let mut assets = crate::walk::collect_assets(&context_dir, &output_dir)?;
    info!(
        assets = assets.len(),
        context = %context_dir.display(),
        "source tree collected"
    );

    for entry in &entries {
        if !assets.iter().any(|a| &a.specifier == entry) {
            return Err(Error::Config(ConfigError::EntryNotFound {
                path: context_dir.join(entry),
            }));
        }
    }

    let mut ctx = TransformContext::new(options.output.public_path.clone());
    let dispatcher = Dispatcher::new(rules, registry);

    // Matched non-entry assets become bundle modules alongside the entries.
    let mut matched: BTreeSet<String> = BTreeSet::new();
    for asset in &mut assets {
        let outcome = dispatcher.dispatch(&mut ctx, asset)?;
        if outcome.matched() {
            matched.insert(asset.specifier.clone());
        }
    }

    let bundle = assemble_bundle(&assets, &matched, &entries, &plugins.bundle_preludes());
    let modules = entries.len() + matched.iter().filter(|s| !entries.contains(*s)).count();

    let bundle_url = ctx.public_url(&options.output.filename);
    let mut files = vec![crate::asset::EmittedFile {
        filename: options.output.filename.clone(),
        content: bundle.into_bytes(),
    }];
    files.extend(ctx.take_emitted());

    let emit_ctx = EmitContext {
        context_dir: context_dir.clone(),
        bundle_url,
    };
    let plugin_files = plugins.emit_all(&emit_ctx)?;
    let html_path = plugin_files
        .iter()
        .find(|f| f.filename.ends_with(".html"))
        .map(|f| output_dir.join(&f.filename));
    files.extend(plugin_files);

    write_output(&files, &output_dir, true)?;
    info!(
        modules,
        files = files.len(),
        output = %output_dir.display(),
        "build complete"
    );

    Ok(BuildSummary {
        modules,
        files: files.len(),
        bundle_path: output_dir.join(&options.output.filename),
        html_path,
    })
}

/// Fail fast when a rule names a transformer the registry lacks.
fn verify_transformers(rules: &RuleSet, registry: &TransformerRegistry) -> Result<()> {
    for rule in rules.all() {
        for step in rule.steps() {
            if !registry.contains(&step.transformer) {
                return Err(Error::UnknownTransformer {
                    name: step.transformer.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Concatenate the bundle: plugin preludes, matched non-entry modules in
/// specifier order, then the entries in declared order.
fn assemble_bundle(
    assets: &[Asset],
    matched: &BTreeSet<String>,
    entries: &[String],
    preludes: &[String],
) -> String {
    let mut bundle = String::new();

    for prelude in preludes {
        bundle.push_str(prelude);
        if !prelude.ends_with('\n') {
            bundle.push('\n');
        }
    }

    let mut append = |asset: &Asset| {
        debug!(specifier = %asset.specifier, "bundling module");
        bundle.push_str(&format!("// module: {}\n", asset.specifier));
        bundle.push_str(&String::from_utf8_lossy(&asset.content));
        if !asset.content.ends_with(b"\n") {
            bundle.push('\n');
        }
    };

    // Assets arrive sorted by specifier, so matched non-entries keep that
    // order without re-sorting.
    for asset in assets {
        if matched.contains(&asset.specifier) && !entries.contains(&asset.specifier) {
            append(asset);
        }
    }
    for entry in entries {
        if let Some(asset) = assets.iter().find(|a| &a.specifier == entry) {
            append(asset);
        }
    }

    bundle
}
