//! Build plugins.
//!
//! Plugins hook into two points of the build: they may contribute a prelude
//! prepended to the bundle, and they may emit extra files alongside it.
//! Execution order follows each plugin's configured `order`, ties broken by
//! registration order.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::asset::EmittedFile;
use crate::html::HtmlPlugin;
use crate::{Error, Result};

/// Everything a plugin can see at emit time.
pub struct EmitContext {
    /// Directory the source tree was read from, for resolving template paths.
    pub context_dir: PathBuf,

    /// Public URL of the emitted bundle, e.g. `/app.js`.
    pub bundle_url: String,
}

/// A named build plugin.
pub trait BuildPlugin: Send + Sync {
    fn name(&self) -> &str;

    /// Source prepended to the bundle before the entry modules.
    fn bundle_prelude(&self) -> Option<String> {
        None
    }

    /// Extra files to write into the output directory.
    fn emit(&self, _ctx: &EmitContext) -> Result<Vec<EmittedFile>> {
        Ok(Vec::new())
    }
}

/// Plugins sorted by execution order.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<(i32, Box<dyn BuildPlugin>)>,
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.plugins.iter().map(|(order, plugin)| (order, plugin.name())))
            .finish()
    }
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin at the given order. Lower orders run first;
    /// equal orders keep registration order.
    pub fn register<P: BuildPlugin + 'static>(&mut self, order: i32, plugin: P) {
        let at = self
            .plugins
            .iter()
            .position(|(o, _)| *o > order)
            .unwrap_or(self.plugins.len());
        self.plugins.insert(at, (order, Box::new(plugin)));
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Collect bundle preludes in execution order.
    pub fn bundle_preludes(&self) -> Vec<String> {
        self.plugins
            .iter()
            .filter_map(|(_, p)| p.bundle_prelude())
            .collect()
    }

    /// Run every plugin's emit hook in execution order.
    pub fn emit_all(&self, ctx: &EmitContext) -> Result<Vec<EmittedFile>> {
        let mut files = Vec::new();
        for (order, plugin) in &self.plugins {
            debug!(plugin = plugin.name(), order, "running plugin emit hook");
            files.extend(plugin.emit(ctx)?);
        }
        Ok(files)
    }
}

/// Makes configured names available as globals inside the bundle.
///
/// Each binding maps a global name to the module that provides it; the
/// prelude imports the module and assigns its default export to
/// `globalThis`. Assignment uses bracket syntax with a JSON-escaped key,
/// so names that are not JS identifiers (e.g. `my-lib`) still work.
pub struct ProvidePlugin {
    bindings: BTreeMap<String, String>,
}

impl ProvidePlugin {
    pub fn from_options(options: &Value) -> Result<Self> {
        let bindings: BTreeMap<String, String> = match options {
            Value::Null => BTreeMap::new(),
            other => serde_json::from_value(other.clone()).map_err(|e| Error::InvalidOptions {
                transformer: "provide".to_string(),
                message: format!("expected a table of name -> module specifier: {e}"),
            })?,
        };
        Ok(Self { bindings })
    }
}

impl BuildPlugin for ProvidePlugin {
    fn name(&self) -> &str {
        "provide"
    }

    fn bundle_prelude(&self) -> Option<String> {
        if self.bindings.is_empty() {
            return None;
        }
        let mut prelude = String::new();
        for (i, (name, specifier)) in self.bindings.iter().enumerate() {
            let global = serde_json::to_string(name).unwrap_or_else(|_| "\"\"".to_string());
            let module = serde_json::to_string(specifier).unwrap_or_else(|_| "\"\"".to_string());
            prelude.push_str(&format!(
                "import __lade_provide_{i} from {module};\nglobalThis[{global}] = __lade_provide_{i};\n"
            ));
        }
        Some(prelude)
    }
}

/// Instantiate the configured plugins into an ordered registry.
///
/// Disabled plugins are skipped. Unknown plugin names are fatal.
pub fn instantiate_plugins(plugins: &[lade_config::PluginOptions]) -> Result<PluginRegistry> {
    let mut registry = PluginRegistry::new();
    for opts in plugins {
        if !opts.enabled {
            debug!(plugin = %opts.name, "skipping disabled plugin");
            continue;
        }
        match opts.name.as_str() {
            "html" => registry.register(opts.order, HtmlPlugin::from_options(&opts.options)?),
            "provide" => registry.register(opts.order, ProvidePlugin::from_options(&opts.options)?),
            other => {
                return Err(Error::UnknownPlugin {
                    name: other.to_string(),
                })
            }
        }
    }
    Ok(registry)
}
