//! The fluent loading facade and its load state machine.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;

use regex::Regex;
use tracing::{debug, warn};

use crate::actions::{
    AllowedValuesAction, CallbackAction, CallbackGlobalAction, IgnoreAction, KeyRule,
    KeyRuleAction, PickAction, PopulateAction, Predicate, RegexAction,
};
use crate::convert;
use crate::error::{FluentEnvError, FluentEnvResult};
use crate::importer::picker::{self, ImporterSelection};
use crate::importer::{EnvFileImporter, ImportError};
use crate::keys::{IntoKeys, IntoPaths, resolve_keys, resolve_paths};
use crate::sink::{EnvSink, ProcessEnv};
use crate::store::ValueStore;


/// A fluent, declarative loader for `.env`-style configuration files.
///
/// Filters, validations and population targets are declared in any order,
/// before or after loading. Declarations made before [`load`](Self::load)
/// are deferred and applied once, in a fixed order (filters, then
/// validations, then populations), when the load completes. Declarations
/// made afterwards apply immediately against the loaded values.
///
/// Each loader loads at most once; a second `load` or `safe_load` fails
/// with [`FluentEnvError::AlreadyLoaded`].
///
/// # Examples
///
/// ```no_run
/// use fluent_env::{FluentEnv, FluentEnvResult};
///
/// fn main() -> FluentEnvResult<()> {
///     let mut env = FluentEnv::new();
///     env.ignore("APP_DEBUG")
///         .required(["HOST", "PORT"])?
///         .integer("PORT")?
///         .load([".env", ".env.local"])?;
///
///     let _port = env.cast_integer("PORT");
///     Ok(())
/// }
/// ```
pub struct FluentEnv {
    /// Which importer backend to resolve at load time.
    selection: ImporterSelection,
    /// Caller-injected importer, overriding backend selection.
    importer: Option<Box<dyn EnvFileImporter>>,
    /// The store for imported values.
    store: ValueStore,
    /// One-way gate: flips when a load completes its file list.
    is_loaded: bool,

    // filter actions
    pick_action: PickAction,
    ignore_action: IgnoreAction,

    // validation actions
    required_action: KeyRuleAction,
    not_empty_action: KeyRuleAction,
    integer_action: KeyRuleAction,
    boolean_action: KeyRuleAction,
    allowed_values_action: AllowedValuesAction,
    regex_action: RegexAction,
    callback_global_action: CallbackGlobalAction,
    callback_action: CallbackAction,

    // population actions
    populate_env_action: PopulateAction,
    populate_sink_action: PopulateAction,
    env_sink: Box<dyn EnvSink>,
    custom_sink: Option<Box<dyn EnvSink>>,
}

impl Default for FluentEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl FluentEnv {
    /// Create a loader with nothing declared and nothing loaded.
    ///
    /// The process environment is the default target of
    /// [`populate_env`](Self::populate_env); substitute it with
    /// [`use_env_sink`](Self::use_env_sink) where tests need isolation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            selection: ImporterSelection::default(),
            importer: None,
            store: ValueStore::new(),
            is_loaded: false,
            pick_action: PickAction::default(),
            ignore_action: IgnoreAction::default(),
            required_action: KeyRuleAction::new(KeyRule::Required),
            not_empty_action: KeyRuleAction::new(KeyRule::NotEmpty),
            integer_action: KeyRuleAction::new(KeyRule::Integer),
            boolean_action: KeyRuleAction::new(KeyRule::Boolean),
            allowed_values_action: AllowedValuesAction::default(),
            regex_action: RegexAction::default(),
            callback_global_action: CallbackGlobalAction::default(),
            callback_action: CallbackAction::default(),
            populate_env_action: PopulateAction::default(),
            populate_sink_action: PopulateAction::default(),
            env_sink: Box::new(ProcessEnv),
            custom_sink: None,
        }
    }

    // ------------------------------------------------------------------
    // importer and sink selection
    // ------------------------------------------------------------------

    /// Use the `dotenvy` backend to parse environment files.
    pub fn use_dotenvy(&mut self) -> &mut Self {
        self.selection = ImporterSelection::Dotenvy;
        self
    }

    /// Use the `dotenv` backend to parse environment files.
    pub fn use_dotenv(&mut self) -> &mut Self {
        self.selection = ImporterSelection::Dotenv;
        self
    }

    /// Inject a custom importer, bypassing backend selection entirely.
    pub fn use_importer(&mut self, importer: impl EnvFileImporter + 'static) -> &mut Self {
        self.importer = Some(Box::new(importer));
        self
    }

    /// Replace the sink that [`populate_env`](Self::populate_env) writes
    /// to. Defaults to the real process environment.
    pub fn use_env_sink(&mut self, sink: impl EnvSink + 'static) -> &mut Self {
        self.env_sink = Box::new(sink);
        self
    }

    // ------------------------------------------------------------------
    // loading
    // ------------------------------------------------------------------

    /// Load values from the given environment file/s, then run the
    /// declared pipeline.
    ///
    /// Paths are normalised into an ordered, duplicate-free list and
    /// imported in order, later files overriding earlier ones on key
    /// collision. Loading is not transactional: when a path cannot be
    /// read, the values merged from earlier paths remain in the store and
    /// the error propagates without attempting further paths.
    ///
    /// # Errors
    ///
    /// [`FluentEnvError::AlreadyLoaded`] when this loader has loaded
    /// before; [`FluentEnvError::DependencyUnresolved`] when no importer
    /// backend is available; [`FluentEnvError::InvalidPath`] when a file
    /// cannot be read; [`FluentEnvError::Parse`] when a file cannot be
    /// parsed; [`FluentEnvError::Validation`] when a declared rule is
    /// violated by the loaded values.
    pub fn load(&mut self, paths: impl IntoPaths) -> FluentEnvResult<&mut Self> {
        self.load_files(resolve_paths(paths), false)
    }

    /// Like [`load`](Self::load), but unreadable paths are skipped
    /// instead of aborting the load.
    ///
    /// Only the "file cannot be read" failure is swallowed; parser
    /// failures, a missing importer backend and validation failures all
    /// propagate exactly as for `load`.
    ///
    /// # Errors
    ///
    /// As for [`load`](Self::load), except [`FluentEnvError::InvalidPath`]
    /// is never returned.
    pub fn safe_load(&mut self, paths: impl IntoPaths) -> FluentEnvResult<&mut Self> {
        self.load_files(resolve_paths(paths), true)
    }

    fn load_files(&mut self, paths: Vec<PathBuf>, safely: bool) -> FluentEnvResult<&mut Self> {
        if self.is_loaded {
            return Err(FluentEnvError::AlreadyLoaded);
        }

        let picked;
        let importer: &dyn EnvFileImporter = match self.importer.as_deref() {
            Some(injected) => injected,
            None => {
                picked = picker::pick_importer(self.selection)?;
                picked.as_ref()
            }
        };

        for path in paths {
            match importer.import(&path) {
                Ok(values) => {
                    debug!(path = %path.display(), keys = values.len(), "merged environment file");
                    self.store.merge(&ValueStore::from_map(values));
                }
                Err(ImportError::Unreadable { path: p, source }) if safely => {
                    warn!(path = %p.display(), error = %source, "skipping unreadable environment file");
                }
                Err(err) => return Err(err.into()),
            }
        }

        self.is_loaded = true;
        debug!("running the action pipeline");
        self.apply_actions()?;
        Ok(self)
    }

    /// Run the full pipeline in its fixed order, consuming every action.
    fn apply_actions(&mut self) -> FluentEnvResult<()> {
        // filters
        self.pick_action.apply(&mut self.store);
        self.ignore_action.apply(&mut self.store);

        // validations
        self.required_action.apply(&self.store)?;
        self.not_empty_action.apply(&self.store)?;
        self.integer_action.apply(&self.store)?;
        self.boolean_action.apply(&self.store)?;
        self.allowed_values_action.apply(&self.store)?;
        self.regex_action.apply(&self.store)?;
        self.callback_global_action.apply(&self.store)?;
        self.callback_action.apply(&self.store)?;

        // populations
        self.populate_env_action
            .apply(&self.store, self.env_sink.as_mut());
        if let Some(sink) = self.custom_sink.as_mut() {
            self.populate_sink_action.apply(&self.store, sink.as_mut());
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // filters
    // ------------------------------------------------------------------

    /// Add to the list of keys to import; all others become invisible.
    ///
    /// Note that a first `pick` with an empty list still switches the
    /// store into "projected" mode, hiding everything until further keys
    /// are picked.
    pub fn pick(&mut self, keys: impl IntoKeys) -> &mut Self {
        self.pick_action.add(resolve_keys(keys));
        if self.is_loaded {
            self.pick_action.apply(&mut self.store);
        }
        self
    }

    /// Add to the list of keys to ignore.
    pub fn ignore(&mut self, keys: impl IntoKeys) -> &mut Self {
        self.ignore_action.add(resolve_keys(keys));
        if self.is_loaded {
            self.ignore_action.apply(&mut self.store);
        }
        self
    }

    // ------------------------------------------------------------------
    // validations
    // ------------------------------------------------------------------

    /// Require `keys` to be present.
    ///
    /// # Errors
    ///
    /// After loading, the check runs immediately and returns
    /// [`FluentEnvError::Validation`] when a key is missing.
    pub fn required(&mut self, keys: impl IntoKeys) -> FluentEnvResult<&mut Self> {
        self.required_action.add(resolve_keys(keys));
        if self.is_loaded {
            self.required_action.apply(&self.store)?;
        }
        Ok(self)
    }

    /// Require `keys`, when present, to have non-blank values.
    ///
    /// # Errors
    ///
    /// After loading, the check runs immediately and returns
    /// [`FluentEnvError::Validation`] when a value is empty.
    pub fn not_empty(&mut self, keys: impl IntoKeys) -> FluentEnvResult<&mut Self> {
        self.not_empty_action.add(resolve_keys(keys));
        if self.is_loaded {
            self.not_empty_action.apply(&self.store)?;
        }
        Ok(self)
    }

    /// Require `keys`, when present, to look like signed integer
    /// literals.
    ///
    /// # Errors
    ///
    /// After loading, the check runs immediately and returns
    /// [`FluentEnvError::Validation`] when a value does not match.
    pub fn integer(&mut self, keys: impl IntoKeys) -> FluentEnvResult<&mut Self> {
        self.integer_action.add(resolve_keys(keys));
        if self.is_loaded {
            self.integer_action.apply(&self.store)?;
        }
        Ok(self)
    }

    /// Require `keys`, when present, to be in the boolean vocabulary
    /// (`true`/`false`/`1`/`0`/`yes`/`no`/`on`/`off`, case-insensitive).
    ///
    /// # Errors
    ///
    /// After loading, the check runs immediately and returns
    /// [`FluentEnvError::Validation`] when a value does not match.
    pub fn boolean(&mut self, keys: impl IntoKeys) -> FluentEnvResult<&mut Self> {
        self.boolean_action.add(resolve_keys(keys));
        if self.is_loaded {
            self.boolean_action.apply(&self.store)?;
        }
        Ok(self)
    }

    /// Restrict `keys`, when present, to the given literal `values`.
    ///
    /// Lists accumulate across calls for the same key. Declaring an empty
    /// list makes any present value fail.
    ///
    /// # Errors
    ///
    /// After loading, the check runs immediately and returns
    /// [`FluentEnvError::Validation`] when a value is not allowed.
    pub fn allowed_values(
        &mut self,
        keys: impl IntoKeys,
        values: impl IntoKeys,
    ) -> FluentEnvResult<&mut Self> {
        self.allowed_values_action
            .add(resolve_keys(keys), values.into_keys());
        if self.is_loaded {
            self.allowed_values_action.apply(&self.store)?;
        }
        Ok(self)
    }

    /// Require `keys`, when present, to match `pattern`.
    ///
    /// Patterns accumulate; a value must match every pattern declared for
    /// its key.
    ///
    /// # Errors
    ///
    /// [`FluentEnvError::InvalidRegex`] when `pattern` does not compile;
    /// after loading, [`FluentEnvError::Validation`] when a value does not
    /// match.
    pub fn regex(&mut self, keys: impl IntoKeys, pattern: &str) -> FluentEnvResult<&mut Self> {
        let resolved = resolve_keys(keys);
        let compiled = Regex::new(pattern).map_err(|source| FluentEnvError::InvalidRegex {
            key: resolved.first().cloned().unwrap_or_default(),
            pattern: pattern.to_owned(),
            source: Box::new(source),
        })?;
        self.regex_action.add(resolved, &compiled);
        if self.is_loaded {
            self.regex_action.apply(&self.store)?;
        }
        Ok(self)
    }

    /// Require `keys`, when present, to satisfy `predicate`.
    ///
    /// The predicate receives the key and its value.
    ///
    /// # Errors
    ///
    /// After loading, the check runs immediately and returns
    /// [`FluentEnvError::Validation`] when the predicate rejects a value.
    pub fn callback<F>(&mut self, keys: impl IntoKeys, predicate: F) -> FluentEnvResult<&mut Self>
    where
        F: Fn(&str, &str) -> bool + 'static,
    {
        let shared: Predicate = Rc::new(predicate);
        self.callback_action.add(resolve_keys(keys), &shared);
        if self.is_loaded {
            self.callback_action.apply(&self.store)?;
        }
        Ok(self)
    }

    /// Require every visible key-value pair to satisfy `predicate`.
    ///
    /// # Errors
    ///
    /// After loading, the check runs immediately and returns
    /// [`FluentEnvError::Validation`] when any pair is rejected.
    pub fn callback_global<F>(&mut self, predicate: F) -> FluentEnvResult<&mut Self>
    where
        F: Fn(&str, &str) -> bool + 'static,
    {
        self.callback_global_action.add(Rc::new(predicate));
        if self.is_loaded {
            self.callback_global_action.apply(&self.store)?;
        }
        Ok(self)
    }

    // ------------------------------------------------------------------
    // population
    // ------------------------------------------------------------------

    /// Populate the environment sink with the loaded values.
    ///
    /// With `override_existing` false, keys already present in the sink
    /// keep their current values.
    pub fn populate_env(&mut self, override_existing: bool) -> &mut Self {
        self.populate_env_action.enable(override_existing);
        if self.is_loaded {
            self.populate_env_action
                .apply(&self.store, self.env_sink.as_mut());
        }
        self
    }

    /// Populate a caller-supplied sink with the loaded values.
    ///
    /// The sink is retained by the loader and reachable afterwards through
    /// [`custom_sink`](Self::custom_sink).
    pub fn populate_sink(
        &mut self,
        sink: impl EnvSink + 'static,
        override_existing: bool,
    ) -> &mut Self {
        self.custom_sink = Some(Box::new(sink));
        self.populate_sink_action.enable(override_existing);
        if self.is_loaded
            && let Some(custom) = self.custom_sink.as_mut()
        {
            self.populate_sink_action
                .apply(&self.store, custom.as_mut());
        }
        self
    }

    /// The sink [`populate_env`](Self::populate_env) writes to.
    #[must_use]
    pub fn env_sink(&self) -> &dyn EnvSink {
        self.env_sink.as_ref()
    }

    /// The caller-supplied sink, when one was registered with
    /// [`populate_sink`](Self::populate_sink).
    #[must_use]
    pub fn custom_sink(&self) -> Option<&dyn EnvSink> {
        self.custom_sink.as_deref()
    }

    // ------------------------------------------------------------------
    // reads
    // ------------------------------------------------------------------

    /// Whether a load has completed on this loader.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    /// A snapshot of all visible key-value pairs.
    ///
    /// Before loading this reflects an empty store.
    #[must_use]
    pub fn all(&self) -> BTreeMap<String, String> {
        self.store.all()
    }

    /// Get a single value, or `None` when the key is not visible.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.store.get(key).map(str::to_owned)
    }

    /// Get several values, preserving the requested-key order.
    ///
    /// Every requested key yields an entry, absent keys included.
    #[must_use]
    pub fn get_many(&self, keys: impl IntoKeys) -> Vec<(String, Option<String>)> {
        self.retrieve(keys, |value| Some(value.to_owned()))
    }

    /// Get a value cast to an integer.
    ///
    /// `None` when the key is absent or the value does not match the
    /// strict signed-integer grammar shared with [`integer`](Self::integer).
    #[must_use]
    pub fn cast_integer(&self, key: &str) -> Option<i64> {
        self.store.get(key).and_then(convert::parse_integer)
    }

    /// Get several values cast to integers, preserving requested-key
    /// order.
    #[must_use]
    pub fn cast_integer_many(&self, keys: impl IntoKeys) -> Vec<(String, Option<i64>)> {
        self.retrieve(keys, convert::parse_integer)
    }

    /// Get a value cast to a boolean.
    ///
    /// `None` when the key is absent or the value is outside the fixed
    /// vocabulary shared with [`boolean`](Self::boolean).
    #[must_use]
    pub fn cast_boolean(&self, key: &str) -> Option<bool> {
        self.store.get(key).and_then(convert::parse_boolean)
    }

    /// Get several values cast to booleans, preserving requested-key
    /// order.
    #[must_use]
    pub fn cast_boolean_many(&self, keys: impl IntoKeys) -> Vec<(String, Option<bool>)> {
        self.retrieve(keys, convert::parse_boolean)
    }

    fn retrieve<T, F>(&self, keys: impl IntoKeys, cast: F) -> Vec<(String, Option<T>)>
    where
        F: Fn(&str) -> Option<T>,
    {
        resolve_keys(keys)
            .into_iter()
            .map(|key| {
                let value = self.store.get(&key).and_then(|v| cast(v));
                (key, value)
            })
            .collect()
    }
}
