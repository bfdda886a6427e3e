//! Host integration layer
//!
//! [`EngineState`] is the single owned instance a chat client plugin keeps
//! for its lifetime:
//!
//! - the current [`ReplacementTable`], swapped atomically on reload so every
//!   interception sees either the old or the new table in full
//! - the set of registered interception hooks, recomputed whenever a
//!   hook-affecting option changes
//! - the dataset source used by `reload` and `redownload`
//!
//! ```rust
//! use latex_unicode::dataset::MemoryDatasetSource;
//! use latex_unicode::host::{EngineState, InterceptionPoint, Settings};
//!
//! let source = MemoryDatasetSource::with_cached(
//!     r#"<charlist><character dec="945"><latex>\alpha</latex></character></charlist>"#,
//! );
//! let state = EngineState::new(source, Settings::default());
//! state.initialize().unwrap();
//! assert_eq!(state.intercept(InterceptionPoint::Send, r"\alpha_1"), "α₁");
//! ```

pub mod command;
pub mod config;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use log::{debug, error, info, warn};
use parking_lot::Mutex;

use crate::core::builder::{build_table_with_stats, BuildStats};
use crate::core::engine;
use crate::core::table::ReplacementTable;
use crate::dataset::{parse_dataset, DatasetSource};
use crate::utils::error::{ConfigValidationError, EncodingError, LoadResult};

pub use command::{Command, CommandStatus, COMMAND_NAME, COMMAND_USAGE};
pub use config::{parse_switch, Config, ConfigOption, DatasetConfig, Settings};

/// Places where the host hands text to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterceptionPoint {
    /// The input line as it is displayed while typing
    InputDisplay,
    /// The input line content at send time
    Send,
    /// Inbound message text as it is rendered
    Print,
}

impl InterceptionPoint {
    pub const ALL: [InterceptionPoint; 3] = [
        InterceptionPoint::InputDisplay,
        InterceptionPoint::Send,
        InterceptionPoint::Print,
    ];

    /// Conventional modifier name a host would hook
    pub fn modifier(self) -> &'static str {
        match self {
            InterceptionPoint::InputDisplay => "input_text_display",
            InterceptionPoint::Send => "input_text_for_buffer",
            InterceptionPoint::Print => "weechat_print",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "input" | "input_display" => Some(InterceptionPoint::InputDisplay),
            "send" => Some(InterceptionPoint::Send),
            "print" => Some(InterceptionPoint::Print),
            _ => None,
        }
    }
}

impl fmt::Display for InterceptionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.modifier())
    }
}

/// The interception points currently hooked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookSet {
    points: Vec<InterceptionPoint>,
}

impl HookSet {
    /// Hooks matching the given settings
    pub fn for_settings(settings: &Settings) -> Self {
        Self {
            points: settings.enabled_points(),
        }
    }

    #[inline]
    pub fn contains(&self, point: InterceptionPoint) -> bool {
        self.points.contains(&point)
    }

    pub fn points(&self) -> &[InterceptionPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Outcome of a successful (re)load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub rules: usize,
    pub stats: BuildStats,
}

fn build_document(document: &str) -> LoadResult<(ReplacementTable, BuildStats)> {
    let records = parse_dataset(document)?;
    Ok(build_table_with_stats(&records)?)
}

/// Engine state owned by the host for the plugin's lifetime
pub struct EngineState<S: DatasetSource> {
    source: S,
    table: ArcSwap<ReplacementTable>,
    hooks: ArcSwap<HookSet>,
    settings: Mutex<Settings>,
    /// Serializes reload and redownload
    reload_guard: Mutex<()>,
}

impl<S: DatasetSource> EngineState<S> {
    /// Create state with an empty table and hooks registered per `settings`
    pub fn new(source: S, settings: Settings) -> Self {
        let state = Self {
            source,
            table: ArcSwap::from_pointee(ReplacementTable::empty()),
            hooks: ArcSwap::from_pointee(HookSet::default()),
            settings: Mutex::new(settings),
            reload_guard: Mutex::new(()),
        };
        state.register_hooks(&settings);
        state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load the table at startup, downloading the dataset first if no
    /// cached copy exists yet
    pub fn initialize(&self) -> LoadResult<LoadReport> {
        if !self.source.has_cache() {
            info!("no cached dataset at {}, downloading", self.source.describe());
            return self.redownload();
        }
        self.reload()
    }

    /// Rebuild the table from the cached dataset.
    ///
    /// The new table is installed in one swap; on error the previous table
    /// stays active.
    pub fn reload(&self) -> LoadResult<LoadReport> {
        let _guard = self.reload_guard.lock();
        self.reload_locked()
    }

    /// Fetch the dataset again and load it.
    ///
    /// The download replaces the cached copy only after it builds into a
    /// table; a failed fetch, parse or build leaves cache and table as
    /// they were.
    pub fn redownload(&self) -> LoadResult<LoadReport> {
        let _guard = self.reload_guard.lock();
        let document = self.source.fetch_remote()?;
        let (table, stats) = build_document(&document)?;
        self.source.store_cached(&document)?;
        Ok(self.install(table, stats))
    }

    fn reload_locked(&self) -> LoadResult<LoadReport> {
        let document = self.source.load_cached()?;
        let (table, stats) = build_document(&document)?;
        Ok(self.install(table, stats))
    }

    fn install(&self, table: ReplacementTable, stats: BuildStats) -> LoadReport {
        let report = LoadReport {
            rules: table.len(),
            stats,
        };
        self.table.store(Arc::new(table));
        info!("loaded {} replacement rules", report.rules);
        report
    }

    /// Unregister every hook and drop the table
    pub fn shutdown(&self) {
        self.hooks.store(Arc::new(HookSet::default()));
        self.table.store(Arc::new(ReplacementTable::empty()));
        debug!("hooks unregistered, table released");
    }

    /// Snapshot of the current table
    pub fn table(&self) -> Arc<ReplacementTable> {
        self.table.load_full()
    }

    /// Snapshot of the registered hooks
    pub fn hooks(&self) -> Arc<HookSet> {
        self.hooks.load_full()
    }

    pub fn settings(&self) -> Settings {
        *self.settings.lock()
    }

    fn register_hooks(&self, settings: &Settings) {
        let hooks = HookSet::for_settings(settings);
        for point in hooks.points() {
            debug!("hooking {}", point);
        }
        self.hooks.store(Arc::new(hooks));
    }

    /// Change an option from its string form.
    ///
    /// Invalid keys or values leave settings and hooks as they were.
    pub fn set_option(&self, key: &str, value: &str) -> Result<(), ConfigValidationError> {
        let mut settings = self.settings.lock();
        let option = match settings.set_str(key, value) {
            Ok(option) => option,
            Err(e) => {
                warn!("{}", e);
                return Err(e);
            }
        };
        if option.requires_rehook() {
            self.register_hooks(&settings);
        }
        Ok(())
    }

    /// Run text arriving at `point` through the engine, if that point is
    /// hooked. Unhooked points pass text through unchanged.
    pub fn intercept<'a>(&self, point: InterceptionPoint, text: &'a str) -> Cow<'a, str> {
        if !self.hooks.load().contains(point) {
            return Cow::Borrowed(text);
        }
        let table = self.table.load();
        Cow::Owned(engine::replace(&table, text))
    }

    /// Byte-level variant of [`EngineState::intercept`]
    pub fn intercept_bytes(&self, point: InterceptionPoint, raw: &[u8]) -> Result<Vec<u8>, EncodingError> {
        let text = std::str::from_utf8(raw)?;
        Ok(self.intercept(point, text).into_owned().into_bytes())
    }

    /// Parse and execute a command line, logging any failure
    pub fn run_command(&self, args: &str) -> CommandStatus {
        let command = match Command::parse(args) {
            Ok(command) => command,
            Err(e) => {
                error!("{}: {}", COMMAND_NAME, e);
                return CommandStatus::Error;
            }
        };
        self.execute(command)
    }

    /// Execute a parsed command, logging any failure
    pub fn execute(&self, command: Command) -> CommandStatus {
        let result = match command {
            Command::Reload => self.reload(),
            Command::Redownload => self.redownload(),
        };
        match result {
            Ok(_) => CommandStatus::Ok,
            Err(e) => {
                error!("{} {} failed: {}", COMMAND_NAME, command, e);
                CommandStatus::Error
            }
        }
    }
}
