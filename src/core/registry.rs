//! Process-wide logger registry
//!
//! A name-keyed table of shared loggers plus a default logger, behind a
//! single lock. Initialized on first use; the initial default logger is an
//! unnamed color-console logger at `info` level, and it is recreated
//! whenever the current default is dropped.

use super::error::{LoggerError, Result};
use super::level::Level;
use super::logger::Logger;
use crate::sinks::ColorConsoleSink;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

struct RegistryInner {
    loggers: HashMap<String, Arc<Logger>>,
    default_logger: Arc<Logger>,
}

pub struct Registry {
    inner: Mutex<RegistryInner>,
}

fn make_default_logger() -> Arc<Logger> {
    let sink = Arc::new(ColorConsoleSink::stdout());
    let logger = Logger::with_sink("", sink);
    logger.set_level(Level::Info);
    Arc::new(logger)
}

impl Registry {
    fn new() -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                loggers: HashMap::new(),
                default_logger: make_default_logger(),
            }),
        }
    }

    /// The process-wide registry instance.
    pub fn global() -> &'static Registry {
        static REGISTRY: OnceLock<Registry> = OnceLock::new();
        REGISTRY.get_or_init(Registry::new)
    }

    /// Register a logger under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`LoggerError::DuplicateLogger`] if the name is taken.
    pub fn register(&self, logger: Arc<Logger>) -> Result<()> {
        let mut inner = self.inner.lock();
        let name = logger.name().to_string();
        if inner.loggers.contains_key(&name) {
            return Err(LoggerError::duplicate_logger(name));
        }
        inner.loggers.insert(name, logger);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        self.inner.lock().loggers.get(name).cloned()
    }

    /// Remove a logger by name. Dropping the logger currently serving as
    /// the default resets the default to a fresh console logger.
    pub fn drop_logger(&self, name: &str) {
        let mut inner = self.inner.lock();
        let was_default = inner.default_logger.name() == name;
        inner.loggers.remove(name);
        if was_default {
            inner.default_logger = make_default_logger();
        }
    }

    pub fn drop_all(&self) {
        let mut inner = self.inner.lock();
        inner.loggers.clear();
        inner.default_logger = make_default_logger();
    }

    pub fn default_logger(&self) -> Arc<Logger> {
        self.inner.lock().default_logger.clone()
    }

    /// Replace the default logger, also registering it by name.
    pub fn set_default_logger(&self, logger: Arc<Logger>) {
        let mut inner = self.inner.lock();
        inner
            .loggers
            .insert(logger.name().to_string(), logger.clone());
        inner.default_logger = logger;
    }

    /// Set the level of the default logger and every registered logger.
    pub fn set_all_level(&self, level: Level) {
        let inner = self.inner.lock();
        inner.default_logger.set_level(level);
        for logger in inner.loggers.values() {
            logger.set_level(level);
        }
    }

    /// Flush the default logger and every registered logger.
    pub fn flush_all(&self) {
        let inner = self.inner.lock();
        inner.default_logger.flush();
        for logger in inner.loggers.values() {
            logger.flush();
        }
    }
}
