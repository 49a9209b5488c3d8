//! Configuration for the service and the objects it creates.
//!
//! [`Config`] names an engine `.xml` configuration file plus parameter
//! overrides. [`ServiceConfig`] describes where the library, configuration
//! directory and license live. [`VideoWorkerParams`] gathers everything
//! needed to create a video worker and can be loaded from JSON.

use crate::backends::LibraryConfig;
use crate::error::{
    FacerecError, Result, DUPLICATE_LIVENESS_CHECK_ERROR_CODE,
    RECOGNIZER_CONFIG_CONFLICT_ERROR_CODE,
};
use crate::ffi::RawConfigArgs;
use serde::{Deserialize, Serialize};
use std::ffi::{c_char, CString};
use std::path::{Path, PathBuf};
use std::ptr;

/// Environment variable read by [`ServiceConfig::from_env`] for the conf dir.
pub const CONF_DIR_ENV: &str = "FACEREC_CONF_DIR";
/// Environment variable read by [`ServiceConfig::from_env`] for the license dir.
pub const LICENSE_DIR_ENV: &str = "FACEREC_LICENSE_DIR";

/// An engine configuration file with optional parameter overrides.
///
/// Overrides are kept in insertion order and passed to the engine as two
/// parallel arrays; a key overridden twice is sent twice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// File name relative to the service configuration directory
    pub config_filepath: String,
    #[serde(default)]
    pub overridden: Vec<(String, f64)>,
}

impl Config {
    pub fn new(config_filepath: impl Into<String>) -> Self {
        Self {
            config_filepath: config_filepath.into(),
            overridden: Vec::new(),
        }
    }

    /// Overrides a parameter (a tag name from the `.xml` file).
    pub fn override_parameter(mut self, parameter: impl Into<String>, value: f64) -> Self {
        self.overridden.push((parameter.into(), value));
        self
    }

    pub(crate) fn prepare(&self, conf_dir: &str) -> Result<PreparedConfig> {
        PreparedConfig::new(
            format!("{conf_dir}{}", self.config_filepath),
            self.overridden.iter().map(|(k, v)| (k.as_str(), *v)),
        )
    }
}

/// Owned C strings backing a [`RawConfigArgs`].
pub(crate) struct PreparedConfig {
    file: CString,
    keys: Vec<CString>,
    key_ptrs: Vec<*const c_char>,
    values: Vec<f64>,
}

impl PreparedConfig {
    fn new<'a>(file: String, pairs: impl Iterator<Item = (&'a str, f64)>) -> Result<Self> {
        let mut keys = Vec::new();
        let mut values = Vec::new();
        for (key, value) in pairs {
            keys.push(CString::new(key)?);
            values.push(value);
        }
        let key_ptrs = keys.iter().map(|k| k.as_ptr()).collect();
        Ok(Self {
            file: CString::new(file)?,
            keys,
            key_ptrs,
            values,
        })
    }

    /// Appends an override after the user-supplied ones.
    fn push(&mut self, key: String, value: f64) -> Result<()> {
        let key = CString::new(key)?;
        // CString owns a heap buffer, so the pointer survives the move into `keys`.
        self.key_ptrs.push(key.as_ptr());
        self.keys.push(key);
        self.values.push(value);
        Ok(())
    }

    /// Arguments valid for as long as `self` is alive.
    pub(crate) fn as_args(&self) -> RawConfigArgs {
        let empty = self.values.is_empty();
        RawConfigArgs {
            file: self.file.as_ptr(),
            overridden_count: self.values.len() as i32,
            overridden_keys: if empty { ptr::null() } else { self.key_ptrs.as_ptr() },
            overridden_values: if empty { ptr::null() } else { self.values.as_ptr() },
        }
    }

    #[cfg(test)]
    pub(crate) fn pairs(&self) -> Vec<(String, f64)> {
        self.keys
            .iter()
            .map(|k| k.to_string_lossy().into_owned())
            .zip(self.values.iter().copied())
            .collect()
    }
}

/// Where the engine license comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum License {
    /// Directory holding the license file; `None` lets the engine use its default
    Directory(Option<PathBuf>),
    /// License file contents
    Body(String),
}

impl Default for License {
    fn default() -> Self {
        License::Directory(None)
    }
}

/// Parameters of [`crate::FacerecService::create_service`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub library: LibraryConfig,
    /// Directory with the engine configuration files
    pub conf_dir: String,
    #[serde(default)]
    pub license: License,
}

impl ServiceConfig {
    pub fn new(conf_dir: impl Into<String>) -> Self {
        Self {
            conf_dir: conf_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_library(mut self, library: LibraryConfig) -> Self {
        self.library = library;
        self
    }

    pub fn with_license(mut self, license: License) -> Self {
        self.license = license;
        self
    }

    /// Reads `FACEREC_CONF_DIR` and `FACEREC_LICENSE_DIR`. The library path
    /// itself honours `FACEREC_LIBRARY` through [`LibraryConfig`].
    pub fn from_env() -> Self {
        let conf_dir = std::env::var(CONF_DIR_ENV).unwrap_or_default();
        let license = match std::env::var_os(LICENSE_DIR_ENV) {
            Some(dir) if !dir.is_empty() => License::Directory(Some(PathBuf::from(dir))),
            _ => License::Directory(None),
        };
        Self {
            library: LibraryConfig::default(),
            conf_dir,
            license,
        }
    }

    /// Configuration directory with a trailing `/`; empty means `./`.
    pub fn normalized_conf_dir(&self) -> String {
        normalize_conf_dir(&self.conf_dir)
    }
}

pub(crate) fn normalize_conf_dir(conf_dir: &str) -> String {
    if conf_dir.is_empty() {
        "./".to_string()
    } else if conf_dir.ends_with('/') {
        conf_dir.to_string()
    } else {
        format!("{conf_dir}/")
    }
}

/// One step of the active liveness scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveLivenessCheckType {
    None,
    Smile,
    Blink,
    TurnUp,
    TurnDown,
    TurnRight,
    TurnLeft,
    Perspective,
}

impl ActiveLivenessCheckType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveLivenessCheckType::None => "none",
            ActiveLivenessCheckType::Smile => "smile",
            ActiveLivenessCheckType::Blink => "blink",
            ActiveLivenessCheckType::TurnUp => "turn_up",
            ActiveLivenessCheckType::TurnDown => "turn_down",
            ActiveLivenessCheckType::TurnRight => "turn_right",
            ActiveLivenessCheckType::TurnLeft => "turn_left",
            ActiveLivenessCheckType::Perspective => "perspective",
        }
    }
}

/// Parameters of [`crate::FacerecService::create_video_worker`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoWorkerParams {
    pub video_worker_config: Config,
    /// Recognizer configuration file without overrides
    pub recognizer_ini_file: Option<String>,
    pub recognizer_config: Config,
    pub streams_count: i32,
    pub processing_threads_count: i32,
    pub matching_threads_count: i32,
    pub age_gender_estimation_threads_count: i32,
    pub emotions_estimation_threads_count: i32,
    pub short_time_identification_enabled: bool,
    pub short_time_identification_distance_threshold: f32,
    pub short_time_identification_outdate_time_seconds: f32,
    pub active_liveness_checks_order: Vec<ActiveLivenessCheckType>,
    /// Tracking events held per stream while waiting for an earlier frame
    pub reorder_window: usize,
}

impl Default for VideoWorkerParams {
    fn default() -> Self {
        Self {
            video_worker_config: Config::default(),
            recognizer_ini_file: None,
            recognizer_config: Config::default(),
            streams_count: 0,
            processing_threads_count: 0,
            matching_threads_count: 0,
            age_gender_estimation_threads_count: 0,
            emotions_estimation_threads_count: 0,
            short_time_identification_enabled: false,
            short_time_identification_distance_threshold: 0.0,
            short_time_identification_outdate_time_seconds: 0.0,
            active_liveness_checks_order: Vec::new(),
            reorder_window: Self::DEFAULT_REORDER_WINDOW,
        }
    }
}

impl VideoWorkerParams {
    pub const DEFAULT_REORDER_WINDOW: usize = 4;

    pub fn new(video_worker_config: Config) -> Self {
        Self {
            video_worker_config,
            ..Default::default()
        }
    }

    pub fn recognizer_ini_file(mut self, ini_file: impl Into<String>) -> Self {
        self.recognizer_ini_file = Some(ini_file.into());
        self
    }

    pub fn recognizer_config(mut self, config: Config) -> Self {
        self.recognizer_config = config;
        self
    }

    pub fn streams_count(mut self, count: i32) -> Self {
        self.streams_count = count;
        self
    }

    pub fn processing_threads_count(mut self, count: i32) -> Self {
        self.processing_threads_count = count;
        self
    }

    pub fn matching_threads_count(mut self, count: i32) -> Self {
        self.matching_threads_count = count;
        self
    }

    pub fn age_gender_estimation_threads_count(mut self, count: i32) -> Self {
        self.age_gender_estimation_threads_count = count;
        self
    }

    pub fn emotions_estimation_threads_count(mut self, count: i32) -> Self {
        self.emotions_estimation_threads_count = count;
        self
    }

    pub fn short_time_identification(
        mut self,
        enabled: bool,
        distance_threshold: f32,
        outdate_time_seconds: f32,
    ) -> Self {
        self.short_time_identification_enabled = enabled;
        self.short_time_identification_distance_threshold = distance_threshold;
        self.short_time_identification_outdate_time_seconds = outdate_time_seconds;
        self
    }

    pub fn active_liveness_checks_order(mut self, order: Vec<ActiveLivenessCheckType>) -> Self {
        self.active_liveness_checks_order = order;
        self
    }

    pub fn reorder_window(mut self, window: usize) -> Self {
        self.reorder_window = window;
        self
    }

    /// Reads parameters from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }

    /// Builds the two override sets passed to the engine.
    ///
    /// Active liveness checks become `active_liveness.check_<name>` overrides
    /// on the worker config with values `-1, -2, ...` in scenario order.
    pub(crate) fn prepare(&self, conf_dir: &str) -> Result<(PreparedConfig, PreparedConfig)> {
        let mut worker = self.video_worker_config.prepare(conf_dir)?;

        let order = &self.active_liveness_checks_order;
        for (i, check) in order.iter().enumerate() {
            if order[i + 1..].contains(check) {
                return Err(FacerecError::assertion(
                    DUPLICATE_LIVENESS_CHECK_ERROR_CODE,
                    "Error 0x3302330e: Set a unique order of `active_liveness_checks_order` for Active Liveness.",
                ));
            }
        }
        for (i, check) in order.iter().enumerate() {
            worker.push(
                format!("active_liveness.check_{}", check.as_str()),
                -((i + 1) as f64),
            )?;
        }

        let recognizer = match &self.recognizer_ini_file {
            Some(ini) if !ini.is_empty() => {
                if !self.recognizer_config.config_filepath.is_empty() {
                    return Err(FacerecError::assertion(
                        RECOGNIZER_CONFIG_CONFLICT_ERROR_CODE,
                        "Error: 0xb3fe4d07 You must use either recognizer_config or recognizer_ini_file.",
                    ));
                }
                Config::new(ini.clone()).prepare(conf_dir)?
            }
            _ => self.recognizer_config.prepare(conf_dir)?,
        };

        Ok((worker, recognizer))
    }
}
