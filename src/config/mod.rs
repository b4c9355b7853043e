use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

pub const DEFAULT_TEMPLATE: &str = "default";

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumString, strum::AsRefStr, strum::Display)]
#[strum(serialize_all = "camelCase")]
pub enum ConfigKey {
    ListInputTemplate,
    PlaceholderValue,
    CustomFields,
    CommitDelayMs,
    BlurExpiryMs,
    FocusRetryMs,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    UnknownKey(String),
    WrongType {
        key: ConfigKey,
        expected: &'static str,
    },
    NotAnObject,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownKey(key) => write!(f, "unknown setting `{key}`"),
            Self::WrongType { key, expected } => write!(f, "`{key}` expects a {expected}"),
            Self::NotAnObject => write!(f, "settings must be given as an object"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings shared by every list input below a context provider.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ListInputConfig {
    /// Name of the row template used for each entry.
    pub list_input_template: String,

    /// Seeds the trailing new-item row; entries equal to it are never
    /// written back.
    pub placeholder_value: Value,

    /// Rows come from the row template instead of a single text field.
    pub custom_fields: bool,

    /// Delay before a commit runs, so native focus moves land first.
    pub commit_delay_ms: u32,

    /// How long a blurred row is remembered for refocusing.
    pub blur_expiry_ms: u32,

    /// Delay before the single retry when a focus target is not rendered.
    pub focus_retry_ms: u32,
}

impl Default for ListInputConfig {
    fn default() -> Self {
        Self {
            list_input_template: DEFAULT_TEMPLATE.to_string(),
            placeholder_value: Value::String(String::new()),
            custom_fields: false,
            commit_delay_ms: 0,
            blur_expiry_ms: 50,
            focus_retry_ms: 50,
        }
    }
}

fn as_millis(key: ConfigKey, value: &Value) -> Result<u32, ConfigError> {
    value
        .as_u64()
        .and_then(|ms| u32::try_from(ms).ok())
        .ok_or(ConfigError::WrongType {
            key,
            expected: "non-negative integer",
        })
}

/// `null`/`false` placeholders fall back to the empty string.
pub fn normalize_placeholder(value: Value) -> Value {
    match value {
        Value::Null | Value::Bool(false) => Value::String(String::new()),
        other => other,
    }
}

impl ListInputConfig {
    /// Applies one setting, leaving the current value in place on error.
    pub fn try_set(&mut self, name: &str, value: &Value) -> Result<(), ConfigError> {
        let key =
            ConfigKey::from_str(name).map_err(|_| ConfigError::UnknownKey(name.to_string()))?;

        match key {
            ConfigKey::ListInputTemplate => {
                let template = value.as_str().ok_or(ConfigError::WrongType {
                    key,
                    expected: "string",
                })?;
                self.list_input_template = template.to_string();
            }
            ConfigKey::PlaceholderValue => {
                self.placeholder_value = normalize_placeholder(value.clone());
            }
            ConfigKey::CustomFields => {
                self.custom_fields = value.as_bool().ok_or(ConfigError::WrongType {
                    key,
                    expected: "boolean",
                })?;
            }
            ConfigKey::CommitDelayMs => self.commit_delay_ms = as_millis(key, value)?,
            ConfigKey::BlurExpiryMs => self.blur_expiry_ms = as_millis(key, value)?,
            ConfigKey::FocusRetryMs => self.focus_retry_ms = as_millis(key, value)?,
        }

        Ok(())
    }

    /// Like [`Self::try_set`], but a rejected setting is only logged.
    pub fn set(&mut self, name: &str, value: &Value) -> bool {
        match self.try_set(name, value) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("ignoring list input setting: {e}");
                false
            }
        }
    }

    /// Applies every entry of a settings object independently. Returns how
    /// many were accepted.
    pub fn set_all(&mut self, settings: &Value) -> usize {
        let Value::Object(map) = settings else {
            log::warn!("ignoring list input settings: {}", ConfigError::NotAnObject);
            return 0;
        };

        let mut applied = 0;
        for (name, value) in map {
            if self.set(name, value) {
                applied += 1;
            }
        }
        applied
    }
}

#[derive(Clone, Copy)]
pub struct ListInputConfigContext(pub RwSignal<ListInputConfig>);

/// Makes `config` the default for list inputs rendered below the caller.
pub fn provide_list_input_config(config: ListInputConfig) -> RwSignal<ListInputConfig> {
    let signal = RwSignal::new(config);
    provide_context(ListInputConfigContext(signal));
    signal
}

pub fn use_list_input_config() -> ListInputConfig {
    use_context::<ListInputConfigContext>()
        .map(|ctx| ctx.0.get_untracked())
        .unwrap_or_default()
}
