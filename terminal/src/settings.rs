use std::fmt;
use std::str::FromStr;
use text_completion::{ApiKey, RequestConfig, DEFAULT_TIMEOUT};
use thiserror::Error;

pub const TEMPERATURE_RANGE: (f32, f32) = (0.0, 1.0);
pub const MAX_RETRIES_RANGE: (u32, u32) = (1, 5);

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("unknown model '{0}', expected one of: {ids}", ids = Model::ids())]
    UnknownModel(String),
    #[error("temperature must be a number between 0.0 and 1.0, got '{0}'")]
    Temperature(String),
    #[error("max retries must be a whole number between 1 and 5, got '{0}'")]
    MaxRetries(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Model {
    #[default]
    DeepseekR1Zero,
    Palm2ChatBison,
}

impl Model {
    pub const ALL: [Model; 2] = [Model::DeepseekR1Zero, Model::Palm2ChatBison];

    pub fn id(&self) -> &'static str {
        match self {
            Model::DeepseekR1Zero => "deepseek/deepseek-r1-zero:free",
            Model::Palm2ChatBison => "google/palm-2-chat-bison",
        }
    }

    fn ids() -> String {
        Model::ALL
            .iter()
            .map(|m| m.id())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Accepts the model id or its 1-based position in `Model::ALL`.
impl FromStr for Model {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            if let Some(model) = n.checked_sub(1).and_then(|i| Model::ALL.get(i)) {
                return Ok(*model);
            }
        }
        Model::ALL
            .iter()
            .find(|m| m.id() == s)
            .copied()
            .ok_or_else(|| SettingsError::UnknownModel(s.to_string()))
    }
}

/// What the user can tune during a session.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: ApiKey,
    pub model: Model,
    pub temperature: f32,
    pub max_retries: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_key: ApiKey::default(),
            model: Model::default(),
            temperature: 0.7,
            max_retries: 2,
        }
    }
}

impl Settings {
    pub fn set_api_key(&mut self, raw: &str) {
        self.api_key = ApiKey::new(raw);
    }

    pub fn set_model(&mut self, raw: &str) -> Result<Model, SettingsError> {
        self.model = raw.parse()?;
        Ok(self.model)
    }

    pub fn set_temperature(&mut self, raw: &str) -> Result<f32, SettingsError> {
        let (min, max) = TEMPERATURE_RANGE;
        let value = raw
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|t| (min..=max).contains(t))
            .ok_or_else(|| SettingsError::Temperature(raw.trim().to_string()))?;
        self.temperature = value;
        Ok(value)
    }

    pub fn set_max_retries(&mut self, raw: &str) -> Result<u32, SettingsError> {
        let (min, max) = MAX_RETRIES_RANGE;
        let value = raw
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| (min..=max).contains(n))
            .ok_or_else(|| SettingsError::MaxRetries(raw.trim().to_string()))?;
        self.max_retries = value;
        Ok(value)
    }

    pub fn request_config(&self) -> RequestConfig {
        RequestConfig {
            api_key: self.api_key.clone(),
            model: self.model.id().to_string(),
            temperature: self.temperature,
            max_retries: self.max_retries,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.api_key.is_empty() {
            "not set"
        } else {
            "set"
        };
        writeln!(f, "- API key: {}", key)?;
        writeln!(f, "- Model: {}", self.model)?;
        writeln!(f, "- Temperature: {}", self.temperature)?;
        write!(f, "- Max retries: {}", self.max_retries)
    }
}
