use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Registry key under which plugins of one kind are collected
/// (e.g., `interpret_ext_blackbox`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionKey(pub String);

/// Name of an explanation variant a plugin claims to support (`local`,
/// `global`, ...). Each one requires an `explain_<name>` operation.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExplanationName(pub String);

pub const PROVIDER_EXTENSION_KEY: &str = "interpret_ext_provider";
pub const BLACKBOX_EXTENSION_KEY: &str = "interpret_ext_blackbox";
pub const GREYBOX_EXTENSION_KEY: &str = "interpret_ext_greybox";
pub const GLASSBOX_EXTENSION_KEY: &str = "interpret_ext_glassbox";
pub const DATA_EXTENSION_KEY: &str = "interpret_ext_data";
pub const PERF_EXTENSION_KEY: &str = "interpret_ext_perf";

/// Category tag an explainer declares about itself.
///
/// Known variants keep the wire tags stable; `Other` preserves whatever a
/// plugin declared so mismatches can be reported verbatim. Equality and
/// hashing go by tag, so `Other("model")` equals `Glassbox`.
#[derive(Clone, Debug)]
pub enum ExplainerType {
    Blackbox,
    /// Glassbox explainers declare the `model` tag.
    Glassbox,
    /// Greybox explainers declare the `specific` tag.
    Greybox,
    Data,
    Perf,
    Other(String),
}

/// The kind of plugin a call site asks to validate or register.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum PluginKind {
    Provider,
    Blackbox,
    Greybox,
    Glassbox,
    Data,
    Perf,
}

impl ExtensionKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ExplanationName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExplanationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExplanationName {
    fn from(value: &str) -> Self {
        ExplanationName(value.to_string())
    }
}

impl Serialize for ExplainerType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ExplainerType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&value))
    }
}

impl ExplainerType {
    pub fn as_str(&self) -> &str {
        match self {
            ExplainerType::Blackbox => "blackbox",
            ExplainerType::Glassbox => "model",
            ExplainerType::Greybox => "specific",
            ExplainerType::Data => "data",
            ExplainerType::Perf => "perf",
            ExplainerType::Other(value) => value.as_str(),
        }
    }

    pub fn from_tag(value: &str) -> Self {
        match value {
            "blackbox" => ExplainerType::Blackbox,
            "model" => ExplainerType::Glassbox,
            "specific" => ExplainerType::Greybox,
            "data" => ExplainerType::Data,
            "perf" => ExplainerType::Perf,
            other => ExplainerType::Other(other.to_string()),
        }
    }
}

impl PartialEq for ExplainerType {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for ExplainerType {}

impl Hash for ExplainerType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for ExplainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static ALL_KINDS: [PluginKind; 6] = [
    PluginKind::Provider,
    PluginKind::Blackbox,
    PluginKind::Greybox,
    PluginKind::Glassbox,
    PluginKind::Data,
    PluginKind::Perf,
];

impl PluginKind {
    /// Every kind in registry order.
    pub fn all() -> &'static [PluginKind] {
        &ALL_KINDS
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PluginKind::Provider => "provider",
            PluginKind::Blackbox => "blackbox",
            PluginKind::Greybox => "greybox",
            PluginKind::Glassbox => "glassbox",
            PluginKind::Data => "data",
            PluginKind::Perf => "perf",
        }
    }

    pub fn extension_key_str(&self) -> &'static str {
        match self {
            PluginKind::Provider => PROVIDER_EXTENSION_KEY,
            PluginKind::Blackbox => BLACKBOX_EXTENSION_KEY,
            PluginKind::Greybox => GREYBOX_EXTENSION_KEY,
            PluginKind::Glassbox => GLASSBOX_EXTENSION_KEY,
            PluginKind::Data => DATA_EXTENSION_KEY,
            PluginKind::Perf => PERF_EXTENSION_KEY,
        }
    }

    pub fn extension_key(&self) -> ExtensionKey {
        ExtensionKey(self.extension_key_str().to_string())
    }

    /// Tag an explainer must declare to register under this kind.
    ///
    /// Providers carry no tag and return `None`.
    pub fn expected_type(&self) -> Option<ExplainerType> {
        match self {
            PluginKind::Provider => None,
            PluginKind::Blackbox => Some(ExplainerType::Blackbox),
            PluginKind::Greybox => Some(ExplainerType::Greybox),
            PluginKind::Glassbox => Some(ExplainerType::Glassbox),
            PluginKind::Data => Some(ExplainerType::Data),
            PluginKind::Perf => Some(ExplainerType::Perf),
        }
    }

    /// Resolve the kind registered under an extension key.
    pub fn from_extension_key(key: &str) -> Option<Self> {
        ALL_KINDS
            .iter()
            .copied()
            .find(|kind| kind.extension_key_str() == key)
    }
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
