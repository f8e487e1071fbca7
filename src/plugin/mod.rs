//! Plugin payloads and the sources they are loaded from.
//!
//! A plugin payload is a structured object with a `type` discriminator:
//!
//! ```json
//! { "type": "library", "name": "material", "elements": { "button": {} } }
//! { "type": "mapping", "name": "material-react", "library": "material",
//!   "target": "react", "elementType": "component" }
//! ```
//!
//! Payloads are classified once, at the edge, into the [`Plugin`] sum type.
//! Anything without a recognised `type` is rejected with
//! [`MosaicError::UnrecognizedType`].

mod loader;
mod source;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MosaicError, Result};
use crate::types::{GeneratorDef, LibraryDef, MappingDef, PublisherDef};

pub use loader::{load, LoadOptions, LoadReport, LoadedPlugin, Loader};
pub use source::{is_url, Environment, PluginSource};

/// Longest payload excerpt included in error messages.
const PAYLOAD_EXCERPT_LEN: usize = 120;

/// The declared kind of a plugin payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PluginKind {
    Library,
    Gui,
    Mapping,
    Generator,
    Publisher,
}

impl PluginKind {
    /// All kinds, in the order they must be loaded to satisfy dependencies.
    pub const LOAD_ORDER: [PluginKind; 5] = [
        PluginKind::Library,
        PluginKind::Gui,
        PluginKind::Mapping,
        PluginKind::Generator,
        PluginKind::Publisher,
    ];

    /// The `type` discriminator value.
    pub fn name(&self) -> &'static str {
        match self {
            PluginKind::Library => "library",
            PluginKind::Gui => "gui",
            PluginKind::Mapping => "mapping",
            PluginKind::Generator => "generator",
            PluginKind::Publisher => "publisher",
        }
    }

    /// Parse a `type` discriminator value.
    pub fn parse(s: &str) -> Option<Self> {
        Self::LOAD_ORDER.into_iter().find(|kind| kind.name() == s)
    }
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// GUI metadata for an already-loaded library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuiDef {
    /// Name of the library to extend.
    pub library: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

/// A classified plugin payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Plugin {
    Library(LibraryDef),
    Mapping(MappingDef),
    Generator(GeneratorDef),
    Publisher(PublisherDef),
    Gui(GuiDef),
}

impl Plugin {
    /// Classify a loosely-typed payload.
    ///
    /// Fails with `UnrecognizedType` when `type` is missing or unknown, and
    /// with `Parse` when the type is known but its fields are malformed.
    pub fn from_value(value: Value) -> Result<Self> {
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .and_then(PluginKind::parse);

        let Some(kind) = kind else {
            return Err(MosaicError::UnrecognizedType {
                payload: excerpt(&value),
            });
        };

        serde_json::from_value(value).map_err(|e| MosaicError::Parse {
            message: format!("Invalid {} plugin: {}", kind, e),
            help: Some(format!("Check the fields required by `type: {}`", kind)),
        })
    }

    pub fn kind(&self) -> PluginKind {
        match self {
            Plugin::Library(_) => PluginKind::Library,
            Plugin::Mapping(_) => PluginKind::Mapping,
            Plugin::Generator(_) => PluginKind::Generator,
            Plugin::Publisher(_) => PluginKind::Publisher,
            Plugin::Gui(_) => PluginKind::Gui,
        }
    }

    /// The name of the entity this plugin declares or extends.
    pub fn name(&self) -> &str {
        match self {
            Plugin::Library(def) => &def.name,
            Plugin::Mapping(def) => &def.name,
            Plugin::Generator(def) => &def.name,
            Plugin::Publisher(def) => &def.name,
            Plugin::Gui(def) => &def.library,
        }
    }
}

/// Render a payload for an error message, truncated on a char boundary.
fn excerpt(value: &Value) -> String {
    let text = value.to_string();
    match text.char_indices().nth(PAYLOAD_EXCERPT_LEN) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text,
    }
}
