//! Publishers ship generated output. They are looked up by name and have no
//! links to libraries or targets.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Deployer;

/// Declarative definition of a publisher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublisherDef {
    pub name: String,
    #[serde(default)]
    pub options: Value,
}

/// A registered publisher.
#[derive(Clone)]
pub struct Publisher {
    name: String,
    options: Value,
    deployer: Option<Arc<dyn Deployer>>,
}

impl Publisher {
    pub fn new(def: PublisherDef) -> Self {
        Self {
            name: def.name,
            options: def.options,
            deployer: None,
        }
    }

    /// Attach the deployer that ships artifacts.
    pub fn with_deployer(mut self, deployer: Arc<dyn Deployer>) -> Self {
        self.deployer = Some(deployer);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &Value {
        &self.options
    }

    pub fn deployer(&self) -> Option<&dyn Deployer> {
        self.deployer.as_deref()
    }
}

impl fmt::Debug for Publisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publisher")
            .field("name", &self.name)
            .field("options", &self.options)
            .field("deployer", &self.deployer.is_some())
            .finish()
    }
}

impl From<PublisherDef> for Publisher {
    fn from(def: PublisherDef) -> Self {
        Self::new(def)
    }
}
