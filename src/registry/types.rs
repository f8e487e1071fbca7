//! Entity kinds held by the registry.

use std::fmt;

/// The kind of a registered entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Library,
    Target,
    Mapping,
    Generator,
    Publisher,
}

impl EntityKind {
    /// All kinds, in inventory order.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Library,
        EntityKind::Target,
        EntityKind::Mapping,
        EntityKind::Generator,
        EntityKind::Publisher,
    ];

    /// Get the short name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Library => "library",
            EntityKind::Target => "target",
            EntityKind::Mapping => "mapping",
            EntityKind::Generator => "generator",
            EntityKind::Publisher => "publisher",
        }
    }

    /// Plural label, used for inventory headings.
    pub fn plural(&self) -> &'static str {
        match self {
            EntityKind::Library => "Libraries",
            EntityKind::Target => "Targets",
            EntityKind::Mapping => "Mappings",
            EntityKind::Generator => "Generators",
            EntityKind::Publisher => "Publishers",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
