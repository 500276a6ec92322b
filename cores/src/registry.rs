//! Console-core registry for automatic front-end discovery.
//!
//! Each core self-registers via [`inventory::submit!`] with a [`CoreEntry`]
//! containing its CLI name, the ROM file extensions it accepts, and a
//! factory function. The front-end discovers available cores at runtime
//! without any central list.

use lantern_core::core::console::Console;

/// Describes a front-end-capable console core.
pub struct CoreEntry {
    /// CLI name used to select this core (e.g., "test-pattern").
    pub name: &'static str,
    /// ROM file extensions the browser should offer, lowercase, no dot.
    pub extensions: &'static [&'static str],
    /// Factory: construct a fresh, unloaded core.
    pub create: fn() -> Box<dyn Console>,
}

impl CoreEntry {
    pub const fn new(
        name: &'static str,
        extensions: &'static [&'static str],
        create: fn() -> Box<dyn Console>,
    ) -> Self {
        Self {
            name,
            extensions,
            create,
        }
    }
}

inventory::collect!(CoreEntry);

/// Return all registered cores, sorted by name.
pub fn all() -> Vec<&'static CoreEntry> {
    let mut entries: Vec<_> = inventory::iter::<CoreEntry>.into_iter().collect();
    entries.sort_by_key(|e| e.name);
    entries
}

/// Look up a core by its CLI name.
pub fn find(name: &str) -> Option<&'static CoreEntry> {
    inventory::iter::<CoreEntry>
        .into_iter()
        .find(|e| e.name == name)
}
