//! # Command Registration
//!
//! Installs the smart delete command into a host's UI registries: a menu
//! entry in the edit mesh menu and a key binding in the "Mesh" keymap.
//!
//! Registration returns a [`Registration`] handle that owns the list of
//! installed items; dropping the command means handing that handle back to
//! [`Registration::unregister`].
//!
//! ## Example
//!
//! ```rust
//! use smart_delete::registration::{register, CommandDescriptor, KeyConfig, KeyConfigs, Menu};
//!
//! let mut keyconfigs = KeyConfigs::new(Some(KeyConfig::with_keymap("Mesh")), None);
//! let mut menu = Menu::edit_mesh();
//!
//! let registration = register(&mut keyconfigs, &mut menu, &CommandDescriptor::smart_delete());
//! assert_eq!(registration.installed().len(), 1);
//!
//! registration.unregister(&mut keyconfigs, &mut menu);
//! assert!(menu.entries.is_empty());
//! ```

use config::constants::{
    BOUND_KEYS, DEFAULT_USE_VERTS, EDIT_MESH_MENU, MESH_KEYMAP, OPERATOR_DESCRIPTION,
    OPERATOR_ICON, OPERATOR_ID, OPERATOR_LABEL, REPLACED_OPERATOR_ID,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Identity and options of a registered command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Operator id, e.g. `mesh.dissolve_contextual_bfa`
    pub id: String,
    /// Menu label
    pub label: String,
    /// Tooltip
    pub description: String,
    /// Menu icon name
    pub icon: String,
    /// Whether the host should push an undo step per invocation
    pub undo: bool,
    /// Default of the "dissolve vertices" option
    pub use_verts: bool,
}

impl CommandDescriptor {
    /// The smart delete command as shipped.
    pub fn smart_delete() -> Self {
        Self {
            id: OPERATOR_ID.to_string(),
            label: OPERATOR_LABEL.to_string(),
            description: OPERATOR_DESCRIPTION.to_string(),
            icon: OPERATOR_ICON.to_string(),
            undo: true,
            use_verts: DEFAULT_USE_VERTS,
        }
    }
}

/// Identifier of a keymap item, unique within one [`KeyConfigs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeymapItemId(pub u64);

/// Key event that triggers a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Press,
    Release,
}

/// One key binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeymapItem {
    pub id: KeymapItemId,
    /// Operator the key runs
    pub operator: String,
    /// Key name, e.g. `DEL`
    pub key: String,
    pub event: KeyEvent,
    pub active: bool,
}

/// A named set of key bindings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Keymap {
    pub name: String,
    pub items: Vec<KeymapItem>,
}

impl Keymap {
    /// Creates an empty keymap.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Removes the item with `id`. Returns whether it was present.
    pub fn remove(&mut self, id: KeymapItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }
}

/// A key configuration: a collection of keymaps.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyConfig {
    pub keymaps: Vec<Keymap>,
}

impl KeyConfig {
    /// Configuration holding one empty keymap.
    pub fn with_keymap(name: impl Into<String>) -> Self {
        Self {
            keymaps: vec![Keymap::new(name)],
        }
    }

    /// Keymap called `name`.
    pub fn keymap(&self, name: &str) -> Option<&Keymap> {
        self.keymaps.iter().find(|km| km.name == name)
    }

    /// Mutable keymap called `name`.
    pub fn keymap_mut(&mut self, name: &str) -> Option<&mut Keymap> {
        self.keymaps.iter_mut().find(|km| km.name == name)
    }

    /// Removes item `id` from whichever keymap holds it.
    fn remove_item(&mut self, id: KeymapItemId) -> bool {
        self.keymaps.iter_mut().any(|km| km.remove(id))
    }
}

/// The host's key configurations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyConfigs {
    /// Configuration reserved for extensions, absent in background sessions
    pub addon: Option<KeyConfig>,
    /// Built-in configuration
    pub default: Option<KeyConfig>,
    next_item_id: u64,
}

impl KeyConfigs {
    /// Creates the registry.
    pub fn new(addon: Option<KeyConfig>, default: Option<KeyConfig>) -> Self {
        Self {
            addon,
            default,
            next_item_id: 0,
        }
    }

    fn allocate_id(&mut self) -> KeymapItemId {
        self.next_item_id += 1;
        KeymapItemId(self.next_item_id)
    }

    /// The keymap bindings go into: `name` in the addon configuration,
    /// else `name` in the default one. `None` without an addon
    /// configuration.
    fn target_keymap(&mut self, name: &str) -> Option<&mut Keymap> {
        let addon = self.addon.as_mut()?;
        if addon.keymap(name).is_some() {
            return addon.keymap_mut(name);
        }
        self.default.as_mut()?.keymap_mut(name)
    }
}

/// One menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub operator: String,
    pub label: String,
    pub icon: String,
}

/// A host menu.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Menu {
    pub name: String,
    pub entries: Vec<MenuEntry>,
}

impl Menu {
    /// Creates an empty menu.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// The edit-mode mesh menu the command is appended to.
    pub fn edit_mesh() -> Self {
        Self::new(EDIT_MESH_MENU)
    }
}

/// Handle to an installed command. Pass it to [`Registration::unregister`]
/// to take the command out again.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "dropping the handle leaves the command installed"]
pub struct Registration {
    operator: String,
    installed: Vec<KeymapItemId>,
}

impl Registration {
    /// Keymap items added by [`register`].
    pub fn installed(&self) -> &[KeymapItemId] {
        &self.installed
    }

    /// Removes the menu entry and every installed keymap item. Items the
    /// user already removed are skipped.
    pub fn unregister(self, keyconfigs: &mut KeyConfigs, menu: &mut Menu) {
        menu.entries.retain(|entry| entry.operator != self.operator);

        for id in self.installed {
            let removed = keyconfigs
                .addon
                .as_mut()
                .is_some_and(|kc| kc.remove_item(id))
                || keyconfigs
                    .default
                    .as_mut()
                    .is_some_and(|kc| kc.remove_item(id));
            if !removed {
                debug!(?id, "keymap item already gone");
            }
        }
        info!(operator = %self.operator, "command unregistered");
    }
}

/// Installs `command` into the menu and the "Mesh" keymap.
///
/// Existing bindings of the bound keys to the stock delete command, or to
/// `command` itself, are replaced. Without an addon key configuration, or
/// without a "Mesh" keymap in either configuration, only the menu entry is
/// added.
pub fn register(
    keyconfigs: &mut KeyConfigs,
    menu: &mut Menu,
    command: &CommandDescriptor,
) -> Registration {
    menu.entries.push(MenuEntry {
        operator: command.id.clone(),
        label: command.label.clone(),
        icon: command.icon.clone(),
    });

    let ids: Vec<KeymapItemId> = BOUND_KEYS.iter().map(|_| keyconfigs.allocate_id()).collect();
    let mut installed = Vec::new();

    match keyconfigs.target_keymap(MESH_KEYMAP) {
        Some(keymap) => {
            keymap.items.retain(|item| {
                let replaced = BOUND_KEYS.contains(&item.key.as_str())
                    && (item.operator == REPLACED_OPERATOR_ID || item.operator == command.id);
                !replaced
            });

            for (&key, id) in BOUND_KEYS.iter().zip(ids) {
                keymap.items.push(KeymapItem {
                    id,
                    operator: command.id.clone(),
                    key: key.to_string(),
                    event: KeyEvent::Press,
                    active: true,
                });
                installed.push(id);
            }
        }
        None => debug!(keymap = MESH_KEYMAP, "no keymap to bind into, menu entry only"),
    }

    info!(operator = %command.id, keys = installed.len(), "command registered");
    Registration {
        operator: command.id.clone(),
        installed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, operator: &str, key: &str) -> KeymapItem {
        KeymapItem {
            id: KeymapItemId(id),
            operator: operator.to_string(),
            key: key.to_string(),
            event: KeyEvent::Press,
            active: true,
        }
    }

    fn mesh_keymap(items: Vec<KeymapItem>) -> KeyConfig {
        KeyConfig {
            keymaps: vec![Keymap {
                name: MESH_KEYMAP.to_string(),
                items,
            }],
        }
    }

    #[test]
    fn test_descriptor_defaults() {
        let command = CommandDescriptor::smart_delete();
        assert_eq!(command.id, "mesh.dissolve_contextual_bfa");
        assert_eq!(command.label, "Smart Delete");
        assert_eq!(command.icon, "DELETE");
        assert!(command.undo);
        assert!(!command.use_verts);
    }

    #[test]
    fn test_edit_mesh_menu_name() {
        let menu = Menu::edit_mesh();
        assert_eq!(menu.name, "VIEW3D_MT_edit_mesh");
        assert!(menu.entries.is_empty());
    }

    #[test]
    fn test_register_replaces_stock_delete_on_del() {
        let mut keyconfigs = KeyConfigs::new(
            Some(mesh_keymap(vec![
                item(100, "mesh.delete", "DEL"),
                item(101, "mesh.delete", "X"),
            ])),
            None,
        );
        let mut menu = Menu::edit_mesh();
        let command = CommandDescriptor::smart_delete();

        let registration = register(&mut keyconfigs, &mut menu, &command);

        let keymap = keyconfigs.addon.as_ref().unwrap().keymap(MESH_KEYMAP).unwrap();
        let keys: Vec<(&str, &str)> = keymap
            .items
            .iter()
            .map(|i| (i.operator.as_str(), i.key.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![("mesh.delete", "X"), ("mesh.dissolve_contextual_bfa", "DEL")]
        );
        assert_eq!(registration.installed().len(), 1);
        assert_eq!(menu.entries.len(), 1);
        assert_eq!(menu.entries[0].icon, "DELETE");
    }

    #[test]
    fn test_register_twice_keeps_one_binding() {
        let mut keyconfigs = KeyConfigs::new(Some(KeyConfig::with_keymap(MESH_KEYMAP)), None);
        let mut menu = Menu::edit_mesh();
        let command = CommandDescriptor::smart_delete();

        let first = register(&mut keyconfigs, &mut menu, &command);
        let second = register(&mut keyconfigs, &mut menu, &command);
        assert_ne!(first.installed(), second.installed());

        let keymap = keyconfigs.addon.as_ref().unwrap().keymap(MESH_KEYMAP).unwrap();
        assert_eq!(keymap.items.len(), 1);
        assert_eq!(keymap.items[0].id, second.installed()[0]);
    }

    #[test]
    fn test_register_falls_back_to_default_keymap() {
        let mut keyconfigs = KeyConfigs::new(
            Some(KeyConfig::default()),
            Some(mesh_keymap(vec![item(7, "mesh.delete", "DEL")])),
        );
        let mut menu = Menu::edit_mesh();

        let registration = register(&mut keyconfigs, &mut menu, &CommandDescriptor::smart_delete());

        let keymap = keyconfigs.default.as_ref().unwrap().keymap(MESH_KEYMAP).unwrap();
        assert_eq!(keymap.items.len(), 1);
        assert_eq!(keymap.items[0].operator, OPERATOR_ID);

        registration.unregister(&mut keyconfigs, &mut menu);
        let keymap = keyconfigs.default.as_ref().unwrap().keymap(MESH_KEYMAP).unwrap();
        assert!(keymap.items.is_empty());
    }

    #[test]
    fn test_register_without_addon_config_adds_menu_only() {
        let mut keyconfigs = KeyConfigs::new(None, Some(KeyConfig::with_keymap(MESH_KEYMAP)));
        let mut menu = Menu::edit_mesh();

        let registration = register(&mut keyconfigs, &mut menu, &CommandDescriptor::smart_delete());
        assert!(registration.installed().is_empty());
        assert_eq!(menu.entries.len(), 1);
        assert!(keyconfigs.default.as_ref().unwrap().keymaps[0].items.is_empty());
    }

    #[test]
    fn test_register_without_mesh_keymap_adds_menu_only() {
        let mut keyconfigs = KeyConfigs::new(Some(KeyConfig::default()), Some(KeyConfig::default()));
        let mut menu = Menu::edit_mesh();

        let registration = register(&mut keyconfigs, &mut menu, &CommandDescriptor::smart_delete());
        assert!(registration.installed().is_empty());
        assert_eq!(menu.entries.len(), 1);
    }

    #[test]
    fn test_unregister_skips_removed_items() {
        let mut keyconfigs = KeyConfigs::new(Some(KeyConfig::with_keymap(MESH_KEYMAP)), None);
        let mut menu = Menu::edit_mesh();
        menu.entries.push(MenuEntry {
            operator: "mesh.other".to_string(),
            label: "Other".to_string(),
            icon: "NONE".to_string(),
        });

        let registration = register(&mut keyconfigs, &mut menu, &CommandDescriptor::smart_delete());
        let id = registration.installed()[0];
        let addon = keyconfigs.addon.as_mut().unwrap();
        assert!(addon.keymap_mut(MESH_KEYMAP).unwrap().remove(id));

        registration.unregister(&mut keyconfigs, &mut menu);
        assert_eq!(menu.entries.len(), 1);
        assert_eq!(menu.entries[0].operator, "mesh.other");
    }
}
