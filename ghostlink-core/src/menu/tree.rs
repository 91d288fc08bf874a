//! Menu lookup table

use heapless::Vec;

use super::{Entry, Menu, MenuId, MAX_ITEMS};

/// Maximum menus in a tree
pub const MAX_MENUS: usize = 8;

/// Errors found while building or checking a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuError {
    /// Tree is full
    TooManyMenus,
    /// Two menus share an id
    DuplicateMenu(MenuId),
    /// No menu with the root id
    MissingRoot,
    /// Root has a parent, or another menu has none
    BadParent(MenuId),
    /// Parent or submenu target does not exist
    UnknownMenu(MenuId),
    /// Menu has no items
    EmptyMenu(MenuId),
    /// Menu has more than [`MAX_ITEMS`] items
    TooManyItems(MenuId),
}

/// All menus, indexed by [`MenuId`]
#[derive(Debug, Clone, Default)]
pub struct MenuTree {
    menus: Vec<Menu, MAX_MENUS>,
}

impl MenuTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self { menus: Vec::new() }
    }

    /// Add a menu
    pub fn add_menu(&mut self, menu: Menu) -> Result<(), MenuError> {
        if self.menu(menu.id).is_some() {
            return Err(MenuError::DuplicateMenu(menu.id));
        }
        self.menus.push(menu).map_err(|_| MenuError::TooManyMenus)
    }

    /// Look up a menu
    pub fn menu(&self, id: MenuId) -> Option<&Menu> {
        self.menus.iter().find(|m| m.id == id)
    }

    /// The root menu
    pub fn root(&self) -> Option<&Menu> {
        self.menu(MenuId::ROOT)
    }

    /// Parent of a menu; `None` for the root or unknown ids
    pub fn parent(&self, id: MenuId) -> Option<MenuId> {
        self.menu(id).and_then(|m| m.parent)
    }

    /// Resolve a selection
    pub fn resolve(&self, id: MenuId, index: usize) -> Option<Entry> {
        self.menu(id).and_then(|m| m.entry(index))
    }

    /// All menus
    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    /// Check that every reference in the tree points somewhere
    pub fn validate(&self) -> Result<(), MenuError> {
        let root = self.root().ok_or(MenuError::MissingRoot)?;
        if root.parent.is_some() {
            return Err(MenuError::BadParent(MenuId::ROOT));
        }

        for menu in &self.menus {
            if menu.is_empty() {
                return Err(MenuError::EmptyMenu(menu.id));
            }
            if menu.len() > MAX_ITEMS {
                return Err(MenuError::TooManyItems(menu.id));
            }
            match menu.parent {
                None if !menu.id.is_root() => return Err(MenuError::BadParent(menu.id)),
                Some(parent) if self.menu(parent).is_none() => {
                    return Err(MenuError::UnknownMenu(parent))
                }
                _ => {}
            }
            for item in menu.items {
                if let Entry::Submenu(target) = item.entry {
                    if self.menu(target).is_none() {
                        return Err(MenuError::UnknownMenu(target));
                    }
                }
            }
        }
        Ok(())
    }
}
