//! Table-driven menu tree
//!
//! Every menu is a header plus a static slice of items. Selecting an item
//! resolves to an [`Entry`]: a submenu to open, a firmware action to run or
//! a payload to upload.
//!
//! ```text
//!            ┌──────────────────────┐
//!            │ ROOT "Select a ..."  │
//!            └──┬──────┬──────┬─────┘
//!               │      │      │
//!         ┌─────▼┐  ┌──▼───┐ ┌▼────┐
//!         │ WIFI │  │ BLE  │ │ LED │   ...
//!         └──┬───┘  └──────┘ └─────┘
//!            │ leaf
//!            ▼
//!      Action + ArgSpec ──► bridge cycle ──► back to WIFI
//! ```

mod default;
mod tree;

pub use default::ghost_esp;
pub use tree::{MenuError, MenuTree, MAX_MENUS};

use ghostlink_protocol::{Action, PayloadKind};

/// Maximum items per menu
pub const MAX_ITEMS: usize = 24;

/// Menu identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuId(pub u8);

impl MenuId {
    /// Top-level menu
    pub const ROOT: MenuId = MenuId(0);
    /// WiFi utilities
    pub const WIFI: MenuId = MenuId(1);
    /// BLE spam
    pub const BLE_SPAM: MenuId = MenuId(2);
    /// LED utilities
    pub const LED: MenuId = MenuId(3);
    /// BLE scanning
    pub const BLE_SCAN: MenuId = MenuId(4);
    /// Packet capture
    pub const CAPTURE: MenuId = MenuId(5);
    /// Payload uploads
    pub const PAYLOADS: MenuId = MenuId(6);

    /// Whether this is the top-level menu
    pub fn is_root(self) -> bool {
        self == MenuId::ROOT
    }
}

/// How a leaf obtains its argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArgSpec {
    /// No argument
    None,
    /// Free text, passed through as typed
    Text {
        /// Prompt header
        header: &'static str,
    },
    /// Numeric list index
    Index {
        /// Prompt header
        header: &'static str,
    },
}

/// A selectable firmware action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Leaf {
    /// Action to run
    pub action: Action,
    /// Argument source
    pub arg: ArgSpec,
}

/// What selecting an item does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Entry {
    /// Open another menu
    Submenu(MenuId),
    /// Run an action, then come back to this menu
    Leaf(Leaf),
    /// Pick a stored payload and upload it
    Upload(PayloadKind),
}

/// One menu line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    /// Text shown in the list
    pub label: &'static str,
    /// Selection target
    pub entry: Entry,
}

impl Item {
    /// Item opening a submenu
    pub const fn submenu(label: &'static str, id: MenuId) -> Self {
        Self {
            label,
            entry: Entry::Submenu(id),
        }
    }

    /// Item running an action with no argument
    pub const fn action(label: &'static str, action: Action) -> Self {
        Self {
            label,
            entry: Entry::Leaf(Leaf {
                action,
                arg: ArgSpec::None,
            }),
        }
    }

    /// Item running an action with a free-text argument
    pub const fn text(label: &'static str, action: Action, header: &'static str) -> Self {
        Self {
            label,
            entry: Entry::Leaf(Leaf {
                action,
                arg: ArgSpec::Text { header },
            }),
        }
    }

    /// Item running an action with a numeric index argument
    pub const fn index(label: &'static str, action: Action, header: &'static str) -> Self {
        Self {
            label,
            entry: Entry::Leaf(Leaf {
                action,
                arg: ArgSpec::Index { header },
            }),
        }
    }

    /// Item uploading a stored payload
    pub const fn upload(label: &'static str, kind: PayloadKind) -> Self {
        Self {
            label,
            entry: Entry::Upload(kind),
        }
    }
}

/// A menu: header, parent and items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Menu {
    /// Identifier
    pub id: MenuId,
    /// Header line
    pub header: &'static str,
    /// Menu that "back" returns to; `None` for the root
    pub parent: Option<MenuId>,
    /// Items in display order
    pub items: &'static [Item],
}

impl Menu {
    /// Entry behind item `index`
    pub fn entry(&self, index: usize) -> Option<Entry> {
        self.items.get(index).map(|item| item.entry)
    }

    /// Item labels in display order
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.items.iter().map(|item| item.label)
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the menu has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
