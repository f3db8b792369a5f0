//! Contribution types
//!
//! Value records plugins hand to the aggregator: menu and toolbar entries,
//! notebook tabs, and the minimal widget handles they carry.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use strum_macros::{Display, EnumString};

/// First id handed out by [`CommandId::new_unique`]; everything below is stock.
const FIRST_UNIQUE_ID: u32 = 1000;

static NEXT_COMMAND_ID: AtomicU32 = AtomicU32::new(FIRST_UNIQUE_ID);

/// Identifier of a menu or toolbar command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(u32);

impl CommandId {
    /// Placeholder meaning "assign an id for me"
    pub const ANY: CommandId = CommandId(u32::MAX);
    pub const EXIT: CommandId = CommandId(1);
    pub const ABOUT: CommandId = CommandId(2);
    pub const OPEN: CommandId = CommandId(3);

    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Allocate a process-wide unique command id
    pub fn new_unique() -> Self {
        Self(NEXT_COMMAND_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn is_any(self) -> bool {
        self == Self::ANY
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl Default for CommandId {
    fn default() -> Self {
        Self::ANY
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            write!(f, "any")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Kind of a menu or toolbar item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ItemKind {
    #[default]
    Normal,
    Check,
    Radio,
}

/// Event handed to menu and toolbar callbacks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEvent {
    pub id: CommandId,
    pub checked: bool,
}

impl CommandEvent {
    pub fn new(id: CommandId) -> Self {
        Self { id, checked: false }
    }
}

pub type CommandCallback = Arc<dyn Fn(&CommandEvent) + Send + Sync>;

/// Image reference for toolbar items, resolved by the toolkit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub art_id: String,
}

impl Bitmap {
    pub fn from_art(art_id: impl Into<String>) -> Self {
        Self {
            art_id: art_id.into(),
        }
    }
}

/// Everything needed to add an entry to a menu or a toolbar
#[derive(Clone, Default)]
pub struct MenuTool {
    pub menu: String,
    pub id: CommandId,
    pub text: String,
    pub description: String,
    pub short_help: String,
    pub callback: Option<CommandCallback>,
    pub kind: ItemKind,
    pub bitmap: Option<Bitmap>,
}

impl MenuTool {
    pub fn new(menu: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            menu: menu.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: CommandId) -> Self {
        self.id = id;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_short_help(mut self, short_help: impl Into<String>) -> Self {
        self.short_help = short_help.into();
        self
    }

    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_bitmap(mut self, bitmap: Bitmap) -> Self {
        self.bitmap = Some(bitmap);
        self
    }

    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&CommandEvent) + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Run the callback, if any. Items without one are inert.
    pub fn invoke(&self, event: &CommandEvent) -> bool {
        match &self.callback {
            Some(callback) => {
                callback(event);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for MenuTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuTool")
            .field("menu", &self.menu)
            .field("id", &self.id)
            .field("text", &self.text)
            .field("description", &self.description)
            .field("short_help", &self.short_help)
            .field("callback", &self.callback.is_some())
            .field("kind", &self.kind)
            .field("bitmap", &self.bitmap)
            .finish()
    }
}

/// Role of a container passed to plugins as parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ParentRole {
    MainWindow,
    Notebook,
}

/// Handle to the container a plugin must parent its widgets to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentHandle {
    role: ParentRole,
    title: String,
}

impl ParentHandle {
    pub fn main_window(title: impl Into<String>) -> Self {
        Self {
            role: ParentRole::MainWindow,
            title: title.into(),
        }
    }

    pub fn notebook(title: impl Into<String>) -> Self {
        Self {
            role: ParentRole::Notebook,
            title: title.into(),
        }
    }

    pub fn role(&self) -> ParentRole {
        self.role
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// A widget created by a plugin. The toolkit takes ownership on insertion.
pub trait Widget: fmt::Debug + Send {
    /// Toolkit class of the widget, e.g. `"TextCtrl"`
    fn class_name(&self) -> &str;

    /// Role of the parent the widget was created for
    fn parent_role(&self) -> ParentRole;
}

/// Plain widget used by the bundled extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    class_name: String,
    parent_role: ParentRole,
}

impl Panel {
    pub fn new(parent: &ParentHandle, class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            parent_role: parent.role(),
        }
    }
}

impl Widget for Panel {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn parent_role(&self) -> ParentRole {
        self.parent_role
    }
}

/// A page contributed to the application notebook
#[derive(Debug)]
pub struct Tab {
    pub page: Box<dyn Widget>,
    pub text: String,
    pub select: bool,
    pub image_id: Option<usize>,
    pub order: i32,
}

impl Tab {
    pub fn new(page: Box<dyn Widget>, text: impl Into<String>) -> Self {
        Self {
            page,
            text: text.into(),
            select: false,
            image_id: None,
            order: 0,
        }
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    pub fn with_select(mut self, select: bool) -> Self {
        self.select = select;
        self
    }

    pub fn with_image(mut self, image_id: usize) -> Self {
        self.image_id = Some(image_id);
        self
    }
}
