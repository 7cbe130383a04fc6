use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a reorderable dock item (tray icon key, app entry id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a toplevel window, as reported by the window list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// High-level request from a coordinator to the widget layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Intent {
    ReorderItem { item: ItemId, index: usize },
    RemoveItem { item: ItemId },
    /// Play the removal animation; a [`Intent::RemoveItem`] follows once it finishes.
    AnimateRemoval { item: ItemId },
    /// Show or hide the "release to remove" hint next to the dragged item.
    RemoveHint { item: ItemId, visible: bool },
    CancelDrag { item: ItemId },
    ShowPreviewPopup { window: WindowId },
    HidePreviewPopup,
    ActivateWindow { window: WindowId },
    /// Revert any transient window-peek state the compositor is showing.
    CancelPreview,
}

/// Intents queued by a coordinator since the caller last drained them.
#[derive(Debug, Default)]
pub struct IntentQueue {
    intents: Vec<Intent>,
}

impl IntentQueue {
    pub fn push(&mut self, intent: Intent) {
        tracing::trace!("intent: {intent:?}");
        self.intents.push(intent);
    }

    pub fn drain(&mut self) -> Vec<Intent> {
        std::mem::take(&mut self.intents)
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_kebab_tagged() {
        let json = serde_json::to_string(&Intent::ReorderItem {
            item: ItemId::from("sni:nm-applet"),
            index: 2,
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"type":"reorder-item","item":"sni:nm-applet","index":2}"#
        );

        let json = serde_json::to_string(&Intent::HidePreviewPopup).unwrap();
        assert_eq!(json, r#"{"type":"hide-preview-popup"}"#);
    }
}
