use crate::traits::Clipboard;

/// In-process clipboard. The default when no other clipboard is injected.
#[derive(Default, Debug, Clone)]
pub struct LocalClipboard {
    content: Option<String>,
}

impl LocalClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for LocalClipboard {
    fn get(&mut self) -> Option<String> {
        self.content.clone()
    }

    fn set(&mut self, text: String) {
        self.content = Some(text);
    }
}

#[cfg(feature = "clipboard")]
pub use system::SystemClipboard;

#[cfg(feature = "clipboard")]
mod system {
    use crate::error::ClipboardError;
    use crate::traits::Clipboard;

    /// The desktop clipboard, through `arboard`.
    pub struct SystemClipboard {
        inner: arboard::Clipboard,
    }

    impl SystemClipboard {
        pub fn new() -> Result<Self, ClipboardError> {
            Ok(Self {
                inner: arboard::Clipboard::new()?,
            })
        }
    }

    impl Clipboard for SystemClipboard {
        fn get(&mut self) -> Option<String> {
            match self.inner.get_text() {
                Ok(text) => Some(text),
                Err(arboard::Error::ContentNotAvailable) => None,
                Err(err) => {
                    tracing::warn!(%err, "reading system clipboard failed");
                    None
                }
            }
        }

        fn set(&mut self, text: String) {
            if let Err(err) = self.inner.set_text(text) {
                tracing::warn!(%err, "writing system clipboard failed");
            }
        }
    }
}
