//! Copy-to-clipboard action.

use crate::error::{UiError, UiResult};
use crate::notify::Notice;

/// Somewhere text can be copied to.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> UiResult<()>;
}

/// Copy `text` and return the notification to show.
pub fn copy_text(clipboard: &mut dyn Clipboard, text: &str) -> Notice {
    match clipboard.write_text(text) {
        Ok(()) => Notice::success("Copied to clipboard!"),
        Err(err) => {
            tracing::warn!("copy to clipboard failed: {}", err);
            let err = match err {
                UiError::Clipboard(_) => err,
                other => UiError::Clipboard(other.to_string()),
            };
            Notice::from_error(&err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Severity;

    #[derive(Default)]
    struct MemoryClipboard {
        contents: Option<String>,
        fail: bool,
    }

    impl Clipboard for MemoryClipboard {
        fn write_text(&mut self, text: &str) -> UiResult<()> {
            if self.fail {
                return Err(UiError::Clipboard("denied".into()));
            }
            self.contents = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_copy_success() {
        let mut clip = MemoryClipboard::default();
        let notice = copy_text(&mut clip, "qc.h(0)");
        assert_eq!(notice.severity, Severity::Success);
        assert_eq!(notice.message, "Copied to clipboard!");
        assert_eq!(clip.contents.as_deref(), Some("qc.h(0)"));
    }

    #[test]
    fn test_copy_failure_is_generic_error() {
        let mut clip = MemoryClipboard {
            fail: true,
            ..Default::default()
        };
        let notice = copy_text(&mut clip, "x");
        assert_eq!(notice.severity, Severity::Error);
        assert_eq!(notice.message, "Failed to copy to clipboard");
    }
}
