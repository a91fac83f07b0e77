//! Editing-session state.

/// Baseline stylesheet injected into the preview document.
///
/// Exactly one variant is active at a time; the selector in the CSS
/// panel switches between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleAugmentation {
    /// No baseline stylesheet.
    None,
    /// Tailwind utility classes via the CDN bootstrap script.
    Tailwind,
    /// The modern-normalize reset stylesheet.
    Normalize,
}

impl StyleAugmentation {
    /// Wire discriminant for the codec.
    pub fn code(self) -> u8 {
        match self {
            StyleAugmentation::None => 0,
            StyleAugmentation::Tailwind => 1,
            StyleAugmentation::Normalize => 2,
        }
    }

    /// Inverse of [`code`](Self::code); `None` for unknown discriminants.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(StyleAugmentation::None),
            1 => Some(StyleAugmentation::Tailwind),
            2 => Some(StyleAugmentation::Normalize),
            _ => None,
        }
    }

    /// Stable lowercase name, used by the CLI and the CSS-panel selector.
    pub fn name(self) -> &'static str {
        match self {
            StyleAugmentation::None => "none",
            StyleAugmentation::Tailwind => "tailwind",
            StyleAugmentation::Normalize => "normalize",
        }
    }

    /// Inverse of [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(StyleAugmentation::None),
            "tailwind" => Some(StyleAugmentation::Tailwind),
            "normalize" => Some(StyleAugmentation::Normalize),
            _ => None,
        }
    }
}

/// The full editing session: everything the preview and the share token
/// are derived from.
///
/// Owned by the top-level UI component for the lifetime of the page.
/// Round-trips through the codec string-for-string.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// HTML fragment placed verbatim in the preview body.
    pub markup: String,
    /// CSS fragment placed verbatim in the preview `<style>` block.
    pub style: String,
    /// JavaScript or TypeScript source.
    pub script: String,
    /// Baseline stylesheet injected ahead of `style`.
    pub style_augmentation: StyleAugmentation,
    /// Whether `script` must be transpiled before it can run.
    pub script_is_typed: bool,
}

const DEFAULT_MARKUP: &str = "<div>HelloWorld</div>";
const DEFAULT_STYLE: &str = "div { color: red; }";
const DEFAULT_SCRIPT: &str = "console.log(\"HelloWorld\")";

impl Default for Session {
    fn default() -> Self {
        Self {
            markup: DEFAULT_MARKUP.to_string(),
            style: DEFAULT_STYLE.to_string(),
            script: DEFAULT_SCRIPT.to_string(),
            style_augmentation: StyleAugmentation::Tailwind,
            script_is_typed: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session() {
        let session = Session::default();
        assert_eq!(session.markup, "<div>HelloWorld</div>");
        assert_eq!(session.style, "div { color: red; }");
        assert_eq!(session.script, "console.log(\"HelloWorld\")");
        assert_eq!(session.style_augmentation, StyleAugmentation::Tailwind);
        assert!(session.script_is_typed);
    }

    #[test]
    fn test_augmentation_code_round_trip() {
        for mode in [
            StyleAugmentation::None,
            StyleAugmentation::Tailwind,
            StyleAugmentation::Normalize,
        ] {
            assert_eq!(StyleAugmentation::from_code(mode.code()), Some(mode));
            assert_eq!(StyleAugmentation::from_name(mode.name()), Some(mode));
        }
    }

    #[test]
    fn test_augmentation_rejects_unknown() {
        assert_eq!(StyleAugmentation::from_code(3), None);
        assert_eq!(StyleAugmentation::from_name("bootstrap"), None);
    }
}
