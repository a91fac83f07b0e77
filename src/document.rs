//! Preview document assembly.
//!
//! [`assemble`] is pure and deterministic: the same session and script
//! always produce byte-identical output. Nothing is escaped on the way
//! in — the sandboxed iframe that renders the document is the trust
//! boundary, so the fragments are embedded verbatim.

use crate::session::{Session, StyleAugmentation};

/// Bootstrap tag injected for [`StyleAugmentation::Tailwind`].
pub const TAILWIND_SNIPPET: &str = r#"<script src="https://cdn.tailwindcss.com"></script>"#;

/// Stylesheet link injected for [`StyleAugmentation::Normalize`].
pub const NORMALIZE_SNIPPET: &str = r#"<link rel="stylesheet" href="/modern-normalize.min.css">"#;

/// The head snippet for a style-augmentation mode.
pub fn augmentation_snippet(mode: StyleAugmentation) -> &'static str {
    match mode {
        StyleAugmentation::None => "",
        StyleAugmentation::Tailwind => TAILWIND_SNIPPET,
        StyleAugmentation::Normalize => NORMALIZE_SNIPPET,
    }
}

/// Assemble the complete preview document.
///
/// `executable_script` is the already-resolved script text: the session
/// script verbatim for plain JavaScript, or the compiler output for
/// typed sources. The caller settles that before assembly so this
/// function can stay synchronous.
pub fn assemble(session: &Session, executable_script: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en" style="height:100%">
  <head>
    <meta charset="UTF-8" />
    <title>Document</title>
    {snippet}
    <style>
{style}
    </style>
  </head>
  <body style="height:100%">
{markup}
    <script>
{script}
    </script>
  </body>
</html>
"#,
        snippet = augmentation_snippet(session.style_augmentation),
        style = session.style,
        markup = session.markup,
        script = executable_script,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_is_deterministic() {
        let session = Session::default();
        let first = assemble(&session, "console.log(1)");
        let second = assemble(&session, "console.log(1)");
        assert_eq!(first, second);
    }

    #[test]
    fn test_assemble_embeds_fields_verbatim() {
        let session = Session {
            markup: "<p class=\"x\">a & b</p>".to_string(),
            style: "p { content: \"<\"; }".to_string(),
            ..Session::default()
        };
        let doc = assemble(&session, "let x = 1 < 2;");

        // No escaping: the sandbox is the trust boundary.
        assert!(doc.contains("<p class=\"x\">a & b</p>"));
        assert!(doc.contains("p { content: \"<\"; }"));
        assert!(doc.contains("let x = 1 < 2;"));
    }

    #[test]
    fn test_augmentation_none_injects_nothing() {
        let session = Session {
            style_augmentation: StyleAugmentation::None,
            ..Session::default()
        };
        let doc = assemble(&session, "");
        assert!(!doc.contains(TAILWIND_SNIPPET));
        assert!(!doc.contains(NORMALIZE_SNIPPET));
    }

    #[test]
    fn test_augmentation_tailwind_injects_only_tailwind() {
        let session = Session {
            style_augmentation: StyleAugmentation::Tailwind,
            ..Session::default()
        };
        let doc = assemble(&session, "");
        assert!(doc.contains(TAILWIND_SNIPPET));
        assert!(!doc.contains(NORMALIZE_SNIPPET));
    }

    #[test]
    fn test_augmentation_normalize_injects_only_normalize() {
        let session = Session {
            style_augmentation: StyleAugmentation::Normalize,
            ..Session::default()
        };
        let doc = assemble(&session, "");
        assert!(doc.contains(NORMALIZE_SNIPPET));
        assert!(!doc.contains(TAILWIND_SNIPPET));
    }

    #[test]
    fn test_end_to_end_default_session() {
        // The default session, after the compiler has produced plain
        // JavaScript from the typed source.
        let session = Session::default();
        let compiled = "console.log(\"HelloWorld\");\n";
        let doc = assemble(&session, compiled);

        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(TAILWIND_SNIPPET));
        assert!(doc.contains("div { color: red; }"));
        assert!(doc.contains("<div>HelloWorld</div>"));
        assert!(doc.contains(compiled));
    }

    #[test]
    fn test_document_structure_order() {
        let doc = assemble(&Session::default(), "x");
        let head = doc.find("<head>").unwrap();
        let snippet = doc.find("cdn.tailwindcss.com").unwrap();
        let style = doc.find("<style>").unwrap();
        let body = doc.find("<body").unwrap();
        let script = doc.find("<script>").unwrap();
        assert!(head < snippet);
        assert!(snippet < style);
        assert!(style < body);
        assert!(body < script);
    }
}
