//! Splicing generated declarations into the hand-maintained template.
//!
//! The template is located by text patterns, then turned into a list of
//! literal segments and named slots. Rendering fills the slots by name and
//! leaves every other byte of the template untouched.

use std::borrow::Cow;

use regex::Regex;
use serde::Deserialize;

use crate::error::TemplateError;

use super::ir::utils::INDENT;

/// Line terminator used for the generated text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Follow the template: CRLF if it contains any `\r\n`, LF otherwise.
    #[default]
    Auto,
    Lf,
    Crlf,
}

impl LineEnding {
    /// The concrete terminator to use for a template.
    pub fn for_template(self, template: &str) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
            LineEnding::Auto if template.contains("\r\n") => "\r\n",
            LineEnding::Auto => "\n",
        }
    }
}

/// Anchor names and replacement text for a template.
#[derive(Debug, Clone, Copy)]
pub struct MergeOptions<'o> {
    /// `Chrome` in `declare module Chrome {` and `export = Chrome;`
    pub namespace: &'o str,
    /// Quoted module name the declaration is rewritten to
    pub module_name: &'o str,
    /// Class whose body receives the domain properties
    pub class_name: &'o str,
    /// Boilerplate prepended to the document
    pub header: &'o str,
    pub line_ending: LineEnding,
}

/// Named insertion point of a parsed template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Hoisted import statements, right after the module declaration line
    Imports,
    /// Last members of the host class body
    ClassMembers,
    /// Declarations following the host class
    Declarations,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(Slot),
}

/// Generated text for the slots, using `\n` line breaks.
#[derive(Debug, Clone, Default)]
pub struct Fragments {
    pub class_members: String,
    pub declarations: String,
}

/// A template turned into literal text and named slots.
#[derive(Debug, Clone)]
pub struct Template {
    segments: Vec<Segment>,
    imports: Vec<String>,
    newline: &'static str,
}

/// A located anchor: byte range of the template and what replaces it.
struct Edit {
    start: usize,
    end: usize,
    replacement: Vec<Segment>,
}

impl Template {
    /// Locate the anchors in `text` and build the slotted template.
    pub fn parse(text: &str, options: &MergeOptions<'_>) -> Result<Self, TemplateError> {
        let newline = options.line_ending.for_template(text);
        // Template text keeps its own line breaks unless an ending is forced
        let text = match options.line_ending {
            LineEnding::Auto => Cow::Borrowed(text),
            LineEnding::Lf | LineEnding::Crlf => with_newline(text, newline),
        };

        // Hoist imports: remember them in order, drop them from their lines
        let import_re = Regex::new(r"import .+;")?;
        let imports: Vec<String> = import_re
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .collect();
        let stripped = import_re.replace_all(&text, "");

        let mut edits = vec![
            module_declaration_edit(&stripped, options, newline)?,
            class_body_edit(&stripped, options, newline)?,
        ];
        let export_stmt = format!("export = {};", options.namespace);
        if let Some(start) = stripped.find(&export_stmt) {
            edits.push(Edit {
                start,
                end: start + export_stmt.len(),
                replacement: Vec::new(),
            });
        }
        edits.sort_by_key(|edit| edit.start);

        let mut segments = vec![Segment::Text(
            with_newline(options.header, newline).into_owned(),
        )];
        let mut cursor = 0;
        for edit in edits {
            if edit.start < cursor {
                return Err(TemplateError::OverlappingAnchors { offset: edit.start });
            }
            segments.push(Segment::Text(stripped[cursor..edit.start].to_string()));
            segments.extend(edit.replacement);
            cursor = edit.end;
        }
        segments.push(Segment::Text(stripped[cursor..].to_string()));

        Ok(Self {
            segments,
            imports,
            newline,
        })
    }

    /// Import statements found in the template, in order of appearance.
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Fill every slot and return the finished document.
    pub fn render(&self, fragments: &Fragments) -> String {
        let mut output = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => output.push_str(text),
                Segment::Slot(Slot::Imports) => {
                    for import in &self.imports {
                        output.push_str(INDENT);
                        output.push_str(import);
                        output.push_str(self.newline);
                    }
                }
                Segment::Slot(Slot::ClassMembers) => {
                    output.push_str(&with_newline(&fragments.class_members, self.newline));
                }
                Segment::Slot(Slot::Declarations) => {
                    output.push_str(&with_newline(&fragments.declarations, self.newline));
                }
            }
        }
        output
    }
}

/// `declare module Chrome {` becomes `declare module "chrome-debug-protocol" {`
/// followed by the hoisted imports.
fn module_declaration_edit(
    text: &str,
    options: &MergeOptions<'_>,
    newline: &str,
) -> Result<Edit, TemplateError> {
    let pattern = format!(r"declare module {} \{{", regex::escape(options.namespace));
    let found = Regex::new(&pattern)?
        .find(text)
        .ok_or_else(|| TemplateError::MissingModuleDeclaration {
            namespace: options.namespace.to_string(),
        })?;

    Ok(Edit {
        start: found.start(),
        end: found.end(),
        replacement: vec![
            Segment::Text(format!("declare module \"{}\" {{{newline}", options.module_name)),
            Segment::Slot(Slot::Imports),
        ],
    })
}

/// The class body closes at the first `}` line indented like the class
/// declaration itself; domain properties go right before it and the
/// declarations right after it.
fn class_body_edit(
    text: &str,
    options: &MergeOptions<'_>,
    newline: &str,
) -> Result<Edit, TemplateError> {
    let missing = || TemplateError::MissingClass {
        class_name: options.class_name.to_string(),
    };

    let pattern = format!(
        r"(?m)^([ \t]*)(?:export[ \t]+)?(?:declare[ \t]+)?class[ \t]+{}\b[^{{\n]*\{{",
        regex::escape(options.class_name)
    );
    let captures = Regex::new(&pattern)?.captures(text).ok_or_else(missing)?;
    let (Some(header), Some(indent)) = (captures.get(0), captures.get(1)) else {
        return Err(missing());
    };

    let closing = format!("\n{}}}", indent.as_str());
    let body = &text[header.end()..];
    let offset = body.find(&closing).ok_or_else(missing)?;
    // Skip the line break so the members land at the start of the closing line
    let start = header.end() + offset + 1;

    Ok(Edit {
        start,
        end: start + closing.len() - 1,
        replacement: vec![
            Segment::Slot(Slot::ClassMembers),
            Segment::Text(format!("{}}}{newline}", indent.as_str())),
            Segment::Slot(Slot::Declarations),
        ],
    })
}

/// Rewrite every line break of `text` to `newline`.
fn with_newline<'t>(text: &'t str, newline: &str) -> Cow<'t, str> {
    if !text.contains('\r') && newline == "\n" {
        return Cow::Borrowed(text);
    }
    let text = text.replace("\r\n", "\n");
    if newline == "\n" {
        Cow::Owned(text)
    } else {
        Cow::Owned(text.replace('\n', newline))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"import http = require("http");
import event = require("events");
declare module Chrome {
    interface ChromeError {
        code: number;
        message: string;
    }
    class ChromeDebugger extends event.EventEmitter {
        private ws;
        constructor(websocketUrl: string);
        close(): void;
    }
}
export = Chrome;
"#;

    fn options() -> MergeOptions<'static> {
        MergeOptions {
            namespace: "Chrome",
            module_name: "chrome-debug-protocol",
            class_name: "ChromeDebugger",
            header: "// header\n",
            line_ending: LineEnding::Auto,
        }
    }

    fn fragments() -> Fragments {
        Fragments {
            class_members: "        Page: IPage;\n".into(),
            declarations: "    interface IPage {\n    }\n".into(),
        }
    }

    #[test]
    fn test_merge_fills_all_anchors() {
        let template = Template::parse(TEMPLATE, &options()).unwrap();
        assert_eq!(
            template.imports(),
            ["import http = require(\"http\");", "import event = require(\"events\");"]
        );

        let expected = r#"// header


declare module "chrome-debug-protocol" {
    import http = require("http");
    import event = require("events");

    interface ChromeError {
        code: number;
        message: string;
    }
    class ChromeDebugger extends event.EventEmitter {
        private ws;
        constructor(websocketUrl: string);
        close(): void;
        Page: IPage;
    }
    interface IPage {
    }

}

"#;
        assert_eq!(template.render(&fragments()), expected);
    }

    #[test]
    fn test_merge_without_export_or_imports() {
        let text = "declare module Chrome {\n    class ChromeDebugger {\n    }\n}\n";
        let template = Template::parse(text, &options()).unwrap();
        assert!(template.imports().is_empty());
        let rendered = template.render(&Fragments::default());
        assert_eq!(
            rendered,
            "// header\ndeclare module \"chrome-debug-protocol\" {\n\n    class ChromeDebugger {\n    }\n\n}\n"
        );
    }

    #[test]
    fn test_class_closing_brace_matches_class_indent() {
        // Nested blocks inside the body must not end the match early
        let text = "declare module Chrome {\n    class ChromeDebugger {\n        private callbacks: {\n        };\n    }\n}\n";
        let template = Template::parse(text, &options()).unwrap();
        let rendered = template.render(&fragments());
        assert!(rendered.contains("        };\n        Page: IPage;\n    }\n    interface IPage {\n"));
    }

    #[test]
    fn test_missing_class_is_an_error() {
        let text = "declare module Chrome {\n    class Other {\n    }\n}\n";
        let err = Template::parse(text, &options()).unwrap_err();
        assert!(matches!(err, TemplateError::MissingClass { ref class_name } if class_name == "ChromeDebugger"));

        // A class that is never closed at its own indentation does not count
        let text = "declare module Chrome {\n    class ChromeDebugger {\n        close(): void;\n}\n";
        assert!(matches!(
            Template::parse(text, &options()),
            Err(TemplateError::MissingClass { .. })
        ));
    }

    #[test]
    fn test_missing_module_declaration_is_an_error() {
        let text = "declare namespace Chrome {\n    class ChromeDebugger {\n    }\n}\n";
        let err = Template::parse(text, &options()).unwrap_err();
        assert!(matches!(err, TemplateError::MissingModuleDeclaration { .. }));
        assert!(err.to_string().contains("declare module Chrome {"));
    }

    #[test]
    fn test_crlf_template_gets_crlf_fragments() {
        let text = TEMPLATE.replace('\n', "\r\n");
        let template = Template::parse(&text, &options()).unwrap();
        let rendered = template.render(&fragments());
        assert!(rendered.starts_with("// header\r\n"));
        assert!(rendered.contains("    import http = require(\"http\");\r\n"));
        assert!(rendered.contains("        Page: IPage;\r\n    }\r\n    interface IPage {\r\n    }\r\n"));
        assert!(!rendered.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn test_explicit_line_ending_overrides_template() {
        assert_eq!(LineEnding::Auto.for_template("a\r\nb"), "\r\n");
        assert_eq!(LineEnding::Auto.for_template("a\nb"), "\n");
        assert_eq!(LineEnding::Lf.for_template("a\r\nb"), "\n");
        assert_eq!(LineEnding::Crlf.for_template("a\nb"), "\r\n");
    }

    #[test]
    fn test_auto_line_ending_keeps_template_text() {
        let text = "declare module Chrome {\r\n    // note\n    class ChromeDebugger {\r\n    }\r\n}\r\n";
        let rendered = Template::parse(text, &options()).unwrap().render(&fragments());
        assert_eq!(
            rendered,
            "// header\r\ndeclare module \"chrome-debug-protocol\" {\r\n\r\n    // note\n    class ChromeDebugger {\r\n        Page: IPage;\r\n    }\r\n    interface IPage {\r\n    }\r\n\r\n}\r\n"
        );
    }

    #[test]
    fn test_explicit_line_ending_converts_template_text() {
        let crlf = MergeOptions {
            line_ending: LineEnding::Crlf,
            ..options()
        };
        let rendered = Template::parse(TEMPLATE, &crlf).unwrap().render(&fragments());
        assert!(rendered.contains("    interface ChromeError {\r\n        code: number;\r\n"));
        assert!(!rendered.replace("\r\n", "").contains('\n'));

        let lf = MergeOptions {
            line_ending: LineEnding::Lf,
            ..options()
        };
        let text = TEMPLATE.replace('\n', "\r\n");
        let rendered = Template::parse(&text, &lf).unwrap().render(&fragments());
        assert!(!rendered.contains('\r'));
        assert!(rendered.contains("        Page: IPage;\n    }\n"));
    }
}
