// SPDX-FileCopyrightText: 2026 Quill Maintainers <maintainers@quill-lint.dev>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Extension-based format routing.
//!
//! The router maps a file's extension — after any user `formats`
//! remapping — to the scoper that will segment it. Unknown extensions
//! fall back to plain prose.

use std::path::Path;

use quill_core::{Config, FormatClass};

/// Source languages the code scoper can extract comments and strings from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeLang {
    Rust,
    Python,
    JavaScript,
    Go,
}

impl CodeLang {
    /// Short token used in selectors, e.g. `text.comment.line.py`.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            CodeLang::Rust => "rs",
            CodeLang::Python => "py",
            CodeLang::JavaScript => "js",
            CodeLang::Go => "go",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Markdown,
    Html,
    /// Converted to HTML by an external tool before scoping.
    Rst,
    Asciidoc,
    Code(CodeLang),
    Prose,
}

impl Format {
    #[must_use]
    pub fn class(self) -> FormatClass {
        match self {
            Format::Markdown | Format::Html | Format::Rst | Format::Asciidoc => FormatClass::Markup,
            Format::Code(_) => FormatClass::Code,
            Format::Prose => FormatClass::Prose,
        }
    }
}

/// Routing result for one path.
#[derive(Debug, Clone)]
pub struct Route {
    pub real_ext: String,
    pub norm_ext: String,
    pub format: Format,
}

fn format_for(ext: &str) -> Format {
    match ext {
        "md" | "markdown" | "mdown" | "mdx" => Format::Markdown,
        "html" | "htm" | "xhtml" => Format::Html,
        "rst" => Format::Rst,
        "adoc" | "asciidoc" | "asc" => Format::Asciidoc,
        "rs" => Format::Code(CodeLang::Rust),
        "py" | "pyi" => Format::Code(CodeLang::Python),
        "js" | "jsx" | "mjs" | "cjs" => Format::Code(CodeLang::JavaScript),
        "go" => Format::Code(CodeLang::Go),
        _ => Format::Prose,
    }
}

/// Resolve the scoper route for `path`, honoring `config.formats`.
#[must_use]
pub fn route(path: &str, config: &Config) -> Route {
    let real_ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let norm_ext = config
        .formats
        .get(&real_ext)
        .cloned()
        .unwrap_or_else(|| real_ext.clone());
    Route {
        format: format_for(&norm_ext),
        real_ext,
        norm_ext,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_route_directly() {
        let config = Config::default();
        assert_eq!(route("README.md", &config).format, Format::Markdown);
        assert_eq!(
            route("src/main.rs", &config).format,
            Format::Code(CodeLang::Rust)
        );
        assert_eq!(route("notes.txt", &config).format, Format::Prose);
        assert_eq!(route("no_extension", &config).format, Format::Prose);
    }

    #[test]
    fn formats_remap_unknown_extensions() {
        let mut config = Config::default();
        config.formats.insert("mdoc".into(), "md".into());
        let r = route("guide.mdoc", &config);
        assert_eq!(r.format, Format::Markdown);
        assert_eq!(r.real_ext, "mdoc");
        assert_eq!(r.norm_ext, "md");
    }
}
