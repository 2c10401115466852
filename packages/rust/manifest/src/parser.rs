//! `llms.txt` link parser.
//!
//! The manifest is read line by line:
//! - `## Section` headings open a section; a section titled `Optional`
//!   (any case) marks its links as optional.
//! - Inside a section, list items `- [Label](path)` name files to inline.
//! - Everything before the first `##` heading is ignored.

use std::sync::LazyLock;

use docbundle_shared::{FileRef, ManifestEntry};
use regex::Regex;

// ---------------------------------------------------------------------------
// Regex patterns (compiled once)
// ---------------------------------------------------------------------------

/// Matches a level-2 heading; the title may be empty.
static H2_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*##(?:\s+(.*))?$").expect("H2 regex")
});

/// Matches the first `[label](target)` on a line.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").expect("link regex")
});

/// Target prefixes that point outside the local filesystem (lowercase).
const EXTERNAL_PREFIXES: &[&str] = &["http://", "https://", "mailto:", "data:"];

// ---------------------------------------------------------------------------
// Scanner state
// ---------------------------------------------------------------------------

/// The section currently being scanned.
#[derive(Debug, Clone)]
struct Section {
    title: String,
    optional: bool,
}

impl Section {
    fn new(title: &str) -> Self {
        let title = title.trim().to_string();
        let optional = title.eq_ignore_ascii_case("optional");
        Self { title, optional }
    }
}

#[derive(Debug, Default)]
struct Scan {
    section: Option<Section>,
    entries: Vec<ManifestEntry>,
}

impl Scan {
    fn step(mut self, line: &str) -> Self {
        if let Some(caps) = H2_RE.captures(line) {
            self.section = Some(Section::new(caps.get(1).map_or("", |m| m.as_str())));
            return self;
        }

        // No section yet: preamble lines never yield links.
        let Some(section) = &self.section else {
            return self;
        };

        if !line.trim_start().starts_with('-') {
            return self;
        }

        if let Some(target) = link_target(line) {
            self.entries.push(ManifestEntry {
                section: section.title.clone(),
                file: FileRef::new(target, section.optional),
            });
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Extract every local link target from manifest text, in order.
///
/// Duplicates are preserved; callers decide which occurrence wins.
pub fn parse_manifest(content: &str) -> Vec<ManifestEntry> {
    content.lines().fold(Scan::default(), Scan::step).entries
}

/// The usable target of the first link on `line`, if any.
///
/// Returns `None` when there is no link, when the target is empty once its
/// `#fragment` is removed, or when it names an external resource.
pub fn link_target(line: &str) -> Option<&str> {
    let caps = LINK_RE.captures(line)?;
    let raw = caps.get(2)?.as_str();
    let target = raw.split('#').next().unwrap_or_default().trim();

    if target.is_empty() || is_external(target) {
        return None;
    }
    Some(target)
}

/// Whether `target` uses a web, mail or data scheme.
pub fn is_external(target: &str) -> bool {
    let lower = target.to_ascii_lowercase();
    EXTERNAL_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(content: &str) -> Vec<(String, bool)> {
        parse_manifest(content)
            .into_iter()
            .map(|e| (e.file.path, e.file.optional))
            .collect()
    }

    #[test]
    fn parse_sections_in_order() {
        let content = "## Required\n- [Intro](intro.md)\n## Optional\n- [Extra](extra.md)\n";
        let entries = parse_manifest(content);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].section, "Required");
        assert_eq!(entries[0].file, FileRef::new("intro.md", false));
        assert_eq!(entries[1].section, "Optional");
        assert_eq!(entries[1].file, FileRef::new("extra.md", true));
    }

    #[test]
    fn preamble_links_are_ignored() {
        let content = "# Title\n\n> Summary\n\n- [Readme](README.md)\n";
        assert!(parse_manifest(content).is_empty());
    }

    #[test]
    fn manifest_without_sections_is_empty() {
        assert!(parse_manifest("").is_empty());
        assert!(parse_manifest("- [a](a.md)\n- [b](b.md)\n").is_empty());
    }

    #[test]
    fn non_list_lines_are_ignored() {
        let content = "## Docs\nSee [the guide](guide.md) for details.\n\n* [Star](star.md)\n";
        assert!(parse_manifest(content).is_empty());
    }

    #[test]
    fn list_item_without_link_is_skipped() {
        let content = "## Docs\n- just a note\n- [broken(link.md)\n- [Ok](ok.md)\n";
        assert_eq!(targets(content), vec![("ok.md".to_string(), false)]);
    }

    #[test]
    fn only_first_link_counts() {
        let content = "## Docs\n- [A](a.md) and [B](b.md)\n";
        assert_eq!(targets(content), vec![("a.md".to_string(), false)]);
    }

    #[test]
    fn indented_list_items_count() {
        let content = "## Docs\n    - [Nested](docs/nested.md): notes\n";
        assert_eq!(targets(content), vec![("docs/nested.md".to_string(), false)]);
    }

    #[test]
    fn fragment_and_whitespace_are_stripped() {
        let content = "## Docs\n- [A]( docs/a.md#setup )\n- [Anchor](#top)\n";
        assert_eq!(targets(content), vec![("docs/a.md".to_string(), false)]);
    }

    #[test]
    fn external_targets_are_skipped() {
        let content = "## Links\n\
                       - [Web](https://example.com)\n\
                       - [Plain](HTTP://example.com/x.md)\n\
                       - [Mail](mailto:a@b.com)\n\
                       - [Data](data:text/plain,hi)\n\
                       - [Up](../outside.md)\n";
        // Traversal is rejected later, during resolution.
        assert_eq!(targets(content), vec![("../outside.md".to_string(), false)]);
    }

    #[test]
    fn duplicates_are_preserved() {
        let content = "## A\n- [x](x.md)\n## Optional\n- [x](x.md)\n";
        assert_eq!(
            targets(content),
            vec![("x.md".to_string(), false), ("x.md".to_string(), true)]
        );
    }

    #[test]
    fn optional_is_case_insensitive() {
        let content = "##   OPTIONAL  \n- [x](x.md)\n## optional extras\n- [y](y.md)\n";
        let entries = parse_manifest(content);
        assert_eq!(entries[0].section, "OPTIONAL");
        assert!(entries[0].file.optional);
        assert!(!entries[1].file.optional);
    }

    #[test]
    fn empty_heading_opens_unnamed_section() {
        let content = "##\n- [a](a.md)\n## \n- [b](b.md)\n";
        let entries = parse_manifest(content);
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.section.is_empty() && !e.file.optional));
    }

    #[test]
    fn deeper_headings_do_not_change_section() {
        let content = "## Docs\n### Sub\n- [a](a.md)\n# Top\n- [b](b.md)\n";
        let entries = parse_manifest(content);
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.section == "Docs"));
    }

    #[test]
    fn crlf_input_is_handled() {
        let content = "## Docs\r\n- [a](a.md)\r\n";
        assert_eq!(targets(content), vec![("a.md".to_string(), false)]);
    }

    #[test]
    fn parse_fixture() {
        let content = std::fs::read_to_string("../../../fixtures/llms/project-llms.txt")
            .expect("read fixture");
        let entries = parse_manifest(&content);

        let paths: Vec<&str> = entries.iter().map(|e| e.file.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "README.md",
                "docs/getting-started.md",
                "docs/architecture.md",
                "docs/getting-started.md",
                "CHANGELOG.md",
            ]
        );
        assert!(entries[4].file.optional);
        assert_eq!(entries[4].section, "Optional");
    }
}
