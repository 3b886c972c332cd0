//! Markdown heading outline extraction.
//!
//! Produces a flat record list from a markdown document's headings, suitable
//! for [`crate::TreeBuilder`] with `id` / `parent_id` keys: each heading's
//! parent is the nearest previous heading with a shallower level. Fenced
//! code blocks are skipped first since they can contain `#` lines.

use serde::Serialize;

use crate::node::ParentRef;

/// One heading of a markdown document, as a flat tree record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingRecord {
    /// Heading text with all whitespace removed; doubles as the anchor id.
    pub id: String,
    /// Nearest previous shallower heading, or the root sentinel for
    /// headings at the window's first level. Headings with no shallower
    /// predecessor get a dangling (empty) parent and drop out of the tree.
    pub parent_id: ParentRef,
    /// Heading text, trimmed.
    pub name: String,
    /// 1-based depth within the requested level window.
    pub level: usize,
}

/// Extract the heading outline of `markdown`, keeping only headings whose
/// `#` count lies within `min_level..=max_level`.
#[must_use]
pub fn heading_outline(markdown: &str, min_level: usize, max_level: usize) -> Vec<HeadingRecord> {
    let mut records: Vec<HeadingRecord> = Vec::new();
    let mut in_fence = false;

    for line in markdown.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        let hashes = trimmed.chars().take_while(|&c| c == '#').count();
        if hashes < min_level.max(1) || hashes > max_level {
            continue;
        }
        // ATX headings require a space after the marker
        let rest = &trimmed[hashes..];
        if !rest.starts_with(' ') && !rest.starts_with('\t') {
            continue;
        }

        let name = rest
            .trim_matches(|c: char| c == '#' || c.is_whitespace())
            .to_owned();
        let id: String = name.chars().filter(|c| !c.is_whitespace()).collect();
        let level = hashes - min_level + 1;

        let parent_id = if level == 1 {
            ParentRef::Root
        } else {
            records
                .iter()
                .rev()
                .find(|record| record.level < level)
                .map_or(ParentRef::id(""), |record| ParentRef::id(&record.id))
        };

        records.push(HeadingRecord {
            id,
            parent_id,
            name,
            level,
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TreeBuilder;

    #[test]
    fn nests_headings_under_the_nearest_shallower_one() {
        let md = "# Intro\n## Setup Guide\n### Linux\n## Usage\n# Reference\n";
        let outline = heading_outline(md, 1, 6);

        assert_eq!(outline.len(), 5);
        assert_eq!(outline[0].parent_id, ParentRef::Root);
        assert_eq!(outline[1].parent_id, ParentRef::id("Intro"));
        assert_eq!(outline[2].parent_id, ParentRef::id("SetupGuide"));
        assert_eq!(outline[3].parent_id, ParentRef::id("Intro"));
        assert_eq!(outline[4].parent_id, ParentRef::Root);
    }

    #[test]
    fn id_removes_whitespace_but_name_keeps_it() {
        let outline = heading_outline("## Setup Guide", 1, 6);
        assert_eq!(outline[0].id, "SetupGuide");
        assert_eq!(outline[0].name, "Setup Guide");
        assert_eq!(outline[0].level, 2);
    }

    #[test]
    fn fenced_code_blocks_are_skipped() {
        let md = "# Real\n```sh\n# not a heading\n```\n## Also Real\n";
        let outline = heading_outline(md, 1, 6);
        let ids: Vec<_> = outline.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["Real", "AlsoReal"]);
    }

    #[test]
    fn level_window_rebases_depth() {
        let md = "## Top\n### Inner\n# Ignored\n";
        let outline = heading_outline(md, 2, 3);
        assert_eq!(outline.len(), 2);
        assert_eq!(outline[0].level, 1);
        assert_eq!(outline[0].parent_id, ParentRef::Root);
        assert_eq!(outline[1].level, 2);
    }

    #[test]
    fn closed_atx_markers_are_trimmed() {
        let outline = heading_outline("## Usage ##", 1, 6);
        assert_eq!(outline[0].name, "Usage");
        assert_eq!(outline[0].id, "Usage");
    }

    #[test]
    fn hash_runs_without_a_space_are_not_headings() {
        assert!(heading_outline("#!/bin/sh", 1, 6).is_empty());
        assert!(heading_outline("####### too deep", 1, 6).is_empty());
    }

    #[test]
    fn orphan_deep_heading_gets_a_dangling_parent() {
        let outline = heading_outline("### First Thing\n", 1, 6);
        assert_eq!(outline[0].parent_id, ParentRef::id(""));
    }

    #[test]
    fn outline_feeds_the_tree_builder() {
        let md = "# Intro\n## Setup\n## Usage\n";
        let flat: Vec<serde_json::Value> = heading_outline(md, 1, 6)
            .iter()
            .map(|record| serde_json::to_value(record).unwrap())
            .collect();

        let tree = TreeBuilder::new().build(&flat).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0]["children"].as_array().unwrap().len(), 2);
    }
}
