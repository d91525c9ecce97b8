//! Skill file parser.
//!
//! Skill documents use a front-matter convention: a leading `---`-delimited
//! block of `key: value` lines, followed by free-text instructions. Parsing
//! never fails — malformed or missing fields fall back to defaults, and a
//! document with no front-matter yields a skill whose instructions are the
//! whole document.

use crate::Skill;

/// Parse a skill document. `fallback_name` (typically the file stem) is used
/// when the front-matter does not declare a name.
pub fn parse_skill(content: &str, fallback_name: &str) -> Skill {
    let mut name = fallback_name.to_string();
    let mut description = String::new();
    let mut version = "1.0.0".to_string();
    let mut triggers: Vec<String> = Vec::new();
    let mut instructions = String::new();

    let mut in_front_matter = false;
    let mut front_matter_done = false;
    let mut in_instructions = false;

    for line in content.lines() {
        if !front_matter_done && line.trim() == "---" {
            if !in_front_matter && !in_instructions && instructions.is_empty() {
                in_front_matter = true;
            } else {
                in_front_matter = false;
                front_matter_done = true;
            }
            continue;
        }

        if in_front_matter {
            if let Some(rest) = line.strip_prefix("name:") {
                name = rest.trim().to_string();
            } else if let Some(rest) = line.strip_prefix("description:") {
                description = rest.trim().to_string();
            } else if let Some(rest) = line.strip_prefix("version:") {
                version = rest.trim().to_string();
            } else if let Some(rest) = line.strip_prefix("triggers:") {
                triggers = rest
                    .split(',')
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect();
            }
        } else if !in_instructions {
            // First non-blank line after the block starts the instructions.
            if !line.trim().is_empty() {
                in_instructions = true;
                instructions.push_str(line);
            }
        } else {
            instructions.push('\n');
            instructions.push_str(line);
        }
    }

    // A document that never produced instructions keeps its full text.
    if instructions.is_empty() {
        instructions = content.to_string();
    }

    Skill {
        name,
        description,
        version,
        instructions,
        triggers,
        enabled: true,
    }
}
