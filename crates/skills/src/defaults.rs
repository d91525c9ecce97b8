//! The built-in skill set.
//!
//! Loaded whenever the configured skills directory is unreachable, so the
//! registry is never empty.

use crate::Skill;

/// The fixed set of five built-in skills.
pub fn default_skills() -> Vec<Skill> {
    vec![
        Skill {
            name: "code-review".into(),
            description: "Review and analyze code for improvements".into(),
            version: "1.0.0".into(),
            instructions: "You are a code review expert. When asked to review code:\n\
                1. Analyze the code structure and readability\n\
                2. Identify potential bugs or issues\n\
                3. Suggest improvements for performance and maintainability\n\
                4. Check for security vulnerabilities\n\
                Provide constructive feedback with specific suggestions."
                .into(),
            triggers: vec!["review code".into(), "analyze code".into(), "code review".into()],
            enabled: true,
        },
        Skill {
            name: "refactor".into(),
            description: "Refactor and improve existing code".into(),
            version: "1.0.0".into(),
            instructions: "You are a refactoring expert. When asked to refactor:\n\
                1. Preserve the original functionality\n\
                2. Improve code readability and maintainability\n\
                3. Apply SOLID principles\n\
                4. Reduce code duplication\n\
                5. Suggest incremental improvements\n\
                Explain your refactoring decisions."
                .into(),
            triggers: vec!["refactor".into(), "improve code".into(), "restructure".into()],
            enabled: true,
        },
        Skill {
            name: "explain".into(),
            description: "Explain code and concepts clearly".into(),
            version: "1.0.0".into(),
            instructions: "You are a programming educator. When asked to explain:\n\
                1. Break down complex concepts into simple parts\n\
                2. Use analogies where helpful\n\
                3. Provide concrete examples\n\
                4. Consider the user's skill level\n\
                5. Be thorough but concise"
                .into(),
            triggers: vec![
                "explain".into(),
                "what does".into(),
                "how does".into(),
                "why is".into(),
            ],
            enabled: true,
        },
        Skill {
            name: "test".into(),
            description: "Generate tests for code".into(),
            version: "1.0.0".into(),
            instructions: "You are a testing expert. When asked to create tests:\n\
                1. Cover edge cases and error conditions\n\
                2. Use descriptive test names\n\
                3. Follow AAA pattern (Arrange, Act, Assert)\n\
                4. Include both positive and negative test cases\n\
                5. Suggest testing strategies"
                .into(),
            triggers: vec![
                "test".into(),
                "write tests".into(),
                "generate tests".into(),
                "unit test".into(),
            ],
            enabled: true,
        },
        Skill {
            name: "doc".into(),
            description: "Generate documentation for code".into(),
            version: "1.0.0".into(),
            instructions: "You are a technical writer. When asked to document:\n\
                1. Write clear, concise documentation\n\
                2. Include code examples where helpful\n\
                3. Document parameters, return values, and exceptions\n\
                4. Keep docs in sync with code\n\
                5. Use appropriate format (doc comments, README, etc.)"
                .into(),
            triggers: vec![
                "document".into(),
                "docs".into(),
                "readme".into(),
                "generate docs".into(),
            ],
            enabled: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_five_defaults() {
        let skills = default_skills();
        assert_eq!(skills.len(), 5);
        let names: Vec<&str> = skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["code-review", "refactor", "explain", "test", "doc"]);
    }

    #[test]
    fn all_defaults_enabled_with_triggers() {
        for skill in default_skills() {
            assert!(skill.enabled, "{} should be enabled", skill.name);
            assert!(!skill.triggers.is_empty(), "{} should have triggers", skill.name);
            assert!(!skill.instructions.is_empty());
        }
    }
}
