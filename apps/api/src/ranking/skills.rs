//! Skill & experience extraction — keyword containment over a categorized dictionary,
//! plus regex-based years-of-experience detection.

use once_cell::sync::Lazy;
use regex::Regex;

/// Built-in dictionary, scanned in this order (category, then position within category).
const DEFAULT_SKILLS: &[(&str, &[&str])] = &[
    (
        "programming",
        &["python", "java", "javascript", "c++", "c#", "php", "ruby", "go", "rust"],
    ),
    (
        "web",
        &["html", "css", "react", "angular", "vue", "node.js", "express", "django", "flask"],
    ),
    (
        "database",
        &["sql", "mysql", "postgresql", "mongodb", "redis", "elasticsearch"],
    ),
    (
        "cloud",
        &["aws", "azure", "gcp", "docker", "kubernetes", "terraform"],
    ),
    (
        "ml",
        &["machine learning", "deep learning", "tensorflow", "pytorch", "scikit-learn"],
    ),
    (
        "tools",
        &["git", "jenkins", "jira", "slack", "figma", "photoshop"],
    ),
];

static EXPERIENCE_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"(\d+)\+?\s*years?\s*(?:of\s*)?experience").expect("valid regex"),
        Regex::new(r"(\d+)\+?\s*years?\s*in").expect("valid regex"),
        Regex::new(r"experience\s*:?\s*(\d+)\+?\s*years?").expect("valid regex"),
    ]
});

#[derive(Debug, Clone)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
}

/// Immutable skill dictionary. Built once at startup and shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SkillDictionary {
    categories: Vec<SkillCategory>,
}

impl Default for SkillDictionary {
    fn default() -> Self {
        Self::new(
            DEFAULT_SKILLS
                .iter()
                .map(|(name, skills)| SkillCategory {
                    name: name.to_string(),
                    skills: skills.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        )
    }
}

impl SkillDictionary {
    /// Skill tokens are lowercased so matching against lowercased text is exact.
    pub fn new(categories: Vec<SkillCategory>) -> Self {
        let categories = categories
            .into_iter()
            .map(|c| SkillCategory {
                name: c.name,
                skills: c.skills.into_iter().map(|s| s.to_lowercase()).collect(),
            })
            .collect();
        Self { categories }
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    /// Total number of dictionary entries across all categories.
    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.skills.len()).sum()
    }

    /// Returns every dictionary skill contained (as a substring) in `text`.
    ///
    /// Each dictionary entry contributes at most once no matter how often it occurs.
    /// Containment is plain substring matching: "go" matches inside "google".
    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        let text_lower = text.to_lowercase();
        self.categories
            .iter()
            .flat_map(|c| c.skills.iter())
            .filter(|skill| text_lower.contains(skill.as_str()))
            .cloned()
            .collect()
    }
}

/// Largest "N years" figure found by any of the experience patterns, or 0.
pub fn extract_experience_years(text: &str) -> u32 {
    let text_lower = text.to_lowercase();
    EXPERIENCE_PATTERNS
        .iter()
        .flat_map(|re| re.captures_iter(&text_lower))
        .filter_map(|caps| caps.get(1))
        // digits only, so a failed parse means overflow
        .map(|m| m.as_str().parse::<u32>().unwrap_or(u32::MAX))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dictionary_has_six_categories() {
        let dict = SkillDictionary::default();
        let names: Vec<&str> = dict.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["programming", "web", "database", "cloud", "ml", "tools"]
        );
        assert_eq!(dict.len(), 41);
    }

    #[test]
    fn test_skills_follow_dictionary_order() {
        let dict = SkillDictionary::default();
        let skills = dict.extract_skills("Worked with Docker, then PostgreSQL, then Python.");
        assert_eq!(skills, vec!["python", "sql", "postgresql", "docker"]);
    }

    #[test]
    fn test_repeated_skill_counted_once() {
        let dict = SkillDictionary::default();
        let skills = dict.extract_skills("rust rust rust RUST Rust");
        assert_eq!(skills, vec!["rust"]);
    }

    #[test]
    fn test_output_never_exceeds_dictionary_size() {
        let dict = SkillDictionary::default();
        let everything: String = dict
            .categories()
            .iter()
            .flat_map(|c| c.skills.iter())
            .map(|s| format!("{s} {s} "))
            .collect();
        let skills = dict.extract_skills(&everything);
        assert!(skills.len() <= dict.len());
    }

    #[test]
    fn test_substring_containment_is_preserved() {
        let dict = SkillDictionary::default();
        // "go" inside "google", "java" inside "javascript"
        let skills = dict.extract_skills("google javascript");
        assert!(skills.contains(&"go".to_string()));
        assert!(skills.contains(&"java".to_string()));
        assert!(skills.contains(&"javascript".to_string()));
    }

    #[test]
    fn test_punctuated_and_multiword_skills() {
        let dict = SkillDictionary::default();
        let skills = dict.extract_skills("C++ and C# developer, Node.js, Machine Learning");
        assert!(skills.contains(&"c++".to_string()));
        assert!(skills.contains(&"c#".to_string()));
        assert!(skills.contains(&"node.js".to_string()));
        assert!(skills.contains(&"machine learning".to_string()));
    }

    #[test]
    fn test_custom_dictionary_is_lowercased() {
        let dict = SkillDictionary::new(vec![SkillCategory {
            name: "lang".to_string(),
            skills: vec!["Haskell".to_string()],
        }]);
        assert_eq!(dict.extract_skills("HASKELL"), vec!["haskell"]);
    }

    #[test]
    fn test_empty_text_yields_no_skills() {
        assert!(SkillDictionary::default().extract_skills("").is_empty());
    }

    #[test]
    fn test_experience_none_is_zero() {
        assert_eq!(extract_experience_years("Recent graduate, eager to learn."), 0);
    }

    #[test]
    fn test_experience_max_across_patterns() {
        assert_eq!(
            extract_experience_years("5 years of experience and 10 years in management"),
            10
        );
    }

    #[test]
    fn test_experience_plus_and_colon_forms() {
        assert_eq!(extract_experience_years("8+ years experience"), 8);
        assert_eq!(extract_experience_years("Experience: 12 years"), 12);
        assert_eq!(extract_experience_years("1 year in retail"), 1);
    }

    #[test]
    fn test_experience_overflow_saturates() {
        assert_eq!(
            extract_experience_years("99999999999 years of experience, 3 years in sales"),
            u32::MAX
        );
    }

    #[test]
    fn test_experience_is_case_insensitive() {
        assert_eq!(extract_experience_years("7 YEARS OF EXPERIENCE"), 7);
    }
}
