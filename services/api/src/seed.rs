//! services/api/src/seed.rs
//!
//! Demo dashboard records seeded at startup so a fresh install has something
//! to show. Disable with `SEED_DEMO_RESUMES=false`.

use resumelens_core::domain::ResumeRecord;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The three demo analyses every fresh dashboard starts with, newest first.
pub fn demo_resumes() -> Vec<ResumeRecord> {
    vec![
        ResumeRecord {
            id: 1,
            name: "Senior_Frontend_Developer.pdf".to_string(),
            score: 92,
            keywords_found: strings(&["React", "TypeScript", "Next.js", "GraphQL", "Tailwind CSS"]),
            improvement_tips:
                "Add metrics to your project descriptions, e.g., \"Improved page load speed by 30%\"."
                    .to_string(),
            last_updated: "2 hours ago".to_string(),
        },
        ResumeRecord {
            id: 2,
            name: "Product_Manager_Final.docx".to_string(),
            score: 85,
            keywords_found: strings(&["Roadmap", "Agile", "JIRA", "User Stories", "Market Research"]),
            improvement_tips:
                "Strengthen your \"Leadership\" section with a specific example of a cross-functional project you led."
                    .to_string(),
            last_updated: "1 day ago".to_string(),
        },
        ResumeRecord {
            id: 3,
            name: "Data_Scientist_Resume.pdf".to_string(),
            score: 78,
            keywords_found: strings(&["Python", "TensorFlow", "Scikit-learn", "SQL"]),
            improvement_tips:
                "Missing \"Machine Learning\" as a core keyword. Ensure it's prominently featured in your summary."
                    .to_string(),
            last_updated: "3 days ago".to_string(),
        },
    ]
}
