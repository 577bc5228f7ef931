//! Static content for the landing view.

use shared::protocol::{DiscoverySection, LandingContent, LandingFeature, LandingStat};

use crate::navigation::View;

pub fn landing_content() -> LandingContent {
    LandingContent {
        badge: "Professional Career Assessment".to_string(),
        title: "Cybercrime Law Advisor".to_string(),
        subtitle: "Readiness Assessment".to_string(),
        summary: "Discover your potential in the rapidly growing field of cybercrime law. \
                  Our comprehensive assessment evaluates your psychological fit, technical \
                  readiness, and career alignment to guide your journey into legal \
                  cybersecurity advisory roles."
            .to_string(),
        features: vec![
            feature(
                "Psychometric Evaluation",
                "Assess your personality fit, motivation, and cognitive style for cybercrime law advisory roles.",
            ),
            feature(
                "Technical Assessment",
                "Evaluate your knowledge of cyber law, digital forensics, and regulatory compliance.",
            ),
            feature(
                "WISCAR Analysis",
                "Comprehensive analysis of Will, Interest, Skill, Cognition, Ability, and Real-world alignment.",
            ),
            feature(
                "Career Guidance",
                "Personalized recommendations and learning paths based on your assessment results.",
            ),
        ],
        stats: vec![
            stat("Assessment Duration", "20-30 min"),
            stat("Career Paths Analyzed", "5+"),
            stat("Accuracy Rate", "95%"),
        ],
        discoveries: vec![
            discovery(
                "Career Compatibility",
                &[
                    "Psychological fit for legal advisory roles",
                    "Alignment with cybercrime law specializations",
                    "Personality match with required competencies",
                    "Motivation and interest level analysis",
                ],
            ),
            discovery(
                "Skills & Development",
                &[
                    "Current technical knowledge level",
                    "Cognitive readiness for complex problems",
                    "Learning ability and growth potential",
                    "Personalized skill development roadmap",
                ],
            ),
            discovery(
                "Career Pathways",
                &[
                    "Recommended specialization areas",
                    "Alternative career options",
                    "Industry role alignment",
                    "Job market positioning advice",
                ],
            ),
            discovery(
                "Learning Strategy",
                &[
                    "Structured learning pathway",
                    "Recommended courses and certifications",
                    "Timeline for career readiness",
                    "Resource recommendations",
                ],
            ),
        ],
        start_label: "Start Assessment".to_string(),
        start_path: View::Assessment.path().to_string(),
    }
}

fn feature(title: &str, description: &str) -> LandingFeature {
    LandingFeature {
        title: title.to_string(),
        description: description.to_string(),
    }
}

fn stat(label: &str, value: &str) -> LandingStat {
    LandingStat {
        label: label.to_string(),
        value: value.to_string(),
    }
}

fn discovery(title: &str, points: &[&str]) -> DiscoverySection {
    DiscoverySection {
        title: title.to_string(),
        points: points.iter().map(|p| p.to_string()).collect(),
    }
}
