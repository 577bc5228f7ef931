//! Built-in question set for the cybercrime law readiness assessment.

use crate::domain::{Category, Question};

pub fn readiness_questions() -> Vec<Question> {
    vec![
        Question::scale(
            "interest_1",
            Category::Psychometric,
            "How interested are you in staying updated with cybersecurity threats and legal frameworks?",
            1,
            5,
            1,
        ),
        Question::choice(
            "motivation_1",
            Category::Psychometric,
            "What primarily motivates you to pursue a career in cybercrime law?",
            &[
                "Making a positive impact on digital society",
                "High earning potential",
                "Intellectual challenge and problem-solving",
                "Job security and stability",
                "Prestige and recognition",
            ],
        ),
        Question::scenario(
            "personality_1",
            Category::Psychometric,
            "A company experiences a data breach affecting thousands of customers. As a cybercrime law advisor, your first priority would be:",
            &[
                "Immediately assess legal compliance and notification requirements",
                "Gather technical evidence and coordinate with forensics teams",
                "Communicate with stakeholders and manage public relations",
                "Review insurance policies and potential liabilities",
            ],
        ),
        Question::choice(
            "tech_1",
            Category::Technical,
            "Which of the following best describes the GDPR's approach to data breach notification?",
            &[
                "Notification within 72 hours to supervisory authority",
                "Immediate notification to all affected individuals",
                "Notification only if financial loss exceeds €10,000",
                "Voluntary notification based on company policy",
            ],
        ),
        Question::choice(
            "tech_2",
            Category::Technical,
            "In digital forensics, what is the primary purpose of creating a hash value of evidence?",
            &[
                "To compress the file size",
                "To ensure data integrity and authenticity",
                "To encrypt sensitive information",
                "To speed up analysis processes",
            ],
        ),
        Question::scenario(
            "tech_3",
            Category::Technical,
            "A client asks about liability for a ransomware attack on their cloud infrastructure. Which legal framework would be most relevant?",
            &[
                "Computer Fraud and Abuse Act (CFAA)",
                "Stored Communications Act (SCA)",
                "Electronic Communications Privacy Act (ECPA)",
                "Cybersecurity Information Sharing Act (CISA)",
            ],
        ),
        Question::scale(
            "will_1",
            Category::Wiscar,
            "Rate your willingness to continuously learn new cybersecurity laws and regulations:",
            1,
            5,
            1,
        ),
        Question::scale(
            "skill_1",
            Category::Wiscar,
            "How would you rate your current understanding of cyber law principles?",
            1,
            5,
            1,
        ),
        Question::choice(
            "cognitive_1",
            Category::Wiscar,
            "When faced with a complex legal-technical problem, you typically:",
            &[
                "Break it down into smaller, manageable components",
                "Consult multiple expert opinions before proceeding",
                "Research extensively before taking action",
                "Trust your instincts and act quickly",
            ],
        ),
    ]
}
