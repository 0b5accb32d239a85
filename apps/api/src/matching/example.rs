//! Bundled demo data: one frontend job description and three résumés.

use crate::matching::ranking::{MatchRequest, ResumeEntry};

const EXAMPLE_JD: &str = "\
We are hiring a Frontend Developer.

Required Skills:
- JavaScript (ES6+)
- HTML, CSS
- React
- Git
- 2+ years experience

Preferred:
- Node.js
- REST APIs
- AWS
- MongoDB

Education: B.Tech / B.E preferred.";

const EXAMPLE_RESUMES: &[(&str, &str)] = &[
    (
        "Aarav",
        "\
SKILLS
JavaScript, ReactJS, HTML5, CSS3, GitHub

PROJECTS
Built an ecommerce website using React and REST APIs.
Created UI dashboards with charts and tables.

EXPERIENCE
Frontend Developer Intern (2022 - 2024)
Worked on React components, API integration, and Git workflows.

EDUCATION
B.Tech in Computer Science",
    ),
    (
        "Diya",
        "\
SUMMARY
Web developer with strong HTML/CSS.

SKILLS
HTML, CSS, JavaScript, Git

PROJECTS
Portfolio website, landing pages.

EXPERIENCE
Freelance Web Developer (2023 - Present)

EDUCATION
B.Sc",
    ),
    (
        "Rohan",
        "\
SKILLS
JavaScript, React, Node.js, Express, MongoDB, Git, AWS

PROJECTS
Full stack app using React + Node.js + MongoDB.
Deployed on AWS.

EXPERIENCE
Software Engineer (2020 - Present)

EDUCATION
B.E",
    ),
];

/// A ready-to-submit match request built from the demo data.
pub fn example_request() -> MatchRequest {
    MatchRequest {
        job_description: EXAMPLE_JD.to_string(),
        resumes: EXAMPLE_RESUMES
            .iter()
            .map(|(name, text)| ResumeEntry {
                name: Some(name.to_string()),
                text: text.to_string(),
            })
            .collect(),
        anonymize: false,
        weights: None,
    }
}
