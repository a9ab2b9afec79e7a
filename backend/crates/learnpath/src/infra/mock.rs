//! Template-based content source.
//!
//! Produces a fixed curriculum per topic family with no network access.
//! Used for local development and tests (`USE_MOCK_AI=true`).

use std::ops::RangeInclusive;
use std::time::Duration;

use rand::Rng;

use crate::domain::entities::{Curriculum, Lesson, Module};
use crate::domain::repository::CurriculumGenerator;
use crate::domain::value_objects::{Refinement, Topic};
use crate::error::GenerationError;

/// Lower-cased topic substrings that select the web template.
const WEB_KEYWORDS: [&str; 7] = [
    "web",
    "html",
    "css",
    "javascript",
    "react",
    "frontend",
    "backend",
];

const FEEDBACK_EXCERPT_CHARS: usize = 50;

type Template = [(&'static str, [(&'static str, &'static str); 4]); 5];

const PROGRAMMING_TEMPLATE: Template = [
    (
        "Introduction to Programming Fundamentals",
        [
            (
                "Understanding Variables and Data Types",
                "Learn about different data types including integers, strings, booleans, and how to store data in variables. Understanding data types is crucial for writing efficient code.",
            ),
            (
                "Control Flow and Logic",
                "Master conditional statements (if/else) and loops (for/while) to control program execution. These are the building blocks of any programming logic.",
            ),
            (
                "Functions and Code Reusability",
                "Discover how to write reusable code with functions, parameters, and return values. Functions help organize code and make it more maintainable.",
            ),
            (
                "Debugging and Error Handling",
                "Learn essential debugging techniques and how to handle errors gracefully in your programs. Good error handling makes applications more robust.",
            ),
        ],
    ),
    (
        "Data Structures and Algorithms",
        [
            (
                "Arrays and Lists",
                "Understand how to work with ordered collections of data. Arrays and lists are fundamental data structures used in almost every program.",
            ),
            (
                "Hash Maps and Dictionaries",
                "Learn about key-value pair storage for fast data retrieval. Hash maps are essential for building efficient applications.",
            ),
            (
                "Basic Sorting and Searching",
                "Master common algorithms for organizing and finding data. These algorithms form the foundation of computer science.",
            ),
            (
                "Time and Space Complexity",
                "Understand Big O notation and how to analyze algorithm efficiency. This knowledge helps you write performant code.",
            ),
        ],
    ),
    (
        "Object-Oriented Programming",
        [
            (
                "Classes and Objects",
                "Learn how to create blueprints (classes) and instances (objects) to model real-world entities in code.",
            ),
            (
                "Inheritance and Polymorphism",
                "Understand code reuse through inheritance and how polymorphism enables flexible code design.",
            ),
            (
                "Encapsulation and Abstraction",
                "Master data hiding and interface design to create maintainable, secure applications.",
            ),
            (
                "Design Patterns Basics",
                "Introduction to common design patterns like Singleton, Factory, and Observer that solve recurring problems.",
            ),
        ],
    ),
    (
        "Working with APIs and Databases",
        [
            (
                "RESTful API Fundamentals",
                "Learn how to interact with web services using HTTP methods (GET, POST, PUT, DELETE) and understand API design.",
            ),
            (
                "Database Basics and SQL",
                "Understand relational databases and write SQL queries to store and retrieve data efficiently.",
            ),
            (
                "Authentication and Security",
                "Learn about securing applications with authentication, authorization, and protecting sensitive data.",
            ),
            (
                "Data Validation and Error Responses",
                "Master input validation and proper error handling in API interactions for robust applications.",
            ),
        ],
    ),
    (
        "Building Real Projects",
        [
            (
                "Project Planning and Architecture",
                "Learn how to plan software projects, break them into components, and design system architecture.",
            ),
            (
                "Version Control with Git",
                "Master Git for tracking changes, collaborating with others, and managing code versions effectively.",
            ),
            (
                "Testing and Quality Assurance",
                "Understand unit testing, integration testing, and how to write reliable, bug-free code.",
            ),
            (
                "Deployment and Production",
                "Learn how to deploy applications to production environments and maintain them effectively.",
            ),
        ],
    ),
];

const WEB_TEMPLATE: Template = [
    (
        "HTML and CSS Fundamentals",
        [
            (
                "HTML Structure and Semantic Markup",
                "Learn how to structure web pages with HTML5 semantic elements for better accessibility and SEO.",
            ),
            (
                "CSS Styling and Layout",
                "Master CSS for styling elements, creating layouts with Flexbox and Grid, and making responsive designs.",
            ),
            (
                "Responsive Design Principles",
                "Understand mobile-first design, media queries, and how to create websites that work on all devices.",
            ),
            (
                "CSS Frameworks and Tools",
                "Explore popular CSS frameworks like Tailwind CSS and Bootstrap for rapid development.",
            ),
        ],
    ),
    (
        "JavaScript Essentials",
        [
            (
                "JavaScript Basics and DOM Manipulation",
                "Learn JavaScript syntax, variables, and how to interact with HTML elements through the DOM.",
            ),
            (
                "Events and User Interactions",
                "Master event handling to create interactive web experiences that respond to user actions.",
            ),
            (
                "Asynchronous JavaScript",
                "Understand promises, async/await, and how to handle asynchronous operations effectively.",
            ),
            (
                "Modern ES6+ Features",
                "Learn modern JavaScript features like arrow functions, destructuring, and modules for cleaner code.",
            ),
        ],
    ),
    (
        "Frontend Frameworks",
        [
            (
                "Introduction to React",
                "Learn component-based architecture, JSX, and how to build modern user interfaces with React.",
            ),
            (
                "State Management",
                "Master React hooks and state management to create dynamic, interactive applications.",
            ),
            (
                "Routing and Navigation",
                "Implement client-side routing for single-page applications using React Router.",
            ),
            (
                "API Integration",
                "Learn to fetch data from APIs and integrate backend services into your React applications.",
            ),
        ],
    ),
    (
        "Backend Development",
        [
            (
                "Server-Side Programming",
                "Understand server-side concepts and learn Node.js for building backend applications.",
            ),
            (
                "RESTful API Design",
                "Design and implement RESTful APIs with proper routing, controllers, and middleware.",
            ),
            (
                "Database Integration",
                "Connect to databases (MongoDB, PostgreSQL) and perform CRUD operations efficiently.",
            ),
            (
                "Authentication and Authorization",
                "Implement secure user authentication with JWT tokens and role-based access control.",
            ),
        ],
    ),
    (
        "Full-Stack Project",
        [
            (
                "Project Architecture",
                "Design a full-stack application architecture connecting frontend, backend, and database.",
            ),
            (
                "Development and Testing",
                "Build features incrementally with proper testing at each layer of the stack.",
            ),
            (
                "Deployment and DevOps",
                "Deploy your application to cloud platforms like Vercel, Netlify, or AWS.",
            ),
            (
                "Performance Optimization",
                "Optimize application performance, implement caching, and monitor production issues.",
            ),
        ],
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFamily {
    Programming,
    Web,
}

impl TemplateFamily {
    pub fn for_topic(topic: &str) -> Self {
        let lower = topic.to_lowercase();
        if WEB_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            TemplateFamily::Web
        } else {
            TemplateFamily::Programming
        }
    }

    fn template(self) -> &'static Template {
        match self {
            TemplateFamily::Programming => &PROGRAMMING_TEMPLATE,
            TemplateFamily::Web => &WEB_TEMPLATE,
        }
    }

    fn curriculum(self) -> Curriculum {
        let modules = self
            .template()
            .iter()
            .map(|(title, lessons)| Module {
                title: (*title).to_string(),
                lessons: lessons
                    .iter()
                    .map(|(title, summary)| Lesson {
                        title: (*title).to_string(),
                        summary: (*summary).to_string(),
                    })
                    .collect(),
            })
            .collect();
        Curriculum::new(modules)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockCurriculumGenerator {
    /// Simulated latency range in milliseconds; `None` answers immediately.
    latency_ms: Option<RangeInclusive<u64>>,
}

impl MockCurriculumGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, latency_ms: RangeInclusive<u64>) -> Self {
        self.latency_ms = (*latency_ms.end() > 0).then_some(latency_ms);
        self
    }

    async fn simulate_latency(&self) {
        let Some(range) = &self.latency_ms else {
            return;
        };
        let millis = if range.start() >= range.end() {
            *range.end()
        } else {
            rand::rng().random_range(range.clone())
        };
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}

/// The template for the topic's family, with the first module renamed after
/// the topic.
pub fn mock_curriculum(topic: &Topic) -> Curriculum {
    let mut curriculum = TemplateFamily::for_topic(topic.as_str()).curriculum();
    if let Some(first) = curriculum.modules.first_mut() {
        first.title = format!("Introduction to {topic}");
    }
    curriculum
}

/// Marks every module and every other lesson as refined, quoting the feedback.
pub fn mock_refinement(previous: &Curriculum, feedback: &Refinement) -> Curriculum {
    let excerpt = feedback.excerpt(FEEDBACK_EXCERPT_CHARS);
    let modules = previous
        .modules
        .iter()
        .enumerate()
        .map(|(m, module)| Module {
            title: format!("{} (Refined)", module.title),
            lessons: module
                .lessons
                .iter()
                .enumerate()
                .map(|(l, lesson)| {
                    if (m + l) % 2 == 0 {
                        Lesson {
                            title: format!("{} - Updated", lesson.title),
                            summary: format!(
                                "{} This has been refined based on your feedback: \"{excerpt}...\"",
                                lesson.summary
                            ),
                        }
                    } else {
                        lesson.clone()
                    }
                })
                .collect(),
        })
        .collect();
    Curriculum::new(modules)
}

impl CurriculumGenerator for MockCurriculumGenerator {
    async fn generate(&self, topic: &Topic) -> Result<Curriculum, GenerationError> {
        self.simulate_latency().await;
        tracing::debug!(topic = %topic, "Generating mock curriculum");
        Ok(mock_curriculum(topic))
    }

    async fn refine(
        &self,
        topic: &Topic,
        previous: &Curriculum,
        feedback: &Refinement,
    ) -> Result<Curriculum, GenerationError> {
        self.simulate_latency().await;
        tracing::debug!(topic = %topic, "Refining mock curriculum");
        Ok(mock_refinement(previous, feedback))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::validate_curriculum;

    fn topic(s: &str) -> Topic {
        Topic::parse(s).unwrap()
    }

    #[test]
    fn test_template_selection() {
        assert_eq!(TemplateFamily::for_topic("React Hooks"), TemplateFamily::Web);
        assert_eq!(TemplateFamily::for_topic("Backend APIs"), TemplateFamily::Web);
        assert_eq!(TemplateFamily::for_topic("CSS grid"), TemplateFamily::Web);
        assert_eq!(TemplateFamily::for_topic("Rust"), TemplateFamily::Programming);
        assert_eq!(
            TemplateFamily::for_topic("Quantum Computing"),
            TemplateFamily::Programming
        );
    }

    #[test]
    fn test_templates_satisfy_cardinality() {
        for family in [TemplateFamily::Programming, TemplateFamily::Web] {
            validate_curriculum(&family.curriculum()).unwrap();
        }
    }

    #[test]
    fn test_first_module_named_after_topic() {
        let curriculum = mock_curriculum(&topic("React Hooks"));
        assert_eq!(curriculum.modules[0].title, "Introduction to React Hooks");
        assert_eq!(curriculum.modules[1].title, "JavaScript Essentials");

        let curriculum = mock_curriculum(&topic("Go"));
        assert_eq!(curriculum.modules[0].title, "Introduction to Go");
        assert_eq!(curriculum.modules[1].title, "Data Structures and Algorithms");
    }

    #[test]
    fn test_refinement_marks_alternate_lessons() {
        let previous = mock_curriculum(&topic("Rust"));
        let feedback = Refinement::parse("More hands-on exercises please").unwrap();
        let refined = mock_refinement(&previous, &feedback);

        assert_eq!(refined.modules.len(), previous.modules.len());
        assert_eq!(refined.modules[0].title, "Introduction to Rust (Refined)");

        // (0 + 0) even: updated
        let updated = &refined.modules[0].lessons[0];
        assert_eq!(
            updated.title,
            "Understanding Variables and Data Types - Updated"
        );
        assert!(updated.summary.ends_with(
            "This has been refined based on your feedback: \"More hands-on exercises please...\""
        ));

        // (0 + 1) odd: untouched
        assert_eq!(refined.modules[0].lessons[1], previous.modules[0].lessons[1]);
        // (1 + 1) even: updated
        assert!(refined.modules[1].lessons[1].title.ends_with(" - Updated"));
    }

    #[test]
    fn test_refinement_quotes_at_most_fifty_chars() {
        let previous = mock_curriculum(&topic("Rust"));
        let feedback = Refinement::parse(&"z".repeat(80)).unwrap();
        let refined = mock_refinement(&previous, &feedback);

        let expected = format!("\"{}...\"", "z".repeat(50));
        assert!(refined.modules[0].lessons[0].summary.ends_with(&expected));
    }

    #[tokio::test]
    async fn test_generator_without_latency() {
        let generator = MockCurriculumGenerator::new();
        let curriculum = generator.generate(&topic("HTML")).await.unwrap();
        assert_eq!(curriculum.modules.len(), 5);
        assert!(curriculum.modules.iter().all(|m| m.lessons.len() == 4));
    }
}
