//! Sample chapters, quizzes and attempts for a fresh data directory.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};

use quizforge_core::model::{Chapter, Question, QuestionType, Quiz, Submission};

use crate::records::Collections;

/// Author recorded on the sample quizzes.
pub const SAMPLE_TEACHER: &str = "teacher_1";

/// Student who owns the sample attempts.
pub const SAMPLE_STUDENT: &str = "student_1";

fn chapter(
    id: &str,
    title: &str,
    class: &str,
    subject: &str,
    description: &str,
    content: &str,
) -> Chapter {
    Chapter {
        id: id.into(),
        title: title.into(),
        subject: subject.into(),
        class_level: class.into(),
        description: description.into(),
        content: content.into(),
    }
}

fn mcq(id: &str, question: &str, options: [&str; 4], answer: &str, explanation: &str) -> Question {
    Question {
        id: id.into(),
        kind: QuestionType::Mcq,
        question: question.into(),
        options: Some(options.iter().map(|o| o.to_string()).collect()),
        correct_answer: answer.into(),
        explanation: Some(explanation.into()),
    }
}

fn plain(
    id: &str,
    kind: QuestionType,
    question: &str,
    answer: &str,
    explanation: &str,
) -> Question {
    Question {
        id: id.into(),
        kind,
        question: question.into(),
        options: None,
        correct_answer: answer.into(),
        explanation: Some(explanation.into()),
    }
}

pub fn sample_chapters() -> Vec<Chapter> {
    vec![
        chapter(
            "ch1",
            "Introduction to Algebra",
            "10",
            "Mathematics",
            "Learn variables, equations and algebraic expressions. Understand how to solve linear equations and apply them to real-world problems.",
            "Algebra is a branch of mathematics dealing with symbols and the rules for manipulating those symbols. In algebra, those symbols represent quantities without fixed values, known as variables. The main topics include: 1) Variables and Constants - A variable is a symbol that represents an unknown value. 2) Algebraic Expressions - Combinations of variables and constants. 3) Linear Equations - Equations with degree 1. 4) Solving equations: If 2x + 3 = 7, then 2x = 4, x = 2.",
        ),
        chapter(
            "ch2",
            "Photosynthesis",
            "9",
            "Science",
            "The process by which plants convert sunlight into food using carbon dioxide and water.",
            "Photosynthesis is the process used by plants, algae, and some bacteria to convert light energy into chemical energy. The equation: 6CO2 + 6H2O + light → C6H12O6 + 6O2. Chlorophyll in chloroplasts absorbs sunlight. The process has two stages: Light reactions (in thylakoids) and Calvin cycle (in stroma). Factors affecting photosynthesis: light intensity, CO2 concentration, temperature, water availability.",
        ),
        chapter(
            "ch3",
            "The French Revolution",
            "9",
            "Social Studies",
            "A period of radical political and social transformation in France from 1789 to 1799.",
            "The French Revolution began in 1789 with the meeting of the Estates-General. Key causes: financial crisis, social inequality (Three Estates), Enlightenment ideas. Key events: Storming of the Bastille (July 14, 1789), Declaration of Rights of Man, Reign of Terror (1793-94), Rise of Napoleon. Key figures: Robespierre, Marie Antoinette, Napoleon Bonaparte. The revolution led to end of monarchy and rise of democracy.",
        ),
        chapter(
            "ch4",
            "Fractions and Decimals",
            "6",
            "Mathematics",
            "Understanding fractions, decimals and their relationship. Basic operations with fractions.",
            "A fraction represents a part of a whole. It has a numerator (top) and denominator (bottom). Types: proper (1/2), improper (3/2), mixed (1½). Operations: Addition - same denominator: 1/4 + 2/4 = 3/4. Different denominators: find LCM first. Multiplication: multiply numerators and denominators. Division: multiply by reciprocal. Decimals: place value system. 0.1 = 1/10, 0.01 = 1/100.",
        ),
    ]
}

pub fn sample_tests() -> Vec<Quiz> {
    let algebra = vec![
        mcq(
            "q1",
            "What is the value of x in 2x + 3 = 7?",
            ["1", "2", "3", "4"],
            "2",
            "2x = 7 - 3 = 4, so x = 4/2 = 2",
        ),
        mcq(
            "q2",
            "Which of these is a variable?",
            ["5", "x", "3.14", "100"],
            "x",
            "A variable is a symbol representing an unknown quantity, like x.",
        ),
        plain(
            "q3",
            QuestionType::TrueFalse,
            "In algebra, a constant has a fixed value.",
            "true",
            "Yes, constants like 5, π, or 3.14 have fixed, unchanging values.",
        ),
        plain(
            "q4",
            QuestionType::TrueFalse,
            "The equation 3x = 12 gives x = 4.",
            "true",
            "x = 12/3 = 4. This is correct.",
        ),
        plain(
            "q5",
            QuestionType::ShortAnswer,
            "Solve for y: y - 5 = 10",
            "15",
            "y = 10 + 5 = 15",
        ),
    ];

    let photosynthesis = vec![
        mcq(
            "q1",
            "What is the primary pigment used in photosynthesis?",
            ["Melanin", "Chlorophyll", "Hemoglobin", "Carotene"],
            "Chlorophyll",
            "Chlorophyll is the green pigment in plants that absorbs sunlight for photosynthesis.",
        ),
        mcq(
            "q2",
            "Where does photosynthesis take place?",
            ["Mitochondria", "Nucleus", "Chloroplast", "Ribosome"],
            "Chloroplast",
            "Photosynthesis occurs in the chloroplasts of plant cells.",
        ),
        plain(
            "q3",
            QuestionType::TrueFalse,
            "Plants release oxygen during photosynthesis.",
            "true",
            "Yes! Oxygen (O2) is a byproduct of the light reactions in photosynthesis.",
        ),
        plain(
            "q4",
            QuestionType::ShortAnswer,
            "What two raw materials do plants need for photosynthesis?",
            "Carbon dioxide and water",
            "Plants use CO2 (carbon dioxide) and H2O (water) along with sunlight to produce glucose.",
        ),
    ];

    vec![
        quiz("test1", "ch1", "Algebra Basics Test", "Mathematics", algebra, 15),
        quiz("test2", "ch2", "Photosynthesis Quiz", "Science", photosynthesis, 10),
    ]
}

fn quiz(
    id: &str,
    chapter_id: &str,
    title: &str,
    subject: &str,
    questions: Vec<Question>,
    minutes: u32,
) -> Quiz {
    Quiz {
        id: id.into(),
        chapter_id: chapter_id.into(),
        title: title.into(),
        total_marks: questions.len() as u32,
        questions,
        time_limit_minutes: minutes,
        class_level: None,
        subject: Some(subject.into()),
        created_by: Some(SAMPLE_TEACHER.into()),
        created_at: Utc::now(),
    }
}

pub fn sample_submissions() -> Vec<Submission> {
    let answers = |pairs: &[(&str, &str)]| -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    };
    let now = Utc::now();

    vec![
        Submission {
            id: "st1".into(),
            student_id: SAMPLE_STUDENT.into(),
            test_id: "test1".into(),
            answers: answers(&[
                ("q1", "2"),
                ("q2", "x"),
                ("q3", "true"),
                ("q4", "true"),
                ("q5", "15"),
            ]),
            score: 5,
            percentage: 100,
            completed_at: now - Duration::days(3),
        },
        Submission {
            id: "st2".into(),
            student_id: SAMPLE_STUDENT.into(),
            test_id: "test2".into(),
            answers: answers(&[
                ("q1", "Chlorophyll"),
                ("q2", "Nucleus"),
                ("q3", "true"),
                ("q4", "Carbon dioxide and water"),
            ]),
            score: 3,
            percentage: 75,
            completed_at: now - Duration::days(1),
        },
    ]
}

pub(crate) fn sample_collections() -> Collections {
    Collections {
        chapters: sample_chapters(),
        tests: sample_tests(),
        submissions: sample_submissions(),
    }
}
