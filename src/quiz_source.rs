use crate::error::QuizError;
use crate::logger;
use crate::models::{Question, Quiz, QuizSummary};
use std::fs;
use std::path::PathBuf;

pub trait QuestionSource {
    fn load_quiz(&self, quiz_id: &str) -> Result<Quiz, QuizError>;
    fn list_quizzes(&self) -> Vec<QuizSummary>;
}

/// Quizzes stored as `<dir>/<quiz id>.csv`.
///
/// The first line holds `title,level`; every following line is
/// `question,correct_index,alternative,alternative,...`.
#[derive(Debug, Clone)]
pub struct CsvQuizSource {
    dir: PathBuf,
}

impl CsvQuizSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn quiz_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        if let Ok(entries) = fs::read_dir(&self.dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "csv") {
                    files.push(path);
                }
            }
        }

        files.sort();
        files
    }
}

impl QuestionSource for CsvQuizSource {
    fn load_quiz(&self, quiz_id: &str) -> Result<Quiz, QuizError> {
        let not_found = || QuizError::NotFound {
            quiz_id: quiz_id.to_string(),
        };

        if quiz_id.is_empty() || quiz_id.contains(['/', '\\']) || quiz_id.contains("..") {
            return Err(not_found());
        }

        let path = self.dir.join(format!("{}.csv", quiz_id));
        if !path.is_file() {
            return Err(not_found());
        }

        let content = fs::read_to_string(&path)?;
        parse_quiz(quiz_id, &content)
    }

    fn list_quizzes(&self) -> Vec<QuizSummary> {
        self.quiz_files()
            .iter()
            .filter_map(|path| {
                let id = path.file_stem()?.to_string_lossy().to_string();
                match self.load_quiz(&id) {
                    Ok(quiz) => Some(QuizSummary::from(&quiz)),
                    Err(e) => {
                        logger::log(&format!("Skipping quiz file {}: {}", path.display(), e));
                        None
                    }
                }
            })
            .collect()
    }
}

/// Quizzes held in memory, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct StaticQuizSource {
    quizzes: Vec<Quiz>,
}

impl StaticQuizSource {
    pub fn new(quizzes: Vec<Quiz>) -> Self {
        Self { quizzes }
    }

    pub fn demo() -> Self {
        let question = |title: &str, alternatives: &[&str], correct: usize| Question {
            title: title.to_string(),
            alternatives: alternatives.iter().map(|a| a.to_string()).collect(),
            correct,
        };

        Self::new(vec![Quiz {
            id: "1".to_string(),
            title: "Rust Basics".to_string(),
            level: 1,
            questions: vec![
                question(
                    "Which keyword declares a mutable binding?",
                    &["let", "let mut", "mut let", "var"],
                    1,
                ),
                question(
                    "What does the ? operator do on a Result?",
                    &[
                        "Panics on Err",
                        "Ignores the error",
                        "Returns early with the Err",
                        "Converts it to an Option",
                    ],
                    2,
                ),
                question(
                    "Which type owns a heap-allocated UTF-8 string?",
                    &["&str", "String", "char", "Vec<u8>"],
                    1,
                ),
            ],
        }])
    }
}

impl QuestionSource for StaticQuizSource {
    fn load_quiz(&self, quiz_id: &str) -> Result<Quiz, QuizError> {
        self.quizzes
            .iter()
            .find(|quiz| quiz.id == quiz_id)
            .cloned()
            .ok_or_else(|| QuizError::NotFound {
                quiz_id: quiz_id.to_string(),
            })
    }

    fn list_quizzes(&self) -> Vec<QuizSummary> {
        self.quizzes.iter().map(QuizSummary::from).collect()
    }
}

pub fn parse_quiz(quiz_id: &str, content: &str) -> Result<Quiz, QuizError> {
    let invalid = |reason: String| QuizError::InvalidQuiz {
        quiz_id: quiz_id.to_string(),
        reason,
    };

    let mut lines = content.lines().filter(|line| !line.trim().is_empty());

    let header = lines
        .next()
        .ok_or_else(|| invalid("empty file".to_string()))?;
    let header = parse_csv_fields(header);
    let title = header
        .first()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| invalid("missing title".to_string()))?;
    let level = match header.get(1) {
        Some(level) => level
            .trim()
            .parse::<u8>()
            .map_err(|_| invalid(format!("bad level '{}'", level.trim())))?,
        None => 1,
    };

    let mut questions = Vec::new();
    for (line_no, line) in lines.enumerate() {
        let fields = parse_csv_fields(line);
        if fields.len() < 4 {
            return Err(invalid(format!(
                "question {} needs a title, a correct index and at least two alternatives",
                line_no + 1
            )));
        }

        let correct = fields[1]
            .trim()
            .parse::<usize>()
            .map_err(|_| invalid(format!("question {}: bad correct index", line_no + 1)))?;
        let alternatives: Vec<String> = fields[2..].to_vec();
        if correct >= alternatives.len() {
            return Err(invalid(format!(
                "question {}: correct index {} out of range",
                line_no + 1,
                correct
            )));
        }

        questions.push(Question {
            title: fields[0].clone(),
            alternatives,
            correct,
        });
    }

    if questions.is_empty() {
        return Err(invalid("no questions".to_string()));
    }

    Ok(Quiz {
        id: quiz_id.to_string(),
        title,
        level,
        questions,
    })
}

pub fn parse_csv_fields(line: &str) -> Vec<String> {
    let mut chars = line.chars().peekable();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => {
                current.push(c);
            }
        }
    }

    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Rust Basics,2\n\
        \"Which keyword declares a mutable binding?\",1,let,let mut,var\n\
        \n\
        \"Pick the \"\"owned\"\" string\",0,String,&str\n";

    #[test]
    fn test_parse_csv_fields_simple() {
        assert_eq!(parse_csv_fields("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_csv_fields_with_quoted_commas() {
        assert_eq!(
            parse_csv_fields("\"What is 2+2, 3+3?\",0,\"Four, Six\",Five"),
            vec!["What is 2+2, 3+3?", "0", "Four, Six", "Five"]
        );
    }

    #[test]
    fn test_parse_csv_fields_with_escaped_quotes() {
        assert_eq!(
            parse_csv_fields("\"Is \"\"quoted\"\" ok?\",yes"),
            vec!["Is \"quoted\" ok?", "yes"]
        );
    }

    #[test]
    fn test_parse_csv_fields_empty() {
        assert_eq!(parse_csv_fields(","), vec!["", ""]);
    }

    #[test]
    fn test_parse_quiz() {
        let quiz = parse_quiz("rust", SAMPLE).unwrap();
        assert_eq!(quiz.id, "rust");
        assert_eq!(quiz.title, "Rust Basics");
        assert_eq!(quiz.level, 2);
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.questions[0].alternatives, vec!["let", "let mut", "var"]);
        assert_eq!(quiz.questions[0].correct, 1);
        assert_eq!(quiz.questions[1].title, "Pick the \"owned\" string");
    }

    #[test]
    fn test_parse_quiz_rejects_out_of_range_correct_index() {
        let content = "T,1\nQ,5,a,b\n";
        assert!(matches!(
            parse_quiz("t", content),
            Err(QuizError::InvalidQuiz { .. })
        ));
    }

    #[test]
    fn test_parse_quiz_rejects_quiz_without_questions() {
        assert!(matches!(
            parse_quiz("t", "Title,1\n\n"),
            Err(QuizError::InvalidQuiz { .. })
        ));
    }

    #[test]
    fn test_csv_source_load_and_list() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("rust.csv"), SAMPLE).unwrap();
        fs::write(dir.path().join("broken.csv"), "only a title\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let source = CsvQuizSource::new(dir.path());
        let quiz = source.load_quiz("rust").unwrap();
        assert_eq!(quiz.questions.len(), 2);

        let listed = source.list_quizzes();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "rust");
        assert_eq!(listed[0].questions, 2);
    }

    #[test]
    fn test_csv_source_unknown_quiz_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = CsvQuizSource::new(dir.path());
        assert!(matches!(
            source.load_quiz("missing"),
            Err(QuizError::NotFound { .. })
        ));
        assert!(matches!(
            source.load_quiz("../etc/passwd"),
            Err(QuizError::NotFound { .. })
        ));
    }

    #[test]
    fn test_static_source() {
        let source = StaticQuizSource::demo();
        assert_eq!(source.load_quiz("1").unwrap().questions.len(), 3);
        assert!(matches!(
            source.load_quiz("2"),
            Err(QuizError::NotFound { .. })
        ));
    }
}
