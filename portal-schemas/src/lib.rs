//! Payload types exchanged with the exam portal backend.
//!
//! The backend owns these shapes. Only the fields the portal pages read are
//! named here; everything else is kept in `extra` so a record survives a
//! round trip through the client untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fields of a record that this crate does not name.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// A record identifier. The backend hands out numeric ids for some records
/// while route parameters arrive as strings, so both are accepted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Int(i64),
    Str(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Int(n) => write!(f, "{n}"),
            Id::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Id::Int(value)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id::Str(value.to_owned())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Id::Str(value)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_title: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: Id,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A generated result card for one exam attempt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_attempts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_attempts: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incorrect_attempts: Option<u32>,
    /// Percentage, 0 to 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    /// Per-question breakdown; its shape is up to the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_info: Option<Vec<serde_json::Value>>,
    /// Unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of `courses.get_one`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CourseRef {
    pub id: Id,
}

/// Body of `courses.get_course_questions`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseQuestionsRef {
    pub course_id: Id,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn unknown_fields_survive() {
        let raw = json!({ "id": 7, "course_title": "algebra", "units": 3 });
        let course: Course = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(course.id, Id::Int(7));
        assert_eq!(course.course_title.as_deref(), Some("algebra"));
        assert_eq!(serde_json::to_value(&course).unwrap(), raw);
    }

    #[test]
    fn exams_do_not_need_an_id() {
        let raw = json!({ "_id": "65a", "title": "Midterm" });
        let exam: Exam = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(exam.id, None);
        assert_eq!(exam.title.as_deref(), Some("Midterm"));
        assert_eq!(serde_json::to_value(&exam).unwrap(), raw);
    }

    #[test]
    fn result_cards_keep_what_they_do_not_name() {
        let raw = json!({
            "exam_name": "midterm",
            "course_name": "algebra",
            "total_attempts": 20,
            "correct_attempts": 15,
            "incorrect_attempts": 5,
            "score": 75.0,
            "remark": "good",
            "map_info": [{ "q": 1, "ok": true }],
            "created": 1700000000,
            "allow_pdf": true
        });
        let card: ResultCard = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(card.total_attempts, Some(20));
        assert_eq!(card.score, Some(75.0));
        assert_eq!(card.map_info.as_ref().map(Vec::len), Some(1));
        assert_eq!(card.extra.get("allow_pdf"), Some(&json!(true)));
        assert_eq!(serde_json::to_value(&card).unwrap(), raw);

        let sparse: ResultCard = serde_json::from_value(json!({ "exam_name": "quiz" })).unwrap();
        assert_eq!(sparse.score, None);
    }

    #[test]
    fn ids_accept_numbers_and_strings() {
        let a: Id = serde_json::from_value(json!(1)).unwrap();
        let b: Id = serde_json::from_value(json!("c-19")).unwrap();
        assert_eq!(a, Id::Int(1));
        assert_eq!(b.to_string(), "c-19");
    }

    #[test]
    fn question_ref_uses_camel_case() {
        let body = CourseQuestionsRef {
            course_id: "c-19".into(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "courseId": "c-19" })
        );
    }
}
