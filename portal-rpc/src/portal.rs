//! Operations the exam portal pages call.

use portal_schemas::{Course, CourseQuestionsRef, CourseRef, Exam, Question};

crate::portal_ops! {
    /// Exams visible to the caller. Sent with a `null` body.
    ExamsList = "exams.list": () => Vec<Exam>;

    /// Courses visible to the caller. Sent with a `null` body.
    CoursesList = "courses.list": () => Vec<Course>;

    CoursesGetOne = "courses.get_one": CourseRef => Course;

    CoursesGetCourseQuestions = "courses.get_course_questions": CourseQuestionsRef => Vec<Question>;
}

#[cfg(test)]
mod tests {
    use portal_schemas::Id;
    use serde_json::json;

    use super::*;
    use crate::{Operation, ResponseEnvelope, RpcClient, test::MockTransport};

    #[test]
    fn names_are_valid() {
        for name in NAMES {
            assert!(crate::OperationName::new(*name).is_ok());
        }
        assert_eq!(ExamsList::NAME, "exams.list");
        assert_eq!(NAMES.len(), 4);
    }

    #[tokio::test]
    async fn typed_exam_listing() {
        let mut mock = MockTransport::new();
        mock.reply_json(
            "exams.list",
            json!({ "success": true, "data": [{ "id": 1, "title": "Midterm" }] }),
        );
        let client = RpcClient::with_transport(mock);

        let res = client.invoke::<ExamsList>(Some("abc"), None).await;
        let exams = res.into_result().unwrap();
        assert_eq!(exams.len(), 1);
        assert_eq!(exams[0].id, Some(Id::Int(1)));
        assert_eq!(exams[0].title.as_deref(), Some("Midterm"));
    }

    #[tokio::test]
    async fn exams_without_ids_are_accepted() {
        let mut mock = MockTransport::new();
        mock.reply_json(
            "exams.list",
            json!({ "success": true, "data": [{ "_id": "65a", "title": "Midterm" }] }),
        );
        let client = RpcClient::with_transport(mock);

        let exams = client
            .invoke::<ExamsList>(Some("abc"), None)
            .await
            .into_result()
            .unwrap();
        assert_eq!(exams[0].id, None);
        assert_eq!(exams[0].extra.get("_id"), Some(&json!("65a")));
    }

    #[tokio::test]
    async fn course_question_body_shape() {
        let mut mock = MockTransport::new();
        mock.reply_json("courses.get_course_questions", json!({ "success": true, "data": [] }));
        let client = RpcClient::with_transport(mock);

        let body = CourseQuestionsRef {
            course_id: "c-7".into(),
        };
        let res = client
            .invoke::<CoursesGetCourseQuestions>(Some("abc"), Some(body))
            .await;
        assert_eq!(res, ResponseEnvelope::Success(Vec::new()));
        assert_eq!(
            client.transport().sent()[0].body,
            json!({ "req": { "auth": { "token": "abc" }, "body": { "courseId": "c-7" } } })
        );
    }
}
