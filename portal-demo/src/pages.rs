//! The data-fetching halves of the portal pages.
//!
//! Each page supplies the token, branches on the envelope and turns a
//! failure message into something to show, the way the UI does.

use std::time::Duration;

use portal_rpc::{
    ResponseEnvelope, RpcClient, Sequencer,
    portal::{CoursesGetCourseQuestions, CoursesGetOne, CoursesList, ExamsList},
    retry::{self, PAGE_RETRY},
};
use portal_schemas::{Course, CourseQuestionsRef, CourseRef, Exam, Id, Question};

/// What a page ends up rendering.
#[derive(Debug)]
pub enum View<T> {
    Ready(T),
    Error { message: String, retry_label: &'static str },
}

impl<T> View<T> {
    fn from_envelope(res: ResponseEnvelope<T>) -> View<T> {
        match res {
            ResponseEnvelope::Success(x) => View::Ready(x),
            ResponseEnvelope::Failure(e) => {
                log::warn!("page fetch failed: {e}");
                View::Error {
                    message: e.message,
                    retry_label: "Retry",
                }
            }
        }
    }
}

/// The exams page: newest exams first.
pub async fn exams(client: &RpcClient, token: Option<&str>) -> View<Vec<Exam>> {
    let res = retry::attempt(&PAGE_RETRY, || client.invoke::<ExamsList>(token, None)).await;
    View::from_envelope(res.map(|mut exams| {
        exams.reverse();
        exams
    }))
}

/// The course picker on the exam form.
pub async fn course_options(client: &RpcClient, token: Option<&str>) -> View<Vec<Course>> {
    let res = client.invoke::<CoursesList>(token, None).await;
    View::from_envelope(res.map(|mut courses| {
        courses.reverse();
        courses
    }))
}

#[derive(Debug)]
pub struct CoursePage {
    pub course: Course,
    pub questions: Vec<Question>,
}

/// The course page loads the course and its questions side by side.
pub async fn course(client: &RpcClient, token: Option<&str>, id: Id) -> View<CoursePage> {
    let course = client.invoke::<CoursesGetOne>(token, Some(CourseRef { id: id.clone() }));
    let questions = client.invoke::<CoursesGetCourseQuestions>(
        token,
        Some(CourseQuestionsRef { course_id: id }),
    );
    let (course, questions) = futures::join!(course, questions);

    match (course.into_result(), questions.into_result()) {
        (Ok(course), Ok(questions)) => View::Ready(CoursePage { course, questions }),
        (Err(e), _) | (_, Err(e)) => View::from_envelope(ResponseEnvelope::Failure(e)),
    }
}

/// Time between two course picks in [`switch_courses`].
pub const SWITCH_GAP: Duration = Duration::from_millis(20);

#[derive(Debug)]
pub struct Switched {
    /// What the page shows once every fetch has settled.
    pub shown: Option<(Id, View<Vec<Question>>)>,
    /// Responses that arrived after a newer course was picked.
    pub stale: usize,
}

/// Picks each course in turn, [`SWITCH_GAP`] apart, without waiting for the
/// previous fetch. Only a response whose ticket is still the newest lands.
pub async fn switch_courses(client: &RpcClient, token: Option<&str>, ids: Vec<Id>) -> Switched {
    let seq = Sequencer::new();
    let fetches = ids.into_iter().enumerate().map(|(i, id)| {
        let seq = &seq;
        async move {
            tokio::time::sleep(SWITCH_GAP * i as u32).await;
            let ticket = seq.issue();
            let body = CourseQuestionsRef {
                course_id: id.clone(),
            };
            let res = client
                .invoke::<CoursesGetCourseQuestions>(token, Some(body))
                .await;
            seq.accept(ticket, (ticket, id, View::from_envelope(res)))
        }
    });
    let landed = futures::future::join_all(fetches).await;

    let stale = landed.iter().filter(|x| x.is_none()).count();
    let shown = landed
        .into_iter()
        .flatten()
        .max_by_key(|(ticket, ..)| *ticket)
        .map(|(_, id, view)| (id, view));
    Switched { shown, stale }
}
