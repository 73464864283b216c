/// Navigation targets of the application. Some paths are templates with an
/// `:id` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Courses,
    CourseCreate,
    SingleCourse,
    Blog,
    SingleQuiz,
    Register,
}

impl Page {
    /// Path template of the page.
    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Courses => "/courses",
            Page::CourseCreate => "/courses/create",
            Page::SingleCourse => "/courses/:id",
            Page::Blog => "/blog",
            Page::SingleQuiz => "/quizzes/:id",
            Page::Register => "/register",
        }
    }

    /// Concrete path with the `:id` placeholder substituted.
    pub fn with_id(self, id: impl std::fmt::Display) -> String {
        self.path().replace(":id", &id.to_string())
    }
}
