//! Route table.
//!
//! The original client dispatched on `location.hash`; the TUI keeps the
//! same route shapes (including the page query parameter) so deep links in
//! error messages and tests read identically.

/// Sections of the top navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSection {
    Todos,
    Questions,
    Admin,
}

/// Everywhere the client can be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    TodoList { page: u32 },
    TodoNew,
    QuestionList { page: u32 },
    QuestionNew,
    QuestionDetail { id: String },
    Admin,
    NotFound,
}

impl Route {
    /// Parse a hash-style location, e.g. `#/questions?page=2`.
    pub fn parse(location: &str) -> Route {
        let location = if location.is_empty() { "#/" } else { location };
        let (path, query) = match location.split_once('?') {
            Some((path, query)) => (path, query),
            None => (location, ""),
        };
        let page = query
            .split('&')
            .find_map(|pair| pair.strip_prefix("page="))
            .and_then(|value| value.parse().ok())
            .unwrap_or(1);

        match path {
            "#/" => Route::TodoList { page },
            "#/todo/new" => Route::TodoNew,
            "#/questions" => Route::QuestionList { page },
            "#/question/new" => Route::QuestionNew,
            "#/admin" => Route::Admin,
            _ => match path.strip_prefix("#/question/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Route::QuestionDetail {
                    id: id.to_string(),
                },
                _ => Route::NotFound,
            },
        }
    }

    /// The hash-style location of this route.
    pub fn location(&self) -> String {
        match self {
            Route::TodoList { page: 1 } => "#/".to_string(),
            Route::TodoList { page } => format!("#/?page={page}"),
            Route::TodoNew => "#/todo/new".to_string(),
            Route::QuestionList { page: 1 } => "#/questions".to_string(),
            Route::QuestionList { page } => format!("#/questions?page={page}"),
            Route::QuestionNew => "#/question/new".to_string(),
            Route::QuestionDetail { id } => format!("#/question/{id}"),
            Route::Admin => "#/admin".to_string(),
            Route::NotFound => "#/404".to_string(),
        }
    }

    /// Which navigation tab this route lights up.
    pub fn nav_section(&self) -> Option<NavSection> {
        match self {
            Route::TodoList { .. } | Route::TodoNew => Some(NavSection::Todos),
            Route::QuestionList { .. } | Route::QuestionNew | Route::QuestionDetail { .. } => {
                Some(NavSection::Questions)
            }
            Route::Admin => Some(NavSection::Admin),
            Route::NotFound => None,
        }
    }
}
