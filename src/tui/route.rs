//! Page routes and their access policies

use std::fmt;

use super::guard::PagePolicy;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Auth,
    Dashboard,
    Welcome,
    QuestionRegistry,
    AreaRegistry,
    Questionnaire,
    Results,
    /// Any path that matches no page; keeps the path for display
    NotFound(String),
}

impl Route {
    pub const KNOWN: [Route; 8] = [
        Route::Landing,
        Route::Auth,
        Route::Dashboard,
        Route::Welcome,
        Route::QuestionRegistry,
        Route::AreaRegistry,
        Route::Questionnaire,
        Route::Results,
    ];

    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        let normalized = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Self::KNOWN
            .into_iter()
            .find(|route| route.path() == normalized)
            .unwrap_or_else(|| Route::NotFound(path.to_string()))
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Landing => "/",
            Route::Auth => "/auth",
            Route::Dashboard => "/dashboard",
            Route::Welcome => "/welcome",
            Route::QuestionRegistry => "/cadastrar-questoes",
            Route::AreaRegistry => "/cadastrar-areas",
            Route::Questionnaire => "/iniciar-questionario",
            Route::Results => "/resultados",
            Route::NotFound(path) => path,
        }
    }

    pub fn policy(&self) -> PagePolicy {
        match self {
            Route::Landing | Route::NotFound(_) => PagePolicy::Public,
            Route::Auth => PagePolicy::GuestOnly,
            Route::Dashboard | Route::Welcome | Route::QuestionRegistry | Route::Questionnaire => {
                PagePolicy::Authenticated
            }
            Route::AreaRegistry => PagePolicy::Admin {
                fallback: Route::Dashboard,
            },
            Route::Results => PagePolicy::Admin {
                fallback: Route::Welcome,
            },
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_paths_round_trip() {
        for route in Route::KNOWN {
            assert_eq!(Route::parse(route.path()), route);
        }
        assert_eq!(Route::parse("/dashboard/"), Route::Dashboard);
        assert_eq!(Route::parse(""), Route::Landing);
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        assert_eq!(Route::parse("/admin"), Route::NotFound("/admin".into()));
        assert_eq!(Route::parse("/admin").path(), "/admin");
        assert_eq!(Route::parse("/admin").policy(), PagePolicy::Public);
    }
}
