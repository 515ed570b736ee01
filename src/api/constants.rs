//! Backend API constants: REST/auth paths, headers and table names

/// Path prefix of the PostgREST table API
pub const REST_PATH: &str = "/rest/v1";

/// Path prefix of the GoTrue auth API
pub const AUTH_PATH: &str = "/auth/v1";

/// Standard headers for backend requests
pub mod headers {
    /// Header carrying the project's anon key
    pub const APIKEY: &str = "apikey";

    /// Content type for JSON requests
    pub const CONTENT_TYPE_JSON: &str = "application/json";

    /// Prefer header for returning inserted rows
    pub const PREFER_RETURN_REPRESENTATION: &str = "return=representation";

    /// Prefer header when the response body is not needed
    pub const PREFER_RETURN_MINIMAL: &str = "return=minimal";
}

/// Remote tables used by the survey
pub mod tables {
    pub const PROFILES: &str = "profiles";
    pub const USER_ROLES: &str = "user_roles";
    pub const AREAS: &str = "areas_cadastradas";
    pub const QUESTIONS: &str = "questoes_cadastradas";
    pub const ANSWERS: &str = "respostas_questionario";
}

/// Build a table endpoint URL
pub fn table_endpoint(base_url: &str, table: &str) -> String {
    format!("{}{}/{}", base_url.trim_end_matches('/'), REST_PATH, table)
}

/// Build an auth endpoint URL
pub fn auth_endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}/{}", base_url.trim_end_matches('/'), AUTH_PATH, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_strip_trailing_slash() {
        assert_eq!(
            table_endpoint("https://x.supabase.co/", tables::AREAS),
            "https://x.supabase.co/rest/v1/areas_cadastradas"
        );
        assert_eq!(
            auth_endpoint("https://x.supabase.co", "token"),
            "https://x.supabase.co/auth/v1/token"
        );
    }
}
