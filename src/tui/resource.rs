/// State of a remote fetch owned by a page.
///
/// Replaces a `loading: bool` plus `data: Option<T>` pair; a failed fetch
/// keeps the backend message so the page can show it in place of the data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resource<T, E = String> {
    /// No request has been made yet
    NotAsked,

    Loading,

    Success(T),

    Failure(E),
}

impl<T, E> Resource<T, E> {
    pub fn from_result(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Resource::Success(data),
            Err(e) => Resource::Failure(e),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Resource::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Resource::Failure(_))
    }

    /// Reference to the data if the fetch succeeded
    pub fn to_option(&self) -> Option<&T> {
        match self {
            Resource::Success(data) => Some(data),
            _ => None,
        }
    }
}

impl<T, E> Default for Resource<T, E> {
    fn default() -> Self {
        Resource::NotAsked
    }
}

impl<T, E> From<Result<T, E>> for Resource<T, E> {
    fn from(result: Result<T, E>) -> Self {
        Resource::from_result(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        let ok: Resource<u32> = Ok(3).into();
        assert_eq!(ok.to_option(), Some(&3));

        let failed: Resource<u32> = Err("boom".to_string()).into();
        assert!(failed.is_failure());
        assert_eq!(failed.to_option(), None);
        assert!(Resource::<u32>::default() == Resource::NotAsked);
    }
}
