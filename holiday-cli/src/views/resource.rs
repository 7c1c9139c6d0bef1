/// Lifecycle of a value fetched from the server
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Resource<T> {
    #[default]
    NotAsked,
    Loading,
    Success(T),
    Failure(String),
}

impl<T> Resource<T> {
    pub fn success(&self) -> Option<&T> {
        match self {
            Resource::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Resource::Failure(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let loaded: Resource<Vec<u8>> = Resource::Success(vec![1]);
        assert_eq!(loaded.success(), Some(&vec![1]));
        assert_eq!(loaded.failure(), None);

        let failed: Resource<Vec<u8>> = Resource::Failure("nope".to_string());
        assert_eq!(failed.failure(), Some("nope"));
        assert_eq!(Resource::<()>::default(), Resource::NotAsked);
    }
}
