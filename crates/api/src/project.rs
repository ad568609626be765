/// The editor's project path service.
pub trait ProjectPaths: Send + Sync {
    /// Relative form of `path` if it lies under the project root, otherwise
    /// `path` unchanged.
    fn make_project_relative_if_possible(&self, path: &str) -> String;
}

impl<T: ProjectPaths + ?Sized> ProjectPaths for std::sync::Arc<T> {
    fn make_project_relative_if_possible(&self, path: &str) -> String {
        (**self).make_project_relative_if_possible(path)
    }
}
