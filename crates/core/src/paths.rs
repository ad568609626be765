//! Local-to-remote script path matching.
//!
//! Backends name scripts the way the running application serves them, which
//! rarely matches the project-relative path the editor has open. Asset
//! pipelines flatten `app/assets/<kind>/` into `assets/`, static servers mount
//! `public/` at the web root, and some tools report the bare file name under
//! `assets/`. [`RemotePathResolver`] enumerates those spellings.

use hitlens_api::ProjectPaths;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use std::sync::Arc;

/// Number of candidates produced for every local path.
pub const CANDIDATE_COUNT: usize = 5;

static ASSET_PIPELINE_DIR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^app/assets/[^/]+/").expect("asset pipeline pattern"));

const PUBLIC_DIR: &str = "public/";

/// Project-root based implementation of the editor's path service.
#[derive(Debug, Clone)]
pub struct ProjectRoot {
    prefix: String,
}

impl ProjectRoot {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let mut prefix = root.as_ref().to_string_lossy().into_owned();
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        Self { prefix }
    }

    pub fn as_str(&self) -> &str {
        &self.prefix
    }
}

impl ProjectPaths for ProjectRoot {
    fn make_project_relative_if_possible(&self, path: &str) -> String {
        path.strip_prefix(self.prefix.as_str())
            .unwrap_or(path)
            .to_string()
    }
}

/// Used when no project is open: every path is already as relative as it gets.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProject;

impl ProjectPaths for NoProject {
    fn make_project_relative_if_possible(&self, path: &str) -> String {
        path.to_string()
    }
}

#[derive(Clone)]
pub struct RemotePathResolver {
    project: Arc<dyn ProjectPaths>,
}

impl RemotePathResolver {
    pub fn new(project: Arc<dyn ProjectPaths>) -> Self {
        Self { project }
    }

    /// Candidate remote spellings of `local_path`, in a fixed order:
    ///
    /// 1. the path unchanged
    /// 2. the project-relative path
    /// 3. `assets/` + the final path segment
    /// 4. `assets/` + the relative path minus a leading `app/assets/<dir>/`
    /// 5. the relative path minus a leading `public/`
    ///
    /// Candidates are not deduplicated.
    pub fn possible_remote_paths(&self, local_path: &str) -> [String; CANDIDATE_COUNT] {
        let relative = self.project.make_project_relative_if_possible(local_path);
        let basename = relative.rsplit('/').next().unwrap_or(relative.as_str());
        let pipeline_path = ASSET_PIPELINE_DIR.replace(&relative, "");
        let public_path = relative.strip_prefix(PUBLIC_DIR).unwrap_or(relative.as_str());

        [
            local_path.to_string(),
            relative.clone(),
            format!("assets/{basename}"),
            format!("assets/{pipeline_path}"),
            public_path.to_string(),
        ]
    }

    pub fn could_be_remote_path(&self, local_path: &str, remote_path: &str) -> bool {
        self.possible_remote_paths(local_path)
            .iter()
            .any(|candidate| candidate == remote_path)
    }
}

impl Default for RemotePathResolver {
    fn default() -> Self {
        Self::new(Arc::new(NoProject))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(root: &str) -> RemotePathResolver {
        RemotePathResolver::new(Arc::new(ProjectRoot::new(root)))
    }

    #[test]
    fn asset_pipeline_image() {
        let candidates = RemotePathResolver::default().possible_remote_paths("app/assets/images/logo.png");
        assert_eq!(
            candidates,
            [
                "app/assets/images/logo.png",
                "app/assets/images/logo.png",
                "assets/logo.png",
                "assets/logo.png",
                "app/assets/images/logo.png",
            ]
        );
    }

    #[test]
    fn public_prefix_is_stripped() {
        let candidates = RemotePathResolver::default().possible_remote_paths("public/js/main.js");
        assert_eq!(candidates[4], "js/main.js");
        assert_eq!(candidates[2], "assets/main.js");
        assert_eq!(candidates[3], "assets/public/js/main.js");
    }

    #[test]
    fn absolute_path_is_made_project_relative() {
        let candidates = resolver("/home/dev/shop").possible_remote_paths("/home/dev/shop/public/app.js");
        assert_eq!(candidates[0], "/home/dev/shop/public/app.js");
        assert_eq!(candidates[1], "public/app.js");
        assert_eq!(candidates[4], "app.js");
    }

    #[test]
    fn path_outside_project_stays_unchanged() {
        let candidates = resolver("/home/dev/shop").possible_remote_paths("/tmp/scratch.js");
        assert_eq!(candidates[1], "/tmp/scratch.js");
        assert_eq!(candidates[2], "assets/scratch.js");
        assert_eq!(candidates[4], "/tmp/scratch.js");
    }

    #[test]
    fn single_segment_path() {
        let candidates = RemotePathResolver::default().possible_remote_paths("server.js");
        assert_eq!(
            candidates,
            [
                "server.js",
                "server.js",
                "assets/server.js",
                "assets/server.js",
                "server.js",
            ]
        );
    }

    #[test]
    fn pipeline_prefix_needs_a_directory_segment() {
        // `app/assets/x.js` has no `<dir>/` after `app/assets/`
        let candidates = RemotePathResolver::default().possible_remote_paths("app/assets/x.js");
        assert_eq!(candidates[3], "assets/app/assets/x.js");
    }

    #[test]
    fn only_a_leading_public_is_stripped() {
        let candidates = RemotePathResolver::default().possible_remote_paths("site/public/a.js");
        assert_eq!(candidates[4], "site/public/a.js");
    }

    #[test]
    fn membership_matches_candidates_exactly() {
        let resolver = resolver("/srv/app");
        let local = "/srv/app/app/assets/javascripts/cart.js";

        for candidate in resolver.possible_remote_paths(local) {
            assert!(resolver.could_be_remote_path(local, &candidate));
        }
        assert!(resolver.could_be_remote_path(local, "assets/cart.js"));
        assert!(!resolver.could_be_remote_path(local, "javascripts/cart.js"));
        assert!(!resolver.could_be_remote_path(local, ""));
    }

    #[test]
    fn root_with_trailing_slash() {
        let root = ProjectRoot::new("/srv/app/");
        assert_eq!(root.as_str(), "/srv/app/");
        assert_eq!(root.make_project_relative_if_possible("/srv/app/x.js"), "x.js");
        // A sibling directory sharing the prefix is not inside the project
        assert_eq!(
            root.make_project_relative_if_possible("/srv/application/x.js"),
            "/srv/application/x.js"
        );
    }
}
