use hitlens_api::ProjectPaths;
use hitlens_core::{NoProject, ProjectRoot, RemotePathResolver};
use nu_ansi_term::Color;
use std::path::PathBuf;
use std::sync::Arc;

fn resolver(project_root: Option<PathBuf>) -> RemotePathResolver {
    let project: Arc<dyn ProjectPaths> = match project_root {
        Some(root) => Arc::new(ProjectRoot::new(root)),
        None => Arc::new(NoProject),
    };
    RemotePathResolver::new(project)
}

pub fn candidates(
    local: &str,
    project_root: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    for (i, candidate) in resolver(project_root)
        .possible_remote_paths(local)
        .iter()
        .enumerate()
    {
        println!("{} {}", Color::DarkGray.paint(format!("{}.", i + 1)), candidate);
    }
    Ok(())
}

pub fn matches(
    local: &str,
    remote: &str,
    project_root: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let candidates = resolver(project_root).possible_remote_paths(local);
    match candidates.iter().position(|c| c == remote) {
        Some(i) => println!(
            "{} (candidate {})",
            Color::LightGreen.bold().paint("match"),
            i + 1
        ),
        None => println!("{}", Color::LightRed.bold().paint("no match")),
    }
    Ok(())
}
