use crate::BackendArgs;
use hitlens_api::{ScriptEvent, ScriptEventKind};
use nu_ansi_term::Color;

pub fn format_event(event: &ScriptEvent) -> String {
    match event.kind {
        ScriptEventKind::Registered => format!("{} {}", Color::LightGreen.paint("+"), event.path),
        ScriptEventKind::Removed => format!("{} {}", Color::LightRed.paint("-"), event.path),
    }
}

pub async fn run(backends: &BackendArgs) -> Result<(), Box<dyn std::error::Error>> {
    let aggregator = backends.build()?;
    let mut events = aggregator.subscribe();
    aggregator.init();

    // Fixture backends announce everything during init
    while let Ok(event) = events.try_recv() {
        println!("{}", format_event(&event));
    }

    for (backend, ready) in aggregator.readiness() {
        let state = if ready {
            Color::LightGreen.paint("ready")
        } else {
            Color::DarkGray.paint("disconnected")
        };
        println!("{}: {}", Color::LightBlue.bold().paint(backend.as_str()), state);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_prefixed_by_kind() {
        let added = format_event(&ScriptEvent::registered("app.js"));
        let removed = format_event(&ScriptEvent::removed("app.js"));
        assert!(added.contains('+') && added.ends_with("app.js"));
        assert!(removed.contains('-') && removed.ends_with("app.js"));
    }
}
