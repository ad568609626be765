use hitlens_api::{FunctionRecord, HitCountSnapshot};
use tabled::Tabled;

/// One row of the `functions` listing.
#[derive(Tabled)]
pub struct FunctionRow {
    pub backend: String,
    pub name: String,
    pub lines: String,
    pub id: String,
}

impl FunctionRow {
    pub fn from_record(record: &FunctionRecord) -> Self {
        let backend = record
            .id
            .origin()
            .map(|b| b.to_string())
            .unwrap_or_else(|| "-".to_string());
        let loc = &record.location;
        let lines = if loc.start_line == loc.end_line {
            loc.start_line.to_string()
        } else {
            format!("{}-{}", loc.start_line, loc.end_line)
        };

        Self {
            backend,
            name: record.display_name().to_string(),
            lines,
            id: record.id.to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct HitRow {
    pub id: String,
    pub hits: u64,
    pub delta: String,
}

pub fn hit_rows(snapshot: &HitCountSnapshot) -> Vec<HitRow> {
    snapshot
        .hits
        .iter()
        .map(|(id, hits)| HitRow {
            id: id.to_string(),
            hits: *hits,
            delta: snapshot
                .delta_for(id)
                .map(|d| format!("+{d}"))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}
