use api_types::history::HistoryEntry;
use engine::{CalculationResult, Clock, SplitKind};

use crate::{error::Result, settings::OutputFormat};

/// Renders `result` in the requested format.
///
/// `clock` stamps the history entry of [`OutputFormat::History`].
pub fn render(
    result: &CalculationResult,
    format: OutputFormat,
    note: &str,
    clock: &dyn Clock,
) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => text(result),
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
        OutputFormat::Share => share::encode(result)?,
        OutputFormat::History => {
            serde_json::to_string_pretty(&HistoryEntry::new(*result, note, clock))?
        }
    })
}

fn text(result: &CalculationResult) -> String {
    let kind = result.kind();
    let mut out = format!(
        "{} ({})\n総額: {}\n人数: {}人\n",
        kind.label(),
        kind.description(),
        result.total_amount,
        result.number_of_people
    );
    if kind == SplitKind::Equal {
        out.push_str(&format!("一人当たり: {}\n", result.per_person));
    } else {
        out.push_str(&format!(
            "幹事: {}\n参加者 ({}人): 一人 {}\n",
            result.organizer_payment,
            result.participant_count(),
            result.participant_payment
        ));
    }
    out.push_str(&format!("余り: {}\n", result.remainder));
    out.push_str(kind.remainder_handling());
    out
}
