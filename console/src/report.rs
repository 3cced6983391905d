use vesselcore::analysis::{AnomalyKind, FailureStage, QueryOutcome, QueryReport};

/// Renders a report as the short text shown on the console.
pub fn render(report: &QueryReport) -> String {
    match &report.outcome {
        QueryOutcome::Position(point) => format!(
            "{} at {:.5}, {:.5} ({}) making {:.1} kn on {:.0}°",
            point.vessel_name,
            point.lat,
            point.lon,
            point.timestamp.format("%Y-%m-%d %H:%M UTC"),
            point.sog,
            point.cog
        ),
        QueryOutcome::Prediction(result) => format!(
            "{} now at {:.5}, {:.5}; in {} min expected at {:.5}, {:.5}",
            result.vessel_name,
            result.current.lat,
            result.current.lon,
            result.horizon_minutes,
            result.predicted.lat,
            result.predicted.lon
        ),
        QueryOutcome::Verification(result) => {
            let mut text = format!(
                "{} movement {} over last {} reports",
                result.vessel_name, result.status, result.points_analyzed
            );
            for flag in &result.flags {
                let label = match flag.kind {
                    AnomalyKind::SpeedJump => "speed change",
                    AnomalyKind::SharpTurn => "heading change",
                };
                text.push_str(&format!(
                    "\n  pair {}: {} {:.1} exceeds {:.1}",
                    flag.pair_index, label, flag.delta, flag.threshold
                ));
            }
            text
        }
        QueryOutcome::Failed(failure) => {
            let prefix = match failure.stage {
                FailureStage::Parse => "Could not understand the request",
                FailureStage::Resolution => "Could not identify the vessel",
                FailureStage::Lookup => "No usable track data",
                FailureStage::Analysis => "Not enough data to analyze",
            };
            format!("{}: {}", prefix, failure.message)
        }
    }
}
