//! Plain-text readouts printed after each recompute.

use std::fmt::Write;

use hyd_curve::{CurveResult, FitStatistics};
use hyd_models::ModelSummary;

pub fn format_curve(result: &CurveResult) -> String {
    let mut out = String::new();
    let curve = &result.curve;
    let _ = writeln!(out, "{} ({})", curve.title, curve.model_id);
    let _ = writeln!(
        out,
        "domain [{}, {}) sampled at {} points",
        curve.domain.start,
        curve.domain.end,
        curve.len()
    );
    let query = &result.query;
    if query.clamped {
        let _ = writeln!(
            out,
            "query x = {} (clamped from {})",
            query.x, query.requested_x
        );
    } else {
        let _ = writeln!(out, "query x = {}", query.x);
    }
    let _ = writeln!(out, "{} = {:.4}", curve.y_label, query.y);
    for readout in &result.readouts {
        let _ = writeln!(
            out,
            "{}: {:.6e} {}",
            readout.label, readout.value, readout.unit
        );
    }
    let _ = writeln!(out, "input hash {}", result.provenance.input_hash);
    out
}

pub fn format_models(models: &[ModelSummary]) -> String {
    let mut out = String::new();
    for model in models {
        let _ = writeln!(
            out,
            "{:<24} {} [{}, {})",
            model.id, model.title, model.domain.start, model.domain.end
        );
        for param in &model.params {
            let scale = if param.log_scale { " log" } else { "" };
            let _ = writeln!(
                out,
                "    {:<16} {} in [{}, {}] {} default {}{}",
                param.name, param.label, param.min, param.max, param.unit, param.default, scale
            );
        }
    }
    out
}

pub fn format_fit(model_id: &str, stats: &FitStatistics) -> String {
    format!(
        "{model_id}: n = {}, mean error = {:.6}, mean absolute error = {:.6}, RMSE = {:.6}\n",
        stats.count, stats.mean_error, stats.mean_absolute_error, stats.rmse
    )
}
