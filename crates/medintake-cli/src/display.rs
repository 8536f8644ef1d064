//! Vertical card display for classification, intake, and comparison results.

use medintake_classify::BatchItem;
use medintake_core::{
    CarrierCandidate, ClassificationResult, ClientProfile, IntakeFields, MatchOutcome, Plan,
    PlanCandidate, ScoredComparisonResult,
};
use medintake_extract::ExtractError;

type Row = (&'static str, String);

pub fn print_classification_card(name: &str, result: &ClassificationResult) {
    println!("=== {name} ===");

    let mut matched = vec![
        ("document_type", result.document_type.label().to_string()),
        ("status", result.outcome.as_str().to_string()),
        ("confidence", format!("{:.1}", result.confidence)),
    ];
    if let Some(carrier) = &result.matched_carrier {
        matched.push(("carrier", format!("{} (#{})", carrier.name, carrier.id)));
    }
    if let Some(plan) = &result.matched_plan {
        matched.push(("plan", format!("{} (#{})", plan.name, plan.id)));
    }
    print_section("Match", &matched);

    if let Some(suggestions) = result.outcome.suggestions() {
        let mut review = Vec::new();
        if let MatchOutcome::NeedsReview { reason, .. } = &result.outcome {
            review.push(("reason", reason.as_str().to_string()));
        }
        review.extend(suggestions.carriers.iter().map(carrier_row));
        review.extend(suggestions.plans.iter().map(plan_row));
        print_section("Review", &review);
    }

    if let Some(benefits) = &result.extracted_benefits {
        print_section("Benefits", &benefits.entries());
    }
    println!();
}

pub fn print_intake_card(name: &str, fields: &IntakeFields) {
    println!("=== {name} ===");
    if fields.is_empty() {
        println!("  (no client fields found)");
    } else {
        print_section("Client", &fields.entries());
    }
    println!();
}

pub fn print_comparison_card(client: &ClientProfile, result: &ScoredComparisonResult) {
    let current = &result.current_plan;
    println!("=== {} (#{}) ===", current.name, current.id);

    let mut context = vec![
        ("client", format!("{}, {}", client.county, client.state)),
        ("candidates_considered", result.candidates_considered.to_string()),
    ];
    context.extend(plan_terms(current));
    print_section("Current plan", &context);

    if result.is_empty() {
        println!("\n  (no eligible alternatives)");
    }
    for (rank, candidate) in result.recommendations.iter().enumerate() {
        let plan = &candidate.plan;
        let mut rows = vec![("score", candidate.score.to_string())];
        rows.extend(plan_terms(plan));
        rows.extend(candidate.reasons.iter().map(|r| ("reason", r.clone())));
        println!("\n  #{} {} (#{})", rank + 1, plan.name, plan.id);
        for (key, value) in &rows {
            println!("  {:<26} {}", key, value);
        }
    }
    println!();
}

pub fn print_failure(name: &str, error: &ExtractError) {
    println!("=== {name} ===");
    println!("  {:<26} {}", "error", error);
    if error.is_scanned() {
        println!("  {:<26} {}", "hint", "export the pages as images to run OCR");
    }
    println!();
}

pub fn print_batch_summary(items: &[BatchItem]) {
    let (mut matched, mut review, mut failed) = (0, 0, 0);
    for item in items {
        match &item.result {
            Ok(r) if r.is_auto_assignable() => matched += 1,
            Ok(_) => review += 1,
            Err(_) => failed += 1,
        }
    }
    println!(
        "{} documents: {matched} matched, {review} need review, {failed} failed",
        items.len()
    );
}

fn print_section(header: &str, rows: &[Row]) {
    if rows.is_empty() {
        return;
    }
    println!("\n  {header}");
    for (key, value) in rows {
        println!("  {:<26} {}", key, value);
    }
}

fn carrier_row(c: &CarrierCandidate) -> Row {
    ("suggested_carrier", format!("{} (#{}) {:.1}", c.carrier.name, c.carrier.id, c.score))
}

fn plan_row(p: &PlanCandidate) -> Row {
    ("suggested_plan", format!("{} (#{}) {:.1}", p.plan.name, p.plan.id, p.score))
}

fn plan_terms(plan: &Plan) -> Vec<Row> {
    let money = |label: &'static str, value: Option<f64>| value.map(|v| (label, format!("${v:.2}")));
    [
        money("monthly_premium", plan.monthly_premium),
        money("moop", plan.moop),
        money("pcp_copay", plan.pcp_copay),
        money("specialist_copay", plan.specialist_copay),
        plan.snp_type.map(|s| ("snp_type", s.as_str().to_string())),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use medintake_core::SnpType;

    #[test]
    fn plan_terms_skip_missing_values() {
        let plan = Plan {
            id: 1,
            carrier_id: 1,
            name: "Evergreen Gold".into(),
            monthly_premium: Some(45.0),
            snp_type: Some(SnpType::Chronic),
            ..Default::default()
        };
        let rows = plan_terms(&plan);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ("monthly_premium", "$45.00".to_string()));
        assert_eq!(rows[1].0, "snp_type");
    }
}
