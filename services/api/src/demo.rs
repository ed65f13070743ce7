use clap::Args;
use innovation_scoring::config::ScoringConfig;
use innovation_scoring::error::AppError;
use innovation_scoring::scoring::{
    rank, track, Candidate, CompletionReport, Criterion, FieldSet, IdeaAssessment,
    IdeaScorecard, MatchRequest, MatchWeights, RankedCandidate, ReadinessTable,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the skill share of the assignee match score.
    #[arg(long)]
    pub(crate) skill_weight: Option<f64>,
    /// Override the availability share of the assignee match score.
    #[arg(long)]
    pub(crate) capacity_weight: Option<f64>,
    /// Only show the top N assignees.
    #[arg(long)]
    pub(crate) top: Option<usize>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = ScoringConfig::from_env()?;
    let weights = MatchWeights {
        skill_weight: args
            .skill_weight
            .unwrap_or(config.match_weights.skill_weight),
        capacity_weight: args
            .capacity_weight
            .unwrap_or(config.match_weights.capacity_weight),
    };

    println!("== Innovation Scoring Demo ==");

    let scorecard = demo_idea().scorecard(&config.score_bands())?;
    render_scorecard("Smart Inventory Forecasting", &scorecard);

    let request = MatchRequest::new(["Python", "ML"]);
    let ranked = rank(&request, &demo_team(), weights, args.top)?;
    render_ranking(&request, weights, &ranked);

    let fields = FieldSet::new([
        ("project_name", true),
        ("objectives", true),
        ("budget", true),
        ("team", false),
        ("timeline", false),
    ])?;
    render_completion(&track(&fields), &ReadinessTable::completion_status());

    Ok(())
}

fn demo_idea() -> IdeaAssessment {
    let criterion = |label: &str, raw: f64, weight: f64| Criterion {
        label: label.to_string(),
        raw_value: raw,
        max_value: 10.0,
        weight_percent: weight,
    };

    IdeaAssessment {
        impact: vec![
            criterion("Business Value", 9.0, 40.0),
            criterion("Strategic Alignment", 8.0, 30.0),
            criterion("Customer Benefit", 9.0, 30.0),
        ],
        feasibility: vec![
            criterion("Technical Complexity", 7.0, 50.0),
            criterion("Resource Availability", 6.0, 50.0),
        ],
        efficiency: vec![
            criterion("Cost Reduction", 8.0, 60.0),
            criterion("Time Savings", 7.0, 40.0),
        ],
        weights: None,
    }
}

fn demo_team() -> Vec<Candidate> {
    vec![
        Candidate::new("sarah.chen", ["Python", "SQL"], 60.0),
        Candidate::new("marcus.johnson", ["Python", "ML", "Statistics"], 40.0),
        Candidate::new("emily.rodriguez", ["Design", "Research"], 90.0),
        Candidate::new("david.kim", ["ML", "Python"], 40.0),
    ]
}

fn render_scorecard(title: &str, scorecard: &IdeaScorecard) {
    println!("\nIdea: {title}");
    println!("  Impact       {:>3}", scorecard.impact);
    println!("  Feasibility  {:>3}", scorecard.feasibility);
    println!("  Efficiency   {:>3}", scorecard.efficiency);
    println!(
        "  Overall      {:>3} ({} confidence)",
        scorecard.overall, scorecard.confidence
    );

    for composite in &scorecard.breakdown.composites {
        for adjustment in &composite.adjustments {
            println!(
                "  ! {} {} corrected from {} to {}",
                adjustment.label,
                adjustment.field.label(),
                adjustment.original,
                adjustment.applied
            );
        }
    }
}

fn render_ranking(request: &MatchRequest, weights: MatchWeights, ranked: &[RankedCandidate]) {
    let required: Vec<&str> = request
        .required_attributes
        .iter()
        .map(String::as_str)
        .collect();
    let (skill, capacity) = weights.normalized();

    println!(
        "\nAssignees for [{}] (skills {:.0}% / availability {:.0}%)",
        required.join(", "),
        skill * 100.0,
        capacity * 100.0
    );

    if ranked.is_empty() {
        println!("  (no candidates)");
        return;
    }

    for (position, entry) in ranked.iter().enumerate() {
        let missing = if entry.missing_attributes.is_empty() {
            String::new()
        } else {
            format!(", missing {}", entry.missing_attributes.join(", "))
        };
        println!(
            "  {}. {:<16} {:>3}% match (availability {:.0}%{})",
            position + 1,
            entry.candidate.id,
            entry.match_score,
            entry.candidate.capacity,
            missing
        );
    }
}

fn render_completion(report: &CompletionReport, table: &ReadinessTable) {
    println!(
        "\nProject conversion: {}% complete ({}/{} fields, {})",
        report.completion_percent,
        report.filled,
        report.total,
        table.classify(f64::from(report.completion_percent))
    );
    if !report.missing.is_empty() {
        println!("  Missing: {}", report.missing.join(", "));
    }
    if report.is_complete() {
        println!("  Ready to continue");
    } else {
        println!("  Continue is disabled until every field is filled");
    }
}
