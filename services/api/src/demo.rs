use crate::infra::{assistant_state, grant_service, load_advisors, parse_percentage};
use chrono::Utc;
use clap::Args;
use grant_assist::config::AppConfig;
use grant_assist::error::AppError;
use grant_assist::workflows::advisors::{AdvisorDirectory, AdvisorRecord};
use grant_assist::workflows::applications::{
    check_eligibility, ApplicationFacts, EligibilityReport, EligibilityRequest, EvaluationEngine,
    EvaluationResult,
};
use grant_assist::workflows::assistant::{AssistantSession, GrantAssistant, SAMPLE_QUESTIONS};
use grant_assist::workflows::content::{extract_text, ContentBlob, ContentStore, SearchOptions};
use grant_assist::workflows::grants::GrantData;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Applicant organization type, e.g. "Municipality" or "Nonprofit"
    #[arg(long, default_value = "Municipality")]
    pub(crate) entity_type: String,
    /// Average daily visitors at the facility
    #[arg(long, default_value_t = 0)]
    pub(crate) footfall: u64,
    #[arg(long, default_value_t = 0)]
    pub(crate) population_served: u64,
    /// Project type, e.g. "Master Site Plan" or "Trail Development"
    #[arg(long, default_value = "")]
    pub(crate) project_type: String,
    #[arg(long)]
    pub(crate) detailed_scope: bool,
    #[arg(long)]
    pub(crate) consultant_quotes: bool,
    #[arg(long)]
    pub(crate) site_control: bool,
    #[arg(long)]
    pub(crate) matching_funds: bool,
    /// Local match as a percentage of the request (100 = dollar-for-dollar)
    #[arg(long, value_parser = parse_percentage, default_value = "0")]
    pub(crate) match_percentage: u32,
    #[arg(long)]
    pub(crate) public_support: bool,
    #[arg(long)]
    pub(crate) partnerships: bool,
    /// Project addresses recreation for all / equity
    #[arg(long)]
    pub(crate) equity: bool,
    /// Project rehabilitates existing facilities
    #[arg(long)]
    pub(crate) rehabilitation: bool,
    /// County of the project site, used to name the regional advisor
    #[arg(long)]
    pub(crate) county: Option<String>,
    /// Print the result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl EvaluateArgs {
    pub(crate) fn facts(&self) -> ApplicationFacts {
        ApplicationFacts {
            entity_type: self.entity_type.clone(),
            footfall: self.footfall,
            population_served: self.population_served,
            project_type: self.project_type.clone(),
            has_detailed_scope: self.detailed_scope,
            has_consultant_quotes: self.consultant_quotes,
            has_site_control: self.site_control,
            has_matching_funds: self.matching_funds,
            match_percentage: self.match_percentage,
            has_public_support: self.public_support,
            has_partnerships: self.partnerships,
            addresses_equity: self.equity,
            rehabilitation_project: self.rehabilitation,
            county: self.county.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct EligibilityArgs {
    /// Organization type, e.g. "County" or "Land Trust"
    #[arg(long)]
    pub(crate) entity_type: String,
    /// Only check one grant category, e.g. "Partnership Grants"
    #[arg(long)]
    pub(crate) grant_type: Option<String>,
    #[arg(long)]
    pub(crate) has_501c3: bool,
    #[arg(long)]
    pub(crate) matching_funds: bool,
    /// Print the result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct AdvisorArgs {
    /// County name, with or without the "County" suffix
    pub(crate) county: String,
}

#[derive(Args, Debug)]
pub(crate) struct AskArgs {
    pub(crate) question: String,
    /// PDF or text file to include in the search (repeatable)
    #[arg(long = "document")]
    pub(crate) documents: Vec<PathBuf>,
    /// Also list the matched snippets
    #[arg(long)]
    pub(crate) show_hits: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// County used for the advisor lookup and evaluation
    #[arg(long, default_value = "Lawrence")]
    pub(crate) county: String,
    /// Question answered from the static planning content
    #[arg(long)]
    pub(crate) question: Option<String>,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let advisors = Arc::new(load_advisors(&config)?);
    let result = EvaluationEngine::new(advisors).evaluate(&args.facts());

    if args.json {
        return print_json(&result);
    }
    render_evaluation(&result);
    Ok(())
}

pub(crate) fn run_eligibility(args: EligibilityArgs) -> Result<(), AppError> {
    let request = EligibilityRequest {
        entity_type: args.entity_type,
        grant_type: args.grant_type,
        has_501c3: args.has_501c3,
        has_matching_funds: args.matching_funds,
    };
    let report = check_eligibility(&request);

    if args.json {
        return print_json(&report);
    }
    render_eligibility(&request.entity_type, &report);
    Ok(())
}

pub(crate) fn run_advisor(args: AdvisorArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let advisors = load_advisors(&config)?;
    match advisors.lookup(&args.county) {
        Some(record) => render_advisor(record),
        None => println!(
            "No DCNR region lists '{}'. Check the spelling of the county name.",
            args.county.trim()
        ),
    }
    Ok(())
}

pub(crate) async fn run_ask(args: AskArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let state = assistant_state(&config, Utc::now()).await?;

    for path in &args.documents {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let text = extract_text(&name, &bytes);
        if text.trim().is_empty() {
            println!("Skipped {name}: no text could be extracted");
            continue;
        }
        state
            .session
            .content()
            .upsert_document(ContentBlob::document(&name, text));
    }

    let reply = state.assistant.answer(&state.session, &args.question).await;
    println!("{}", reply.answer);

    if args.show_hits {
        println!("\nMatched snippets:");
        for hit in &reply.hits {
            println!("- [{}] {} (score {})", hit.source_name, preview(&hit.snippet), hit.score);
        }
    }
    Ok(())
}

pub(crate) async fn run_refresh() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let grants = grant_service(&config)?;
    let now = Utc::now();

    let data = grants.try_refresh(now).await?;
    println!("Refreshed grant data from {}", config.grants.source_url);
    println!(
        "- {} grant listings | {} characters of program text",
        data.grants.len(),
        data.general_info.chars().count()
    );
    println!(
        "- Snapshot written to {} (stale after {} days)",
        config.grants.snapshot_path.display(),
        config.grants.stale_after_days
    );
    Ok(())
}

/// Walks every workflow using only the embedded reference content.
pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let advisors = Arc::new(AdvisorDirectory::embedded());
    let engine = EvaluationEngine::new(advisors.clone());

    println!("DCNR grant assistant demo");

    let request = EligibilityRequest {
        entity_type: "Municipality".to_string(),
        has_matching_funds: true,
        ..EligibilityRequest::default()
    };
    println!();
    render_eligibility(&request.entity_type, &check_eligibility(&request));

    let facts = ApplicationFacts {
        entity_type: "Municipality".to_string(),
        footfall: 850,
        population_served: 3_200,
        project_type: "Park Rehabilitation".to_string(),
        has_detailed_scope: true,
        has_consultant_quotes: false,
        has_site_control: true,
        has_matching_funds: true,
        match_percentage: 50,
        has_public_support: true,
        has_partnerships: false,
        addresses_equity: true,
        rehabilitation_project: true,
        county: Some(args.county.clone()),
    };
    println!("\nSample application: community park rehabilitation");
    render_evaluation(&engine.evaluate(&facts));

    println!();
    match advisors.lookup(&args.county) {
        Some(record) => render_advisor(record),
        None => println!("No DCNR region lists '{}'", args.county),
    }

    let content = ContentStore::new();
    content.replace_reference(&GrantData::fallback(Utc::now()), &advisors);
    let session = AssistantSession::new(content);
    let assistant = GrantAssistant::new(None, SearchOptions::default());
    let question = args
        .question
        .unwrap_or_else(|| SAMPLE_QUESTIONS[2].to_string());

    println!("\nQ: {question}");
    let reply = assistant.answer(&session, &question).await;
    println!("{}", reply.answer);
    Ok(())
}

pub(crate) fn render_evaluation(result: &EvaluationResult) {
    println!(
        "Score: {}/{} | Approval chance: {}",
        result.score, result.max_score, result.approval_chance
    );
    for component in &result.components {
        println!(
            "  - {}: {}/{}",
            component.category.label(),
            component.points,
            component.max_points
        );
    }
    render_lines("Strengths", &result.strengths);
    render_lines("Areas for Improvement", &result.weaknesses);
    render_lines("Recommendations", &result.feedback);
    println!("Overall Assessment: {}", result.overall_feedback);
}

pub(crate) fn render_eligibility(entity_type: &str, report: &EligibilityReport) {
    println!("Eligibility for {entity_type}");
    for grant in &report.eligible_grants {
        println!(
            "  ✅ {} ({} confidence) - {}",
            grant.grant, grant.confidence, grant.notes
        );
    }
    for grant in &report.ineligible_grants {
        println!("  ❌ {} - {}", grant.grant, grant.reasons.join("; "));
    }
    render_lines("Recommendations", &report.recommendations);
}

pub(crate) fn render_advisor(record: &AdvisorRecord) {
    println!(
        "Region {} ({}): {}",
        record.region_id, record.region_name, record.advisor_name
    );
    println!("  Phone: {}", record.phone);
    println!("  Email: {}", record.email);
}

fn render_lines(heading: &str, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    println!("{heading}:");
    for line in lines {
        println!("  {line}");
    }
}

fn preview(snippet: &str) -> String {
    let flattened = snippet.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut preview: String = flattened.chars().take(80).collect();
    if flattened.chars().count() > 80 {
        preview.push('…');
    }
    preview
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered =
        serde_json::to_string_pretty(value).map_err(|err| AppError::Io(err.into()))?;
    println!("{rendered}");
    Ok(())
}
