use clap::Args;
use serde_json::json;
use std::path::PathBuf;
use talapker::config::{AppConfig, ContentConfig};
use talapker::error::AppError;
use talapker::i18n::Locale;
use talapker::psychometrics::{
    score_sheet, validate_answers, Axis, PsychometricContent, RawAnswer, RecommendationBundle,
    ScoreSheet,
};

#[derive(Args, Debug)]
pub(crate) struct QuestionsArgs {
    /// Locale tag (ru, kk, en); unknown tags use the default locale
    #[arg(long)]
    pub(crate) locale: Option<String>,
    /// Load quiz content from this directory instead of the embedded copy
    #[arg(long)]
    pub(crate) content_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Comma separated `question=value` pairs, e.g. `1=5,2=3,3=1`
    #[arg(long)]
    pub(crate) answers: String,
    /// Locale tag for the recommendation text
    #[arg(long)]
    pub(crate) locale: Option<String>,
    /// Load quiz content from this directory instead of the embedded copy
    #[arg(long)]
    pub(crate) content_dir: Option<PathBuf>,
}

fn content_config(content_dir: Option<PathBuf>) -> Result<ContentConfig, AppError> {
    let mut content = AppConfig::load()?.content;
    if content_dir.is_some() {
        content.content_dir = content_dir;
    }
    Ok(content)
}

pub(crate) fn run_questions(args: QuestionsArgs) -> Result<(), AppError> {
    let content = PsychometricContent::from_config(&content_config(args.content_dir)?)?;
    let (locale, questions) = content.catalog.load_tag(args.locale.as_deref());

    println!("Career quiz questions ({locale})");
    if questions.is_empty() {
        println!("No questions available for this locale.");
        return Ok(());
    }

    let scale = content.catalog.scale(locale);
    for (value, label) in scale.iter().enumerate() {
        println!("  {} = {}", value + 1, label);
    }
    println!();
    for question in questions {
        println!(
            "{:>3}. [{} {:?}] {}",
            question.id, question.axis, question.polarity, question.text
        );
    }

    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let content = PsychometricContent::from_config(&content_config(args.content_dir)?)?;
    let locale = Locale::normalize(args.locale.as_deref(), content.catalog.default_locale());

    let raw = parse_answer_pairs(&args.answers)?;
    let answers = validate_answers(&raw).map_err(|err| AppError::Usage(err.to_string()))?;

    let sheet = score_sheet(&answers, &content.catalog.scoring_questions());
    let mut bundle = content.recommendations.resolve_code(&sheet.type_code, locale);
    bundle.percentages = sheet.percentages();

    render_result(&sheet, &bundle);
    Ok(())
}

pub(crate) fn parse_answer_pairs(raw: &str) -> Result<Vec<RawAnswer>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (id, value) = pair
                .split_once('=')
                .ok_or_else(|| AppError::Usage(format!("expected question=value, got '{pair}'")))?;
            let id: i64 = id
                .trim()
                .parse()
                .map_err(|_| AppError::Usage(format!("'{id}' is not a question number")))?;
            let value: i64 = value
                .trim()
                .parse()
                .map_err(|_| AppError::Usage(format!("'{value}' is not an answer value")))?;
            Ok(RawAnswer {
                question_id: json!(id),
                value: json!(value),
            })
        })
        .collect()
}

fn render_result(sheet: &ScoreSheet, bundle: &RecommendationBundle) {
    println!("Type: {} - {}", sheet.type_code, bundle.title);
    println!("{}", bundle.description);
    println!("\nStrengths: {}", bundle.strengths);

    if bundle.professions.is_empty() {
        println!("\nRecommended programs: none");
    } else {
        println!("\nRecommended programs");
        for profession in &bundle.professions {
            println!("- {profession}");
        }
    }

    println!("\nAxis balance");
    for axis in Axis::ORDER {
        let tally = sheet.tally(axis);
        let (first, second) = axis.letters();
        let share = bundle.percentages.get(&axis).copied().unwrap_or(50);
        println!(
            "- {first}/{second}: {share}% {first}, {}% {second} ({} answers, score {})",
            100 - share,
            tally.answered,
            tally.score
        );
    }

    if !sheet.skipped.is_empty() {
        let ids: Vec<String> = sheet.skipped.iter().map(u32::to_string).collect();
        println!("\nIgnored unknown questions: {}", ids.join(", "));
    }
}
