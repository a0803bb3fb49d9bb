use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use thousands::Separable;
use tracing_subscriber::EnvFilter;

use devbrand::analysis::select_showcase;
use devbrand::models::BrandingReport;
use devbrand::{Config, GitHubClient, GitHubDataProvider, ProfileAnalyzer};

const ACTIVITY_LIMIT: usize = 10;

#[derive(Parser, Debug)]
#[command(name = "devbrand")]
#[command(version = "0.1.0")]
#[command(about = "Score a GitHub profile's strengths and suggest a branding tagline")]
struct Args {
    /// GitHub username to analyze (overrides GITHUB_USERNAME)
    #[arg(short, long)]
    username: Option<String>,

    /// Output format (json, text, markdown)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Also print recent public activity
    #[arg(long)]
    activity: bool,

    /// Also print showcase repositories, total stars and followers
    #[arg(long)]
    showcase: bool,

    /// Also print the profile README
    #[arg(long)]
    readme: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("devbrand=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration, letting --username win over the environment
    let config = match args.username.clone() {
        Some(username) => Config::from_lookup(|key| match key {
            "GITHUB_USERNAME" => Some(username.clone()),
            _ => std::env::var(key).ok(),
        })?,
        None => Config::from_env()?,
    };

    // Initialize GitHub client
    let github = Arc::new(GitHubClient::new(&config)?);
    let analyzer = ProfileAnalyzer::new(github.clone());

    // Run analysis
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message(format!("Analyzing GitHub profile: {}", github.username()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let report = analyzer.analyze_with_branding().await;
    spinner.finish_and_clear();

    if report.strengths.is_empty() {
        tracing::warn!("No profile data available for {}", config.github_username);
    }

    // Generate output
    let mut output = render_report(&report, &config.github_username, &args.format)?;

    // Optional sections only apply to the human-readable formats
    if args.format != "json" {
        if args.showcase {
            output.push_str(&render_showcase(&github, &config).await?);
        }
        if args.activity {
            output.push_str(&render_activity(&github).await?);
        }
        if args.readme {
            output.push_str(&render_readme(&github).await?);
        }
    }

    write_output(&output, args.output.as_deref())?;

    Ok(())
}

async fn render_showcase(github: &GitHubClient, config: &Config) -> anyhow::Result<String> {
    let repos = github.get_repositories().await?;
    let stars = github.get_total_stars().await?;
    let followers = github.get_followers().await?;

    let mut output = format!(
        "\nTotal stars: {}  Followers: {}\n\nShowcase:\n",
        stars.separate_with_commas(),
        followers.separate_with_commas()
    );
    for repo in select_showcase(&repos, &config.exclude_repos, &config.pinned_repos) {
        output.push_str(&format!(
            "  - {} ({} stars) {}\n",
            repo.name,
            repo.stargazers_count,
            repo.description.as_deref().unwrap_or("")
        ));
    }

    Ok(output)
}

async fn render_activity(github: &GitHubClient) -> anyhow::Result<String> {
    let events = github.get_events(1, 30).await?;

    let mut output = String::from("\nRecent activity:\n");
    if events.is_empty() {
        output.push_str("  (none)\n");
    }
    for event in events.iter().take(ACTIVITY_LIMIT) {
        let when = event
            .created_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        output.push_str(&format!("  {} {}\n", when, event.describe()));
    }

    Ok(output)
}

async fn render_readme(github: &GitHubClient) -> anyhow::Result<String> {
    match github.get_profile_readme().await? {
        Some(readme) => Ok(format!("\nProfile README:\n\n{}\n", readme)),
        None => Ok("\nNo profile README.\n".to_string()),
    }
}

fn render_report(report: &BrandingReport, username: &str, format: &str) -> anyhow::Result<String> {
    let output = match format {
        "json" => serde_json::to_string_pretty(report)?,
        "markdown" => format_markdown(report, username),
        _ => format_text(report, username),
    };
    Ok(output)
}

fn write_output(output: &str, path: Option<&str>) -> anyhow::Result<()> {
    if let Some(path) = path {
        std::fs::write(path, output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn language_line(report: &BrandingReport) -> String {
    report
        .top_languages
        .iter()
        .map(|l| format!("{} ({})", l.language, l.count))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_text(report: &BrandingReport, username: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n=== Profile Strengths: {} ===\n\n", username));
    output.push_str(&format!("{}\n", report.statement));

    if report.strengths.is_empty() {
        output.push_str("\nNo data available.\n");
        return output;
    }

    if !report.top_languages.is_empty() {
        output.push_str(&format!("Top languages: {}\n", language_line(report)));
    }

    for strength in &report.strengths {
        output.push_str(&format!(
            "\n{} ({}/100)\n  {}\n",
            strength.kind, strength.score, strength.description
        ));
        for evidence in &strength.evidence {
            output.push_str(&format!("  - {}\n", evidence));
        }
    }

    output
}

fn format_markdown(report: &BrandingReport, username: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("# Profile Strengths: {}\n\n", username));
    output.push_str(&format!("> {}\n\n", report.statement));

    if report.strengths.is_empty() {
        output.push_str("*No data available.*\n");
        return output;
    }

    if !report.top_languages.is_empty() {
        output.push_str(&format!("**Top languages:** {}\n\n", language_line(report)));
    }

    output.push_str("| Strength | Score |\n|----------|-------|\n");
    for strength in &report.strengths {
        output.push_str(&format!("| {} | {}/100 |\n", strength.kind, strength.score));
    }

    for strength in &report.strengths {
        output.push_str(&format!(
            "\n## {}\n\n{}\n\n",
            strength.kind, strength.description
        ));
        for evidence in &strength.evidence {
            output.push_str(&format!("- {}\n", evidence));
        }
    }

    output
}
