//! Doctor command - verify system requirements and configuration.

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::time::Duration;

/// Check result for a single item.
#[derive(Debug)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    message: String,
    hint: Option<String>,
}

#[derive(Debug, PartialEq)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Estante Doctor");
    println!();
    println!("Checking system requirements and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("Transcription").bold());
    checks.push(check_ffmpeg());
    checks.push(check_model(settings));
    checks.push(check_audio(settings));
    for check in &checks {
        check.print();
    }

    println!();
    println!("{}", style("Services").bold());
    let spinner = Output::spinner("Probing endpoints...");
    let llm_check = check_endpoint(
        "completion endpoint",
        &format!("{}/models", settings.extraction.base_url.trim_end_matches('/')),
        "Start LM Studio (or another OpenAI-compatible server) and load a model.",
    )
    .await;
    // Bare volume queries are rejected, so probe with a harmless term.
    let books_check = check_endpoint(
        "book catalog",
        &format!("{}?q=livros&maxResults=1", settings.books.endpoint),
        "Check your network connection.",
    )
    .await;
    spinner.finish_and_clear();
    llm_check.print();
    books_check.print();
    checks.push(llm_check);
    checks.push(books_check);

    println!();
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Warning)
        .count();

    if errors == 0 && warnings == 0 {
        Output::success("All checks passed.");
    } else if errors == 0 {
        Output::warning(&format!("{} warning(s); runs may degrade.", warnings));
    } else {
        Output::error(&format!("{} error(s), {} warning(s).", errors, warnings));
    }

    Ok(())
}

fn check_ffmpeg() -> CheckResult {
    match preflight::check_tool("ffmpeg") {
        Ok(()) => CheckResult::ok("ffmpeg", "found in PATH"),
        Err(e) => CheckResult::error(
            "ffmpeg",
            &e.to_string(),
            "Install ffmpeg: https://ffmpeg.org/download.html",
        ),
    }
}

fn check_model(settings: &Settings) -> CheckResult {
    let path = settings.model_path();
    if path.exists() {
        CheckResult::ok("whisper model", &format!("{}", path.display()))
    } else {
        CheckResult::error(
            "whisper model",
            &format!("not found at {}", path.display()),
            "Download a ggml model from huggingface.co/ggerganov/whisper.cpp",
        )
    }
}

fn check_audio(settings: &Settings) -> CheckResult {
    let path = settings.audio_path();
    if path.exists() {
        CheckResult::ok("audio file", &format!("{}", path.display()))
    } else {
        CheckResult::warning(
            "audio file",
            &format!("not found at {}", path.display()),
            "Runs will use the configured fallback text instead of real audio.",
        )
    }
}

async fn check_endpoint(name: &str, url: &str, hint: &str) -> CheckResult {
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
    {
        Ok(client) => client,
        Err(e) => return CheckResult::error(name, &e.to_string(), hint),
    };

    match client.get(url).send().await {
        Ok(response) if response.status().is_success() => {
            CheckResult::ok(name, &format!("reachable at {}", url))
        }
        Ok(response) => CheckResult::warning(
            name,
            &format!("responded with {} at {}", response.status(), url),
            hint,
        ),
        Err(e) => CheckResult::error(name, &format!("unreachable: {}", e), hint),
    }
}
