//! Run command implementation.

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::Pipeline;
use anyhow::Result;

/// Run the full pipeline against one audio file.
pub async fn run_pipeline(
    audio: Option<&str>,
    output: Option<String>,
    max_results: Option<u32>,
    model: Option<String>,
    mut settings: Settings,
) -> Result<()> {
    // Apply command-line overrides.
    if let Some(dir) = output {
        settings.general.report_dir = dir;
    }
    if let Some(max) = max_results {
        settings.books.max_results = max;
    }
    if let Some(model) = model {
        settings.extraction.model = model;
    }

    let audio_path = match audio {
        Some(path) => Settings::expand_path(path),
        None => settings.audio_path(),
    };

    if let Err(e) = preflight::check(&settings, &audio_path) {
        Output::error(&format!("{}", e));
        Output::info("Run 'estante doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    Output::header("Início do processo");

    let pipeline = Pipeline::new(&settings)?;

    match pipeline.run(&audio_path).await {
        Ok(outcome) => {
            match outcome.report_path {
                Some(path) => {
                    Output::success(&format!(
                        "Relatório com {} tópico(s) recomendado(s) salvo em '{}'",
                        outcome.recommendations.len(),
                        path.display()
                    ));
                }
                None => {
                    Output::warning("Nenhum tópico extraído; nenhum relatório foi gerado.");
                }
            }
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Falha no processamento: {}", e));
            Err(e.into())
        }
    }
}
