use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::thread;
use std::time::Duration;

use clap::Parser;

use readback_core::pipeline::reading_feedback_use_case::{ReadingFeedback, ReadingFeedbackUseCase};
use readback_core::playback::domain::playback_observer::LoggingPlaybackObserver;
use readback_core::playback::domain::playback_scheduler::PlaybackScheduler;
use readback_core::playback::infrastructure::headless_audio_output::HeadlessAudioOutput;
use readback_core::playback::infrastructure::playback_event_loop::{
    event_channel, PlaybackEventLoop,
};
use readback_core::playback::infrastructure::threaded_stop_timer::ThreadedStopTimer;
use readback_core::shared::settings::Settings;
use readback_core::text::domain::word_display::WordDisplay;

const MAX_STOP_SLACK_MS: u64 = 1000;

/// Per-word pronunciation feedback for a read-aloud text.
#[derive(Parser)]
#[command(name = "readback")]
struct Cli {
    /// Reference text file the speaker was asked to read.
    text: PathBuf,

    /// Scoring service response (JSON).
    scores: PathBuf,

    /// Print the feedback as JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Word indices to play back, in order (comma-separated).
    #[arg(long, value_delimiter = ',')]
    play: Option<Vec<usize>>,

    /// Delay between successive play requests, in milliseconds.
    #[arg(long, default_value = "300")]
    gap_ms: u64,

    /// Recording the scores refer to (used as the playback source).
    #[arg(long)]
    audio: Option<PathBuf>,

    /// Score records the aligner scans ahead for a match.
    #[arg(long)]
    lookahead: Option<usize>,

    /// Extra time before the stop timer fires, in milliseconds.
    #[arg(long)]
    slack_ms: Option<u64>,

    /// Settings file (defaults to the platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings back to the settings file.
    #[arg(long)]
    save_config: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;
    let settings = load_settings(&cli)?;

    let text = fs::read_to_string(&cli.text)?;
    let body = fs::read_to_string(&cli.scores)?;

    let feedback = ReadingFeedbackUseCase::new(&settings).execute_str(&text, &body)?;
    if feedback.words.iter().all(|w| !w.is_scored()) {
        log::warn!("No scoring data found in {}", cli.scores.display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&feedback)?);
    } else {
        print_report(&feedback);
    }

    if let Some(indices) = &cli.play {
        let source = cli
            .audio
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "recording".to_string());
        run_playback(&feedback.words, indices, &source, &settings, cli.gap_ms)?;
    }

    Ok(())
}

fn run_playback(
    words: &[WordDisplay],
    indices: &[usize],
    source: &str,
    settings: &Settings,
    gap_ms: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(&bad) = indices.iter().find(|&&i| i >= words.len()) {
        return Err(format!(
            "Word index {bad} is out of range (text has {} words)",
            words.len()
        )
        .into());
    }

    let (tx, rx) = event_channel();
    let scheduler = PlaybackScheduler::new(
        Box::new(HeadlessAudioOutput::new(source, tx.clone())),
        Box::new(ThreadedStopTimer::new(tx.clone())),
        Box::new(LoggingPlaybackObserver::new()),
    )
    .with_slack(settings.stop_slack());
    let playback = PlaybackEventLoop::spawn(scheduler, tx, rx);

    for (n, &index) in indices.iter().enumerate() {
        if n > 0 {
            thread::sleep(Duration::from_millis(gap_ms));
        }
        playback.play_word(words[index].clone())?;
    }

    playback.finish()?;
    Ok(())
}

fn print_report(feedback: &ReadingFeedback) {
    for word in &feedback.words {
        let quality = word
            .quality
            .map(|q| format!("{q:5.1}"))
            .unwrap_or_else(|| "  n/a".to_string());
        let timing = word
            .timing
            .map(|t| t.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        let phones: Vec<String> = word
            .phones
            .iter()
            .map(|p| match (&p.sound_most_like, p.is_substituted()) {
                (Some(heard), true) => format!("{}→{heard}", p.phone),
                _ => p.phone.clone(),
            })
            .collect();
        println!(
            "{:>4}  {:<16} {quality}  {timing:<14} {}",
            word.index,
            word.word,
            phones.join(" ")
        );
    }

    let summary = &feedback.summary;
    let average = summary
        .average_quality
        .map(|q| format!("{q:.1}"))
        .unwrap_or_else(|| "n/a".to_string());
    println!(
        "\n{} words, {} scored, {} timed, average quality {average}",
        summary.word_count, summary.scored_count, summary.timed_count
    );
}

fn load_settings(cli: &Cli) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut settings = match &cli.config {
        Some(path) if cli.save_config && !path.exists() => Settings::default(),
        Some(path) => Settings::load_from(path)?,
        None => Settings::load(),
    };
    if let Some(lookahead) = cli.lookahead {
        settings.lookahead = lookahead;
    }
    if let Some(slack_ms) = cli.slack_ms {
        settings.stop_slack_ms = slack_ms;
    }
    if settings.lookahead == 0 {
        return Err("Lookahead must be at least 1".into());
    }
    if settings.stop_slack_ms > MAX_STOP_SLACK_MS {
        return Err(format!(
            "Stop slack must be at most {MAX_STOP_SLACK_MS} ms, got {}",
            settings.stop_slack_ms
        )
        .into());
    }

    if cli.save_config {
        let path = match &cli.config {
            Some(path) => {
                settings.save_to(path)?;
                path.clone()
            }
            None => settings.save()?,
        };
        log::info!("Saved settings to {}", path.display());
    }
    Ok(settings)
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    require_file(&cli.text, "Text")?;
    require_file(&cli.scores, "Scores")?;
    if let Some(audio) = &cli.audio {
        require_file(audio, "Audio")?;
    }
    if cli.audio.is_some() && cli.play.is_none() {
        log::warn!("--audio has no effect without --play");
    }
    Ok(())
}

fn require_file(path: &Path, what: &str) -> Result<(), Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("{what} file not found: {}", path.display()).into());
    }
    Ok(())
}
