use std::io::ErrorKind;
use std::process::Stdio;

use kanal::AsyncSender;
use targum_core::{SpeechEngine, SpeechError, Utterance};
use targum_types::{AppEvent, SpeechOutcome};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

/// Words per minute at rate 1.0
const BASE_WPM: f32 = 175.0;

/// Speaks through an external text-to-speech program
pub struct CommandSpeech {
    command: String,
    event_tx: AsyncSender<AppEvent>,
    current: Option<CancellationToken>,
}

impl CommandSpeech {
    pub fn new(command: &str, event_tx: AsyncSender<AppEvent>) -> Self {
        Self {
            command: command.to_string(),
            event_tx,
            current: None,
        }
    }

    fn build(&self, utterance: &Utterance) -> Result<Command, SpeechError> {
        let wpm = (BASE_WPM * utterance.rate).round().to_string();
        let lang = utterance.lang.to_lowercase();

        let mut words = self.command.split_whitespace().map(|word| {
            word.replace("{lang}", &lang).replace("{wpm}", &wpm)
        });
        let program = words.next().ok_or(SpeechError::Unsupported)?;

        let mut command = Command::new(program);
        command
            .args(words)
            .arg(&utterance.text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        Ok(command)
    }
}

impl SpeechEngine for CommandSpeech {
    fn is_supported(&self) -> bool {
        !self.command.trim().is_empty()
    }

    fn cancel(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), SpeechError> {
        let mut child = self
            .build(utterance)?
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => SpeechError::Unsupported,
                _ => SpeechError::Playback(e.to_string()),
            })?;

        let token = CancellationToken::new();
        self.current = Some(token.clone());

        let id = utterance.id;
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let status = tokio::select! {
                status = child.wait() => Some(status),
                _ = token.cancelled() => None,
            };

            let outcome = match status {
                Some(Ok(status)) if status.success() => SpeechOutcome::Finished,
                Some(Ok(status)) => SpeechOutcome::Failed(format!("speech command {status}")),
                Some(Err(e)) => SpeechOutcome::Failed(e.to_string()),
                None => {
                    if let Err(e) = child.kill().await {
                        tracing::debug!("Failed to stop speech command: {}", e);
                    }
                    SpeechOutcome::Failed("interrupted".to_string())
                }
            };

            if let Err(e) = tx
                .send(AppEvent::SpeechFinished {
                    utterance: id,
                    outcome,
                })
                .await
            {
                tracing::debug!("Speech completion not delivered: {}", e);
            }
        });

        Ok(())
    }
}
