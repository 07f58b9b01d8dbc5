//! Offline message check
//!
//! Runs the same validation and retry decision as a real submission, without
//! a running game.

use anyhow::Result;
use clap::Args;
use holonet_core::{
    MAX_MESSAGE_LEN, MessageType, Settings, SettingsFile, SettingsPersistence, SubmitError,
    prepare_messages, retry_policy,
};
use serde::Serialize;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Check as a button emote instead of chat messages
    #[arg(long)]
    pub emote: bool,

    /// Assume retry on submission is enabled
    #[arg(long)]
    pub retry: bool,

    /// Assume chat log capture is enabled
    #[arg(long)]
    pub capture: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Messages, one batch in order
    #[arg(required = true)]
    pub messages: Vec<String>,
}

/// What a submission of the batch would send
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub message_type: MessageType,
    pub messages: Vec<String>,
    pub retry: bool,
}

pub async fn run(args: CheckArgs) -> Result<()> {
    let settings = SettingsFile::user().load_settings().await?;
    let json = args.json;
    let report = check(args, settings)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for message in &report.messages {
        println!(
            "[{:>3}/{}] {}",
            message.chars().count(),
            MAX_MESSAGE_LEN,
            message
        );
    }
    println!(
        "Retry on submission: {}",
        if report.retry { "yes" } else { "no" }
    );
    Ok(())
}

/// Validate the batch against `settings`, with flags forcing options on
fn check(args: CheckArgs, mut settings: Settings) -> Result<CheckReport, SubmitError> {
    settings.chat.retry_message_submission |= args.retry;
    settings.chat_log.capture_chat_log |= args.capture;

    let message_type = if args.emote {
        MessageType::ButtonEmote
    } else {
        MessageType::ChatMessage
    };
    let messages = prepare_messages(args.messages)?;

    Ok(CheckReport {
        message_type,
        messages,
        retry: retry_policy(&settings, message_type),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        check: CheckArgs,
    }

    fn args(argv: &[&str]) -> CheckArgs {
        let mut full = vec!["test"];
        full.extend_from_slice(argv);
        TestCli::parse_from(full).check
    }

    #[test]
    fn test_check_flags() {
        let parsed = args(&["--emote", "--retry", "--capture", "wave"]);
        assert!(parsed.emote);
        assert!(parsed.retry);
        assert!(parsed.capture);
        assert!(!parsed.json);
        assert_eq!(parsed.messages, vec!["wave"]);
    }

    #[test]
    fn test_check_requires_a_message() {
        assert!(TestCli::try_parse_from(["test", "--retry"]).is_err());
    }

    #[test]
    fn trims_messages() {
        let report = check(args(&["  hello there ", "bye"]), Settings::default()).unwrap();
        assert_eq!(report.message_type, MessageType::ChatMessage);
        assert_eq!(report.messages, vec!["hello there", "bye"]);
        assert!(!report.retry);
    }

    #[test]
    fn flags_enable_retry_for_chat() {
        let report = check(args(&["--retry", "--capture", "hi"]), Settings::default()).unwrap();
        assert!(report.retry);
    }

    #[test]
    fn retry_needs_capture() {
        let report = check(args(&["--retry", "hi"]), Settings::default()).unwrap();
        assert!(!report.retry);
    }

    #[test]
    fn saved_settings_count() {
        let mut settings = Settings::default();
        settings.chat.retry_message_submission = true;
        settings.chat_log.capture_chat_log = true;

        let report = check(args(&["hi"]), settings).unwrap();
        assert!(report.retry);
    }

    #[test]
    fn emotes_never_retry() {
        let report = check(
            args(&["--emote", "--retry", "--capture", "wave"]),
            Settings::default(),
        )
        .unwrap();
        assert_eq!(report.message_type, MessageType::ButtonEmote);
        assert!(!report.retry);
    }

    #[test]
    fn blank_message_fails() {
        let err = check(args(&["hi", "   "]), Settings::default()).unwrap_err();
        assert_eq!(err, SubmitError::EmptyMessage);
    }

    #[test]
    fn over_long_message_fails() {
        let long = "a".repeat(MAX_MESSAGE_LEN + 1);
        let err = check(args(&[long.as_str()]), Settings::default()).unwrap_err();
        assert_eq!(err, SubmitError::LongMessage);
    }
}
