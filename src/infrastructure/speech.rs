//! 语音合成 - 基础设施层
//!
//! 只暴露"把一段文本读出来，读完再返回"的能力。取消由上层直接丢弃 future 实现，
//! 所以实现必须保证 future 被丢弃时朗读随之停止。

use crate::config::Config;
use crate::error::{AppResult, SpeechError};
use std::future::Future;
use tokio::process::Command;
use tracing::debug;

/// 语音后端
pub trait SpeechBackend: Send + Sync + 'static {
    /// 朗读 `text`，朗读结束后完成
    fn say(&self, text: &str, lang: &str) -> impl Future<Output = AppResult<()>> + Send;
}

/// 调用外部 TTS 命令（默认 `espeak-ng`）
///
/// 文本放在 `--` 之后作为最后一个参数传入；`lang` 通过 `-v` 传给 espeak 系命令。
#[derive(Debug, Clone)]
pub struct CommandSpeech {
    command: String,
    args: Vec<String>,
}

impl CommandSpeech {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.speech_command, config.speech_args.clone())
    }

    fn build_command(&self, text: &str, lang: &str) -> Command {
        let mut cmd = Command::new(&self.command);
        if self.command.contains("espeak") {
            cmd.arg("-v").arg(espeak_voice(lang));
        }
        // `--` 之后才是文本，以 `-` 开头的题目不会被当成选项
        cmd.args(&self.args)
            .arg("--")
            .arg(text)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            // 任务被取消时子进程随 future 一起被杀掉
            .kill_on_drop(true);
        cmd
    }
}

impl SpeechBackend for CommandSpeech {
    fn say(&self, text: &str, lang: &str) -> impl Future<Output = AppResult<()>> + Send {
        debug!("🔊 {} 朗读 {} 个字符", self.command, text.chars().count());
        run_to_completion(self.build_command(text, lang), self.command.clone())
    }
}

async fn run_to_completion(mut cmd: Command, command: String) -> AppResult<()> {
    let mut child = cmd.spawn().map_err(|source| SpeechError::SpawnFailed {
        command: command.clone(),
        source,
    })?;
    let status = child.wait().await.map_err(|source| SpeechError::SpawnFailed {
        command: command.clone(),
        source,
    })?;
    if status.success() {
        Ok(())
    } else {
        Err(SpeechError::Failed {
            command,
            status: status.to_string(),
        }
        .into())
    }
}

/// `en-US` → `en-us`，espeak 的语音名是小写
fn espeak_voice(lang: &str) -> String {
    lang.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_espeak_gets_voice_flag() {
        let speech = CommandSpeech::new("espeak-ng", vec!["-s".to_string(), "150".to_string()]);
        let cmd = speech.build_command("Hello", "en-US");
        let args: Vec<_> = cmd
            .as_std()
            .get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect();
        assert_eq!(args, vec!["-v", "en-us", "-s", "150", "--", "Hello"]);
    }

    #[test]
    fn test_other_commands_get_text_only() {
        let speech = CommandSpeech::new("say", Vec::new());
        let cmd = speech.build_command("- Plants make food", "en-US");
        let args: Vec<_> = cmd.as_std().get_args().collect();
        assert_eq!(args, vec!["--", "- Plants make food"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_dash_led_text_is_not_parsed_as_option() {
        // basename 按 getopt 解析参数，选项之后的文本必须原样到达
        let speech = CommandSpeech::new("basename", Vec::new());
        assert!(speech.say("- Plants make food", "en-US").await.is_ok());
        assert!(speech.say("-5 °C?", "en-US").await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_command_is_spawn_error() {
        let speech = CommandSpeech::new("definitely-not-a-tts-binary", Vec::new());
        let err = speech.say("Hello", "en-US").await.unwrap_err();
        assert!(matches!(err, crate::AppError::Speech(SpeechError::SpawnFailed { .. })));
    }
}
