//! 音频播放服务 - 业务能力层
//!
//! 每次播放都是一个后台任务：依次朗读若干段文本，每段读完（再停顿 `gap`）才读下一段。
//! 开始新的播放或调用 [`AudioPlayer::stop`] 都会中止当前任务。

use crate::infrastructure::SpeechBackend;
use futures::future::{AbortHandle, Abortable};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::utils::truncate_text;

struct Playback {
    abort: AbortHandle,
    task: JoinHandle<()>,
}

/// 音频播放器
pub struct AudioPlayer<S: SpeechBackend> {
    backend: Arc<S>,
    lang: String,
    gap: Duration,
    current: Option<Playback>,
}

impl<S: SpeechBackend> AudioPlayer<S> {
    pub fn new(backend: S, lang: impl Into<String>, gap: Duration) -> Self {
        Self {
            backend: Arc::new(backend),
            lang: lang.into(),
            gap,
            current: None,
        }
    }

    /// 取消正在进行的播放，然后朗读 `text`
    pub fn speak(&mut self, text: impl Into<String>) {
        self.play(vec![text.into()]);
    }

    /// 取消正在进行的播放，然后依次朗读（如先问题后答案）
    pub fn speak_sequence(&mut self, texts: Vec<String>) {
        self.play(texts);
    }

    /// 停止所有播放，返回是否确实中止了一个未完成的任务
    pub fn stop(&mut self) -> bool {
        match self.current.take() {
            Some(playback) => {
                let was_running = !playback.task.is_finished();
                playback.abort.abort();
                if was_running {
                    debug!("⏹ 播放已中止");
                }
                was_running
            }
            None => false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|playback| !playback.task.is_finished())
    }

    /// 等待当前播放结束（正常结束或被中止）
    pub async fn wait(&mut self) {
        if let Some(playback) = self.current.take() {
            if let Err(e) = playback.task.await {
                warn!("播放任务异常结束: {}", e);
            }
        }
    }

    fn play(&mut self, texts: Vec<String>) {
        self.stop();

        let texts: Vec<String> = texts.into_iter().filter(|t| !t.trim().is_empty()).collect();
        if texts.is_empty() {
            return;
        }

        let backend = Arc::clone(&self.backend);
        let lang = self.lang.clone();
        let gap = self.gap;
        let sequence = async move {
            for (i, text) in texts.iter().enumerate() {
                if i > 0 && !gap.is_zero() {
                    tokio::time::sleep(gap).await;
                }
                debug!("🔊 朗读: {}", truncate_text(text, 40));
                if let Err(e) = backend.say(text, &lang).await {
                    warn!("⚠️ 朗读失败，停止本次播放: {}", e);
                    break;
                }
            }
        };

        let (abort, registration) = AbortHandle::new_pair();
        let task = tokio::spawn(async move {
            let _ = Abortable::new(sequence, registration).await;
        });
        self.current = Some(Playback { abort, task });
    }
}

impl<S: SpeechBackend> Drop for AudioPlayer<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
