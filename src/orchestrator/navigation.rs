//! 导航控制器
//!
//! 接收用户操作，修改会话状态（并持久化），然后重新过滤、重新渲染。
//! 收藏切换例外：只更新受影响的那一张卡片。

use anyhow::Result;
use std::io::Write;
use tracing::{debug, info};

use crate::error::AppResult;
use crate::infrastructure::SpeechBackend;
use crate::models::QuestionId;
use crate::orchestrator::command::{Command, HELP};
use crate::render::{Content, Frame, Renderer};
use crate::services::{filter, AudioPlayer, LoadState, RecordStore, Session};

/// 处理完一条命令后是否继续
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// 导航控制器
pub struct NavigationController<W: Write, S: SpeechBackend> {
    store: RecordStore,
    load_state: LoadState,
    /// 加载状态占位只显示到用户第一次导航为止，之后按空题库渲染
    show_load_state: bool,
    session: Session,
    renderer: Renderer<W>,
    audio: AudioPlayer<S>,
}

impl<W: Write, S: SpeechBackend> NavigationController<W, S> {
    /// 新建时题库为空，处于加载中状态
    pub fn new(session: Session, renderer: Renderer<W>, audio: AudioPlayer<S>) -> Self {
        Self {
            store: RecordStore::empty(),
            load_state: LoadState::Loading,
            show_load_state: true,
            session,
            renderer,
            audio,
        }
    }

    /// 接收加载结果；失败时题库保持为空，不显示任何部分数据
    pub fn set_loaded(&mut self, result: AppResult<RecordStore>) {
        match result {
            Ok(store) => {
                self.store = store;
                self.load_state = LoadState::Loaded;
            }
            Err(e) => {
                self.store = RecordStore::empty();
                self.load_state = LoadState::Failed(e.to_string());
            }
        }
        self.show_load_state = true;
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn renderer(&self) -> &Renderer<W> {
        &self.renderer
    }

    pub fn into_renderer(self) -> Renderer<W> {
        self.renderer
    }

    /// 处理一条命令
    pub fn handle(&mut self, command: Command) -> Result<Flow> {
        debug!("命令: {:?}", command);
        match command {
            Command::SelectCard(selection) => self.select_card(&selection)?,
            Command::SelectPart(selection) => self.select_part(&selection)?,
            Command::Search(query) => self.search(query)?,
            Command::ToggleFavorite(number) => {
                self.toggle_favorite(number)?;
            }
            Command::Play(number) => self.play(number)?,
            Command::Stop => {
                self.audio.stop();
            }
            Command::ToggleTheme => self.toggle_theme()?,
            Command::Refresh => self.redraw()?,
            Command::Help => self.renderer.notice(HELP)?,
            Command::Quit => {
                self.audio.stop();
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    /// 按卡片编号或序号（从 1 开始）选择卡片
    pub fn select_card(&mut self, selection: &str) -> Result<()> {
        let card_id = match selection.parse::<usize>() {
            Ok(n) => self
                .store
                .cards()
                .get(n.wrapping_sub(1))
                .map(|card| card.card_id.clone())
                .unwrap_or_else(|| selection.to_string()),
            Err(_) => selection.to_string(),
        };
        info!("📇 选择卡片: {}", card_id);
        self.session.select_card(card_id);
        self.navigated()
    }

    /// 按部分编号选择；纯数字 `n` 视为 `Part n`
    pub fn select_part(&mut self, selection: &str) -> Result<()> {
        let part = if !selection.is_empty() && selection.chars().all(|c| c.is_ascii_digit()) {
            format!("Part {}", selection)
        } else {
            selection.to_string()
        };
        info!("📑 选择部分: {}", part);
        self.session.select_part(part);
        self.navigated()
    }

    /// 每次输入都立即重新过滤
    pub fn search(&mut self, query: impl Into<String>) -> Result<()> {
        self.session.set_search(query);
        self.navigated()
    }

    pub fn toggle_theme(&mut self) -> Result<()> {
        let theme = self.session.toggle_theme();
        info!("🎨 主题: {}", theme);
        self.redraw()
    }

    /// 切换屏幕上第 `number` 张卡片的收藏，返回切换后的状态；编号无效时返回 None
    pub fn toggle_favorite(&mut self, number: usize) -> Result<Option<bool>> {
        let Some(id) = self.renderer.displayed(number).cloned() else {
            self.renderer.notice(&format!("#{} topilmadi", number))?;
            return Ok(None);
        };
        let now_favorite = self.session.toggle_favorite(&id);
        debug!("收藏 {} → {}", id, now_favorite);
        self.renderer.render_favorite(number, now_favorite)?;
        Ok(Some(now_favorite))
    }

    /// 朗读屏幕上第 `number` 张卡片：先问题，读完再读答案
    pub fn play(&mut self, number: usize) -> Result<()> {
        let Some(record) = self
            .renderer
            .displayed(number)
            .and_then(|id| self.find_record(id))
        else {
            self.renderer.notice(&format!("#{} topilmadi", number))?;
            return Ok(());
        };

        let texts: Vec<String> = [record.question_text.as_deref(), record.answer.spoken_text()]
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect();
        self.audio.speak_sequence(texts);
        Ok(())
    }

    pub fn stop_audio(&mut self) -> bool {
        self.audio.stop()
    }

    pub fn is_playing(&self) -> bool {
        self.audio.is_playing()
    }

    pub fn notice(&mut self, message: &str) -> Result<()> {
        self.renderer.notice(message)?;
        Ok(())
    }

    /// 重新过滤并整屏渲染
    pub fn redraw(&mut self) -> Result<()> {
        let view = self.session.view();
        let content = match (&self.load_state, self.show_load_state) {
            (LoadState::Loading, true) => Content::Loading,
            (LoadState::Failed(reason), true) => Content::Failed(reason),
            _ => {
                let outcome = filter(
                    self.store.records(),
                    &view.selected_card,
                    &view.selected_part,
                    &view.search_query,
                );
                match outcome.empty_reason() {
                    Some(reason) => Content::Empty(reason),
                    None => Content::Records(outcome.records),
                }
            }
        };

        let frame = Frame {
            cards: self.store.cards(),
            parts: self.store.parts(),
            view,
            favorites: self.session.favorites(),
            content,
        };
        self.renderer.render(&frame)?;
        Ok(())
    }

    fn navigated(&mut self) -> Result<()> {
        self.show_load_state = false;
        self.redraw()
    }

    fn find_record(&self, id: &QuestionId) -> Option<&crate::models::QuestionRecord> {
        self.store.records().iter().find(|r| &r.id == id)
    }
}
