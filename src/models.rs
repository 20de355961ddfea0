use crate::core::GameSession;
use crate::render::RenderContext;
use crate::scores::ScoreRecord;

pub struct GameRenderState<'a> {
    pub session: &'a GameSession,
    pub view: &'a RenderContext,
    pub level_count: usize,
    pub unlocked: usize,
    pub scores: &'a [ScoreRecord],
    pub name_input: Option<&'a str>,
    pub can_submit: bool,
    pub status: Option<&'a str>,
}
