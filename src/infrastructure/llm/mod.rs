mod candle_qwen_generator;
mod openai_chat_generator;

pub use candle_qwen_generator::CandleQwenGenerator;
pub use openai_chat_generator::{
    ChatTurn, DEFAULT_OPENAI_CHAT_MODEL, OpenAiChatGenerator, split_chatml,
};
